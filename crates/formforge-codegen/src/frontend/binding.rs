//! How field values are wired to form state, per form library.

use crate::plan::{PlannedCondition, PlannedField};
use crate::text::js_str;
use formforge_core::{FieldKind, FormLibrary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    /// `useFormik` with controlled values, touched and error state.
    Formik,
    /// `useForm` with `register` and `formState.errors`.
    HookForm,
    /// `useState` values and one form-level error.
    Controlled,
}

impl From<FormLibrary> for Binding {
    fn from(library: FormLibrary) -> Self {
        match library {
            FormLibrary::Formik => Self::Formik,
            FormLibrary::ReactHookForm => Self::HookForm,
            FormLibrary::None => Self::Controlled,
        }
    }
}

impl Binding {
    /// Expression reading a field's current value.
    pub(crate) fn value_expr(self, ident: &str) -> String {
        match self {
            Self::Formik => format!("formik.values.{ident}"),
            Self::HookForm => format!("watch({})", js_str(ident)),
            Self::Controlled => format!("values.{ident}"),
        }
    }

    fn register(ident: &str, kind: FieldKind, mui: bool) -> String {
        let helper = if mui { "muiRegister" } else { "register" };
        if kind == FieldKind::Number {
            format!("{{...{helper}({}, {{ valueAsNumber: true }})}}", js_str(ident))
        } else {
            format!("{{...{helper}({})}}", js_str(ident))
        }
    }

    /// Attributes binding an input, textarea, or single select.
    pub(crate) fn control_attrs(self, field: &PlannedField, mui: bool) -> String {
        let ident = &field.ident;
        let value = if field.kind == FieldKind::Date {
            format!("String({} ?? '')", self.value_expr(ident))
        } else {
            self.value_expr(ident)
        };
        match self {
            Self::Formik => format!(
                "name=\"{ident}\" value={{{value}}} onChange={{formik.handleChange}} onBlur={{formik.handleBlur}}"
            ),
            Self::HookForm => Self::register(ident, field.kind, mui),
            Self::Controlled => format!("name=\"{ident}\" value={{{value}}} onChange={{handleChange}}"),
        }
    }

    pub(crate) fn checkbox_attrs(self, field: &PlannedField, mui: bool) -> String {
        let ident = &field.ident;
        match self {
            Self::Formik => format!(
                "name=\"{ident}\" checked={{formik.values.{ident}}} onChange={{formik.handleChange}} onBlur={{formik.handleBlur}}"
            ),
            Self::HookForm => Self::register(ident, field.kind, mui),
            Self::Controlled => {
                format!("name=\"{ident}\" checked={{values.{ident}}} onChange={{handleChange}}")
            }
        }
    }

    /// Attributes on one native radio input.
    pub(crate) fn radio_attrs(self, field: &PlannedField, option_value: &str) -> String {
        let ident = &field.ident;
        let literal = js_str(option_value);
        let value_attr = crate::text::jsx_attr(option_value);
        match self {
            Self::Formik => format!(
                "name=\"{ident}\" value={value_attr} checked={{formik.values.{ident} === {literal}}} onChange={{formik.handleChange}}"
            ),
            Self::HookForm => format!("{} value={value_attr}", Self::register(ident, field.kind, false)),
            Self::Controlled => format!(
                "name=\"{ident}\" value={value_attr} checked={{values.{ident} === {literal}}} onChange={{handleChange}}"
            ),
        }
    }

    /// Attributes on a Material `RadioGroup`; hook-form registers each
    /// `Radio` instead.
    pub(crate) fn radio_group_attrs(self, field: &PlannedField) -> Option<String> {
        match self {
            Self::HookForm => None,
            _ => Some(self.control_attrs(field, true)),
        }
    }

    /// Attributes on a native multiple select.
    pub(crate) fn multi_attrs(self, field: &PlannedField) -> String {
        let ident = &field.ident;
        let selected = "Array.from(e.target.selectedOptions, (o) => o.value)";
        match self {
            Self::Formik => format!(
                "name=\"{ident}\" multiple value={{formik.values.{ident}}} onChange={{(e) => formik.setFieldValue('{ident}', {selected})}}"
            ),
            Self::HookForm => format!("multiple {}", Self::register(ident, field.kind, false)),
            Self::Controlled => format!(
                "name=\"{ident}\" multiple value={{values.{ident}}} onChange={{(e) => setValues((prev) => ({{ ...prev, {ident}: {selected} }}))}}"
            ),
        }
    }

    /// Boolean expression true when the field should show an error.
    pub(crate) fn invalid_expr(self, ident: &str) -> Option<String> {
        match self {
            Self::Formik => Some(format!(
                "Boolean(formik.touched.{ident} && formik.errors.{ident})"
            )),
            Self::HookForm => Some(format!("!!errors.{ident}")),
            Self::Controlled => None,
        }
    }

    /// Expression for the field's error message.
    pub(crate) fn error_expr(self, ident: &str) -> Option<String> {
        match self {
            Self::Formik => Some(format!("formik.errors.{ident}")),
            Self::HookForm => Some(format!("errors.{ident}?.message")),
            Self::Controlled => None,
        }
    }

    /// Expression passed to the form's `onSubmit`.
    pub(crate) fn submit_handler(self) -> &'static str {
        match self {
            Self::Formik => "formik.handleSubmit",
            Self::HookForm => "handleSubmit((values) => onSubmit(values))",
            Self::Controlled => "handleSubmit",
        }
    }
}

/// Visibility test for a planned condition.
pub(crate) fn condition_expr(condition: &PlannedCondition, binding: Binding) -> String {
    condition.js_test(&binding.value_expr(&condition.source_ident))
}
