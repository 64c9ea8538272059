//! Field block markup per styling.

use super::binding::Binding;
use crate::plan::{FormPlan, PlannedField};
use crate::text::{jsx_attr, jsx_text};
use formforge_core::mapping::html_input_type;
use formforge_core::{FieldKind, NumericBounds, RuleValue, Styling};
use std::collections::BTreeSet;

const SUBMIT_LABEL: &str = "{isLoading ? 'Submitting...' : 'Submit'}";

/// Class names for the plain-markup stylings.
struct Classes {
    form: &'static str,
    wrapper: &'static str,
    label: &'static str,
    control: &'static str,
    check_label: &'static str,
    check_input: &'static str,
    radio_group: &'static str,
    error: &'static str,
    button: &'static str,
}

const TAILWIND: Classes = Classes {
    form: "mx-auto max-w-lg space-y-4",
    wrapper: "mb-4",
    label: "block text-sm font-medium text-gray-700",
    control: "mt-1 block w-full rounded-md border border-gray-300 px-3 py-2 shadow-sm focus:border-indigo-500 focus:outline-none focus:ring-1 focus:ring-indigo-500",
    check_label: "inline-flex items-center gap-2 text-sm text-gray-700",
    check_input: "h-4 w-4 rounded border-gray-300",
    radio_group: "mt-1 flex gap-4",
    error: "mt-1 text-sm text-red-600",
    button: "rounded-md bg-indigo-600 px-4 py-2 text-white hover:bg-indigo-700 disabled:opacity-50",
};

const PLAIN_CSS: Classes = Classes {
    form: "form-container",
    wrapper: "form-field",
    label: "form-label",
    control: "form-control",
    check_label: "form-check",
    check_input: "form-check-input",
    radio_group: "form-radio-group",
    error: "form-error",
    button: "form-submit",
};

/// Label text with the required marker.
fn label_text(field: &PlannedField) -> String {
    if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    }
}

fn placeholder_attr(field: &PlannedField) -> String {
    field
        .placeholder
        .as_deref()
        .map(|p| format!(" placeholder={}", jsx_attr(p)))
        .unwrap_or_default()
}

fn bound_pairs(bounds: Option<&NumericBounds>) -> Vec<(&'static str, String)> {
    let Some(bounds) = bounds else {
        return Vec::new();
    };
    [("min", bounds.min), ("max", bounds.max), ("step", bounds.step)]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| (name, RuleValue::Number(v).to_string())))
        .collect()
}

fn bounds_attrs(field: &PlannedField) -> String {
    bound_pairs(field.bounds.as_ref())
        .into_iter()
        .map(|(name, v)| format!(" {name}={{{v}}}"))
        .collect()
}

/// Markup for one field, without visibility wrapping.
pub(crate) fn field_block(field: &PlannedField, binding: Binding, styling: Styling) -> String {
    match styling {
        Styling::Bootstrap => bootstrap_block(field, binding),
        Styling::Tailwind => native_block(field, binding, &TAILWIND),
        Styling::Css => native_block(field, binding, &PLAIN_CSS),
        Styling::Material => material_block(field, binding),
    }
}

fn option_lines(field: &PlannedField, tag: &str, with_empty: bool) -> String {
    let mut code = String::new();
    if with_empty {
        code.push_str(&format!("  <{tag} value=\"\">Select...</{tag}>\n"));
    }
    for option in &field.options {
        code.push_str(&format!(
            "  <{tag} value={}>{}</{tag}>\n",
            jsx_attr(&option.value),
            jsx_text(&option.label)
        ));
    }
    code
}

fn bootstrap_block(field: &PlannedField, binding: Binding) -> String {
    let ident = &field.ident;
    let invalid = binding.invalid_expr(ident);
    let is_invalid = invalid
        .as_deref()
        .map(|e| format!(" isInvalid={{{e}}}"))
        .unwrap_or_default();
    let feedback = binding.error_expr(ident).map(|e| {
        format!("  <Form.Control.Feedback type=\"invalid\">{{{e}}}</Form.Control.Feedback>\n")
    });
    let inline_error = match (&invalid, binding.error_expr(ident)) {
        (Some(i), Some(e)) => format!("  {{{i} && <div className=\"invalid-feedback d-block\">{{{e}}}</div>}}\n"),
        _ => String::new(),
    };

    let mut code = String::new();
    match field.kind {
        FieldKind::Checkbox => {
            code.push_str(&format!("<Form.Group className=\"mb-3\" controlId=\"{ident}\">\n"));
            code.push_str(&format!(
                "  <Form.Check type=\"checkbox\" label={} {}{is_invalid} />\n",
                jsx_attr(&label_text(field)),
                binding.checkbox_attrs(field, false)
            ));
            code.push_str(&inline_error);
        }
        FieldKind::Radio => {
            code.push_str("<Form.Group className=\"mb-3\">\n");
            code.push_str(&format!("  <Form.Label>{}</Form.Label>\n", jsx_text(&label_text(field))));
            code.push_str("  <div>\n");
            for (i, option) in field.options.iter().enumerate() {
                code.push_str(&format!(
                    "    <Form.Check inline type=\"radio\" id=\"{ident}-{i}\" label={} {}{is_invalid} />\n",
                    jsx_attr(&option.label),
                    binding.radio_attrs(field, &option.value)
                ));
            }
            code.push_str("  </div>\n");
            code.push_str(&inline_error);
        }
        kind => {
            code.push_str(&format!("<Form.Group className=\"mb-3\" controlId=\"{ident}\">\n"));
            code.push_str(&format!("  <Form.Label>{}</Form.Label>\n", jsx_text(&label_text(field))));
            match kind {
                FieldKind::Select | FieldKind::MultiSelect => {
                    let (attrs, with_empty) = if kind == FieldKind::MultiSelect {
                        (binding.multi_attrs(field), false)
                    } else {
                        (binding.control_attrs(field, false), true)
                    };
                    code.push_str(&format!("  <Form.Select {attrs}{is_invalid}>\n"));
                    code.push_str(&crate::text::indent(&option_lines(field, "option", with_empty), 2));
                    code.push_str("\n  </Form.Select>\n");
                }
                FieldKind::Textarea => code.push_str(&format!(
                    "  <Form.Control as=\"textarea\" rows={{3}} {}{}{is_invalid} />\n",
                    binding.control_attrs(field, false),
                    placeholder_attr(field)
                )),
                _ => code.push_str(&format!(
                    "  <Form.Control type=\"{}\" {}{}{}{is_invalid} />\n",
                    html_input_type(kind),
                    binding.control_attrs(field, false),
                    placeholder_attr(field),
                    bounds_attrs(field)
                )),
            }
            if let Some(feedback) = feedback {
                code.push_str(&feedback);
            }
        }
    }
    code.push_str("</Form.Group>");
    code
}

fn native_block(field: &PlannedField, binding: Binding, classes: &Classes) -> String {
    let ident = &field.ident;
    let error = match (binding.invalid_expr(ident), binding.error_expr(ident)) {
        (Some(i), Some(e)) => format!("  {{{i} && <p className=\"{}\">{{{e}}}</p>}}\n", classes.error),
        _ => String::new(),
    };
    let label = jsx_text(&label_text(field));

    let mut code = format!("<div className=\"{}\">\n", classes.wrapper);
    match field.kind {
        FieldKind::Checkbox => {
            code.push_str(&format!("  <label className=\"{}\">\n", classes.check_label));
            code.push_str(&format!(
                "    <input type=\"checkbox\" id=\"{ident}\" className=\"{}\" {} />\n",
                classes.check_input,
                binding.checkbox_attrs(field, false)
            ));
            code.push_str(&format!("    <span>{label}</span>\n"));
            code.push_str("  </label>\n");
        }
        FieldKind::Radio => {
            code.push_str(&format!("  <span className=\"{}\">{label}</span>\n", classes.label));
            code.push_str(&format!("  <div className=\"{}\">\n", classes.radio_group));
            for (i, option) in field.options.iter().enumerate() {
                code.push_str(&format!("    <label className=\"{}\">\n", classes.check_label));
                code.push_str(&format!(
                    "      <input type=\"radio\" id=\"{ident}-{i}\" {} />\n",
                    binding.radio_attrs(field, &option.value)
                ));
                code.push_str(&format!("      <span>{}</span>\n", jsx_text(&option.label)));
                code.push_str("    </label>\n");
            }
            code.push_str("  </div>\n");
        }
        kind => {
            code.push_str(&format!(
                "  <label htmlFor=\"{ident}\" className=\"{}\">{label}</label>\n",
                classes.label
            ));
            match kind {
                FieldKind::Select | FieldKind::MultiSelect => {
                    let (attrs, with_empty) = if kind == FieldKind::MultiSelect {
                        (binding.multi_attrs(field), false)
                    } else {
                        (binding.control_attrs(field, false), true)
                    };
                    code.push_str(&format!(
                        "  <select id=\"{ident}\" className=\"{}\" {attrs}>\n",
                        classes.control
                    ));
                    code.push_str(&crate::text::indent(&option_lines(field, "option", with_empty), 2));
                    code.push_str("\n  </select>\n");
                }
                FieldKind::Textarea => code.push_str(&format!(
                    "  <textarea id=\"{ident}\" rows={{3}} className=\"{}\" {}{} />\n",
                    classes.control,
                    binding.control_attrs(field, false),
                    placeholder_attr(field)
                )),
                _ => code.push_str(&format!(
                    "  <input type=\"{}\" id=\"{ident}\" className=\"{}\" {}{}{} />\n",
                    html_input_type(kind),
                    classes.control,
                    binding.control_attrs(field, false),
                    placeholder_attr(field),
                    bounds_attrs(field)
                )),
            }
        }
    }
    code.push_str(&error);
    code.push_str("</div>");
    code
}

fn material_block(field: &PlannedField, binding: Binding) -> String {
    let ident = &field.ident;
    let invalid = binding.invalid_expr(ident);
    let error = binding.error_expr(ident);
    let helper = match (&invalid, &error) {
        (Some(i), Some(e)) => format!("  {{{i} && <FormHelperText>{{{e}}}</FormHelperText>}}\n"),
        _ => String::new(),
    };
    let control_error = invalid
        .as_deref()
        .map(|i| format!(" error={{{i}}}"))
        .unwrap_or_default();

    match field.kind {
        FieldKind::Checkbox => {
            let mut code = format!("<FormControl margin=\"normal\"{control_error}>\n");
            code.push_str(&format!(
                "  <FormControlLabel control={{<Checkbox {} />}} label={} />\n",
                binding.checkbox_attrs(field, true),
                jsx_attr(&label_text(field))
            ));
            code.push_str(&helper);
            code.push_str("</FormControl>");
            code
        }
        FieldKind::Radio => {
            let mut code = format!("<FormControl margin=\"normal\"{control_error}>\n");
            code.push_str(&format!(
                "  <FormLabel id=\"{ident}-label\">{}</FormLabel>\n",
                jsx_text(&label_text(field))
            ));
            let group_attrs = binding
                .radio_group_attrs(field)
                .map(|a| format!(" {a}"))
                .unwrap_or_default();
            code.push_str(&format!("  <RadioGroup row aria-labelledby=\"{ident}-label\"{group_attrs}>\n"));
            let radio_attrs = if binding == Binding::HookForm {
                format!(" {{...muiRegister('{ident}')}}")
            } else {
                String::new()
            };
            for option in &field.options {
                code.push_str(&format!(
                    "    <FormControlLabel value={} control={{<Radio{radio_attrs} />}} label={} />\n",
                    jsx_attr(&option.value),
                    jsx_attr(&option.label)
                ));
            }
            code.push_str("  </RadioGroup>\n");
            code.push_str(&helper);
            code.push_str("</FormControl>");
            code
        }
        kind => {
            let mut attrs = vec![
                format!("id=\"{ident}\""),
                format!("label={}", jsx_attr(&label_text(field))),
                "fullWidth".to_string(),
                "margin=\"normal\"".to_string(),
            ];
            match kind {
                FieldKind::Textarea => attrs.push("multiline rows={3}".to_string()),
                FieldKind::Select => attrs.push("select".to_string()),
                FieldKind::MultiSelect => attrs.push("select SelectProps={{ multiple: true }}".to_string()),
                FieldKind::Text => {}
                other => attrs.push(format!("type=\"{}\"", html_input_type(other))),
            }
            if kind == FieldKind::Date {
                attrs.push("InputLabelProps={{ shrink: true }}".to_string());
            }
            let bounds = bound_pairs(field.bounds.as_ref());
            if !bounds.is_empty() {
                let inner: Vec<String> = bounds.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                attrs.push(format!("inputProps={{{{ {} }}}}", inner.join(", ")));
            }
            if let Some(p) = &field.placeholder {
                attrs.push(format!("placeholder={}", jsx_attr(p)));
            }
            if binding == Binding::HookForm && kind == FieldKind::MultiSelect {
                attrs.push("defaultValue={[]}".to_string());
            } else if binding == Binding::HookForm && kind == FieldKind::Select {
                attrs.push("defaultValue=\"\"".to_string());
            }
            attrs.push(binding.control_attrs(field, true));
            if let (Some(i), Some(e)) = (&invalid, &error) {
                attrs.push(format!("error={{{i}}}"));
                attrs.push(format!("helperText={{{i} ? {e} : undefined}}"));
            }

            let mut code = String::from("<TextField\n");
            for attr in &attrs {
                code.push_str(&format!("  {attr}\n"));
            }
            if kind.has_choices() {
                code.push_str(">\n");
                code.push_str(&option_lines(field, "MenuItem", kind == FieldKind::Select));
                code.push_str("</TextField>");
            } else {
                code.push_str("/>");
            }
            code
        }
    }
}

/// Opening and closing tags of the form element.
pub(crate) fn form_tags(styling: Styling, binding: Binding) -> (String, &'static str) {
    let submit = binding.submit_handler();
    match styling {
        Styling::Bootstrap => (format!("<Form noValidate onSubmit={{{submit}}}>"), "</Form>"),
        Styling::Material => (
            format!("<Box component=\"form\" noValidate onSubmit={{{submit}}}>"),
            "</Box>",
        ),
        Styling::Tailwind => (
            format!("<form className=\"{}\" noValidate onSubmit={{{submit}}}>", TAILWIND.form),
            "</form>",
        ),
        Styling::Css => (
            format!("<form className=\"{}\" noValidate onSubmit={{{submit}}}>", PLAIN_CSS.form),
            "</form>",
        ),
    }
}

pub(crate) fn submit_button(styling: Styling) -> String {
    match styling {
        Styling::Bootstrap => format!(
            "<Button type=\"submit\" variant=\"primary\" disabled={{isLoading}}>\n  {SUBMIT_LABEL}\n</Button>"
        ),
        Styling::Material => format!(
            "<Button type=\"submit\" variant=\"contained\" disabled={{isLoading}}>\n  {SUBMIT_LABEL}\n</Button>"
        ),
        Styling::Tailwind => format!(
            "<button type=\"submit\" className=\"{}\" disabled={{isLoading}}>\n  {SUBMIT_LABEL}\n</button>",
            TAILWIND.button
        ),
        Styling::Css => format!(
            "<button type=\"submit\" className=\"{}\" disabled={{isLoading}}>\n  {SUBMIT_LABEL}\n</button>",
            PLAIN_CSS.button
        ),
    }
}

/// Form-level error shown by the controlled binding.
pub(crate) fn form_error(styling: Styling) -> String {
    match styling {
        Styling::Bootstrap => {
            "{formError && (\n  <div className=\"alert alert-danger\" role=\"alert\">\n    {formError}\n  </div>\n)}".to_string()
        }
        Styling::Material => "{formError && <Alert severity=\"error\">{formError}</Alert>}".to_string(),
        Styling::Tailwind => format!(
            "{{formError && (\n  <p className=\"{}\" role=\"alert\">\n    {{formError}}\n  </p>\n)}}",
            TAILWIND.error
        ),
        Styling::Css => format!(
            "{{formError && (\n  <p className=\"{}\" role=\"alert\">\n    {{formError}}\n  </p>\n)}}",
            PLAIN_CSS.error
        ),
    }
}

/// Import lines for the styling's component library.
pub(crate) fn style_imports(plan: &FormPlan, styling: Styling, binding: Binding, component: &str) -> String {
    match styling {
        Styling::Bootstrap => "import { Button, Form } from 'react-bootstrap';\nimport 'bootstrap/dist/css/bootstrap.min.css';\n".to_string(),
        Styling::Tailwind => String::new(),
        Styling::Css => format!("import './{component}.css';\n"),
        Styling::Material => {
            let mut names: BTreeSet<&str> = BTreeSet::from(["Box", "Button"]);
            let surfaces_errors = binding != Binding::Controlled;
            for field in &plan.fields {
                match field.kind {
                    FieldKind::Checkbox => {
                        names.extend(["Checkbox", "FormControl", "FormControlLabel"]);
                        if surfaces_errors {
                            names.insert("FormHelperText");
                        }
                    }
                    FieldKind::Radio => {
                        names.extend(["FormControl", "FormControlLabel", "FormLabel", "Radio", "RadioGroup"]);
                        if surfaces_errors {
                            names.insert("FormHelperText");
                        }
                    }
                    FieldKind::Select | FieldKind::MultiSelect => {
                        names.extend(["MenuItem", "TextField"]);
                    }
                    _ => {
                        names.insert("TextField");
                    }
                }
            }
            if binding == Binding::Controlled {
                names.insert("Alert");
            }
            let names: Vec<&str> = names.into_iter().collect();
            format!("import {{ {} }} from '@mui/material';\n", names.join(", "))
        }
    }
}

/// Stylesheet for the `css` styling.
pub(crate) fn stylesheet() -> String {
    let mut css = String::new();
    css.push_str(".form-container {\n  max-width: 640px;\n  margin: 0 auto;\n}\n\n");
    css.push_str(".form-field {\n  margin-bottom: 1rem;\n}\n\n");
    css.push_str(".form-label {\n  display: block;\n  margin-bottom: 0.25rem;\n  font-weight: 600;\n}\n\n");
    css.push_str(".form-control {\n  width: 100%;\n  box-sizing: border-box;\n  padding: 0.5rem 0.75rem;\n  border: 1px solid #ced4da;\n  border-radius: 4px;\n}\n\n");
    css.push_str(".form-check {\n  display: inline-flex;\n  align-items: center;\n  gap: 0.5rem;\n}\n\n");
    css.push_str(".form-radio-group {\n  display: flex;\n  gap: 1rem;\n}\n\n");
    css.push_str(".form-error {\n  margin-top: 0.25rem;\n  color: #dc3545;\n  font-size: 0.875rem;\n}\n\n");
    css.push_str(".form-submit {\n  padding: 0.5rem 1rem;\n  border: none;\n  border-radius: 4px;\n  background: #0d6efd;\n  color: #fff;\n  cursor: pointer;\n}\n\n");
    css.push_str(".form-submit:disabled {\n  opacity: 0.6;\n  cursor: not-allowed;\n}\n");
    css
}
