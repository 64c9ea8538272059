//! React form component emission.
//!
//! The component is built from independent pieces: imports, the
//! `FormData` interface, the validation schema, an error-collecting helper
//! when the form library cannot consume the schema directly, the props
//! interface, initial values, and the field blocks. Each piece is a plain
//! string; the component is their concatenation.

mod binding;
mod style;
mod testfile;

pub use testfile::emit_frontend_tests;

use crate::manifest;
use crate::plan::{FormPlan, PlannedField};
use crate::text::{indent, js_str};
use crate::validation::{CLASS_NAME, emit_validation_schema, validation_import};
use binding::{Binding, condition_expr};
use formforge_core::mapping::{mapping, ts_type};
use formforge_core::{
    Category, FieldKind, GeneratedFile, GenerationOptions, GenerationResult, Language, RuleValue,
    Styling, ValidationLibrary,
};

/// Directory of the generated component inside the archive.
pub(crate) const COMPONENT_DIR: &str = "frontend/src/components";

/// Emit the component, its stylesheet when needed, and `package.json`.
///
/// `options` are expected to be resolved (see
/// [`GenerationOptions::resolve`]).
pub fn emit_frontend(plan: &FormPlan, options: &GenerationOptions) -> GenerationResult<Vec<GeneratedFile>> {
    let component = plan.project.component();
    let typescript = options.template.is_typescript();
    let language = if typescript {
        Language::TypeScript
    } else {
        Language::JavaScript
    };

    let mut files = vec![
        GeneratedFile::new(
            format!("{component}.{}", options.template.component_extension()),
            emit_component(plan, options),
            language,
            Category::Frontend,
        )
        .at(COMPONENT_DIR),
    ];

    if options.styling == Styling::Css {
        files.push(
            GeneratedFile::new(
                format!("{component}.css"),
                style::stylesheet(),
                Language::Css,
                Category::Frontend,
            )
            .at(COMPONENT_DIR),
        );
    }

    files.push(
        GeneratedFile::new(
            "package.json",
            manifest::frontend_package_json(plan, options)?,
            Language::Json,
            Category::Frontend,
        )
        .at("frontend"),
    );

    tracing::debug!(
        component = %component,
        fields = plan.fields.len(),
        files = files.len(),
        "emitted frontend"
    );
    Ok(files)
}

/// Source of the component file.
#[must_use]
pub fn emit_component(plan: &FormPlan, options: &GenerationOptions) -> String {
    let component = plan.project.component();
    let typescript = options.template.is_typescript();
    let binding = Binding::from(options.form_library);
    let library = options.validation_library;
    let styling = options.styling;
    let collects_errors = needs_collector(binding, library);

    let mut code = String::new();
    code.push_str(&imports(plan, options, binding, collects_errors));
    code.push('\n');

    if typescript {
        code.push_str(&form_data_interface(plan));
        code.push('\n');
    }

    code.push_str(&emit_validation_schema(plan, library));
    code.push('\n');

    if collects_errors {
        code.push_str(&collector(library, typescript));
        code.push('\n');
    }

    if typescript {
        code.push_str(&format!("interface {component}Props {{\n"));
        code.push_str("  onSubmit: (values: FormData) => void;\n");
        code.push_str("  initialValues?: Partial<FormData>;\n");
        code.push_str("  isLoading?: boolean;\n");
        code.push_str("}\n\n");
    }

    code.push_str(&default_values(plan, typescript));
    code.push('\n');

    if typescript {
        code.push_str(&format!(
            "const {component}: React.FC<{component}Props> = ({{ onSubmit, initialValues, isLoading = false }}) => {{\n"
        ));
    } else {
        code.push_str(&format!(
            "const {component} = ({{ onSubmit, initialValues, isLoading = false }}) => {{\n"
        ));
    }
    code.push_str(&setup(plan, binding, library, styling, typescript));
    code.push('\n');
    code.push_str("  return (\n");
    code.push_str(&indent(&form_body(plan, binding, styling), 4));
    code.push_str("\n  );\n");
    code.push_str("};\n\n");
    code.push_str(&format!("export default {component};\n"));
    code
}

/// Whether the component needs its own error-collecting helper.
fn needs_collector(binding: Binding, library: ValidationLibrary) -> bool {
    match binding {
        Binding::Formik => library != ValidationLibrary::Yup,
        Binding::HookForm => false,
        Binding::Controlled => true,
    }
}

fn resolver(library: ValidationLibrary) -> (&'static str, &'static str) {
    match library {
        ValidationLibrary::Yup => ("yupResolver", "yup"),
        ValidationLibrary::Zod => ("zodResolver", "zod"),
        ValidationLibrary::Joi => ("joiResolver", "joi"),
        ValidationLibrary::ClassValidator => ("classValidatorResolver", "class-validator"),
    }
}

fn imports(plan: &FormPlan, options: &GenerationOptions, binding: Binding, collects_errors: bool) -> String {
    let mut code = String::new();
    let material = options.styling == Styling::Material;
    let typescript = options.template.is_typescript();

    if binding == Binding::Controlled {
        code.push_str("import React, { useState } from 'react';\n");
    } else {
        code.push_str("import React from 'react';\n");
    }

    match binding {
        Binding::Formik => code.push_str("import { useFormik } from 'formik';\n"),
        Binding::HookForm => {
            if material && typescript {
                code.push_str("import { useForm, type RegisterOptions } from 'react-hook-form';\n");
            } else {
                code.push_str("import { useForm } from 'react-hook-form';\n");
            }
            let (name, module) = resolver(options.validation_library);
            code.push_str(&format!("import {{ {name} }} from '@hookform/resolvers/{module}';\n"));
        }
        Binding::Controlled => {}
    }

    code.push_str(&validation_import(
        plan,
        options.validation_library,
        collects_errors,
    ));
    code.push_str(&style::style_imports(
        plan,
        options.styling,
        binding,
        &plan.project.component(),
    ));
    code
}

fn form_data_interface(plan: &FormPlan) -> String {
    if plan.fields.is_empty() {
        return "type FormData = Record<string, never>;\n".to_string();
    }
    let mut code = String::from("interface FormData {\n");
    for field in &plan.fields {
        code.push_str(&format!("  {}: {};\n", field.ident, ts_type(field.kind)));
    }
    code.push_str("}\n");
    code
}

/// Initial value literal for a field.
fn initial_value(field: &PlannedField) -> String {
    let fallback = mapping(field.kind).initial_value.to_string();
    let Some(value) = &field.default_value else {
        return fallback;
    };
    match (field.kind, value) {
        (FieldKind::Checkbox, RuleValue::Bool(b)) => b.to_string(),
        (FieldKind::Checkbox, RuleValue::Text(s)) => {
            (s.trim().eq_ignore_ascii_case("true")).to_string()
        }
        (FieldKind::Number, v) => v.as_f64().map_or(fallback, |n| RuleValue::Number(n).to_string()),
        (FieldKind::MultiSelect, RuleValue::Text(s)) if !s.is_empty() => format!("[{}]", js_str(s)),
        (FieldKind::MultiSelect | FieldKind::Checkbox, _) => fallback,
        (_, v) => js_str(&v.to_string()),
    }
}

fn default_values(plan: &FormPlan, typescript: bool) -> String {
    let annotation = if typescript { ": FormData" } else { "" };
    if plan.fields.is_empty() {
        return format!("const defaultValues{annotation} = {{}};\n");
    }
    let mut code = format!("const defaultValues{annotation} = {{\n");
    for field in &plan.fields {
        code.push_str(&format!("  {}: {},\n", field.ident, initial_value(field)));
    }
    code.push_str("};\n");
    code
}

/// `collectErrors(values)`: field name to first message.
fn collector(library: ValidationLibrary, typescript: bool) -> String {
    let (params, record) = if typescript {
        ("values: FormData", ": Record<string, string>")
    } else {
        ("values", "")
    };

    let mut code = format!("const collectErrors = ({params}){record} => {{\n");
    match library {
        ValidationLibrary::Yup => {
            let inner = if typescript {
                "(err as Yup.ValidationError).inner"
            } else {
                "(err.inner || [])"
            };
            code.push_str("  try {\n");
            code.push_str("    validationSchema.validateSync(values, { abortEarly: false });\n");
            code.push_str("    return {};\n");
            code.push_str("  } catch (err) {\n");
            code.push_str(&format!("    const errors{record} = {{}};\n"));
            code.push_str(&format!("    {inner}.forEach((issue) => {{\n"));
            code.push_str("      if (issue.path && !errors[issue.path]) errors[issue.path] = issue.message;\n");
            code.push_str("    });\n");
            code.push_str("    return errors;\n");
            code.push_str("  }\n");
        }
        ValidationLibrary::Zod => {
            code.push_str("  const result = validationSchema.safeParse(values);\n");
            code.push_str("  if (result.success) return {};\n");
            code.push_str(&format!("  const errors{record} = {{}};\n"));
            code.push_str("  result.error.issues.forEach((issue) => {\n");
            code.push_str("    const key = String(issue.path[0]);\n");
            code.push_str("    if (!errors[key]) errors[key] = issue.message;\n");
            code.push_str("  });\n");
            code.push_str("  return errors;\n");
        }
        ValidationLibrary::Joi => {
            code.push_str("  const { error } = validationSchema.validate(values, { abortEarly: false });\n");
            code.push_str(&format!("  const errors{record} = {{}};\n"));
            code.push_str("  error?.details.forEach((detail) => {\n");
            code.push_str("    const key = String(detail.path[0]);\n");
            code.push_str("    if (!errors[key]) errors[key] = detail.message;\n");
            code.push_str("  });\n");
            code.push_str("  return errors;\n");
        }
        ValidationLibrary::ClassValidator => {
            code.push_str(&format!(
                "  const instance = Object.assign(new {CLASS_NAME}(), values);\n"
            ));
            code.push_str(&format!("  const errors{record} = {{}};\n"));
            code.push_str("  validateSync(instance).forEach((error) => {\n");
            code.push_str("    const first = Object.values(error.constraints ?? {})[0];\n");
            code.push_str("    if (first) errors[error.property] = first;\n");
            code.push_str("  });\n");
            code.push_str("  return errors;\n");
        }
    }
    code.push_str("};\n");
    code
}

fn setup(
    plan: &FormPlan,
    binding: Binding,
    library: ValidationLibrary,
    styling: Styling,
    typescript: bool,
) -> String {
    let mut code = String::new();
    match binding {
        Binding::Formik => {
            let generic = if typescript { "<FormData>" } else { "" };
            code.push_str(&format!("  const formik = useFormik{generic}({{\n"));
            code.push_str("    initialValues: { ...defaultValues, ...initialValues },\n");
            if library == ValidationLibrary::Yup {
                code.push_str("    validationSchema,\n");
            } else {
                code.push_str("    validate: collectErrors,\n");
            }
            code.push_str("    onSubmit: (values) => onSubmit(values),\n");
            code.push_str("  });\n");
        }
        Binding::HookForm => {
            let generic = if typescript { "<FormData>" } else { "" };
            let (name, _) = resolver(library);
            let argument = if library == ValidationLibrary::ClassValidator {
                CLASS_NAME
            } else {
                "validationSchema"
            };
            code.push_str("  const {\n    register,\n    handleSubmit,\n");
            if plan.has_conditions() {
                code.push_str("    watch,\n");
            }
            code.push_str("    formState: { errors },\n");
            code.push_str(&format!("  }} = useForm{generic}({{\n"));
            code.push_str(&format!("    resolver: {name}({argument}),\n"));
            code.push_str("    defaultValues: { ...defaultValues, ...initialValues },\n");
            code.push_str("  });\n");
            if styling == Styling::Material {
                let signature = if typescript {
                    "(name: keyof FormData, options?: RegisterOptions<FormData>)"
                } else {
                    "(name, options)"
                };
                code.push('\n');
                code.push_str(&format!("  const muiRegister = {signature} => {{\n"));
                code.push_str("    const { ref, ...rest } = register(name, options);\n");
                code.push_str("    return { ...rest, inputRef: ref };\n");
                code.push_str("  };\n");
            }
        }
        Binding::Controlled => {
            if typescript {
                code.push_str("  const [values, setValues] = useState<FormData>({ ...defaultValues, ...initialValues });\n");
                code.push_str("  const [formError, setFormError] = useState<string | null>(null);\n\n");
                code.push_str("  const handleChange = (event: {\n");
                code.push_str("    target: { name: string; value: unknown; type?: string; checked?: boolean };\n");
                code.push_str("  }) => {\n");
            } else {
                code.push_str("  const [values, setValues] = useState({ ...defaultValues, ...initialValues });\n");
                code.push_str("  const [formError, setFormError] = useState(null);\n\n");
                code.push_str("  const handleChange = (event) => {\n");
            }
            code.push_str("    const { name, value, type, checked } = event.target;\n");
            code.push_str("    const next = type === 'checkbox' ? checked : type === 'number' && value !== '' ? Number(value) : value;\n");
            code.push_str("    setValues((prev) => ({ ...prev, [name]: next }));\n");
            code.push_str("  };\n\n");
            if typescript {
                code.push_str("  const handleSubmit = (event: React.FormEvent) => {\n");
            } else {
                code.push_str("  const handleSubmit = (event) => {\n");
            }
            code.push_str("    event.preventDefault();\n");
            code.push_str("    const first = Object.values(collectErrors(values))[0];\n");
            code.push_str("    if (first) {\n");
            code.push_str("      setFormError(first);\n");
            code.push_str("      return;\n");
            code.push_str("    }\n");
            code.push_str("    setFormError(null);\n");
            code.push_str("    onSubmit(values);\n");
            code.push_str("  };\n");
        }
    }
    code
}

fn form_body(plan: &FormPlan, binding: Binding, styling: Styling) -> String {
    let (open, close) = style::form_tags(styling, binding);
    let mut blocks = Vec::with_capacity(plan.fields.len() + 2);

    for field in &plan.fields {
        let block = style::field_block(field, binding, styling);
        let block = match &field.condition {
            Some(condition) => {
                format!(
                    "{{{} && (\n{}\n)}}",
                    condition_expr(condition, binding),
                    indent(&block, 2)
                )
            }
            None => block,
        };
        blocks.push(block);
    }
    if binding == Binding::Controlled {
        blocks.push(style::form_error(styling));
    }
    blocks.push(style::submit_button(styling));

    let body: Vec<String> = blocks.iter().map(|b| indent(b, 2)).collect();
    format!("{open}\n{}\n{close}", body.join("\n\n"))
}

/// Whether a field renders regardless of other values.
pub(crate) fn always_visible(field: &PlannedField) -> bool {
    field.condition.is_none()
}
