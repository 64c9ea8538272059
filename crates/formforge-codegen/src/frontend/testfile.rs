//! Testing Library suite for the generated component.

use super::always_visible;
use crate::plan::FormPlan;
use crate::text::js_str;
use formforge_core::{Category, GeneratedFile, GenerationOptions, Language};

/// Emit `{Component}.test.tsx` (or `.jsx`) into the tests category.
#[must_use]
pub fn emit_frontend_tests(plan: &FormPlan, options: &GenerationOptions) -> GeneratedFile {
    let component = plan.project.component();
    let extension = options.template.component_extension();
    let language = if options.template.is_typescript() {
        Language::TypeScript
    } else {
        Language::JavaScript
    };

    let mut code = String::new();
    code.push_str("import React from 'react';\n");
    code.push_str("import { fireEvent, render, screen, waitFor } from '@testing-library/react';\n");
    code.push_str("import '@testing-library/jest-dom';\n");
    code.push_str(&format!("import {component} from '../components/{component}';\n\n"));

    code.push_str(&format!("describe('{component}', () => {{\n"));

    code.push_str("  it('renders every field', () => {\n");
    code.push_str(&format!("    render(<{component} onSubmit={{jest.fn()}} />);\n"));
    for field in plan.fields.iter().filter(|f| always_visible(f) && !f.label.is_empty()) {
        code.push_str(&format!(
            "    expect(screen.getAllByText({}, {{ exact: false }}).length).toBeGreaterThan(0);\n",
            js_str(&field.label)
        ));
    }
    code.push_str("  });\n\n");

    code.push_str("  it('disables submit while loading', () => {\n");
    code.push_str(&format!("    render(<{component} onSubmit={{jest.fn()}} isLoading />);\n"));
    code.push_str("    expect(screen.getByRole('button', { name: /submitting/i })).toBeDisabled();\n");
    code.push_str("  });\n");

    if plan.has_required() {
        code.push('\n');
        code.push_str("  it('does not submit while required fields are empty', async () => {\n");
        code.push_str("    const onSubmit = jest.fn();\n");
        code.push_str(&format!("    render(<{component} onSubmit={{onSubmit}} />);\n"));
        code.push_str("    fireEvent.click(screen.getByRole('button', { name: /submit/i }));\n");
        code.push_str("    await waitFor(() => expect(onSubmit).not.toHaveBeenCalled());\n");
        code.push_str("  });\n");
    }

    code.push_str("});\n");

    GeneratedFile::new(
        format!("{component}.test.{extension}"),
        code,
        language,
        Category::Tests,
    )
    .at("frontend/src/__tests__")
}
