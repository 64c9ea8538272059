//! Package manifests: `package.json` for the JavaScript stacks and
//! `.csproj` files for ASP.NET Core.
//!
//! Dependency lists are derived from the resolved options so a manifest
//! only names libraries the generated code imports.

use crate::plan::FormPlan;
use formforge_core::{FormLibrary, GenerationOptions, GenerationResult, Styling, ValidationLibrary};
use serde_json::{Map, Value, json};

fn deps(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, version)| ((*name).to_string(), Value::from(*version)))
        .collect()
}

fn to_json(value: &Value) -> GenerationResult<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// `frontend/package.json`.
pub fn frontend_package_json(plan: &FormPlan, options: &GenerationOptions) -> GenerationResult<String> {
    let mut dependencies = deps(&[("react", "^18.2.0"), ("react-dom", "^18.2.0")]);
    let mut dev_dependencies = Map::new();

    match options.form_library {
        FormLibrary::Formik => dependencies.extend(deps(&[("formik", "^2.4.0")])),
        FormLibrary::ReactHookForm => dependencies.extend(deps(&[
            ("react-hook-form", "^7.48.0"),
            ("@hookform/resolvers", "^3.3.0"),
        ])),
        FormLibrary::None => {}
    }

    match options.validation_library {
        ValidationLibrary::Yup => dependencies.extend(deps(&[("yup", "^1.3.0")])),
        ValidationLibrary::Zod => dependencies.extend(deps(&[("zod", "^3.22.0")])),
        ValidationLibrary::Joi => dependencies.extend(deps(&[("joi", "^17.11.0")])),
        ValidationLibrary::ClassValidator => dependencies.extend(deps(&[("class-validator", "^0.14.0")])),
    }

    match options.styling {
        Styling::Bootstrap => dependencies.extend(deps(&[
            ("react-bootstrap", "^2.9.0"),
            ("bootstrap", "^5.3.0"),
        ])),
        Styling::Material => dependencies.extend(deps(&[
            ("@mui/material", "^5.14.0"),
            ("@emotion/react", "^11.11.0"),
            ("@emotion/styled", "^11.11.0"),
        ])),
        Styling::Tailwind => dev_dependencies.extend(deps(&[
            ("tailwindcss", "^3.3.0"),
            ("postcss", "^8.4.0"),
            ("autoprefixer", "^10.4.0"),
        ])),
        Styling::Css => {}
    }

    let typescript = options.template.is_typescript();
    if typescript {
        dev_dependencies.extend(deps(&[
            ("typescript", "^5.0.0"),
            ("@types/react", "^18.2.0"),
            ("@types/react-dom", "^18.2.0"),
        ]));
    }

    let mut scripts = deps(&[("start", "react-scripts start"), ("build", "react-scripts build")]);
    dependencies.extend(deps(&[("react-scripts", "5.0.1")]));
    if options.include_tests {
        scripts.extend(deps(&[("test", "jest")]));
        dev_dependencies.extend(deps(&[
            ("@testing-library/react", "^14.0.0"),
            ("@testing-library/jest-dom", "^6.1.0"),
            ("jest", "^29.7.0"),
            ("jest-environment-jsdom", "^29.7.0"),
        ]));
        if typescript {
            dev_dependencies.extend(deps(&[("ts-jest", "^29.1.0"), ("@types/jest", "^29.5.0")]));
        }
    }

    to_json(&json!({
        "name": plan.project.kebab,
        "version": "1.0.0",
        "private": true,
        "description": format!("Auto-generated form for {}", plan.project.display),
        "scripts": scripts,
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
    }))
}

/// `backend/package.json` for the Express stack.
///
/// The API project always carries its jest setup; the route tests are only
/// emitted on request.
pub fn backend_package_json(plan: &FormPlan) -> GenerationResult<String> {
    let scripts = deps(&[
        ("dev", "nodemon --exec ts-node src/index.ts"),
        ("build", "tsc"),
        ("start", "node dist/index.js"),
        ("test", "jest"),
    ]);
    let dependencies = deps(&[
        ("express", "^4.18.0"),
        ("express-validator", "^7.0.0"),
        ("typeorm", "^0.3.0"),
        ("reflect-metadata", "^0.1.13"),
        ("pg", "^8.11.0"),
    ]);
    let dev_dependencies = deps(&[
        ("@types/express", "^4.17.0"),
        ("@types/node", "^20.0.0"),
        ("typescript", "^5.0.0"),
        ("ts-node", "^10.9.0"),
        ("nodemon", "^3.0.0"),
        ("jest", "^29.7.0"),
        ("ts-jest", "^29.1.0"),
        ("@types/jest", "^29.5.0"),
        ("supertest", "^6.3.0"),
        ("@types/supertest", "^2.0.0"),
    ]);

    to_json(&json!({
        "name": format!("{}-api", plan.project.kebab),
        "version": "1.0.0",
        "description": format!("Backend API for {}", plan.project.display),
        "main": "src/index.ts",
        "scripts": scripts,
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
        "jest": { "preset": "ts-jest", "testEnvironment": "node" },
    }))
}

/// `backend/tsconfig.json`; TypeORM entities need decorator metadata.
pub fn backend_tsconfig() -> GenerationResult<String> {
    to_json(&json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "commonjs",
            "outDir": "dist",
            "rootDir": "src",
            "strict": true,
            "esModuleInterop": true,
            "experimentalDecorators": true,
            "emitDecoratorMetadata": true,
            "strictPropertyInitialization": false,
            "skipLibCheck": true,
        },
        "include": ["src"],
    }))
}

/// `{Name}Api.csproj`.
#[must_use]
pub fn api_csproj(namespace: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<Project Sdk=\"Microsoft.NET.Sdk.Web\">\n\n");
    xml.push_str("  <PropertyGroup>\n");
    xml.push_str("    <TargetFramework>net8.0</TargetFramework>\n");
    xml.push_str("    <Nullable>enable</Nullable>\n");
    xml.push_str("    <ImplicitUsings>enable</ImplicitUsings>\n");
    xml.push_str(&format!("    <RootNamespace>{namespace}</RootNamespace>\n"));
    xml.push_str("  </PropertyGroup>\n\n");
    xml.push_str("  <ItemGroup>\n");
    xml.push_str("    <PackageReference Include=\"Microsoft.EntityFrameworkCore.SqlServer\" Version=\"8.0.0\" />\n");
    xml.push_str("    <PackageReference Include=\"Swashbuckle.AspNetCore\" Version=\"6.5.0\" />\n");
    xml.push_str("  </ItemGroup>\n\n");
    xml.push_str("</Project>\n");
    xml
}

/// `{Name}Api.Tests.csproj`, referencing the API project.
#[must_use]
pub fn test_csproj(namespace: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<Project Sdk=\"Microsoft.NET.Sdk\">\n\n");
    xml.push_str("  <PropertyGroup>\n");
    xml.push_str("    <TargetFramework>net8.0</TargetFramework>\n");
    xml.push_str("    <Nullable>enable</Nullable>\n");
    xml.push_str("    <ImplicitUsings>enable</ImplicitUsings>\n");
    xml.push_str("    <IsPackable>false</IsPackable>\n");
    xml.push_str("  </PropertyGroup>\n\n");
    xml.push_str("  <ItemGroup>\n");
    xml.push_str("    <PackageReference Include=\"Microsoft.NET.Test.Sdk\" Version=\"17.8.0\" />\n");
    xml.push_str("    <PackageReference Include=\"xunit\" Version=\"2.6.2\" />\n");
    xml.push_str("    <PackageReference Include=\"xunit.runner.visualstudio\" Version=\"2.5.4\" />\n");
    xml.push_str("  </ItemGroup>\n\n");
    xml.push_str("  <ItemGroup>\n");
    xml.push_str(&format!(
        "    <ProjectReference Include=\"../../{namespace}/{namespace}.csproj\" />\n"
    ));
    xml.push_str("  </ItemGroup>\n\n");
    xml.push_str("</Project>\n");
    xml
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use formforge_core::{FormStructure, FrontendTemplate};

    fn plan() -> FormPlan {
        FormPlan::build(&FormStructure::new("T"), "Customer Intake Form").unwrap().0
    }

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn frontend_package_json___defaults___lists_selected_libraries_only() {
        let manifest = parse(&frontend_package_json(&plan(), &GenerationOptions::default()).unwrap());

        let deps = manifest["dependencies"].as_object().unwrap();
        assert!(deps.contains_key("formik"));
        assert!(deps.contains_key("yup"));
        assert!(deps.contains_key("react-bootstrap"));
        assert!(!deps.contains_key("zod"));
        assert!(!deps.contains_key("react-hook-form"));
        assert_eq!(manifest["name"], "customer-intake-form");
        assert_eq!(manifest["description"], "Auto-generated form for Customer Intake Form");
    }

    #[test]
    fn frontend_package_json___hook_form___adds_resolvers() {
        let options = GenerationOptions {
            form_library: FormLibrary::ReactHookForm,
            validation_library: ValidationLibrary::Zod,
            styling: Styling::Material,
            ..GenerationOptions::default()
        };

        let manifest = parse(&frontend_package_json(&plan(), &options).unwrap());

        let deps = manifest["dependencies"].as_object().unwrap();
        assert!(deps.contains_key("@hookform/resolvers"));
        assert!(deps.contains_key("zod"));
        assert!(deps.contains_key("@mui/material"));
        assert!(!deps.contains_key("formik"));
    }

    #[test]
    fn frontend_package_json___javascript___has_no_typescript() {
        let options = GenerationOptions {
            template: FrontendTemplate::ReactJavascript,
            ..GenerationOptions::default()
        };

        let manifest = parse(&frontend_package_json(&plan(), &options).unwrap());

        assert!(manifest["devDependencies"].get("typescript").is_none());
    }

    #[test]
    fn frontend_package_json___tests___adds_test_script() {
        let options = GenerationOptions {
            include_tests: true,
            ..GenerationOptions::default()
        };

        let manifest = parse(&frontend_package_json(&plan(), &options).unwrap());

        assert_eq!(manifest["scripts"]["test"], "jest");
        assert!(manifest["devDependencies"].get("@testing-library/react").is_some());
    }

    #[test]
    fn backend_package_json___names_api_package() {
        let manifest = parse(&backend_package_json(&plan()).unwrap());

        assert_eq!(manifest["name"], "customer-intake-form-api");
        assert_eq!(manifest["main"], "src/index.ts");
        assert_eq!(manifest["dependencies"]["express"], "^4.18.0");
        assert_eq!(manifest["jest"]["preset"], "ts-jest");
    }

    #[test]
    fn backend_tsconfig___enables_decorators() {
        let config = parse(&backend_tsconfig().unwrap());

        assert_eq!(config["compilerOptions"]["experimentalDecorators"], true);
        assert_eq!(config["include"][0], "src");
    }

    #[test]
    fn api_csproj___sets_root_namespace() {
        let xml = api_csproj("CustomerIntakeFormApi");

        assert!(xml.contains("<RootNamespace>CustomerIntakeFormApi</RootNamespace>"));
        assert!(xml.starts_with("<Project Sdk=\"Microsoft.NET.Sdk.Web\">"));
    }
}
