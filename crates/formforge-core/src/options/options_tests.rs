#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GenerationOptions___default___is_supported_and_frontend_only() {
    let options = GenerationOptions::default();

    assert_eq!(options.template, FrontendTemplate::ReactTypescript);
    assert_eq!(options.form_library, FormLibrary::Formik);
    assert_eq!(options.validation_library, ValidationLibrary::Yup);
    assert_eq!(options.styling, Styling::Bootstrap);
    assert!(!options.include_backend);

    let (_, warnings) = options.resolve();
    assert!(warnings.is_empty());
}

#[test]
fn GenerationOptions___from_json___accepts_camel_case_and_legacy_tags() {
    let json = r#"{
        "template": "REACT_JAVASCRIPT",
        "formLibrary": "react-hook-form",
        "validationLibrary": "ZOD",
        "styling": "mui",
        "includeBackend": true,
        "backendFramework": "EXPRESS"
    }"#;

    let options = GenerationOptions::from_json(json).unwrap();

    assert_eq!(options.template, FrontendTemplate::ReactJavascript);
    assert_eq!(options.form_library, FormLibrary::ReactHookForm);
    assert_eq!(options.validation_library, ValidationLibrary::Zod);
    assert_eq!(options.styling, Styling::Material);
    assert!(options.include_backend);
    assert_eq!(options.backend_framework, BackendFramework::Express);
    assert!(!options.include_tests);
}

#[test]
fn GenerationOptions___from_toml___parses_options_table() {
    #[derive(serde::Deserialize)]
    struct Config {
        options: GenerationOptions,
    }

    let toml_str = r#"
        [options]
        template = "react-typescript"
        form_library = "none"
        validation_library = "class-validator"
        styling = "tailwind"
        include_backend = true
        backend_framework = "aspnet-core"
        include_tests = true
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.options.form_library, FormLibrary::None);
    assert_eq!(
        config.options.validation_library,
        ValidationLibrary::ClassValidator
    );
    assert_eq!(config.options.styling, Styling::Tailwind);
    assert_eq!(config.options.backend_framework, BackendFramework::AspnetCore);
    assert!(config.options.include_tests);
    assert!(!config.options.include_documentation);
}

#[test_case(FrontendTemplate::ReactNative; "react native")]
#[test_case(FrontendTemplate::Vue; "vue")]
#[test_case(FrontendTemplate::Angular; "angular")]
fn resolve___unsupported_template___falls_back_to_react_typescript(template: FrontendTemplate) {
    let options = GenerationOptions {
        template,
        ..Default::default()
    };

    let (effective, warnings) = options.resolve();

    assert_eq!(effective.template, FrontendTemplate::ReactTypescript);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        GenerationWarning::OptionFallback { used, .. } if used == "react-typescript"
    ));
}

#[test]
fn resolve___class_validator_with_javascript___falls_back_to_yup() {
    let options = GenerationOptions {
        template: FrontendTemplate::ReactJavascript,
        validation_library: ValidationLibrary::ClassValidator,
        ..Default::default()
    };

    let (effective, warnings) = options.resolve();

    assert_eq!(effective.validation_library, ValidationLibrary::Yup);
    assert_eq!(warnings.len(), 1);
}

#[test_case(BackendFramework::NestJs, BackendFramework::Express; "nestjs")]
#[test_case(BackendFramework::FastApi, BackendFramework::Express; "fastapi")]
#[test_case(BackendFramework::Django, BackendFramework::Express; "django")]
#[test_case(BackendFramework::SpringBoot, BackendFramework::AspnetCore; "spring boot")]
fn resolve___unsupported_backend___uses_nearest(
    requested: BackendFramework,
    expected: BackendFramework,
) {
    let options = GenerationOptions {
        include_backend: true,
        backend_framework: requested,
        ..Default::default()
    };

    let (effective, warnings) = options.resolve();

    assert_eq!(effective.backend_framework, expected);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn resolve___unsupported_backend_without_backend___is_silent() {
    let options = GenerationOptions {
        include_backend: false,
        backend_framework: BackendFramework::Django,
        ..Default::default()
    };

    let (effective, warnings) = options.resolve();

    assert_eq!(effective.backend_framework, BackendFramework::Express);
    assert!(warnings.is_empty());
}

#[test]
fn resolve___is_idempotent() {
    let options = GenerationOptions {
        template: FrontendTemplate::Vue,
        include_backend: true,
        backend_framework: BackendFramework::SpringBoot,
        ..Default::default()
    };

    let (once, _) = options.resolve();
    let (twice, warnings) = once.resolve();

    assert_eq!(once, twice);
    assert!(warnings.is_empty());
}

#[test]
fn option_enums___parse___roundtrip_tags() {
    for t in FrontendTemplate::ALL {
        assert_eq!(FrontendTemplate::parse(t.as_str()), Some(*t));
    }
    for l in FormLibrary::ALL {
        assert_eq!(FormLibrary::parse(l.as_str()), Some(*l));
    }
    for v in ValidationLibrary::ALL {
        assert_eq!(ValidationLibrary::parse(v.as_str()), Some(*v));
    }
    for s in Styling::ALL {
        assert_eq!(Styling::parse(s.as_str()), Some(*s));
    }
    for b in BackendFramework::ALL {
        assert_eq!(BackendFramework::parse(b.as_str()), Some(*b));
    }
}

#[test]
fn option_enums___parse___accepts_screaming_tags() {
    assert_eq!(
        ValidationLibrary::parse("CLASS_VALIDATOR"),
        Some(ValidationLibrary::ClassValidator)
    );
    assert_eq!(
        BackendFramework::parse("SPRING_BOOT"),
        Some(BackendFramework::SpringBoot)
    );
    assert_eq!(Styling::parse("unknown"), None);
}

#[test]
fn FrontendTemplate___component_extension___follows_language() {
    assert_eq!(FrontendTemplate::ReactTypescript.component_extension(), "tsx");
    assert_eq!(FrontendTemplate::ReactJavascript.component_extension(), "jsx");
}
