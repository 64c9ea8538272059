//! Generation options.
//!
//! Every option has a serde default, so a partial TOML or JSON document is
//! always accepted. Not every value has an emitter; [`GenerationOptions::resolve`]
//! maps those onto the nearest supported value and reports the substitution.

use crate::error::GenerationResult;
use crate::warning::GenerationWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! option_enum_str {
    ($ty:ident { $($variant:ident => $tag:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// Every value, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Get the option tag (e.g., "react-hook-form").
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }

            /// Parse a tag. Case-insensitive; `_` is accepted for `-`.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
                match normalized.as_str() {
                    $($tag $(| $alias)* => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Frontend stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontendTemplate {
    #[default]
    #[serde(alias = "REACT_TYPESCRIPT")]
    ReactTypescript,
    #[serde(alias = "REACT_JAVASCRIPT")]
    ReactJavascript,
    #[serde(alias = "REACT_NATIVE")]
    ReactNative,
    #[serde(alias = "VUE")]
    Vue,
    #[serde(alias = "ANGULAR")]
    Angular,
}

option_enum_str!(FrontendTemplate {
    ReactTypescript => "react-typescript" | "react-ts" | "typescript",
    ReactJavascript => "react-javascript" | "react-js" | "javascript",
    ReactNative => "react-native",
    Vue => "vue",
    Angular => "angular",
});

impl FrontendTemplate {
    /// Whether an emitter exists for this template.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::ReactTypescript | Self::ReactJavascript)
    }

    #[must_use]
    pub fn is_typescript(&self) -> bool {
        !matches!(self, Self::ReactJavascript)
    }

    /// Component file extension.
    #[must_use]
    pub fn component_extension(&self) -> &'static str {
        if self.is_typescript() { "tsx" } else { "jsx" }
    }
}

/// Form-state library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormLibrary {
    None,
    #[default]
    Formik,
    ReactHookForm,
}

option_enum_str!(FormLibrary {
    None => "none",
    Formik => "formik",
    ReactHookForm => "react-hook-form" | "rhf",
});

impl FormLibrary {
    /// Whether the library tracks per-field touched and error state.
    #[must_use]
    pub fn surfaces_field_errors(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Validation-schema library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationLibrary {
    #[default]
    #[serde(alias = "YUP")]
    Yup,
    #[serde(alias = "ZOD")]
    Zod,
    #[serde(alias = "JOI")]
    Joi,
    #[serde(alias = "CLASS_VALIDATOR")]
    ClassValidator,
}

option_enum_str!(ValidationLibrary {
    Yup => "yup",
    Zod => "zod",
    Joi => "joi",
    ClassValidator => "class-validator",
});

/// Styling system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Styling {
    #[default]
    Bootstrap,
    Tailwind,
    #[serde(alias = "mui")]
    Material,
    Css,
}

option_enum_str!(Styling {
    Bootstrap => "bootstrap",
    Tailwind => "tailwind",
    Material => "material" | "mui",
    Css => "css" | "plain-css",
});

/// Backend stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendFramework {
    #[serde(alias = "EXPRESS")]
    Express,
    #[default]
    #[serde(alias = "ASPNET_CORE", alias = "dotnet")]
    AspnetCore,
    #[serde(rename = "nestjs", alias = "NESTJS")]
    NestJs,
    #[serde(rename = "fastapi", alias = "FASTAPI")]
    FastApi,
    #[serde(alias = "DJANGO")]
    Django,
    #[serde(alias = "SPRING_BOOT")]
    SpringBoot,
}

option_enum_str!(BackendFramework {
    Express => "express",
    AspnetCore => "aspnet-core" | "dotnet" | "aspnetcore",
    NestJs => "nestjs",
    FastApi => "fastapi",
    Django => "django",
    SpringBoot => "spring-boot",
});

impl BackendFramework {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Express | Self::AspnetCore)
    }

    /// The supported framework closest in style.
    ///
    /// Route-handler frameworks become Express; annotation-driven ones
    /// become ASP.NET Core.
    #[must_use]
    pub fn nearest_supported(&self) -> Self {
        match self {
            Self::Express | Self::NestJs | Self::FastApi | Self::Django => Self::Express,
            Self::AspnetCore | Self::SpringBoot => Self::AspnetCore,
        }
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(default)]
    pub template: FrontendTemplate,

    #[serde(default, alias = "formLibrary")]
    pub form_library: FormLibrary,

    #[serde(default, alias = "validationLibrary")]
    pub validation_library: ValidationLibrary,

    #[serde(default)]
    pub styling: Styling,

    /// Emit SQL and backend files.
    #[serde(default, alias = "includeBackend")]
    pub include_backend: bool,

    #[serde(default, alias = "backendFramework")]
    pub backend_framework: BackendFramework,

    /// Emit frontend and backend test files.
    #[serde(default, alias = "includeTests")]
    pub include_tests: bool,

    /// Emit `docs/FIELDS.md` and, with a backend, `docs/API.md`.
    #[serde(default, alias = "includeDocumentation")]
    pub include_documentation: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            template: FrontendTemplate::default(),
            form_library: FormLibrary::default(),
            validation_library: ValidationLibrary::default(),
            styling: Styling::default(),
            include_backend: false,
            backend_framework: BackendFramework::default(),
            include_tests: false,
            include_documentation: false,
        }
    }
}

impl GenerationOptions {
    /// Parse options from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace unsupported values with the nearest supported ones.
    ///
    /// Returns the effective options and one [`GenerationWarning::OptionFallback`]
    /// per substitution. Resolving already-resolved options changes nothing.
    #[must_use]
    pub fn resolve(&self) -> (Self, Vec<GenerationWarning>) {
        let mut effective = self.clone();
        let mut warnings = Vec::new();

        if !effective.template.is_supported() {
            warnings.push(fallback(
                "template",
                effective.template,
                FrontendTemplate::ReactTypescript,
            ));
            effective.template = FrontendTemplate::ReactTypescript;
        }

        // Decorator classes need TypeScript.
        if effective.validation_library == ValidationLibrary::ClassValidator
            && !effective.template.is_typescript()
        {
            warnings.push(fallback(
                "validation library",
                effective.validation_library,
                ValidationLibrary::Yup,
            ));
            effective.validation_library = ValidationLibrary::Yup;
        }

        if !effective.backend_framework.is_supported() {
            let used = effective.backend_framework.nearest_supported();
            if effective.include_backend {
                warnings.push(fallback(
                    "backend framework",
                    effective.backend_framework,
                    used,
                ));
            }
            effective.backend_framework = used;
        }

        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        (effective, warnings)
    }
}

fn fallback(option: &str, requested: impl fmt::Display, used: impl fmt::Display) -> GenerationWarning {
    GenerationWarning::OptionFallback {
        option: option.to_string(),
        requested: requested.to_string(),
        used: used.to_string(),
    }
}

#[cfg(test)]
#[path = "options/options_tests.rs"]
mod options_tests;
