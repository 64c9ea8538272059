//! Form definition loading

use anyhow::{Context, Result};
use clap::ValueEnum;
use formforge_core::{FormSchema, FormStructure, adapt};
use std::path::Path;

/// Shape of a form definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Designer schema with sections and positions
    Editor,
    /// Flat structure as consumed by the emitters
    Structure,
}

/// Read a form definition and bring it into structure shape.
pub fn load_form(path: impl AsRef<Path>, format: InputFormat) -> Result<FormStructure> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form: {}", path.display()))?;
    parse_form(&content, format).with_context(|| format!("In {}", path.display()))
}

/// Parse a form definition.
pub fn parse_form(content: &str, format: InputFormat) -> Result<FormStructure> {
    match format {
        InputFormat::Editor => {
            let schema = FormSchema::from_json(content).context("Failed to parse editor schema")?;
            let structure = adapt(&schema).context("Failed to adapt editor schema")?;
            tracing::debug!(
                sections = schema.sections.len(),
                fields = structure.fields.len(),
                "adapted editor schema"
            );
            Ok(structure)
        }
        InputFormat::Structure => {
            FormStructure::from_json(content).context("Failed to parse form structure")
        }
    }
}
