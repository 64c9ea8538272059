//! `generate` and `preview`: assemble a project and write or show it.

use crate::config::Config;
use crate::input::{InputFormat, load_form};
use anyhow::{Context, Result, bail};
use formforge_bundle::{archive_checksum, package, write_archive};
use formforge_codegen::assemble;
use formforge_core::{AssemblyReport, GeneratedCodeBundle};
use std::fs;
use std::path::{Path, PathBuf};

/// Load the form and config, then assemble.
fn assemble_from(
    form: &str,
    format: InputFormat,
    config: Option<&str>,
    project: Option<String>,
) -> Result<AssemblyReport> {
    let structure = load_form(form, format)?;
    let config = Config::load(config)?;
    let project_name = config.project_name(project, structure.title.as_deref());

    assemble(&structure, &project_name, &config.options)
        .with_context(|| format!("Failed to generate project '{project_name}'"))
}

fn print_warnings(report: &AssemblyReport) {
    if report.warnings.is_empty() {
        return;
    }
    println!("Warnings:");
    for warning in &report.warnings {
        println!("  - {warning}");
    }
}

/// Generate a project.
pub fn run(
    form: &str,
    format: InputFormat,
    config: Option<String>,
    project: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let report = assemble_from(form, format, config.as_deref(), project)?;
    let bundle = &report.bundle;

    match output {
        Some(output) if output.to_ascii_lowercase().ends_with(".zip") => {
            let bytes = package(bundle).context("Failed to package project")?;
            let path = PathBuf::from(&output);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Wrote {} ({} files, {})",
                path.display(),
                bundle.file_count(),
                archive_checksum(&bytes)
            );
        }
        Some(dir) => {
            write_tree(bundle, Path::new(&dir))?;
            println!("Wrote {} files to {dir}", bundle.file_count());
        }
        None => {
            let path = write_archive(bundle, ".").context("Failed to write archive")?;
            println!("Wrote {} ({} files)", path.display(), bundle.file_count());
        }
    }

    print_warnings(&report);
    Ok(())
}

/// Write every file under `dir` at its archive path.
fn write_tree(bundle: &GeneratedCodeBundle, dir: &Path) -> Result<()> {
    for file in bundle.files() {
        let path = dir.join(file.archive_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, file.content())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote file");
    }
    Ok(())
}

/// List the generated files, or print one of them.
pub fn preview(
    form: &str,
    format: InputFormat,
    config: Option<String>,
    project: Option<String>,
    file: Option<String>,
) -> Result<()> {
    let report = assemble_from(form, format, config.as_deref(), project)?;
    let bundle = &report.bundle;

    if let Some(path) = file {
        let Some(found) = bundle.find(&path) else {
            bail!("No generated file at {path}. Run `formforge preview` without --file to list them.");
        };
        print!("{}", found.content());
        return Ok(());
    }

    println!("{} ({} files)", bundle.project_name(), bundle.file_count());
    for (category, files) in bundle.categories() {
        println!("{category}:");
        for file in files {
            println!("  {}  ({} bytes)", file.archive_path(), file.content().len());
        }
    }
    println!("digest: {}", bundle.content_digest());
    print_warnings(&report);
    Ok(())
}
