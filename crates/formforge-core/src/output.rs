//! Generated files and the bundle that groups them.

use crate::options::GenerationOptions;
use crate::warning::GenerationWarning;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Bundle category. Declaration order is archive order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Frontend,
    Backend,
    Sql,
    Tests,
    Docs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Frontend,
        Category::Backend,
        Category::Sql,
        Category::Tests,
        Category::Docs,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Sql => "sql",
            Self::Tests => "tests",
            Self::Docs => "docs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source language of a generated file, for syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Json,
    Sql,
    CSharp,
    Xml,
    Markdown,
    Css,
}

impl Language {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Sql => "sql",
            Self::CSharp => "csharp",
            Self::Xml => "xml",
            Self::Markdown => "markdown",
            Self::Css => "css",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated source file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    relative_path: Option<String>,
    content: String,
    language: Language,
    category: Category,
}

impl GeneratedFile {
    pub fn new(
        file_name: impl Into<String>,
        content: impl Into<String>,
        language: Language,
        category: Category,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            relative_path: None,
            content: content.into(),
            language,
            category,
        }
    }

    /// Place the file under an explicit directory instead of its category.
    ///
    /// An empty directory puts the file at the archive root.
    #[must_use]
    pub fn at(mut self, dir: impl Into<String>) -> Self {
        self.relative_path = Some(dir.into());
        self
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Path inside the archive: `relative_path/file_name`, or
    /// `category/file_name` when no path was given.
    #[must_use]
    pub fn archive_path(&self) -> String {
        match self.relative_path.as_deref().map(|p| p.trim_matches('/')) {
            Some("") => self.file_name.clone(),
            Some(dir) => format!("{dir}/{}", self.file_name),
            None => format!("{}/{}", self.category, self.file_name),
        }
    }
}

/// Summary of one bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    pub project_name: String,
    pub file_count: usize,
    pub generated_at: DateTime<Utc>,
    pub options: GenerationOptions,
}

/// Every file from one assembly, grouped by category.
///
/// Categories iterate in [`Category`] order; files within a category keep
/// the order they were added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCodeBundle {
    files: BTreeMap<Category, Vec<GeneratedFile>>,
    metadata: BundleMetadata,
}

impl GeneratedCodeBundle {
    pub fn new(
        project_name: impl Into<String>,
        options: GenerationOptions,
        generated_at: DateTime<Utc>,
        files: impl IntoIterator<Item = GeneratedFile>,
    ) -> Self {
        let mut grouped: BTreeMap<Category, Vec<GeneratedFile>> = BTreeMap::new();
        for file in files {
            grouped.entry(file.category).or_default().push(file);
        }
        let file_count = grouped.values().map(Vec::len).sum();

        Self {
            files: grouped,
            metadata: BundleMetadata {
                project_name: project_name.into(),
                file_count,
                generated_at,
                options,
            },
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.metadata.project_name
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.metadata.file_count
    }

    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.metadata.generated_at
    }

    /// Files of one category, possibly empty.
    #[must_use]
    pub fn files_in(&self, category: Category) -> &[GeneratedFile] {
        self.files
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty categories with their files, in archive order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[GeneratedFile])> {
        self.files.iter().map(|(c, files)| (*c, files.as_slice()))
    }

    /// All files in archive order.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.values().flatten()
    }

    /// Look a file up by its archive path.
    #[must_use]
    pub fn find(&self, archive_path: &str) -> Option<&GeneratedFile> {
        self.files().find(|f| f.archive_path() == archive_path)
    }

    /// SHA-256 over every archive path and content, in archive order.
    ///
    /// The timestamp is not part of the digest, so two assemblies of the
    /// same input agree.
    #[must_use]
    pub fn content_digest(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .files()
            .map(|f| (f.archive_path(), f.content()))
            .collect();
        content_digest(entries.iter().map(|(p, c)| (p.as_str(), *c)))
    }
}

/// Digest of `(path, content)` pairs, as used by
/// [`GeneratedCodeBundle::content_digest`].
pub fn content_digest<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut hasher = Sha256::new();
    for (path, content) in entries {
        hasher.update(path.as_bytes());
        hasher.update([0u8]);
        hasher.update(content.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub bundle: GeneratedCodeBundle,
    /// Non-fatal anomalies, in the order they were found.
    pub warnings: Vec<GenerationWarning>,
}

impl AssemblyReport {
    /// Warnings concerning one field.
    pub fn warnings_for<'a>(&'a self, field_id: &'a str) -> impl Iterator<Item = &'a GenerationWarning> {
        self.warnings
            .iter()
            .filter(move |w| w.field_id() == Some(field_id))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use chrono::TimeZone;

    fn file(name: &str, category: Category) -> GeneratedFile {
        GeneratedFile::new(name, format!("// {name}"), Language::TypeScript, category)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn GeneratedFile___archive_path___uses_explicit_path_or_category() {
        assert_eq!(file("a.ts", Category::Backend).archive_path(), "backend/a.ts");
        assert_eq!(
            file("a.ts", Category::Backend).at("backend/src/").archive_path(),
            "backend/src/a.ts"
        );
        assert_eq!(file("README.md", Category::Docs).at("").archive_path(), "README.md");
    }

    #[test]
    fn GeneratedCodeBundle___new___groups_in_category_order() {
        let bundle = GeneratedCodeBundle::new(
            "Demo",
            GenerationOptions::default(),
            at(0),
            vec![
                file("readme", Category::Docs),
                file("b", Category::Frontend),
                file("sql", Category::Sql),
                file("a", Category::Frontend),
            ],
        );

        let order: Vec<_> = bundle.files().map(|f| f.file_name().to_string()).collect();
        assert_eq!(order, vec!["b", "a", "sql", "readme"]);
        assert_eq!(bundle.file_count(), 4);
        assert!(bundle.files_in(Category::Backend).is_empty());
        let categories: Vec<_> = bundle.categories().map(|(c, _)| c).collect();
        assert_eq!(categories, vec![Category::Frontend, Category::Sql, Category::Docs]);
    }

    #[test]
    fn GeneratedCodeBundle___content_digest___ignores_timestamp() {
        let files = vec![file("a", Category::Frontend)];
        let first = GeneratedCodeBundle::new("Demo", GenerationOptions::default(), at(0), files.clone());
        let second = GeneratedCodeBundle::new("Demo", GenerationOptions::default(), at(999), files);

        assert_eq!(first.content_digest(), second.content_digest());
        assert_eq!(first.content_digest().len(), 64);
    }

    #[test]
    fn GeneratedCodeBundle___content_digest___changes_with_content() {
        let first = GeneratedCodeBundle::new(
            "Demo",
            GenerationOptions::default(),
            at(0),
            vec![file("a", Category::Frontend)],
        );
        let second = GeneratedCodeBundle::new(
            "Demo",
            GenerationOptions::default(),
            at(0),
            vec![file("b", Category::Frontend)],
        );

        assert_ne!(first.content_digest(), second.content_digest());
    }

    #[test]
    fn GeneratedCodeBundle___find___looks_up_archive_path() {
        let bundle = GeneratedCodeBundle::new(
            "Demo",
            GenerationOptions::default(),
            at(0),
            vec![file("a.ts", Category::Frontend).at("frontend/src")],
        );

        assert!(bundle.find("frontend/src/a.ts").is_some());
        assert!(bundle.find("frontend/a.ts").is_none());
    }
}
