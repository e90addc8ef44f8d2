//! Template registry for file-based and inline templates.
//!
//! This module provides [`TemplateRegistry`], which manages template resolution
//! from multiple sources: inline strings or filesystem directories.
//!
//! # Template Resolution
//!
//! Templates are resolved by name using these rules:
//!
//! 1. Inline templates (added via [`TemplateRegistry::add_inline`]) have highest priority
//! 2. File templates are searched by resolution name
//! 3. Names can be specified with or without extension: both `"card"` and `"card.html"` resolve
//!
//! # Supported Extensions
//!
//! Template files are recognized by extension, in priority order:
//!
//! | Priority | Extension | Description |
//! |----------|-----------|-------------|
//! | 1 (highest) | `.html` | Markup templates |
//! | 2 | `.jinja` | Jinja templates |
//! | 3 (lowest) | `.txt` | Plain text templates |
//!
//! If multiple files exist with the same base name but different extensions
//! (e.g., `card.html` and `card.txt`), the higher-priority extension wins
//! for extensionless lookups.
//!
//! # Collision Handling
//!
//! The registry enforces strict collision rules:
//!
//! - Same-directory, different extensions: Higher priority extension wins (no error)
//! - Cross-directory collisions: Error with detailed message listing conflicting files
//!
//! This strict behavior catches configuration mistakes early rather than silently
//! using an arbitrary winner.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Recognized template file extensions in priority order.
///
/// When multiple files exist with the same base name but different extensions,
/// the extension appearing earlier in this list takes precedence.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".html", ".jinja", ".txt"];

/// A template file discovered during directory walking.
///
/// This struct captures the essential information about a template file
/// without reading its content, enabling lazy loading and hot reloading.
///
/// # Fields
///
/// - `name`: The resolution name without extension (e.g., `"widgets/card"`)
/// - `name_with_ext`: The resolution name with extension (e.g., `"widgets/card.html"`)
/// - `absolute_path`: Full filesystem path for reading content
/// - `source_dir`: The template directory this file came from (for collision reporting)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Resolution name without extension (e.g., "card" or "widgets/card")
    pub name: String,
    /// Resolution name with extension (e.g., "card.html" or "widgets/card.html")
    pub name_with_ext: String,
    /// Absolute path to the template file
    pub absolute_path: PathBuf,
    /// The template directory root this file belongs to
    pub source_dir: PathBuf,
}

impl TemplateFile {
    /// Creates a new template file descriptor.
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        for (i, ext) in TEMPLATE_EXTENSIONS.iter().enumerate() {
            if self.name_with_ext.ends_with(ext) {
                return i;
            }
        }
        usize::MAX
    }
}

/// How a template's content is stored or accessed.
///
/// - `Inline`: Content is stored directly
/// - `File`: Content is read from disk on demand (for hot reloading in development)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// Template content stored directly in memory.
    Inline(String),

    /// Template loaded from filesystem on demand.
    ///
    /// The path is read on each render in development mode,
    /// enabling hot reloading without recompilation.
    File(PathBuf),
}

/// Registry for template resolution from multiple sources.
///
/// The registry maintains a unified view of templates from:
/// - Inline strings (highest priority)
/// - Multiple filesystem directories
///
/// # Resolution Order
///
/// When looking up a template name:
///
/// 1. Check inline templates first
/// 2. Check file-based templates
/// 3. Return error if not found
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    /// Inline templates (stored separately for highest priority).
    inline: HashMap<String, String>,

    /// File-based templates (maps resolution name to path).
    files: HashMap<String, PathBuf>,

    /// Tracks source info for collision detection: name -> (path, source_dir).
    sources: HashMap<String, (PathBuf, PathBuf)>,
}

impl TemplateRegistry {
    /// Creates an empty template registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline template with the given name.
    ///
    /// Inline templates have the highest priority and will shadow any
    /// file-based templates with the same name.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline.insert(name.into(), content.into());
    }

    /// Adds templates discovered from a directory scan.
    ///
    /// This method processes a list of [`TemplateFile`] entries, typically
    /// produced by [`walk_template_dir`], and registers them for resolution.
    ///
    /// # Resolution Names
    ///
    /// Each file is registered under two names:
    /// - Without extension: `"card"` for `card.html`
    /// - With extension: `"card.html"` for `card.html`
    ///
    /// # Extension Priority
    ///
    /// If multiple files share the same base name with different extensions
    /// (e.g., `card.html` and `card.txt`), the higher-priority extension wins
    /// for the extensionless name. Both can still be accessed by full name.
    ///
    /// # Errors
    ///
    /// Returns an error if templates from different directories resolve to
    /// the same name.
    pub fn add_from_files(&mut self, files: Vec<TemplateFile>) -> Result<(), RenderError> {
        // Sort by extension priority so higher-priority extensions are processed first
        let mut sorted_files = files;
        sorted_files.sort_by_key(|f| f.extension_priority());

        for file in sorted_files {
            if let Some((existing_path, existing_dir)) = self.sources.get(&file.name) {
                // Only error if from different source directories
                if existing_dir != &file.source_dir {
                    return Err(RenderError::OperationError(format!(
                        "Template collision detected for \"{}\":\n  \
                         - {} (from {})\n  \
                         - {} (from {})",
                        file.name,
                        existing_path.display(),
                        existing_dir.display(),
                        file.absolute_path.display(),
                        file.source_dir.display()
                    )));
                }
                // Same directory, different extension - skip (higher priority already registered)
                continue;
            }

            self.sources.insert(
                file.name.clone(),
                (file.absolute_path.clone(), file.source_dir.clone()),
            );

            // Register under extensionless name
            self.files
                .insert(file.name.clone(), file.absolute_path.clone());

            // Register under name with extension (allows explicit access)
            self.files
                .insert(file.name_with_ext.clone(), file.absolute_path);
        }

        Ok(())
    }

    /// Looks up a template by name.
    ///
    /// Names can be specified with or without extension:
    /// - `"card"` resolves to `card.html` (or highest-priority extension)
    /// - `"card.html"` resolves to exactly that file
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if the template doesn't exist.
    pub fn get(&self, name: &str) -> Result<ResolvedTemplate, RenderError> {
        // Check inline first (highest priority)
        if let Some(content) = self.inline.get(name) {
            return Ok(ResolvedTemplate::Inline(content.clone()));
        }

        if let Some(path) = self.files.get(name) {
            return Ok(ResolvedTemplate::File(path.clone()));
        }

        Err(RenderError::TemplateNotFound(name.to_string()))
    }

    /// Gets the content of a template, reading from disk if necessary.
    ///
    /// For inline templates, returns the stored content directly.
    /// For file templates, reads the file from disk (enabling hot reload).
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not found or cannot be read from disk.
    pub fn get_content(&self, name: &str) -> Result<String, RenderError> {
        match self.get(name)? {
            ResolvedTemplate::Inline(content) => Ok(content),
            ResolvedTemplate::File(path) => std::fs::read_to_string(&path).map_err(|e| {
                RenderError::OperationError(format!(
                    "Failed to read template \"{}\": {}",
                    path.display(),
                    e
                ))
            }),
        }
    }

    /// Returns true if a template with the given name can be resolved.
    pub fn contains(&self, name: &str) -> bool {
        self.inline.contains_key(name) || self.files.contains_key(name)
    }

    /// Returns the number of registered templates.
    ///
    /// Note: This counts both extensionless and with-extension entries,
    /// so it may be higher than the number of unique template files.
    pub fn len(&self) -> usize {
        self.inline.len() + self.files.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty()
    }

    /// Returns an iterator over all registered template names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inline
            .keys()
            .map(|s| s.as_str())
            .chain(self.files.keys().map(|s| s.as_str()))
    }

    /// Clears all templates from the registry.
    pub fn clear(&mut self) {
        self.inline.clear();
        self.files.clear();
        self.sources.clear();
    }

    /// Clears file-based templates, keeping inline templates.
    ///
    /// Used when re-walking template directories.
    pub fn clear_files(&mut self) {
        self.files.clear();
        self.sources.clear();
    }
}

/// Walks a template directory and collects template files.
///
/// This function traverses the directory recursively, finding all files
/// with recognized template extensions ([`TEMPLATE_EXTENSIONS`]).
///
/// # Returns
///
/// A vector of [`TemplateFile`] entries, one for each discovered template.
/// The vector is not sorted; use [`TemplateFile::extension_priority`] for ordering.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or traversed.
pub fn walk_template_dir(root: impl AsRef<Path>) -> Result<Vec<TemplateFile>, RenderError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(RenderError::OperationError(format!(
            "Template directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    collect_template_files(root, root, &mut files)?;
    Ok(files)
}

fn collect_template_files(
    root: &Path,
    dir: &Path,
    out: &mut Vec<TemplateFile>,
) -> Result<(), RenderError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_template_files(root, &path, out)?;
            continue;
        }

        let Some(name_with_ext) = relative_name(root, &path) else {
            continue;
        };
        // Skip files without a recognized template extension
        let Some(name) = strip_template_extension(&name_with_ext) else {
            continue;
        };

        out.push(TemplateFile::new(name, name_with_ext, path, root));
    }

    Ok(())
}

/// Builds a resolution name from a path relative to the walk root,
/// normalized to forward slashes.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

fn strip_template_extension(name_with_ext: &str) -> Option<String> {
    TEMPLATE_EXTENSIONS
        .iter()
        .find_map(|ext| name_with_ext.strip_suffix(ext).map(|s| s.to_string()))
}
