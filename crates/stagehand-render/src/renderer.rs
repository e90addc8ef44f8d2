//! Pre-compiled template renderer.
//!
//! This module provides [`Renderer`], a high-level interface for template
//! rendering that supports both inline and file-based templates.
//!
//! # File-Based Templates
//!
//! Templates can be loaded from directories on the filesystem:
//!
//! ```rust,ignore
//! use stagehand_render::Renderer;
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template_dir("./templates")?;
//!
//! // Renders templates/widgets/card.html
//! let output = renderer.render("widgets/card", &data)?;
//! ```
//!
//! See [`Renderer::add_template_dir`] for details on template resolution
//! and the [`registry`](crate::registry) module for the underlying mechanism.
//!
//! # Development vs Release
//!
//! In development mode (`debug_assertions` enabled), file-based template
//! content is re-read from disk on each render. This enables editing templates
//! without recompiling. In release mode, templates are compiled once on first
//! use and reused.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::RenderError;
use crate::registry::{walk_template_dir, ResolvedTemplate, TemplateRegistry};

/// A renderer with pre-registered templates.
///
/// Use this when your application has multiple templates that are rendered
/// repeatedly. Templates are compiled once and reused.
///
/// # Template Sources
///
/// Templates can come from multiple sources:
///
/// 1. Inline strings via [`add_template`](Self::add_template) - highest priority
/// 2. Filesystem directories via [`add_template_dir`](Self::add_template_dir)
///
/// When the same name exists in multiple sources, inline templates take
/// precedence over file-based templates.
///
/// Note: File-based templates must have unique names across all registered
/// directories. If the same name exists in multiple directories, it is treated
/// as a collision error.
///
/// # Example
///
/// ```rust
/// use stagehand_render::Renderer;
/// use serde::Serialize;
///
/// let mut renderer = Renderer::new();
/// renderer.add_template("greeting", "<p>Hello, {{ name }}!</p>").unwrap();
///
/// #[derive(Serialize)]
/// struct Data { name: String }
///
/// let output = renderer.render("greeting", &Data { name: "World".into() }).unwrap();
/// assert_eq!(output, "<p>Hello, World!</p>");
/// ```
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
    /// Registry for template name resolution
    registry: TemplateRegistry,
    /// Whether the registry has been initialized from directories
    registry_initialized: bool,
    /// Registered template directories (for lazy initialization)
    template_dirs: Vec<PathBuf>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a new renderer backed by [`MiniJinjaEngine`].
    pub fn new() -> Self {
        Self::with_engine(Box::new(MiniJinjaEngine::new()))
    }

    /// Creates a new renderer with an explicit template engine.
    ///
    /// This allows injecting a custom template engine implementation,
    /// e.g. [`SubstEngine`](crate::SubstEngine) for plain substitution.
    pub fn with_engine(engine: Box<dyn TemplateEngine>) -> Self {
        Self {
            engine,
            registry: TemplateRegistry::new(),
            registry_initialized: false,
            template_dirs: Vec::new(),
        }
    }

    /// Registers a named inline template.
    ///
    /// Inline templates have the highest priority and will shadow any
    /// file-based templates with the same name.
    ///
    /// The template is compiled immediately; errors are returned if syntax
    /// is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        // Add to engine for compilation
        self.engine.add_template(name, source)?;
        // Also add to registry for consistency
        self.registry.add_inline(name, source);
        Ok(())
    }

    /// Adds a directory to search for template files.
    ///
    /// Templates in the directory are resolved by their relative path without
    /// extension. For example, with directory `./templates`:
    ///
    /// - `"card"` → `./templates/card.html`
    /// - `"widgets/list"` → `./templates/widgets/list.html`
    ///
    /// # Extension Priority
    ///
    /// Recognized extensions in priority order: `.html`, `.jinja`, `.txt`
    ///
    /// If multiple files share the same base name with different extensions,
    /// the higher-priority extension wins for extensionless lookups.
    ///
    /// # Collision Detection
    ///
    /// If the same template name exists in multiple directories, an error
    /// is returned (either on first render or during `refresh()`) with
    /// details about the conflicting files.
    ///
    /// # Lazy Initialization
    ///
    /// Directory walking happens lazily on first render (or explicit
    /// [`refresh`](Self::refresh)).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory doesn't exist or isn't readable.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RenderError::OperationError(format!(
                "Template directory does not exist: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(RenderError::OperationError(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        debug!(target: "stagehand.render", dir = %path.display(), "registered template directory");
        self.template_dirs.push(path.to_path_buf());
        // Mark as needing re-initialization
        self.registry_initialized = false;
        Ok(())
    }

    /// Forces a rebuild of the template resolution map.
    ///
    /// This re-walks all registered template directories and rebuilds the
    /// resolution map. Call this if:
    ///
    /// - You've added template directories after the first render
    /// - Template files have been added/removed from disk
    ///
    /// # Errors
    ///
    /// Returns an error if directory walking fails or template collisions
    /// are detected.
    pub fn refresh(&mut self) -> Result<(), RenderError> {
        self.initialize_registry()
    }

    /// Rebuilds file-based entries from registered directories.
    ///
    /// Inline templates are kept.
    fn initialize_registry(&mut self) -> Result<(), RenderError> {
        self.registry.clear_files();

        for dir in &self.template_dirs {
            let files = walk_template_dir(dir)?;
            self.registry.add_from_files(files)?;
        }

        self.registry_initialized = true;
        Ok(())
    }

    fn ensure_registry_initialized(&mut self) -> Result<(), RenderError> {
        if !self.registry_initialized && !self.template_dirs.is_empty() {
            self.initialize_registry()?;
        }
        Ok(())
    }

    /// Renders a registered template with the given data.
    ///
    /// Templates are looked up in this order:
    ///
    /// 1. Inline templates (added via [`add_template`](Self::add_template))
    /// 2. File-based templates (from [`add_template_dir`](Self::add_template_dir))
    ///
    /// # Hot Reloading (Development)
    ///
    /// In debug builds, file-based templates are re-read from disk on each
    /// render. This enables editing templates without recompiling.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if the name resolves to no
    /// source, or a rendering error if the template fails to compile or render.
    pub fn render<T: Serialize>(&mut self, name: &str, data: &T) -> Result<String, RenderError> {
        self.ensure_registry_initialized()?;

        let is_inline = matches!(self.registry.get(name), Ok(ResolvedTemplate::Inline(_)));
        let data_value = serde_json::to_value(data)?;

        // In release mode compiled templates are reused once added. In debug
        // mode file-based templates are reloaded on each render.
        if !cfg!(debug_assertions) || is_inline {
            if !self.engine.has_template(name) {
                let content = self.source_content(name)?;
                debug!(target: "stagehand.render", template = name, "compiling template");
                self.engine.add_template(name, &content)?;
            }
            self.engine.render_named(name, &data_value)
        } else {
            let content = self.source_content(name)?;
            debug!(target: "stagehand.render", template = name, "reloading template");
            self.engine.add_template(name, &content)?;
            self.engine.render_named(name, &data_value)
        }
    }

    /// Returns true if a template with the given name can be resolved.
    ///
    /// Takes `&mut self` because directory-based sources are walked lazily.
    pub fn has_template(&mut self, name: &str) -> bool {
        if self.ensure_registry_initialized().is_err() {
            return false;
        }
        self.registry.contains(name) || self.engine.has_template(name)
    }

    /// Gets template content, reading file-based templates from disk.
    fn source_content(&self, name: &str) -> Result<String, RenderError> {
        self.registry.get_content(name)
    }

    /// Returns the number of registered templates.
    ///
    /// This includes both inline and file-based templates.
    /// Note: File-based templates are counted with both extensionless and
    /// with-extension names, so this may be higher than the number of files.
    pub fn template_count(&self) -> usize {
        self.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::io::Write;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct SimpleData {
        message: String,
    }

    #[test]
    fn test_renderer_add_and_render() {
        let mut renderer = Renderer::new();
        renderer
            .add_template("test", "<p>{{ message }}</p>")
            .unwrap();

        let output = renderer
            .render(
                "test",
                &SimpleData {
                    message: "hi".into(),
                },
            )
            .unwrap();
        assert_eq!(output, "<p>hi</p>");
    }

    #[test]
    fn test_renderer_unknown_template_error() {
        let mut renderer = Renderer::new();

        let result = renderer.render(
            "nonexistent",
            &SimpleData {
                message: "x".into(),
            },
        );
        assert!(matches!(result, Err(RenderError::TemplateNotFound(_))));
    }

    #[test]
    fn test_renderer_multiple_templates() {
        let mut renderer = Renderer::new();
        renderer.add_template("tmpl_a", "A: {{ message }}").unwrap();
        renderer.add_template("tmpl_b", "B: {{ message }}").unwrap();

        let data = SimpleData {
            message: "test".into(),
        };

        assert_eq!(renderer.render("tmpl_a", &data).unwrap(), "A: test");
        assert_eq!(renderer.render("tmpl_b", &data).unwrap(), "B: test");
    }

    // =========================================================================
    // File-based template tests
    // =========================================================================

    fn create_template_file(dir: &Path, relative_path: &str, content: &str) {
        let full_path = dir.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file = std::fs::File::create(&full_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_renderer_add_template_dir() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.html", "Card: {{ value }}");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();

        #[derive(Serialize)]
        struct Data {
            value: String,
        }

        let output = renderer
            .render(
                "card",
                &Data {
                    value: "test".into(),
                },
            )
            .unwrap();
        assert_eq!(output, "Card: test");
    }

    #[test]
    fn test_renderer_nested_template_dir() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "widgets/list.html", "List: {{ count }}");
        create_template_file(temp_dir.path(), "widgets/detail.html", "Detail: {{ id }}");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();

        #[derive(Serialize)]
        struct ListData {
            count: usize,
        }

        #[derive(Serialize)]
        struct DetailData {
            id: usize,
        }

        let list_output = renderer
            .render("widgets/list", &ListData { count: 5 })
            .unwrap();
        assert_eq!(list_output, "List: 5");

        let detail_output = renderer
            .render("widgets/detail", &DetailData { id: 42 })
            .unwrap();
        assert_eq!(detail_output, "Detail: 42");
    }

    #[test]
    fn test_renderer_template_with_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.html", "Content");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();

        #[derive(Serialize)]
        struct Empty {}

        // Both with and without extension should work
        assert!(renderer.render("card", &Empty {}).is_ok());
        assert!(renderer.render("card.html", &Empty {}).is_ok());
    }

    #[test]
    fn test_renderer_inline_shadows_file() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.html", "From file");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();
        renderer.add_template("card", "From inline").unwrap();

        #[derive(Serialize)]
        struct Empty {}

        let output = renderer.render("card", &Empty {}).unwrap();
        assert_eq!(output, "From inline");
    }

    #[test]
    fn test_renderer_nonexistent_dir_error() {
        let mut renderer = Renderer::new();
        let result = renderer.add_template_dir("/nonexistent/path/that/does/not/exist");
        assert!(result.is_err());
    }

    #[test]
    fn test_renderer_hot_reload() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "hot.html", "Version 1");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();

        #[derive(Serialize)]
        struct Empty {}

        let output1 = renderer.render("hot", &Empty {}).unwrap();
        assert_eq!(output1, "Version 1");

        // Modify the file
        create_template_file(temp_dir.path(), "hot.html", "Version 2");

        // Second render should see the change (hot reload in debug builds)
        let output2 = renderer.render("hot", &Empty {}).unwrap();
        assert_eq!(output2, "Version 2");
    }

    #[test]
    fn test_renderer_extension_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.txt", "From txt");
        create_template_file(temp_dir.path(), "card.html", "From html");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();

        #[derive(Serialize)]
        struct Empty {}

        // Extensionless should resolve to .html (higher priority)
        let output = renderer.render("card", &Empty {}).unwrap();
        assert_eq!(output, "From html");
    }

    #[test]
    fn test_renderer_refresh_keeps_inline() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.html", "From file");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();
        renderer.add_template("greeting", "Hello").unwrap();

        renderer.refresh().unwrap();

        #[derive(Serialize)]
        struct Empty {}

        assert_eq!(renderer.render("greeting", &Empty {}).unwrap(), "Hello");
        assert_eq!(renderer.render("card", &Empty {}).unwrap(), "From file");
    }

    #[test]
    fn test_renderer_has_template() {
        let temp_dir = TempDir::new().unwrap();
        create_template_file(temp_dir.path(), "card.html", "content");

        let mut renderer = Renderer::new();
        renderer.add_template_dir(temp_dir.path()).unwrap();
        renderer.add_template("inline", "content").unwrap();

        assert!(renderer.has_template("inline"));
        assert!(renderer.has_template("card"));
        assert!(!renderer.has_template("missing"));
    }

    #[test]
    fn test_renderer_with_subst_engine() {
        use crate::subst::SubstEngine;

        let mut renderer = Renderer::with_engine(Box::new(SubstEngine::new()));
        renderer
            .add_template("welcome", "<p>Hello, {name}!</p>")
            .unwrap();

        #[derive(Serialize)]
        struct User {
            name: String,
        }

        let output = renderer
            .render(
                "welcome",
                &User {
                    name: "Stagehand".into(),
                },
            )
            .unwrap();
        assert_eq!(output, "<p>Hello, Stagehand!</p>");
    }

    #[test]
    fn test_renderer_template_count() {
        let mut renderer = Renderer::new();
        assert_eq!(renderer.template_count(), 0);

        renderer.add_template("a", "content").unwrap();
        renderer.add_template("b", "content").unwrap();
        assert_eq!(renderer.template_count(), 2);
    }
}
