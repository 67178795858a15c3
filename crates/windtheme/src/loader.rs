//! Loading theme configuration documents.
//!
//! [`ConfigLoader`] turns a parsed document into a [`ThemeConfig`]. It owns
//! the defaults the document's theme extensions merge over and nothing else,
//! so one loader can serve any number of independent loads.
//!
//! # Load stages
//!
//! 1. **Split**: detect the layout and locate each section.
//! 2. **Content**: `contentGlobs` must be a non-empty list of valid globs.
//! 3. **Theme**: validate colors, keyframe selectors and scales, then
//!    deep-merge over the defaults.
//! 4. **Plugins**: collect opaque references in order.
//! 5. **Safelist**: deduplicate, keeping first-seen order.
//!
//! The first failing stage aborts the load.
//!
//! # Example
//!
//! ```rust
//! use windtheme::ConfigLoader;
//!
//! let config = ConfigLoader::new().load_yaml(r##"
//! contentGlobs: ["./src/**/*.{js,jsx,ts,tsx}"]
//! colorPalettes:
//!   medical: { secondary: "#000000" }
//! safelist: [bg-red-500, bg-red-500, animate-spin]
//! "##).unwrap();
//!
//! assert_eq!(config.color("medical", "primary").unwrap().to_string(), "#dc2626");
//! assert_eq!(config.color("medical", "secondary").unwrap().to_string(), "#000000");
//! assert_eq!(config.safelist().len(), 2);
//! ```

use std::path::Path;

use serde_yaml::Value;

use crate::config::ThemeConfig;
use crate::document::{LastWriteWins, Located, Sections};
use crate::error::{ConfigError, Result};
use crate::glob::ContentGlob;
use crate::plugin::PluginRef;
use crate::safelist::Safelist;
use crate::theme::ThemeExtensions;

/// File extensions accepted by [`ConfigLoader::load_file`], mapped to their format.
pub const CONFIG_EXTENSIONS: &[(&str, DocumentFormat)] = &[
    ("yaml", DocumentFormat::Yaml),
    ("yml", DocumentFormat::Yaml),
    ("json", DocumentFormat::Json),
];

/// The complete framework configuration this crate's defaults come from,
/// in framework layout.
const REFERENCE_DOCUMENT: &str = include_str!("assets/reference.yaml");

/// Text formats a document can be parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Picks a format from a file extension, if recognized.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        CONFIG_EXTENSIONS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
    }

    /// Parses `text` into a document tree. A key repeated within one mapping
    /// keeps its last value.
    pub fn parse(self, text: &str) -> std::result::Result<Value, String> {
        let tree: std::result::Result<LastWriteWins, String> = match self {
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        };
        tree.map(|tree| tree.0)
    }
}

/// Validates documents and merges them over a set of defaults.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    defaults: ThemeExtensions,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that merges over [`ThemeExtensions::builtin`].
    pub fn new() -> Self {
        Self::with_defaults(ThemeExtensions::builtin())
    }

    /// A loader that merges over the given defaults.
    pub fn with_defaults(defaults: ThemeExtensions) -> Self {
        Self { defaults }
    }

    /// A loader whose output contains only what the document declares.
    pub fn without_defaults() -> Self {
        Self::with_defaults(ThemeExtensions::default())
    }

    pub fn defaults(&self) -> &ThemeExtensions {
        &self.defaults
    }

    /// The complete reference configuration in framework layout.
    ///
    /// Useful as a starting point for new projects; loading it with
    /// [`without_defaults`](Self::without_defaults) reproduces the builtin
    /// theme extensions.
    pub fn reference_document() -> &'static str {
        REFERENCE_DOCUMENT
    }

    /// Validates `document` and merges its theme extensions over the defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidConfig`] for shape errors, unknown keys, or a
    ///   missing or empty `contentGlobs`
    /// - [`ConfigError::InvalidGlob`] for malformed glob syntax
    /// - [`ConfigError::InvalidColor`] for a shade that is not `#RRGGBB`
    /// - [`ConfigError::InvalidKeyframeKey`] for a selector that is not a
    ///   percentage or `from`/`to`
    pub fn load(&self, document: &Value) -> Result<ThemeConfig> {
        let sections = Sections::split(document)?;
        tracing::debug!(layout = ?sections.layout, "loading theme config");

        let content_globs = read_content_globs(sections.content.as_ref())?;

        let declared = ThemeExtensions::from_sections(&sections.theme)?;
        tracing::debug!(
            declared = declared.token_count(),
            defaults = self.defaults.token_count(),
            "merging theme extensions over defaults"
        );
        let theme = declared.merged_over(&self.defaults);

        let plugins = match &sections.plugins {
            Some(located) => read_plugins(located)?,
            None => Vec::new(),
        };

        let safelist = match &sections.safelist {
            Some(located) => read_safelist(located)?,
            None => Safelist::new(),
        };

        tracing::debug!(
            globs = content_globs.len(),
            tokens = theme.token_count(),
            plugins = plugins.len(),
            safelist = safelist.len(),
            "theme config loaded"
        );

        Ok(ThemeConfig {
            content_globs,
            theme,
            plugins,
            safelist,
        })
    }

    /// Parses YAML text and loads it.
    pub fn load_yaml(&self, yaml: &str) -> Result<ThemeConfig> {
        self.load_text(yaml, DocumentFormat::Yaml, None)
    }

    /// Parses JSON text and loads it.
    pub fn load_json(&self, json: &str) -> Result<ThemeConfig> {
        self.load_text(json, DocumentFormat::Json, None)
    }

    /// Reads a `.yaml`, `.yml` or `.json` file and loads it.
    ///
    /// # Errors
    ///
    /// Besides the validation errors of [`load`](Self::load): [`ConfigError::Io`]
    /// if the file cannot be read, [`ConfigError::Parse`] if its text is
    /// malformed, and [`ConfigError::InvalidConfig`] for an unrecognized
    /// extension.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<ThemeConfig> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            ConfigError::invalid(
                path.display().to_string(),
                "unrecognized config extension (expected .yaml, .yml or .json)",
            )
        })?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?format, "read config file");
        self.load_text(&text, format, Some(path))
    }

    fn load_text(
        &self,
        text: &str,
        format: DocumentFormat,
        path: Option<&Path>,
    ) -> Result<ThemeConfig> {
        let document = format.parse(text).map_err(|message| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message,
        })?;
        self.load(&document)
    }
}

/// Loads `document` over the builtin defaults.
pub fn load(document: &Value) -> Result<ThemeConfig> {
    ConfigLoader::new().load(document)
}

fn read_content_globs(content: Option<&Located<'_>>) -> Result<Vec<ContentGlob>> {
    let content = content.ok_or_else(|| {
        ConfigError::invalid("contentGlobs", "at least one content glob is required")
    })?;

    let items = content.items()?;
    if items.is_empty() {
        return Err(content.error("at least one content glob is required"));
    }

    items
        .iter()
        .map(|item| {
            let pattern = item.non_empty_string()?;
            ContentGlob::parse(&pattern).map_err(|message| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                message,
            })
        })
        .collect()
}

fn read_plugins(located: &Located<'_>) -> Result<Vec<PluginRef>> {
    located
        .items()?
        .iter()
        .map(|item| {
            if item.value.is_string() {
                return Ok(PluginRef::new(item.non_empty_string()?));
            }

            let mut name = None;
            let mut options = None;
            for (key, field) in item.entries()? {
                match key.as_str() {
                    "name" => name = Some(field.non_empty_string()?),
                    "options" if !field.is_null() => options = Some(field.value.clone()),
                    "options" => {}
                    other => {
                        return Err(item.error(format!("unknown plugin key '{}'", other)));
                    }
                }
            }

            let name = name.ok_or_else(|| item.error("plugin reference needs a 'name'"))?;
            let plugin = PluginRef::new(name);
            Ok(match options {
                Some(options) => plugin.with_options(options),
                None => plugin,
            })
        })
        .collect()
}

fn read_safelist(located: &Located<'_>) -> Result<Safelist> {
    let mut safelist = Safelist::new();
    for item in located.items()? {
        let class = item.non_empty_string()?;
        if !safelist.insert(class) {
            tracing::debug!(path = %item.path, "dropping duplicate safelist entry");
        }
    }
    Ok(safelist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_missing_content_globs() {
        let err = ConfigLoader::new().load(&yaml("safelist: [a]\n")).unwrap_err();
        match err {
            ConfigError::InvalidConfig { path, .. } => assert_eq!(path, "contentGlobs"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_content_globs() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: []\n"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_null_content_globs_is_missing() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs:\n"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_non_string_content_glob() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: [src/**/*.rs, 42]\n"))
            .unwrap_err();
        match err {
            ConfigError::InvalidConfig { path, .. } => assert_eq!(path, "contentGlobs.1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_string_content_glob() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: ['']\n"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_malformed_glob() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: ['src/{a,b']\n"))
            .unwrap_err();
        match err {
            ConfigError::InvalidGlob { pattern, .. } => assert_eq!(pattern, "src/{a,b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plugins_keep_order_and_options() {
        let config = ConfigLoader::new()
            .load(&yaml(
                r#"
contentGlobs: [src]
plugins:
  - "@tailwindcss/forms"
  - name: "@tailwindcss/typography"
    options: { className: prose }
  - name: "@tailwindcss/aspect-ratio"
    options: ~
"#,
            ))
            .unwrap();

        let names: Vec<&str> = config.plugins().iter().map(PluginRef::name).collect();
        assert_eq!(
            names,
            vec![
                "@tailwindcss/forms",
                "@tailwindcss/typography",
                "@tailwindcss/aspect-ratio"
            ]
        );
        assert!(config.plugins()[0].options().is_none());
        assert_eq!(
            config.plugins()[1].options().unwrap()["className"],
            Value::String("prose".into())
        );
        assert!(config.plugins()[2].options().is_none());
    }

    #[test]
    fn test_plugin_without_name() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: [src]\nplugins:\n  - options: {}\n"))
            .unwrap_err();
        match err {
            ConfigError::InvalidConfig { path, message } => {
                assert_eq!(path, "plugins.0");
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plugin_unknown_key() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: [src]\nplugins:\n  - { name: x, path: y }\n"))
            .unwrap_err();
        assert!(err.to_string().contains("path"));
    }

    #[test]
    fn test_safelist_rejects_non_strings() {
        let err = ConfigLoader::new()
            .load(&yaml("contentGlobs: [src]\nsafelist: [animate-spin, 3]\n"))
            .unwrap_err();
        match err {
            ConfigError::InvalidConfig { path, .. } => assert_eq!(path, "safelist.1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let config = ConfigLoader::without_defaults()
            .load(&yaml("contentGlobs: [src]\n"))
            .unwrap();
        assert!(config.plugins().is_empty());
        assert!(config.safelist().is_empty());
        assert_eq!(config.theme(), &ThemeExtensions::default());
    }

    #[test]
    fn test_error_is_atomic_after_valid_sections() {
        // Valid globs and palettes precede the bad keyframe key.
        let err = ConfigLoader::new()
            .load(&yaml(
                r##"
contentGlobs: [src]
colorPalettes:
  brand: { primary: "#112233" }
keyframes:
  spin:
    halfway: { transform: "rotate(180deg)" }
"##,
            ))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyframeKey { .. }));
    }

    #[test]
    fn test_load_json() {
        let config = ConfigLoader::new()
            .load_json(r#"{"contentGlobs": ["src/**/*.ts"], "safelist": ["a", "a"]}"#)
            .unwrap();
        assert_eq!(config.content_globs()[0].as_str(), "src/**/*.ts");
        assert_eq!(config.safelist().len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let err = ConfigLoader::new().load_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));

        let err = ConfigLoader::new().load_yaml("a: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("theme.yaml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("theme.YML")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("theme.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("theme.js")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("theme")), None);
    }

    #[test]
    fn test_load_file_unknown_extension() {
        let err = ConfigLoader::new().load_file("tailwind.config.js").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_file_missing() {
        let err = ConfigLoader::new()
            .load_file("/nonexistent/dir/theme.yaml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_free_function_uses_builtin_defaults() {
        let config = load(&yaml("contentGlobs: [src]\n")).unwrap();
        assert_eq!(config.theme(), &ThemeExtensions::builtin());
    }
}
