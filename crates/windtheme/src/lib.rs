//! # windtheme - Validated Theme Configuration Loading
//!
//! `windtheme` loads the theme configuration of a utility-first CSS framework
//! (content globs, color palettes, animations, keyframes, font stacks,
//! spacing and width scales, shadows, plugins and a safelist), validates it,
//! and returns an immutable [`ThemeConfig`] for a stylesheet build to consume.
//!
//! The crate does not generate CSS and never resolves or runs plugins.
//!
//! ## Core Concepts
//!
//! - [`ConfigLoader`]: validates documents and merges them over defaults
//! - [`ThemeConfig`]: the validated, read-only result
//! - [`ThemeExtensions`]: the seven mergeable theme fields and the builtin defaults
//! - [`HexColor`], [`KeyframeKey`], [`ContentGlob`]: validated leaf values
//! - [`Safelist`], [`PluginRef`]: class names kept verbatim and opaque plugin references
//!
//! ## Quick Start
//!
//! ```rust
//! use windtheme::ConfigLoader;
//!
//! let config = ConfigLoader::new().load_yaml(r#"
//! contentGlobs:
//!   - "./src/**/*.{js,jsx,ts,tsx}"
//! fontFamilies:
//!   brand: [Lato, system-ui, sans-serif]
//! plugins: ["@tailwindcss/forms"]
//! "#).unwrap();
//!
//! assert_eq!(config.font_stack("brand").unwrap(), "Lato, system-ui, sans-serif");
//! // Defaults survive alongside the document's additions.
//! assert!(config.font_families().contains_key("medical"));
//! assert_eq!(config.plugins()[0].name(), "@tailwindcss/forms");
//! ```
//!
//! ## Deep Merge
//!
//! Theme extensions are additive. Overriding one shade keeps its sibling
//! shades and every other palette:
//!
//! ```rust
//! use windtheme::ConfigLoader;
//!
//! let config = ConfigLoader::new().load_yaml(r##"
//! contentGlobs: [src]
//! colorPalettes:
//!   medical:
//!     secondary: "#000000"
//! "##).unwrap();
//!
//! assert_eq!(config.color("medical", "primary").unwrap().to_string(), "#dc2626");
//! assert_eq!(config.color("medical", "secondary").unwrap().to_string(), "#000000");
//! assert!(config.color("finance", "primary").is_some());
//! ```
//!
//! ## Framework Layout
//!
//! Documents shaped like the framework's own config file are accepted too:
//!
//! ```rust
//! use windtheme::ConfigLoader;
//!
//! let config = ConfigLoader::new().load_yaml(r##"
//! content: ["./src/**/*.tsx"]
//! theme:
//!   extend:
//!     colors:
//!       brand: { primary: "#112233" }
//! "##).unwrap();
//!
//! assert!(config.color("brand", "primary").is_some());
//! ```

mod color;
mod config;
mod document;
mod error;
mod glob;
mod keyframes;
mod loader;
mod merge;
mod plugin;
mod safelist;
mod theme;

pub use color::HexColor;
pub use config::ThemeConfig;
pub use error::{ConfigError, Result};
pub use glob::ContentGlob;
pub use keyframes::{KeyframeGroup, KeyframeKey, KeyframeStep};
pub use loader::{load, ConfigLoader, DocumentFormat, CONFIG_EXTENSIONS};
pub use merge::DeepMerge;
pub use plugin::PluginRef;
pub use safelist::Safelist;
pub use theme::{Palette, Scale, ThemeExtensions};

// Documents are `serde_yaml` values; re-exported so callers need not pin the version.
pub use serde_yaml::Value as Document;
