//! Opaque plugin references.
//!
//! Plugins are identified by name and handed to the consumer untouched.
//! Nothing here resolves, loads or runs them.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A reference to an external plugin module, with optional opaque options.
///
/// Accepted document forms:
///
/// ```yaml
/// plugins:
///   - "@tailwindcss/forms"
///   - name: "@tailwindcss/typography"
///     options: { className: prose }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRef {
    name: String,
    options: Option<serde_yaml::Value>,
}

impl PluginRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    /// Attaches options that the consumer passes to the plugin.
    pub fn with_options(mut self, options: serde_yaml::Value) -> Self {
        self.options = Some(options);
        self
    }

    /// The module identifier, e.g. `@tailwindcss/forms`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> Option<&serde_yaml::Value> {
        self.options.as_ref()
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for PluginRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.options {
            None => serializer.serialize_str(&self.name),
            Some(options) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", &self.name)?;
                map.serialize_entry("options", options)?;
                map.end()
            }
        }
    }
}
