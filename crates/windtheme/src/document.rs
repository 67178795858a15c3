//! Reading the raw document tree.
//!
//! Documents come in two layouts. The flat layout names every field at the
//! top level:
//!
//! ```yaml
//! contentGlobs: ["./src/**/*.{js,jsx,ts,tsx}"]
//! colorPalettes:
//!   medical: { primary: "#dc2626" }
//! safelist: [animate-spin]
//! ```
//!
//! The framework layout mirrors the utility framework's own config file:
//!
//! ```yaml
//! content: ["./src/**/*.{js,jsx,ts,tsx}"]
//! theme:
//!   extend:
//!     colors:
//!       medical: { primary: "#dc2626" }
//! safelist: [animate-spin]
//! ```
//!
//! A document with a top-level `theme` or `content` key is read in the
//! framework layout. Either way [`Sections::split`] hands the loader the same
//! set of located values, and unknown keys are rejected.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, Result};

/// The theme fields that deep-merge over defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ThemeField {
    ColorPalettes,
    Animations,
    Keyframes,
    FontFamilies,
    SpacingScale,
    MaxWidthScale,
    BoxShadows,
}

/// `(field, flat-layout key, framework-layout key under theme.extend)`
const THEME_FIELDS: &[(ThemeField, &str, &str)] = &[
    (ThemeField::ColorPalettes, "colorPalettes", "colors"),
    (ThemeField::Animations, "animations", "animation"),
    (ThemeField::Keyframes, "keyframes", "keyframes"),
    (ThemeField::FontFamilies, "fontFamilies", "fontFamily"),
    (ThemeField::SpacingScale, "spacingScale", "spacing"),
    (ThemeField::MaxWidthScale, "maxWidthScale", "maxWidth"),
    (ThemeField::BoxShadows, "boxShadows", "boxShadow"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout {
    Flat,
    Framework,
}

/// A value together with its dotted location in the document.
#[derive(Debug, Clone)]
pub(crate) struct Located<'a> {
    pub path: String,
    pub value: &'a Value,
}

impl<'a> Located<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            path: String::new(),
            value,
        }
    }

    fn child(&self, key: &str, value: &'a Value) -> Located<'a> {
        let path = if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        };
        Located { path, value }
    }

    fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }

    pub fn error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::invalid(self.display_path(), message)
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn as_mapping(&self) -> Result<&'a Mapping> {
        self.value
            .as_mapping()
            .ok_or_else(|| self.error(format!("expected a mapping, found {}", kind(self.value))))
    }

    pub fn as_sequence(&self) -> Result<&'a [Value]> {
        self.value
            .as_sequence()
            .map(Vec::as_slice)
            .ok_or_else(|| self.error(format!("expected a sequence, found {}", kind(self.value))))
    }

    /// Mapping entries in document order, keys rendered as strings.
    pub fn entries(&self) -> Result<Vec<(String, Located<'a>)>> {
        self.as_mapping()?
            .iter()
            .map(|(key, value)| {
                let key = scalar_text(key).ok_or_else(|| match key {
                    Value::Number(_) => self.error(format!("mapping key: {}", FRACTIONAL_NUMBER)),
                    other => {
                        self.error(format!("mapping key must be a string, found {}", kind(other)))
                    }
                })?;
                let located = self.child(&key, value);
                Ok((key, located))
            })
            .collect()
    }

    /// Sequence items, each located by index.
    pub fn items(&self) -> Result<Vec<Located<'a>>> {
        Ok(self
            .as_sequence()?
            .iter()
            .enumerate()
            .map(|(i, value)| self.child(&i.to_string(), value))
            .collect())
    }

    /// A scalar rendered as text. Integers are accepted so that YAML such as
    /// `opacity: 0` reads the same as `opacity: "0"`. Fractional numbers are
    /// rejected: their parsed form loses the spelling (`0.50`, `1e3`).
    pub fn text(&self) -> Result<String> {
        scalar_text(self.value).ok_or_else(|| match self.value {
            Value::Number(_) => self.error(FRACTIONAL_NUMBER),
            other => self.error(format!("expected a string, found {}", kind(other))),
        })
    }

    /// A non-empty string; numbers are not accepted.
    pub fn non_empty_string(&self) -> Result<String> {
        match self.value {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            Value::String(_) => Err(self.error("must not be empty")),
            other => Err(self.error(format!("expected a string, found {}", kind(other)))),
        }
    }
}

/// The top-level pieces of a document, independent of layout.
#[derive(Debug)]
pub(crate) struct Sections<'a> {
    pub layout: Layout,
    pub content: Option<Located<'a>>,
    pub theme: Vec<(ThemeField, Located<'a>)>,
    pub plugins: Option<Located<'a>>,
    pub safelist: Option<Located<'a>>,
}

impl<'a> Sections<'a> {
    /// Splits a document into its sections. Null values count as absent.
    pub fn split(document: &'a Value) -> Result<Self> {
        let root = Located::root(document);
        let entries = root.entries()?;

        let layout = if entries.iter().any(|(k, _)| k == "theme" || k == "content") {
            Layout::Framework
        } else {
            Layout::Flat
        };

        let mut sections = Sections {
            layout,
            content: None,
            theme: Vec::new(),
            plugins: None,
            safelist: None,
        };

        for (key, located) in entries {
            if located.is_null() {
                continue;
            }
            match (layout, key.as_str()) {
                (_, "plugins") => sections.plugins = Some(located),
                (_, "safelist") => sections.safelist = Some(located),
                (Layout::Flat, "contentGlobs") | (Layout::Framework, "content") => {
                    sections.content = Some(located)
                }
                (Layout::Framework, "theme") => sections.read_framework_theme(&located)?,
                (Layout::Flat, name) => match THEME_FIELDS.iter().find(|(_, flat, _)| *flat == name)
                {
                    Some((field, _, _)) => sections.theme.push((*field, located)),
                    None => return Err(unknown_key(&root, name, layout)),
                },
                (Layout::Framework, name) => return Err(unknown_key(&root, name, layout)),
            }
        }

        Ok(sections)
    }

    fn read_framework_theme(&mut self, theme: &Located<'a>) -> Result<()> {
        for (key, located) in theme.entries()? {
            if key != "extend" {
                return Err(theme.error(format!(
                    "unknown key '{}' (only 'extend' is supported; theme values always merge over defaults)",
                    key
                )));
            }
            if located.is_null() {
                continue;
            }
            for (name, field_value) in located.entries()? {
                if field_value.is_null() {
                    continue;
                }
                match THEME_FIELDS
                    .iter()
                    .find(|(_, _, framework)| *framework == name)
                {
                    Some((field, _, _)) => self.theme.push((*field, field_value)),
                    None => {
                        return Err(located.error(format!("unknown theme extension '{}'", name)))
                    }
                }
            }
        }
        Ok(())
    }
}

fn unknown_key(root: &Located<'_>, key: &str, layout: Layout) -> ConfigError {
    let hint = match layout {
        Layout::Flat => "flat layout",
        Layout::Framework => "framework layout; fields belong under theme.extend",
    };
    root.error(format!("unknown key '{}' ({})", key, hint))
}

const FRACTIONAL_NUMBER: &str = "fractional numbers must be quoted to keep their spelling";

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if !n.is_f64() => Some(n.to_string()),
        _ => None,
    }
}

/// A document tree read from text.
///
/// Unlike `serde_yaml::Value`'s own `Deserialize`, a key repeated within one
/// mapping does not fail: the last value wins, in the first occurrence's
/// position.
pub(crate) struct LastWriteWins(pub Value);

impl<'de> Deserialize<'de> for LastWriteWins {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TreeVisitor).map(LastWriteWins)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a YAML or JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Number(v.into()))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        LastWriteWins::deserialize(deserializer).map(|tree| tree.0)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(LastWriteWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        while let Some((LastWriteWins(key), LastWriteWins(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
