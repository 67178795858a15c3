//! Theme extensions: the seven fields that merge over defaults.
//!
//! Every field is a mapping keyed by token name. Loading a document produces
//! a `ThemeExtensions` holding only what the document declared; the loader
//! then merges it over the defaults with [`ThemeExtensions::merged_over`].
//!
//! ## Built-in defaults
//!
//! [`ThemeExtensions::builtin`] carries the palettes, animations, keyframes,
//! font stacks, scales and shadows that ship with the framework config:
//!
//! ```rust
//! use windtheme::ThemeExtensions;
//!
//! let defaults = ThemeExtensions::builtin();
//! assert_eq!(defaults.color("medical", "primary").unwrap().to_string(), "#dc2626");
//! assert_eq!(defaults.font_families["finance"][0], "Roboto");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::HexColor;
use crate::document::{Located, ThemeField};
use crate::error::{ConfigError, Result};
use crate::keyframes::{KeyframeGroup, KeyframeKey, KeyframeStep};
use crate::merge::DeepMerge;

/// Shade name to color, e.g. `primary -> #dc2626`.
pub type Palette = BTreeMap<String, HexColor>;

/// Token name to CSS value.
pub type Scale = BTreeMap<String, String>;

/// Theme extension fields, each keyed by token name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtensions {
    pub color_palettes: BTreeMap<String, Palette>,
    /// Animation name to timing expression (`fadeIn 0.3s ease-in-out`).
    pub animations: Scale,
    pub keyframes: BTreeMap<String, KeyframeGroup>,
    /// Family alias to font names in fallback order.
    pub font_families: BTreeMap<String, Vec<String>>,
    pub spacing_scale: Scale,
    pub max_width_scale: Scale,
    pub box_shadows: Scale,
}

impl ThemeExtensions {
    /// The defaults every loaded config is merged over.
    pub fn builtin() -> Self {
        let rgb = |hex: u32| HexColor::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8);
        let palette = |primary: u32, secondary: u32, accent: u32| -> Palette {
            BTreeMap::from([
                ("primary".to_string(), rgb(primary)),
                ("secondary".to_string(), rgb(secondary)),
                ("accent".to_string(), rgb(accent)),
            ])
        };
        let step = |props: &[(&str, &str)]| -> KeyframeStep {
            props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        let fonts = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();

        Self {
            color_palettes: BTreeMap::from([
                ("medical".to_string(), palette(0xdc2626, 0xfef2f2, 0xfee2e2)),
                ("finance".to_string(), palette(0x059669, 0xf0fdf4, 0xdcfce7)),
                ("chatbot".to_string(), palette(0x3b82f6, 0xeff6ff, 0xdbeafe)),
            ]),
            animations: scale(&[
                ("fade-in", "fadeIn 0.3s ease-in-out"),
                ("slide-up", "slideUp 0.3s ease-out"),
                ("pulse-slow", "pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite"),
            ]),
            keyframes: BTreeMap::from([
                (
                    "fadeIn".to_string(),
                    BTreeMap::from([
                        (KeyframeKey::FROM, step(&[("opacity", "0")])),
                        (KeyframeKey::TO, step(&[("opacity", "1")])),
                    ]),
                ),
                (
                    "slideUp".to_string(),
                    BTreeMap::from([
                        (
                            KeyframeKey::FROM,
                            step(&[("transform", "translateY(10px)"), ("opacity", "0")]),
                        ),
                        (
                            KeyframeKey::TO,
                            step(&[("transform", "translateY(0)"), ("opacity", "1")]),
                        ),
                    ]),
                ),
            ]),
            font_families: BTreeMap::from([
                ("medical".to_string(), fonts(&["Inter", "system-ui", "sans-serif"])),
                ("finance".to_string(), fonts(&["Roboto", "system-ui", "sans-serif"])),
            ]),
            spacing_scale: scale(&[("18", "4.5rem"), ("88", "22rem")]),
            max_width_scale: scale(&[("8xl", "88rem")]),
            box_shadows: scale(&[
                (
                    "chatbot",
                    "0 10px 25px -5px rgba(0, 0, 0, 0.1), 0 10px 10px -5px rgba(0, 0, 0, 0.04)",
                ),
                (
                    "message",
                    "0 2px 4px -1px rgba(0, 0, 0, 0.06), 0 1px 2px -1px rgba(0, 0, 0, 0.06)",
                ),
            ]),
        }
    }

    /// Returns `self` merged over `defaults`: colliding keys take the value
    /// from `self`, all other defaults are kept.
    pub fn merged_over(self, defaults: &ThemeExtensions) -> ThemeExtensions {
        let mut merged = defaults.clone();
        merged.color_palettes.merge_from(self.color_palettes);
        merged.animations.merge_from(self.animations);
        merged.keyframes.merge_from(self.keyframes);
        merged.font_families.merge_from(self.font_families);
        merged.spacing_scale.merge_from(self.spacing_scale);
        merged.max_width_scale.merge_from(self.max_width_scale);
        merged.box_shadows.merge_from(self.box_shadows);
        merged
    }

    /// Looks up one shade of a palette.
    pub fn color(&self, palette: &str, shade: &str) -> Option<HexColor> {
        self.color_palettes.get(palette)?.get(shade).copied()
    }

    /// Total number of tokens across all fields.
    pub fn token_count(&self) -> usize {
        self.color_palettes.values().map(BTreeMap::len).sum::<usize>()
            + self.animations.len()
            + self.keyframes.len()
            + self.font_families.len()
            + self.spacing_scale.len()
            + self.max_width_scale.len()
            + self.box_shadows.len()
    }

    /// Reads and validates the theme sections of a document.
    pub(crate) fn from_sections(sections: &[(ThemeField, Located<'_>)]) -> Result<Self> {
        let mut theme = ThemeExtensions::default();
        for (field, located) in sections {
            match field {
                ThemeField::ColorPalettes => read_palettes(located, &mut theme.color_palettes)?,
                ThemeField::Animations => read_scale(located, &mut theme.animations)?,
                ThemeField::Keyframes => read_keyframes(located, &mut theme.keyframes)?,
                ThemeField::FontFamilies => read_fonts(located, &mut theme.font_families)?,
                ThemeField::SpacingScale => read_scale(located, &mut theme.spacing_scale)?,
                ThemeField::MaxWidthScale => read_scale(located, &mut theme.max_width_scale)?,
                ThemeField::BoxShadows => read_scale(located, &mut theme.box_shadows)?,
            }
        }
        Ok(theme)
    }
}

fn scale(entries: &[(&str, &str)]) -> Scale {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn read_palettes(located: &Located<'_>, out: &mut BTreeMap<String, Palette>) -> Result<()> {
    for (palette_name, palette) in located.entries()? {
        let mut shades = Palette::new();
        for (shade, value) in palette.entries()? {
            let color = value
                .value
                .as_str()
                .and_then(|s| HexColor::parse(s).ok())
                .ok_or_else(|| ConfigError::InvalidColor {
                    palette: palette_name.clone(),
                    shade: shade.clone(),
                    value: render_scalar(value.value),
                })?;
            shades.insert(shade, color);
        }
        out.insert(palette_name, shades);
    }
    Ok(())
}

fn read_scale(located: &Located<'_>, out: &mut Scale) -> Result<()> {
    for (token, value) in located.entries()? {
        out.insert(token, value.text()?);
    }
    Ok(())
}

fn read_keyframes(located: &Located<'_>, out: &mut BTreeMap<String, KeyframeGroup>) -> Result<()> {
    for (group_name, group) in located.entries()? {
        let mut steps = KeyframeGroup::new();
        for (key, step) in group.entries()? {
            let selector =
                KeyframeKey::parse(&key).map_err(|_| ConfigError::InvalidKeyframeKey {
                    group: group_name.clone(),
                    key: key.clone(),
                })?;
            let mut properties = KeyframeStep::new();
            for (property, value) in step.entries()? {
                properties.insert(property, value.text()?);
            }
            steps.insert(selector, properties);
        }
        out.insert(group_name, steps);
    }
    Ok(())
}

fn read_fonts(located: &Located<'_>, out: &mut BTreeMap<String, Vec<String>>) -> Result<()> {
    for (alias, stack) in located.entries()? {
        let names = stack
            .items()?
            .iter()
            .map(Located::non_empty_string)
            .collect::<Result<Vec<_>>>()?;
        if names.is_empty() {
            return Err(stack.error("font family needs at least one font name"));
        }
        out.insert(alias, names);
    }
    Ok(())
}

fn render_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
