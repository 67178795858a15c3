//! The validated configuration handed to the stylesheet build.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::HexColor;
use crate::glob::ContentGlob;
use crate::keyframes::KeyframeGroup;
use crate::plugin::PluginRef;
use crate::safelist::Safelist;
use crate::theme::{Palette, Scale, ThemeExtensions};

/// A fully validated theme configuration.
///
/// Built only by [`ConfigLoader`](crate::ConfigLoader); there are no setters.
/// Serializes to the flat document layout, so a dumped config loads back to
/// an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub(crate) content_globs: Vec<ContentGlob>,
    #[serde(flatten)]
    pub(crate) theme: ThemeExtensions,
    pub(crate) plugins: Vec<PluginRef>,
    pub(crate) safelist: Safelist,
}

impl ThemeConfig {
    /// Source globs scanned for class usage, in declaration order.
    pub fn content_globs(&self) -> &[ContentGlob] {
        &self.content_globs
    }

    /// All theme extensions after merging over defaults.
    pub fn theme(&self) -> &ThemeExtensions {
        &self.theme
    }

    pub fn color_palettes(&self) -> &BTreeMap<String, Palette> {
        &self.theme.color_palettes
    }

    pub fn animations(&self) -> &Scale {
        &self.theme.animations
    }

    pub fn keyframes(&self) -> &BTreeMap<String, KeyframeGroup> {
        &self.theme.keyframes
    }

    pub fn font_families(&self) -> &BTreeMap<String, Vec<String>> {
        &self.theme.font_families
    }

    pub fn spacing_scale(&self) -> &Scale {
        &self.theme.spacing_scale
    }

    pub fn max_width_scale(&self) -> &Scale {
        &self.theme.max_width_scale
    }

    pub fn box_shadows(&self) -> &Scale {
        &self.theme.box_shadows
    }

    /// Plugin references in registration order. Never resolved here.
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    pub fn safelist(&self) -> &Safelist {
        &self.safelist
    }

    /// Looks up one shade of a palette.
    pub fn color(&self, palette: &str, shade: &str) -> Option<HexColor> {
        self.theme.color(palette, shade)
    }

    /// Renders a font family as a CSS `font-family` value.
    ///
    /// Names containing whitespace are double-quoted unless already quoted:
    /// `["Segoe UI", "sans-serif"]` becomes `"Segoe UI", sans-serif`.
    pub fn font_stack(&self, alias: &str) -> Option<String> {
        let names = self.theme.font_families.get(alias)?;
        let rendered: Vec<String> = names
            .iter()
            .map(String::as_str)
            .map(quote_font_name)
            .collect();
        Some(rendered.join(", "))
    }

    /// Whether any content glob selects `path`.
    pub fn scans(&self, path: &str) -> bool {
        self.content_globs.iter().any(|glob| glob.is_match(path))
    }
}

fn quote_font_name(name: &str) -> String {
    let quoted = name.starts_with('"') || name.starts_with('\'');
    if !quoted && name.chars().any(char::is_whitespace) {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ThemeConfig {
        let mut theme = ThemeExtensions::builtin();
        theme.font_families.insert(
            "ui".to_string(),
            vec![
                "Segoe UI".to_string(),
                "'Helvetica Neue'".to_string(),
                "sans-serif".to_string(),
            ],
        );
        ThemeConfig {
            content_globs: vec![ContentGlob::parse("./src/**/*.{js,jsx,ts,tsx}").unwrap()],
            theme,
            plugins: vec![PluginRef::new("@tailwindcss/forms")],
            safelist: ["animate-spin"].into_iter().collect(),
        }
    }

    #[test]
    fn test_font_stack_plain_names() {
        assert_eq!(
            config().font_stack("medical").unwrap(),
            "Inter, system-ui, sans-serif"
        );
    }

    #[test]
    fn test_font_stack_quotes_names_with_spaces() {
        assert_eq!(
            config().font_stack("ui").unwrap(),
            "\"Segoe UI\", 'Helvetica Neue', sans-serif"
        );
    }

    #[test]
    fn test_font_stack_unknown_alias() {
        assert!(config().font_stack("missing").is_none());
    }

    #[test]
    fn test_scans() {
        let cfg = config();
        assert!(cfg.scans("./src/App.tsx"));
        assert!(!cfg.scans("./public/index.html"));
    }

    #[test]
    fn test_serializes_flat_layout() {
        let value = serde_json::to_value(config()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for expected in [
            "contentGlobs",
            "colorPalettes",
            "animations",
            "keyframes",
            "fontFamilies",
            "spacingScale",
            "maxWidthScale",
            "boxShadows",
            "plugins",
            "safelist",
        ] {
            assert!(keys.contains(&expected), "missing {expected}");
        }
        assert_eq!(value["colorPalettes"]["medical"]["primary"], "#dc2626");
        assert_eq!(value["keyframes"]["fadeIn"]["100%"]["opacity"], "1");
        assert_eq!(value["plugins"][0], "@tailwindcss/forms");
    }
}
