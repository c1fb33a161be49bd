//! Console theme configuration, presets, and the default-merge rule.

use console_contract::ThemeColorSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the theme used for every unset field.
pub const DEFAULT_THEME_NAME: &str = "darkMode";

/// Background or scrollbar palette.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceColorSet {
    /// Main surface color.
    pub primary: Option<String>,
    /// Secondary surface color (input row, scrollbar track).
    pub secondary: Option<String>,
    /// Fallback surface color.
    pub default: Option<String>,
}

/// Console appearance. Every field is optional; see [`merge_theme`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleTheme {
    /// Theme name.
    pub name: Option<String>,
    /// CSS font family.
    pub font: Option<String>,
    /// CSS font size.
    pub font_size: Option<String>,
    /// CSS line height.
    pub line_height: Option<String>,
    /// Text palette consulted by the color markup.
    pub text_color: Option<ThemeColorSet>,
    /// Background palette.
    pub background_color: Option<SurfaceColorSet>,
    /// Scrollbar palette.
    pub scroll_color: Option<SurfaceColorSet>,
}

impl ConsoleTheme {
    /// Text palette, empty when unset.
    pub fn text_palette(&self) -> ThemeColorSet {
        self.text_color.clone().unwrap_or_default()
    }

    /// Background palette, empty when unset.
    pub fn background_palette(&self) -> SurfaceColorSet {
        self.background_color.clone().unwrap_or_default()
    }

    /// Scrollbar palette, empty when unset.
    pub fn scroll_palette(&self) -> SurfaceColorSet {
        self.scroll_color.clone().unwrap_or_default()
    }
}

/// Errors raised while interpreting theme values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// The color is not `#RGB` or `#RRGGBB`.
    #[error("invalid hex color `{0}`")]
    InvalidColor(String),
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn text(primary: &str, secondary: &str, warning: &str, error: &str, default: &str) -> ThemeColorSet {
    ThemeColorSet {
        primary: some(primary),
        secondary: some(secondary),
        warning: some(warning),
        error: some(error),
        default: some(default),
    }
}

fn surface(primary: &str, secondary: &str, default: &str) -> SurfaceColorSet {
    SurfaceColorSet {
        primary: some(primary),
        secondary: some(secondary),
        default: some(default),
    }
}

fn theme(
    name: &str,
    font: &str,
    font_size: &str,
    line_height: &str,
    text_color: ThemeColorSet,
    background_color: SurfaceColorSet,
    scroll_color: SurfaceColorSet,
) -> ConsoleTheme {
    ConsoleTheme {
        name: some(name),
        font: some(font),
        font_size: some(font_size),
        line_height: some(line_height),
        text_color: Some(text_color),
        background_color: Some(background_color),
        scroll_color: Some(scroll_color),
    }
}

/// Fully populated theme used to fill unset fields.
pub fn default_theme() -> ConsoleTheme {
    theme(
        DEFAULT_THEME_NAME,
        "monospace",
        "14px",
        "1.3",
        text("#349E44", "#5D60CB", "#E2C541", "#E0002D", "#64A8BC"),
        surface("#171717", "#2F2F2F", "#212121"),
        surface("#73AD34", "#01A816", "#115BCA"),
    )
}

/// Names accepted by [`theme_preset`].
pub fn preset_names() -> &'static [&'static str] {
    &[
        "darkMode",
        "lightMode",
        "retroTerminal",
        "cyberpunk",
        "highContrast",
    ]
}

/// Named preset, or `None` for an unknown name.
pub fn theme_preset(name: &str) -> Option<ConsoleTheme> {
    let preset = match name {
        "darkMode" => theme(
            name,
            "monospace",
            "14px",
            "1.3",
            text("#349E44", "#5D60CB", "#E2C541", "#E0002D", "#64A8BC"),
            surface("#171717", "#2F2F2F", "#212121"),
            surface("#73AD34", "#171717", "#171717"),
        ),
        "lightMode" => theme(
            name,
            "monospace",
            "14px",
            "1.5",
            text("#2C2C2C", "#0066CC", "#FFA500", "#FF0000", "#333333"),
            surface("#FFFFFF", "#F0F0F0", "#FAFAFA"),
            surface("#CCCCCC", "#E0E0E0", "#F5F5F5"),
        ),
        "retroTerminal" => theme(
            name,
            "Courier New, monospace",
            "14px",
            "1.3",
            text("#00FF00", "#FFFF00", "#FF4500", "#FF0000", "#00FF00"),
            surface("#000000", "#333333", "#111111"),
            surface("#00FF00", "#333333", "#111111"),
        ),
        "cyberpunk" => theme(
            name,
            "monospace",
            "16px",
            "1.4",
            text("#FF00FF", "#00FFFF", "#FFD700", "#FF4500", "#FFFFFF"),
            surface("#120136", "#2D1B46", "#1B1032"),
            surface("#FF00FF", "#2D1B46", "#1B1032"),
        ),
        "highContrast" => theme(
            name,
            "monospace",
            "14px",
            "1.5",
            text("#FFFFFF", "#00FFFF", "#FFFF00", "#FF0000", "#FFFFFF"),
            surface("#000000", "#1A1A1A", "#0A0A0A"),
            surface("#FFFFFF", "#333333", "#1A1A1A"),
        ),
        _ => return None,
    };
    Some(preset)
}

/// Fills every unset field of `partial`, palette slot by palette slot, from [`default_theme`].
pub fn merge_theme(partial: Option<&ConsoleTheme>) -> ConsoleTheme {
    let base = default_theme();
    let Some(partial) = partial else {
        return base;
    };

    let text = partial.text_palette();
    let base_text = base.text_palette();
    let base_background = base.background_palette();
    let base_scroll = base.scroll_palette();
    ConsoleTheme {
        name: partial.name.clone().or(base.name),
        font: partial.font.clone().or(base.font),
        font_size: partial.font_size.clone().or(base.font_size),
        line_height: partial.line_height.clone().or(base.line_height),
        text_color: Some(ThemeColorSet {
            primary: text.primary.or(base_text.primary),
            secondary: text.secondary.or(base_text.secondary),
            warning: text.warning.or(base_text.warning),
            error: text.error.or(base_text.error),
            default: text.default.or(base_text.default),
        }),
        background_color: Some(merge_surface(
            partial.background_palette(),
            base_background,
        )),
        scroll_color: Some(merge_surface(
            partial.scroll_palette(),
            base_scroll,
        )),
    }
}

fn merge_surface(partial: SurfaceColorSet, base: SurfaceColorSet) -> SurfaceColorSet {
    SurfaceColorSet {
        primary: partial.primary.or(base.primary),
        secondary: partial.secondary.or(base.secondary),
        default: partial.default.or(base.default),
    }
}

/// Whether `color` is dark by perceived brightness.
///
/// # Errors
///
/// Returns [`ThemeError::InvalidColor`] for anything other than `#RGB` or `#RRGGBB`.
pub fn is_color_dark(color: &str) -> Result<bool, ThemeError> {
    let invalid = || ThemeError::InvalidColor(color.to_string());
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |digits: &str| u32::from_str_radix(digits, 16).map_err(|_| invalid());
    let (r, g, b) = match hex.len() {
        3 => {
            let expand = |index: usize| channel(&hex[index..=index].repeat(2));
            (expand(0)?, expand(1)?, expand(2)?)
        }
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return Err(invalid()),
    };

    Ok((r * 299 + g * 587 + b * 114) / 1000 < 128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_without_partial_is_default() {
        assert_eq!(merge_theme(None), default_theme());
    }

    #[test]
    fn merge_fills_individual_palette_slots() {
        let partial = ConsoleTheme {
            font_size: Some("18px".to_string()),
            text_color: Some(ThemeColorSet {
                error: Some("#FF5555".to_string()),
                ..ThemeColorSet::default()
            }),
            ..ConsoleTheme::default()
        };
        let merged = merge_theme(Some(&partial));
        assert_eq!(merged.font_size.as_deref(), Some("18px"));
        assert_eq!(merged.font.as_deref(), Some("monospace"));
        let palette = merged.text_palette();
        assert_eq!(palette.error.as_deref(), Some("#FF5555"));
        assert_eq!(palette.primary.as_deref(), Some("#349E44"));
        assert_eq!(merged.scroll_palette().default.as_deref(), Some("#115BCA"));
    }

    #[test]
    fn partial_theme_deserializes_from_camel_case() {
        let value = serde_json::json!({
            "name": "custom",
            "lineHeight": "2",
            "backgroundColor": { "primary": "#000" }
        });
        let theme: ConsoleTheme = serde_json::from_value(value).expect("theme");
        assert_eq!(theme.line_height.as_deref(), Some("2"));
        assert_eq!(theme.background_palette().primary.as_deref(), Some("#000"));
        assert!(theme.text_color.is_none());
    }

    #[test]
    fn every_preset_is_fully_populated() {
        for name in preset_names() {
            let preset = theme_preset(name).expect("preset");
            assert_eq!(preset.name.as_deref(), Some(*name));
            assert_eq!(merge_theme(Some(&preset)), preset);
        }
        assert!(theme_preset("solarized").is_none());
    }

    #[test]
    fn brightness_classifies_hex_colors() {
        assert_eq!(is_color_dark("#000"), Ok(true));
        assert_eq!(is_color_dark("#FFFFFF"), Ok(false));
        assert_eq!(is_color_dark("#171717"), Ok(true));
        assert_eq!(is_color_dark("#FFFF00"), Ok(false));
        assert!(is_color_dark("red").is_err());
        assert!(is_color_dark("#12345").is_err());
        assert!(is_color_dark("#GGG").is_err());
    }
}
