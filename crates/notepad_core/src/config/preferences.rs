//! Preference snapshot and per-tab appearance.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PREF_LINE_SPACING: &str = "line_spacing";
pub const PREF_WRAP: &str = "wrap";
pub const PREF_JUSTIFY: &str = "justify";
pub const PREF_ALIGNMENT: &str = "alignment";
pub const PREF_FONT_COLOR: &str = "font_color";
pub const PREF_BACKGROUND_COLOR: &str = "background_color";
pub const PREF_FONT: &str = "font";
pub const PREF_NAME_PREFIX: &str = "name_prefix";

const DEFAULT_NAME_PREFIX: &str = "Note";

static RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*$").expect("valid rgb regex")
});

/// Error for one preference value that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for preference `{key}`")
            }
        }
    }
}

impl Error for PreferenceError {}

/// Horizontal text alignment inside a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// 8-bit RGB color, stored in preferences as `"r,g,b"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `"r,g,b"` string; each channel must fit in `0..=255`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = RGB_RE.captures(value)?;
        let channel = |index: usize| caps.get(index)?.as_str().parse::<u8>().ok();
        Some(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }
}

impl Display for RgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

/// Explicit snapshot of every user preference the notepad reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotepadPreferences {
    pub line_spacing: u32,
    pub wrap: bool,
    pub justify: bool,
    pub alignment: Alignment,
    pub font_color: RgbColor,
    pub background_color: RgbColor,
    /// Host font descriptor; empty means the host default font.
    pub font: String,
    /// Prefix for generated tab titles (`"{prefix} {number}"`).
    pub name_prefix: String,
}

impl Default for NotepadPreferences {
    fn default() -> Self {
        Self {
            line_spacing: 0,
            wrap: true,
            justify: false,
            alignment: Alignment::Left,
            font_color: RgbColor::BLACK,
            background_color: RgbColor::WHITE,
            font: String::new(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

impl NotepadPreferences {
    /// Builds a snapshot from raw preference-store pairs.
    ///
    /// Unknown keys are ignored. A malformed value is logged and the default
    /// for that key is kept.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut prefs = Self::default();
        for (key, value) in pairs {
            if let Err(err) = prefs.set(key, value) {
                warn!("event=preference_parse module=config status=fallback error={err}");
            }
        }
        prefs
    }

    /// Applies one raw preference value.
    ///
    /// # Errors
    /// - `InvalidValue` when the value cannot be interpreted for a known key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match key {
            PREF_LINE_SPACING => {
                self.line_spacing = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(PREF_LINE_SPACING, value))?;
            }
            PREF_WRAP => self.wrap = parse_bool(PREF_WRAP, value)?,
            PREF_JUSTIFY => self.justify = parse_bool(PREF_JUSTIFY, value)?,
            PREF_ALIGNMENT => {
                self.alignment = match value.trim().to_ascii_lowercase().as_str() {
                    "left" => Alignment::Left,
                    "right" => Alignment::Right,
                    _ => return Err(invalid(PREF_ALIGNMENT, value)),
                };
            }
            PREF_FONT_COLOR => {
                self.font_color =
                    RgbColor::parse(value).ok_or_else(|| invalid(PREF_FONT_COLOR, value))?;
            }
            PREF_BACKGROUND_COLOR => {
                self.background_color = RgbColor::parse(value)
                    .ok_or_else(|| invalid(PREF_BACKGROUND_COLOR, value))?;
            }
            // The host preference page appends `;` to font descriptors.
            PREF_FONT => self.font = value.replace(';', "").trim().to_string(),
            PREF_NAME_PREFIX => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(invalid(PREF_NAME_PREFIX, value));
                }
                self.name_prefix = trimmed.to_string();
            }
            other => debug!("event=preference_parse module=config status=ignored key={other}"),
        }
        Ok(())
    }

    /// Generated title for the tab shown at 1-based position `number`.
    pub fn default_tab_title(&self, number: usize) -> String {
        format!("{} {number}", self.name_prefix)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, PreferenceError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &'static str, value: &str) -> PreferenceError {
    PreferenceError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

/// Rendering parameters one tab pulls from the current preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabAppearance {
    pub line_spacing: u32,
    pub word_wrap: bool,
    pub justify: bool,
    pub alignment: Alignment,
    pub foreground: RgbColor,
    pub background: RgbColor,
    /// `None` keeps the host default font.
    pub font: Option<String>,
}

impl TabAppearance {
    pub fn from_preferences(prefs: &NotepadPreferences) -> Self {
        // Right alignment has no visible effect without word wrap.
        let word_wrap = prefs.wrap || prefs.alignment == Alignment::Right;
        Self {
            line_spacing: prefs.line_spacing,
            word_wrap,
            justify: prefs.justify,
            alignment: prefs.alignment,
            foreground: prefs.font_color,
            background: prefs.background_color,
            font: (!prefs.font.is_empty()).then(|| prefs.font.clone()),
        }
    }
}

impl Default for TabAppearance {
    fn default() -> Self {
        Self::from_preferences(&NotepadPreferences::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Alignment, NotepadPreferences, PreferenceError, RgbColor, TabAppearance, PREF_FONT_COLOR,
    };

    #[test]
    fn rgb_parse_accepts_spaces_and_rejects_overflow() {
        assert_eq!(RgbColor::parse(" 10, 20 ,30 "), Some(RgbColor::new(10, 20, 30)));
        assert_eq!(RgbColor::parse("256,0,0"), None);
        assert_eq!(RgbColor::parse("1,2"), None);
        assert_eq!(RgbColor::new(1, 2, 3).to_string(), "1,2,3");
    }

    #[test]
    fn from_pairs_keeps_defaults_for_malformed_values() {
        let prefs = NotepadPreferences::from_pairs([
            ("line_spacing", "4"),
            ("font_color", "red"),
            ("alignment", "RIGHT"),
            ("font", "Monospace-regular-10;"),
            ("unknown", "x"),
        ]);

        assert_eq!(prefs.line_spacing, 4);
        assert_eq!(prefs.font_color, RgbColor::BLACK);
        assert_eq!(prefs.alignment, Alignment::Right);
        assert_eq!(prefs.font, "Monospace-regular-10");
    }

    #[test]
    fn set_reports_invalid_value() {
        let mut prefs = NotepadPreferences::default();
        let err = prefs.set(PREF_FONT_COLOR, "1,2,3,4").unwrap_err();
        assert_eq!(
            err,
            PreferenceError::InvalidValue {
                key: PREF_FONT_COLOR,
                value: "1,2,3,4".to_string(),
            }
        );
    }

    #[test]
    fn right_alignment_forces_word_wrap() {
        let prefs = NotepadPreferences {
            wrap: false,
            alignment: Alignment::Right,
            ..NotepadPreferences::default()
        };
        assert!(TabAppearance::from_preferences(&prefs).word_wrap);
    }

    #[test]
    fn empty_font_keeps_host_default() {
        assert_eq!(TabAppearance::default().font, None);
    }

    #[test]
    fn default_tab_title_uses_prefix() {
        let prefs = NotepadPreferences::default();
        assert_eq!(prefs.default_tab_title(3), "Note 3");
    }
}
