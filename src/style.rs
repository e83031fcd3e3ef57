//! Visual configuration applied to a surface on first paint.
//!
//! Options mirror the user-facing configuration (every field optional);
//! [`FlipOptions::resolve`] fills the gaps with built-in defaults and yields a
//! [`Theme`], which the engine hands to its surface as nine [`ThemeVar`]s.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Pixels represented by one terminal column.
pub const PX_PER_COL: f32 = 20.0;
/// Pixels represented by one terminal row.
pub const PX_PER_ROW: f32 = 40.0;
/// Pixels per `rem`/`em`.
pub const PX_PER_EM: f32 = 16.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("Invalid dimension '{0}' (expected a number or px, %, rem, em, vw, vh)")]
    InvalidDimension(String),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error("Invalid duration '{0}' (expected a number of seconds or ms/s)")]
    InvalidDuration(String),
}

/// Untyped scalar as it appears in TOML: either a bare number or a string
/// carrying a unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Text(String),
}

/// Axis a dimension is measured along when converted to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Area (in cells) that relative units resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawScalar")]
pub enum Dimension {
    Px(f32),
    Percent(f32),
    Rem(f32),
    Em(f32),
    Vw(f32),
    Vh(f32),
}

impl Dimension {
    pub fn magnitude(self) -> f32 {
        match self {
            Dimension::Px(v)
            | Dimension::Percent(v)
            | Dimension::Rem(v)
            | Dimension::Em(v)
            | Dimension::Vw(v)
            | Dimension::Vh(v) => v,
        }
    }

    /// Converts to whole terminal cells along `axis`.
    pub fn to_cells(self, axis: Axis, viewport: Viewport) -> u16 {
        let (px_per_cell, extent) = match axis {
            Axis::Horizontal => (PX_PER_COL, viewport.width),
            Axis::Vertical => (PX_PER_ROW, viewport.height),
        };
        let cells = match self {
            Dimension::Px(v) => v / px_per_cell,
            Dimension::Rem(v) | Dimension::Em(v) => v * PX_PER_EM / px_per_cell,
            Dimension::Percent(v) => f32::from(extent) * v / 100.0,
            Dimension::Vw(v) => f32::from(viewport.width) * v / 100.0,
            Dimension::Vh(v) => f32::from(viewport.height) * v / 100.0,
        };
        cells.round().clamp(0.0, f32::from(u16::MAX)) as u16
    }
}

impl FromStr for Dimension {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_alphabetic() || c == '%')
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| StyleError::InvalidDimension(s.to_string()))?;
        if !value.is_finite() {
            return Err(StyleError::InvalidDimension(s.to_string()));
        }

        match unit {
            "" | "px" => Ok(Dimension::Px(value)),
            "%" => Ok(Dimension::Percent(value)),
            "rem" => Ok(Dimension::Rem(value)),
            "em" => Ok(Dimension::Em(value)),
            "vw" => Ok(Dimension::Vw(value)),
            "vh" => Ok(Dimension::Vh(value)),
            _ => Err(StyleError::InvalidDimension(s.to_string())),
        }
    }
}

impl TryFrom<RawScalar> for Dimension {
    type Error = StyleError;

    fn try_from(raw: RawScalar) -> Result<Self, Self::Error> {
        match raw {
            RawScalar::Number(n) if n.is_finite() => Ok(Dimension::Px(n as f32)),
            RawScalar::Number(n) => Err(StyleError::InvalidDimension(n.to_string())),
            RawScalar::Text(text) => text.parse(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{v}px"),
            Dimension::Percent(v) => write!(f, "{v}%"),
            Dimension::Rem(v) => write!(f, "{v}rem"),
            Dimension::Em(v) => write!(f, "{v}em"),
            Dimension::Vw(v) => write!(f, "{v}vw"),
            Dimension::Vh(v) => write!(f, "{v}vh"),
        }
    }
}

/// RGBA color parsed from a CSS-like name or hex literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ThemeColor {
    pub const BLACK: ThemeColor = ThemeColor::rgb(0, 0, 0);
    pub const WHITE: ThemeColor = ThemeColor::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composites this color over an opaque `background`.
    pub fn blend_over(self, background: ThemeColor) -> ThemeColor {
        let alpha = u16::from(self.a);
        let mix = |fg: u8, bg: u8| -> u8 {
            ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        ThemeColor::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(0xff, 0, 0),
            "green" => Self::rgb(0, 0x80, 0),
            "blue" => Self::rgb(0, 0, 0xff),
            "yellow" => Self::rgb(0xff, 0xff, 0),
            "cyan" => Self::rgb(0, 0xff, 0xff),
            "magenta" => Self::rgb(0xff, 0, 0xff),
            "gray" | "grey" => Self::rgb(0x80, 0x80, 0x80),
            "transparent" => Self::rgba(0, 0, 0, 0),
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl FromStr for ThemeColor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(hex) => Self::from_hex(hex),
            None => Self::named(&trimmed.to_ascii_lowercase()),
        };
        parsed.ok_or_else(|| StyleError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Length of one flip phase. Bare numbers are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawScalar")]
pub struct AnimationDuration(pub Duration);

impl FromStr for AnimationDuration {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || StyleError::InvalidDuration(s.to_string());
        let (number, scale) = if let Some(ms) = trimmed.strip_suffix("ms") {
            (ms, 0.001)
        } else if let Some(secs) = trimmed.strip_suffix('s') {
            (secs, 1.0)
        } else {
            (trimmed, 1.0)
        };
        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        seconds(value * scale).ok_or_else(invalid)
    }
}

impl TryFrom<RawScalar> for AnimationDuration {
    type Error = StyleError;

    fn try_from(raw: RawScalar) -> Result<Self, Self::Error> {
        match raw {
            RawScalar::Number(n) => {
                seconds(n).ok_or_else(|| StyleError::InvalidDuration(n.to_string()))
            }
            RawScalar::Text(text) => text.parse(),
        }
    }
}

fn seconds(value: f64) -> Option<AnimationDuration> {
    Duration::try_from_secs_f64(value).ok().map(AnimationDuration)
}

/// A value applied to one [`ThemeVar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Dimension(Dimension),
    Color(ThemeColor),
    Duration(Duration),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Dimension(d) => d.fmt(f),
            StyleValue::Color(c) => c.fmt(f),
            StyleValue::Duration(d) => write!(f, "{}s", d.as_secs_f64()),
        }
    }
}

/// Named visual variable a surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeVar {
    CardWidth,
    CardHeight,
    CardBorderRadius,
    CardFontSize,
    NumberColor,
    NumberBgColor,
    CenterLineHeight,
    CenterLineBgColor,
    AnimationDuration,
}

impl ThemeVar {
    pub const ALL: [ThemeVar; 9] = [
        ThemeVar::CardWidth,
        ThemeVar::CardHeight,
        ThemeVar::CardBorderRadius,
        ThemeVar::CardFontSize,
        ThemeVar::NumberColor,
        ThemeVar::NumberBgColor,
        ThemeVar::CenterLineHeight,
        ThemeVar::CenterLineBgColor,
        ThemeVar::AnimationDuration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeVar::CardWidth => "card-width",
            ThemeVar::CardHeight => "card-height",
            ThemeVar::CardBorderRadius => "card-border-radius",
            ThemeVar::CardFontSize => "card-font-size",
            ThemeVar::NumberColor => "number-color",
            ThemeVar::NumberBgColor => "number-bg-color",
            ThemeVar::CenterLineHeight => "center-line-height",
            ThemeVar::CenterLineBgColor => "center-line-bg-color",
            ThemeVar::AnimationDuration => "animation-duration",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub duration: Option<AnimationDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub font_size: Option<Dimension>,
    pub border_radius: Option<Dimension>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CenterLineOptions {
    pub height: Option<Dimension>,
    pub background_color: Option<ThemeColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NumberOptions {
    pub color: Option<ThemeColor>,
    pub background_color: Option<ThemeColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub card: CardOptions,
    pub center_line: CenterLineOptions,
    pub number: NumberOptions,
}

/// Partial visual configuration; omitted fields fall back to [`Theme::default`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlipOptions {
    pub animation: AnimationOptions,
    pub style: StyleOptions,
}

impl FlipOptions {
    pub fn resolve(&self) -> Theme {
        let defaults = Theme::default();
        let card = &self.style.card;
        let center_line = &self.style.center_line;
        let number = &self.style.number;
        Theme {
            animation_duration: self
                .animation
                .duration
                .map_or(defaults.animation_duration, |d| d.0),
            card_width: card.width.unwrap_or(defaults.card_width),
            card_height: card.height.unwrap_or(defaults.card_height),
            card_font_size: card.font_size.unwrap_or(defaults.card_font_size),
            card_border_radius: card.border_radius.unwrap_or(defaults.card_border_radius),
            center_line_height: center_line.height.unwrap_or(defaults.center_line_height),
            center_line_color: center_line
                .background_color
                .unwrap_or(defaults.center_line_color),
            number_color: number.color.unwrap_or(defaults.number_color),
            number_bg_color: number.background_color.unwrap_or(defaults.number_bg_color),
        }
    }
}

/// Fully resolved visual configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub animation_duration: Duration,
    pub card_width: Dimension,
    pub card_height: Dimension,
    pub card_font_size: Dimension,
    pub card_border_radius: Dimension,
    pub center_line_height: Dimension,
    pub center_line_color: ThemeColor,
    pub number_color: ThemeColor,
    pub number_bg_color: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(500),
            card_width: Dimension::Px(300.0),
            card_height: Dimension::Px(400.0),
            card_font_size: Dimension::Px(200.0),
            card_border_radius: Dimension::Px(10.0),
            center_line_height: Dimension::Px(10.0),
            center_line_color: ThemeColor::rgba(0, 0, 0, 0x20),
            number_color: ThemeColor::WHITE,
            number_bg_color: ThemeColor::BLACK,
        }
    }
}

impl Theme {
    pub fn value(&self, var: ThemeVar) -> StyleValue {
        match var {
            ThemeVar::CardWidth => StyleValue::Dimension(self.card_width),
            ThemeVar::CardHeight => StyleValue::Dimension(self.card_height),
            ThemeVar::CardBorderRadius => StyleValue::Dimension(self.card_border_radius),
            ThemeVar::CardFontSize => StyleValue::Dimension(self.card_font_size),
            ThemeVar::NumberColor => StyleValue::Color(self.number_color),
            ThemeVar::NumberBgColor => StyleValue::Color(self.number_bg_color),
            ThemeVar::CenterLineHeight => StyleValue::Dimension(self.center_line_height),
            ThemeVar::CenterLineBgColor => StyleValue::Color(self.center_line_color),
            ThemeVar::AnimationDuration => StyleValue::Duration(self.animation_duration),
        }
    }

    pub fn variables(&self) -> impl Iterator<Item = (ThemeVar, StyleValue)> + '_ {
        ThemeVar::ALL.into_iter().map(|var| (var, self.value(var)))
    }

    /// Stores `value` under `var`. Returns `false` when the value's kind does
    /// not match the variable (a color for a width, say).
    pub fn set(&mut self, var: ThemeVar, value: StyleValue) -> bool {
        match (var, value) {
            (ThemeVar::CardWidth, StyleValue::Dimension(d)) => self.card_width = d,
            (ThemeVar::CardHeight, StyleValue::Dimension(d)) => self.card_height = d,
            (ThemeVar::CardBorderRadius, StyleValue::Dimension(d)) => self.card_border_radius = d,
            (ThemeVar::CardFontSize, StyleValue::Dimension(d)) => self.card_font_size = d,
            (ThemeVar::NumberColor, StyleValue::Color(c)) => self.number_color = c,
            (ThemeVar::NumberBgColor, StyleValue::Color(c)) => self.number_bg_color = c,
            (ThemeVar::CenterLineHeight, StyleValue::Dimension(d)) => self.center_line_height = d,
            (ThemeVar::CenterLineBgColor, StyleValue::Color(c)) => self.center_line_color = c,
            (ThemeVar::AnimationDuration, StyleValue::Duration(d)) => self.animation_duration = d,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_parses_units() {
        assert_eq!("300px".parse::<Dimension>().unwrap(), Dimension::Px(300.0));
        assert_eq!("300".parse::<Dimension>().unwrap(), Dimension::Px(300.0));
        assert_eq!("50%".parse::<Dimension>().unwrap(), Dimension::Percent(50.0));
        assert_eq!("1.5rem".parse::<Dimension>().unwrap(), Dimension::Rem(1.5));
        assert_eq!("2em".parse::<Dimension>().unwrap(), Dimension::Em(2.0));
        assert_eq!("10vw".parse::<Dimension>().unwrap(), Dimension::Vw(10.0));
        assert_eq!("10vh".parse::<Dimension>().unwrap(), Dimension::Vh(10.0));
        assert!("10pt".parse::<Dimension>().is_err());
        assert!("wide".parse::<Dimension>().is_err());
    }

    #[test]
    fn dimension_converts_to_cells() {
        let viewport = Viewport {
            width: 100,
            height: 40,
        };
        assert_eq!(Dimension::Px(300.0).to_cells(Axis::Horizontal, viewport), 15);
        assert_eq!(Dimension::Px(400.0).to_cells(Axis::Vertical, viewport), 10);
        assert_eq!(Dimension::Percent(50.0).to_cells(Axis::Vertical, viewport), 20);
        assert_eq!(Dimension::Vw(10.0).to_cells(Axis::Vertical, viewport), 10);
        assert_eq!(Dimension::Rem(5.0).to_cells(Axis::Horizontal, viewport), 4);
        assert_eq!(Dimension::Px(-10.0).to_cells(Axis::Horizontal, viewport), 0);
    }

    #[test]
    fn color_parses_names_and_hex() {
        assert_eq!("white".parse::<ThemeColor>().unwrap(), ThemeColor::WHITE);
        assert_eq!("Black".parse::<ThemeColor>().unwrap(), ThemeColor::BLACK);
        assert_eq!(
            "#00000020".parse::<ThemeColor>().unwrap(),
            ThemeColor::rgba(0, 0, 0, 0x20)
        );
        assert_eq!(
            "#f80".parse::<ThemeColor>().unwrap(),
            ThemeColor::rgb(0xff, 0x88, 0)
        );
        assert!("#12345".parse::<ThemeColor>().is_err());
        assert!("#gggggg".parse::<ThemeColor>().is_err());
        assert!("chartreuse-ish".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn color_blends_alpha_over_background() {
        let half_white = ThemeColor::rgba(0xff, 0xff, 0xff, 0x80);
        let blended = half_white.blend_over(ThemeColor::BLACK);
        assert_eq!(blended.a, 0xff);
        assert_eq!(blended.r, 0x80);
        assert_eq!(ThemeColor::WHITE.blend_over(ThemeColor::BLACK), ThemeColor::WHITE);
    }

    #[test]
    fn duration_parses_seconds_and_millis() {
        assert_eq!(
            "500ms".parse::<AnimationDuration>().unwrap().0,
            Duration::from_millis(500)
        );
        assert_eq!(
            "0.25s".parse::<AnimationDuration>().unwrap().0,
            Duration::from_millis(250)
        );
        assert_eq!("2".parse::<AnimationDuration>().unwrap().0, Duration::from_secs(2));
        assert!("-1s".parse::<AnimationDuration>().is_err());
        assert!("soon".parse::<AnimationDuration>().is_err());
    }

    #[test]
    fn empty_options_resolve_to_defaults() {
        let theme = FlipOptions::default().resolve();
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.animation_duration, Duration::from_millis(500));
        assert_eq!(theme.card_width, Dimension::Px(300.0));
        assert_eq!(theme.card_height, Dimension::Px(400.0));
        assert_eq!(theme.card_font_size, Dimension::Px(200.0));
        assert_eq!(theme.card_border_radius, Dimension::Px(10.0));
    }

    #[test]
    fn partial_options_override_only_given_fields() {
        let mut options = FlipOptions::default();
        options.style.card.width = Some(Dimension::Px(120.0));
        options.style.number.color = Some(ThemeColor::rgb(0xff, 0, 0));
        let theme = options.resolve();
        assert_eq!(theme.card_width, Dimension::Px(120.0));
        assert_eq!(theme.number_color, ThemeColor::rgb(0xff, 0, 0));
        assert_eq!(theme.card_height, Theme::default().card_height);
    }

    #[test]
    fn theme_exposes_every_variable_once() {
        let theme = Theme::default();
        let vars: Vec<_> = theme.variables().map(|(var, _)| var).collect();
        assert_eq!(vars, ThemeVar::ALL.to_vec());
    }

    #[test]
    fn theme_set_rejects_mismatched_kinds() {
        let mut theme = Theme::default();
        assert!(!theme.set(ThemeVar::CardWidth, StyleValue::Color(ThemeColor::WHITE)));
        assert!(theme.set(ThemeVar::CardWidth, StyleValue::Dimension(Dimension::Px(1.0))));
        assert_eq!(theme.card_width, Dimension::Px(1.0));
    }

    #[test]
    fn style_value_displays_with_units() {
        assert_eq!(StyleValue::Dimension(Dimension::Px(300.0)).to_string(), "300px");
        assert_eq!(StyleValue::Duration(Duration::from_millis(500)).to_string(), "0.5s");
        assert_eq!(
            StyleValue::Color(ThemeColor::rgba(0, 0, 0, 0x20)).to_string(),
            "#00000020"
        );
    }
}
