//! Color values: RGBA/RGB tuples, `#RRGGBB` codes and named palette colors.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{Rule, ValidationError};
use crate::validators::is_color_code;

/// A color with alpha channel, rendered as `"rgba(r, g, b, a)"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBA {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

impl RGBA {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&a) {
            return Err(ValidationError::new(
                "alpha",
                Rule::Range,
                format!("alpha must be between 0.0 and 1.0, got {a}"),
            ));
        }
        Ok(Self { r, g, b, a })
    }

    pub(crate) const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn channels(&self) -> (u8, u8, u8, f64) {
        (self.r, self.g, self.b, self.a)
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:?})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for RGBA {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = function_args(s, "rgba", 4)?;
        let channel = |i: usize| parse_channel(&parts[i], s);
        let alpha: f64 = parts[3].parse().map_err(|_| format_error("rgba", s))?;
        Self::new(channel(0)?, channel(1)?, channel(2)?, alpha)
    }
}

/// An opaque color, rendered as `"rgb(r, g, b)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RGB {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for RGB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for RGB {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = function_args(s, "rgb", 3)?;
        Ok(Self::new(
            parse_channel(&parts[0], s)?,
            parse_channel(&parts[1], s)?,
            parse_channel(&parts[2], s)?,
        ))
    }
}

fn format_error(kind: &str, input: &str) -> ValidationError {
    ValidationError::new(kind, Rule::Format, format!("Invalid {kind} color '{input}'"))
}

fn function_args(input: &str, name: &str, arity: usize) -> Result<Vec<String>, ValidationError> {
    let body = input
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format_error(name, input))?;
    let parts: Vec<String> = body.split(',').map(|p| p.trim().to_string()).collect();
    if parts.len() != arity {
        return Err(format_error(name, input));
    }
    Ok(parts)
}

fn parse_channel(part: &str, input: &str) -> Result<u8, ValidationError> {
    part.parse().map_err(|_| {
        ValidationError::new(
            "channel",
            Rule::Range,
            format!("Channel '{part}' in '{input}' must be an integer 0-255"),
        )
    })
}

// ---------------------------------------------------------------------------
// Color codes
// ---------------------------------------------------------------------------

/// A validated `#RRGGBB` color code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorCode(Cow<'static, str>);

impl ColorCode {
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        is_color_code("color", &code)?;
        Ok(Self(Cow::Owned(code)))
    }

    /// Build a color code from a literal, checked at compile time when used
    /// in a `const` context.
    pub const fn from_static(code: &'static str) -> Self {
        let bytes = code.as_bytes();
        assert!(bytes.len() == 7 && bytes[0] == b'#', "color code must look like #RRGGBB");
        let mut i = 1;
        while i < 7 {
            assert!(bytes[i].is_ascii_hexdigit(), "color code must be hexadecimal");
            i += 1;
        }
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Polymorphic color fields
// ---------------------------------------------------------------------------

/// Any color a dashboard field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgba(RGBA),
    Rgb(RGB),
    Code(ColorCode),
    /// Palette names such as `"green"` or `"semi-dark-red"`, passed through.
    Named(String),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba(c) => c.fmt(f),
            Self::Rgb(c) => c.fmt(f),
            Self::Code(c) => c.fmt(f),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("rgba(") {
            s.parse().map(Self::Rgba)
        } else if s.starts_with("rgb(") {
            s.parse().map(Self::Rgb)
        } else if s.starts_with('#') {
            s.parse().map(Self::Code)
        } else {
            Ok(Self::Named(s.to_string()))
        }
    }
}

impl From<RGBA> for Color {
    fn from(c: RGBA) -> Self {
        Self::Rgba(c)
    }
}

impl From<RGB> for Color {
    fn from(c: RGB) -> Self {
        Self::Rgb(c)
    }
}

impl From<ColorCode> for Color {
    fn from(c: ColorCode) -> Self {
        Self::Code(c)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        color.to_json_data()
    }
}

string_serde!(RGBA);
string_serde!(RGB);
string_serde!(ColorCode);
string_serde!(Color);

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

pub const GREY1: RGBA = RGBA::rgba(216, 200, 27, 0.27);
pub const GREY2: RGBA = RGBA::rgba(234, 112, 112, 0.22);
pub const BLUE_RGBA: RGBA = RGBA::rgba(31, 118, 189, 0.18);
pub const BLUE_RGB: RGB = RGB::new(31, 120, 193);
pub const GREEN: RGBA = RGBA::rgba(50, 172, 45, 0.97);
pub const ORANGE: RGBA = RGBA::rgba(237, 129, 40, 0.89);
pub const RED: RGBA = RGBA::rgba(245, 54, 54, 0.9);
pub const BLANK: RGBA = RGBA::rgba(0, 0, 0, 0.0);
pub const WHITE: RGB = RGB::new(255, 255, 255);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_alpha_keeps_decimal_point() {
        assert_eq!(GREEN.to_string(), "rgba(50, 172, 45, 0.97)");
        assert_eq!(BLANK.to_string(), "rgba(0, 0, 0, 0.0)");
        assert_eq!(RGBA::new(1, 2, 3, 1.0).unwrap().to_string(), "rgba(1, 2, 3, 1.0)");
    }

    #[test]
    fn rgba_rejects_alpha_out_of_range() {
        assert_eq!(RGBA::new(0, 0, 0, 1.5).unwrap_err().rule, Rule::Range);
    }

    #[test]
    fn rgb_renders() {
        assert_eq!(WHITE.to_string(), "rgb(255, 255, 255)");
        assert_eq!(BLUE_RGB.to_json_data(), Value::String("rgb(31, 120, 193)".into()));
    }

    #[test]
    fn parse_round_trips_palette() {
        assert_eq!("rgba(245, 54, 54, 0.9)".parse::<RGBA>().unwrap(), RED);
        assert_eq!("rgb(31, 120, 193)".parse::<RGB>().unwrap(), BLUE_RGB);
        assert!("rgb(300, 0, 0)".parse::<RGB>().is_err());
        assert!("rgba(1, 2, 3)".parse::<RGBA>().is_err());
    }

    #[test]
    fn color_code_is_validated() {
        assert!(ColorCode::new("#37872D").is_ok());
        assert_eq!(ColorCode::new("37872D").unwrap_err().rule, Rule::ColorCode);
        assert_eq!(ColorCode::from_static("#FF0000").as_str(), "#FF0000");
    }

    #[test]
    fn color_parses_each_form() {
        assert_eq!("green".parse::<Color>().unwrap(), Color::named("green"));
        assert_eq!("#000000".parse::<Color>().unwrap().to_string(), "#000000");
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().unwrap(), Color::Rgb(RGB::new(1, 2, 3)));
    }
}
