//! RGB color values, color distance, and palette color-string parsing
//!
//! Palette entries in `hexsprite.toml` may be written as:
//! - Hex: `#RGB`, `#RRGGBB` (alpha digits are accepted and ignored)
//! - Integer hex: `0xRRGGBB`
//! - Functional / named CSS colors: `rgb()`, `hsl()`, `hwb()`, `red`, ...

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use std::fmt;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after the prefix)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure black, the reference point of the near-black override.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` integer.
    pub const fn from_rgb_u32(packed: u32) -> Self {
        Self {
            r: ((packed & 0xff0000) >> 16) as u8,
            g: ((packed & 0x00ff00) >> 8) as u8,
            b: (packed & 0x0000ff) as u8,
        }
    }

    /// Euclidean distance in RGB space, all channels weighted equally.
    pub fn distance(self, other: Color) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Color distance between two colors.
///
/// Symmetric, zero iff `a == b`.
pub fn distance(a: Color, b: Color) -> f64 {
    a.distance(b)
}

/// Parse a palette color string into a [`Color`].
///
/// # Examples
///
/// ```
/// use hexsprite::color::{parse_color, Color};
///
/// assert_eq!(parse_color("#ff2121").unwrap(), Color::new(255, 33, 33));
/// assert_eq!(parse_color("0x003fad").unwrap(), Color::new(0, 63, 173));
/// assert_eq!(parse_color("#FFF").unwrap(), Color::new(255, 255, 255));
/// assert_eq!(parse_color("blue").unwrap(), Color::new(0, 0, 255));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_digits(hex);
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_hex_digits(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (prefix already stripped)
fn parse_hex_digits(hex: &str) -> Result<Color, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let bytes = hex.as_bytes();
    match hex.len() {
        // #RGB / #RGBA -> doubled digits
        3 | 4 => Ok(Color {
            r: hex_value(bytes[0]) * 17,
            g: hex_value(bytes[1]) * 17,
            b: hex_value(bytes[2]) * 17,
        }),
        // #RRGGBB / #RRGGBBAA
        6 | 8 => Ok(Color {
            r: hex_value(bytes[0]) * 16 + hex_value(bytes[1]),
            g: hex_value(bytes[2]) * 16 + hex_value(bytes[3]),
            b: hex_value(bytes[4]) * 16 + hex_value(bytes[5]),
        }),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Value of an ASCII hex digit already known to be valid
fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, named colors)
fn parse_css_color(s: &str) -> Result<Color, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Color::new(rgba.red, rgba.green, rgba.blue)),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Color::new(
                (rgb.r * 255.0).round() as u8,
                (rgb.g * 255.0).round() as u8,
                (rgb.b * 255.0).round() as u8,
            )),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}
