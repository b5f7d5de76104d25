//! 8-bit sRGB color types
//!
//! [`Rgb`] is the unit of color throughout the engine: palette keys, anchor
//! colors and working pixel colors are all `Rgb`. Its canonical key is the
//! lowercase six-digit hex string, and its ordering matches the
//! lexicographic ordering of that key, so a `BTreeMap<Rgb, _>` iterates in
//! the same order as a sorted list of hex strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// An opaque 24-bit sRGB color.
///
/// # Example
///
/// ```
/// use stud_quant::Rgb;
///
/// let teal: Rgb = "#1A658F".parse().unwrap();
/// assert_eq!(teal, Rgb::new(0x1a, 0x65, 0x8f));
/// assert_eq!(teal.to_hex(), "#1a658f");
/// assert_eq!(teal.key(), "1a658f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black, the color that always survives bleed-through reversal.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `[R, G, B]` byte array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a `[R, G, B]` byte array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Canonical map key: six lowercase hex digits, no prefix.
    pub fn key(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{}", self.key())
    }

    /// Attach an opacity channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Per-channel signed difference `self - other`.
    #[inline]
    pub fn difference(self, other: Rgb) -> [i32; 3] {
        [
            self.r as i32 - other.r as i32,
            self.g as i32 - other.g as i32,
            self.b as i32 - other.b as i32,
        ]
    }

    /// Add a fractional offset to every channel, rounding and clamping the
    /// result to `0..=255`.
    #[inline]
    pub fn offset(self, delta: [f64; 3]) -> Rgb {
        Rgb::new(
            clamp255(self.r as f64 + delta[0]),
            clamp255(self.g as f64 + delta[1]),
            clamp255(self.b as f64 + delta[2]),
        )
    }
}

/// Round a channel value to the nearest integer inside `0..=255`.
#[inline]
pub(crate) fn clamp255(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if let Some(bad) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(bad));
        }

        let digits: Vec<u8> = s
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();

        match digits.len() {
            // Shorthand: 0xF -> 0xFF
            3 => Ok(Self::new(digits[0] * 17, digits[1] * 17, digits[2] * 17)),
            6 => Ok(Self::new(
                digits[0] << 4 | digits[1],
                digits[2] << 4 | digits[3],
                digits[4] << 4 | digits[5],
            )),
            len => Err(ParseColorError::InvalidLength { len }),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// An sRGB color with an opacity channel.
///
/// Only the opacity-aware metric wrapper looks at `a`; everywhere else the
/// engine works on the [`Rgb`] part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = fully opaque)
    pub a: u8,
}

impl Rgba {
    /// Create a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a `[R, G, B, A]` byte array.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a `[R, G, B, A]` byte array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The color without its opacity.
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Opacity in `0.0..=1.0`.
    #[inline]
    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl From<Rgb> for Rgba {
    fn from(color: Rgb) -> Self {
        color.with_alpha(255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::new(255, 255, 255));
        assert_eq!("#000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("2D2926".parse::<Rgb>().unwrap(), Rgb::new(0x2d, 0x29, 0x26));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!("#F00".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("#abc".parse::<Rgb>().unwrap(), Rgb::new(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let upper: Rgb = "  #ABCDEF ".parse().unwrap();
        let lower: Rgb = "#abcdef".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert_eq!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidDigit('G'))
        );
        assert_eq!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength { len: 4 })
        );
        assert_eq!(
            "".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength { len: 0 })
        );
        assert!(matches!(
            "#ffé".parse::<Rgb>(),
            Err(ParseColorError::InvalidDigit('é'))
        ));
    }

    #[test]
    fn test_canonical_key_round_trip() {
        for hex in ["#000000", "#ffffff", "#1a658f", "#00263a"] {
            let color: Rgb = hex.parse().unwrap();
            assert_eq!(color.to_hex(), hex);
            assert_eq!(color.key().parse::<Rgb>().unwrap(), color);
        }
    }

    #[test]
    fn test_ordering_matches_key_ordering() {
        let mut colors = vec![
            Rgb::new(0xff, 0, 0),
            Rgb::new(0x0a, 0xff, 0xff),
            Rgb::new(0x0a, 0x0b, 0xff),
            Rgb::new(0, 0, 0x01),
        ];
        let mut keys: Vec<String> = colors.iter().map(|c| c.key()).collect();
        colors.sort();
        keys.sort();
        let sorted_keys: Vec<String> = colors.iter().map(|c| c.key()).collect();
        assert_eq!(sorted_keys, keys);
    }

    #[test]
    fn test_offset_rounds_and_clamps() {
        let color = Rgb::new(10, 250, 100);
        assert_eq!(color.offset([-20.0, 10.0, 0.5]), Rgb::new(0, 255, 101));
        assert_eq!(color.offset([0.4, -0.4, -0.6]), Rgb::new(10, 250, 99));
    }

    #[test]
    fn test_difference() {
        let a = Rgb::new(200, 10, 50);
        let b = Rgb::new(100, 20, 50);
        assert_eq!(a.difference(b), [100, -10, 0]);
    }

    #[test]
    fn test_rgba_opacity() {
        let color = Rgba::new(1, 2, 3, 255);
        assert_eq!(color.rgb(), Rgb::new(1, 2, 3));
        assert!((color.opacity() - 1.0).abs() < 1e-12);
        assert!(Rgba::new(1, 2, 3, 0).opacity().abs() < 1e-12);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = Rgb::new(0x1a, 0x65, 0x8f);
        let s: String = color.into();
        assert_eq!(s, "#1a658f");
        assert_eq!(Rgb::try_from(s).unwrap(), color);
    }
}
