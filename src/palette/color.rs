use image::Rgb;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 24-bit RGB color with a canonical lowercase `#rrggbb` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Builds a color from float channels, truncating toward zero.
    pub fn from_channels(channels: [f32; 3]) -> Self {
        let quantize = |c: f32| c.clamp(0.0, 255.0) as u8;
        Self([
            quantize(channels[0]),
            quantize(channels[1]),
            quantize(channels[2]),
        ])
    }

    pub fn rgb(&self) -> Rgb<u8> {
        Rgb(self.0)
    }

    /// The six hex digits without the leading `#`.
    pub fn hex_digits(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex_digits())
    }
}

#[derive(Error, Debug)]
#[error("Invalid hex color: {0:?}")]
pub struct ParseHexColorError(String);

impl FromStr for HexColor {
    type Err = ParseHexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseHexColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseHexColorError(s.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_lowercase_hex() {
        assert_eq!(HexColor::new(255, 0, 171).to_string(), "#ff00ab");
        assert_eq!(HexColor::new(255, 0, 171).hex_digits(), "ff00ab");
    }

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!("#1a2b3c".parse::<HexColor>().unwrap(), HexColor::new(26, 43, 60));
        assert_eq!("1a2b3c".parse::<HexColor>().unwrap(), HexColor::new(26, 43, 60));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!("#1a2b3".parse::<HexColor>().is_err());
        assert!("#1a2b3g".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
    }

    #[test]
    fn float_channels_truncate_toward_zero() {
        assert_eq!(
            HexColor::from_channels([12.9, 0.2, 255.7]),
            HexColor::new(12, 0, 255)
        );
    }
}
