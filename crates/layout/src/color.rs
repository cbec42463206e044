use serde::{Serialize, Serializer};
use std::fmt;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// `#rrggbb`, for CSS.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0`, for PDF colour operators.
    pub fn unit(&self) -> (f32, f32, f32) {
        (self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0, 10, 255).hex(), "#000aff");
        assert_eq!(Rgb::gray(0x11).to_string(), "#111111");
    }

    #[test]
    fn unit_channels_span_zero_to_one() {
        assert_eq!(Rgb::new(0, 0, 255).unit(), (0.0, 0.0, 1.0));
    }

    #[test]
    fn serializes_as_css_hex() {
        let json = serde_json::to_string(&Rgb::new(0xe5, 0xe7, 0xeb)).unwrap();
        assert_eq!(json, "\"#e5e7eb\"");
    }
}
