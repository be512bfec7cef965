//! Deterministic class colors.
//!
//! A class name hashes to a hue: the sum of its UTF-16 code units modulo 360.
//! Saturation is fixed at 70%; the fill is a 90% lightness pastel and the
//! border the same hue at 80%. Different names may share a hue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Saturation of every class color (%).
pub const SATURATION: u8 = 70;
/// Fill lightness (%).
pub const FILL_LIGHTNESS: u8 = 90;
/// Border lightness (%).
pub const BORDER_LIGHTNESS: u8 = 80;

/// An HSL color. Renders as CSS, e.g. `hsl(217, 70%, 90%)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HslColor {
    /// Hue in degrees (0..360).
    pub hue: u16,
    /// Saturation (%).
    pub saturation: u8,
    /// Lightness (%).
    pub lightness: u8,
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// Fill and border colors for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub fill: HslColor,
    pub border: HslColor,
}

/// Hue for a class name.
pub fn hue_for(name: &str) -> u16 {
    let sum: u64 = name.encode_utf16().map(u64::from).sum();
    (sum % 360) as u16
}

/// Colors for a class name. Pure function of `name`.
///
/// # Examples
///
/// ```
/// use u_timetable::color::color_for;
///
/// let c = color_for("CS 2100");
/// assert_eq!(c, color_for("CS 2100"));
/// assert_eq!(c.fill.to_string(), "hsl(17, 70%, 90%)");
/// assert_eq!(c.border.to_string(), "hsl(17, 70%, 80%)");
/// ```
pub fn color_for(name: &str) -> ColorPair {
    let hue = hue_for(name);
    ColorPair {
        fill: HslColor {
            hue,
            saturation: SATURATION,
            lightness: FILL_LIGHTNESS,
        },
        border: HslColor {
            hue,
            saturation: SATURATION,
            lightness: BORDER_LIGHTNESS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(color_for("CS 2100"), color_for("CS 2100"));
        assert_eq!(color_for("APMA 3080"), color_for("APMA 3080"));
    }

    #[test]
    fn test_hue_is_char_sum() {
        // 'C'(67) + 'S'(83) + ' '(32) + '2'(50) + '1'(49) + '0'(48) + '0'(48) = 377
        assert_eq!(hue_for("CS 2100"), 17);
        assert_eq!(hue_for(""), 0);
        // Anagrams share a hue.
        assert_eq!(hue_for("CS 2100"), hue_for("SC 0012"));
    }

    #[test]
    fn test_fill_and_border_differ_only_in_lightness() {
        let c = color_for("STS 4500");
        assert_eq!(c.fill.hue, c.border.hue);
        assert_eq!(c.fill.saturation, 70);
        assert_eq!(c.fill.lightness, 90);
        assert_eq!(c.border.lightness, 80);
    }

    #[test]
    fn test_non_ascii_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D + 0xDE00 = 112_189.
        assert_eq!(hue_for("\u{1F600}"), (112_189 % 360) as u16);
    }
}
