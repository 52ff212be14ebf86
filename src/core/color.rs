//! Color and angle conversion helpers.
//!
//! Scene styles carry colors as packed 24-bit decimal integers (0xRRGGBB).
//! The target engines want per-channel values, so everything funnels through
//! [`decimal_to_rgba`] / [`Rgba::from_decimal`].

use rustc_hash::FxHashMap;

/// Splits a packed 24-bit color into `(r, g, b, alpha)` channels.
///
/// Red lives in bits 16-23, green in 8-15, blue in 0-7. Alpha is always fully
/// opaque (1.0). Input above 24 bits is masked, not rejected.
pub fn decimal_to_rgba(color: u32) -> (u8, u8, u8, f64) {
    let color = color & 0xFF_FFFF;
    let r = ((color >> 16) & 0xFF) as u8;
    let g = ((color >> 8) & 0xFF) as u8;
    let b = (color & 0xFF) as u8;
    (r, g, b, 1.0)
}

/// Converts an angle in degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts an angle in radians to degrees.
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a color from a packed 24-bit decimal value, fully opaque.
    pub fn from_decimal(color: u32) -> Self {
        let (r, g, b, _) = decimal_to_rgba(color);
        Rgba { r, g, b, a: 255 }
    }

    /// Solid black, the default fill/stroke color.
    pub fn black() -> Self {
        Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

/// An immutable table of named colors.
///
/// Built once at startup and injected where needed; there is deliberately no
/// mutation API, so scene builders can share one table without coordination.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: FxHashMap<&'static str, u32>,
}

impl ColorTable {
    /// Builds a table from `(name, packed color)` pairs.
    pub fn new(entries: &[(&'static str, u32)]) -> Self {
        ColorTable {
            colors: entries.iter().copied().collect(),
        }
    }

    /// Looks up a named color as a packed 24-bit value.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.colors.get(name).copied()
    }
}

impl Default for ColorTable {
    /// The demo palette.
    fn default() -> Self {
        ColorTable::new(&[
            ("carbon", 0x0E0E0E),
            ("lightCarbon", 0x383838),
            ("darkRed", 0x260C0C),
            ("brightRed", 0x720606),
            ("darkBlue", 0x0C1026),
            ("brightBlue", 0x090C68),
            ("darkGreen", 0x0C260C),
            ("brightGreen", 0x067206),
            ("darkYellow", 0x26260C),
            ("brightYellow", 0x727206),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_rgba_red() {
        assert_eq!(decimal_to_rgba(0xFF0000), (255, 0, 0, 1.0));
    }

    #[test]
    fn test_decimal_to_rgba_green() {
        assert_eq!(decimal_to_rgba(0x00FF00), (0, 255, 0, 1.0));
    }

    #[test]
    fn test_decimal_to_rgba_mixed() {
        assert_eq!(decimal_to_rgba(0x123456), (0x12, 0x34, 0x56, 1.0));
    }

    #[test]
    fn test_decimal_to_rgba_masks_high_bits() {
        // Input above 24 bits is masked, never rejected
        assert_eq!(decimal_to_rgba(0xAB_FF00_00), (255, 0, 0, 1.0));
    }

    #[test]
    fn test_angle_conversion_roundtrip() {
        let angles = [0.0, 45.0, 90.0, 180.0, 270.0, 360.0, -30.0];
        for deg in angles {
            let back = radians_to_degrees(degrees_to_radians(deg));
            assert!((back - deg).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degrees_to_radians_right_angle() {
        assert!((degrees_to_radians(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_color_table_lookup() {
        let table = ColorTable::default();
        assert_eq!(table.get("carbon"), Some(0x0E0E0E));
        assert_eq!(table.get("brightRed"), Some(0x720606));
        assert_eq!(table.get("chartreuse"), None);
    }
}
