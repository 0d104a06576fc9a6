//! Colors and per-value color selection.

use std::fmt;
use std::sync::Arc;

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use glidechart::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let from_hex = Color::from_hex(0x92d1ee);
/// let from_bytes = Color::from_rgba_u8(128, 64, 32, 255);
/// assert_eq!(red.a, 1.0);
/// assert_eq!(from_hex, Color::from_rgb_u8(0x92, 0xd1, 0xee));
/// assert_eq!(from_bytes.a, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from a 24-bit RGB hex value (e.g. `0xFF8800`).
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::from_rgb_u8(r, g, b)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Convert to 8-bit RGBA, rounding and clamping each channel.
    pub fn to_rgba_u8(self) -> [u8; 4] {
        let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Built-in palettes.
pub struct Palette;

impl Palette {
    /// The eight solarized accent colors.
    pub const SOLARIZED: [Color; 8] = [
        Color::rgb(0.710, 0.537, 0.0),
        Color::rgb(0.796, 0.294, 0.086),
        Color::rgb(0.863, 0.196, 0.184),
        Color::rgb(0.827, 0.212, 0.510),
        Color::rgb(0.424, 0.443, 0.769),
        Color::rgb(0.149, 0.545, 0.824),
        Color::rgb(0.165, 0.631, 0.596),
        Color::rgb(0.522, 0.600, 0.0),
    ];
}

/// Where a widget gets the color for a value.
///
/// Widgets ask for a color with the value being drawn and its index within
/// the series or group.
#[derive(Clone)]
pub enum ColorSource {
    /// Same color for everything.
    Solid(Color),
    /// Cycle through a palette by index.
    Palette(Vec<Color>),
    /// Computed from `(value, index)`.
    Custom(Arc<dyn Fn(f64, usize) -> Color + Send + Sync>),
}

impl ColorSource {
    pub fn custom(f: impl Fn(f64, usize) -> Color + Send + Sync + 'static) -> Self {
        ColorSource::Custom(Arc::new(f))
    }

    /// The solarized palette, cycled by index.
    pub fn solarized() -> Self {
        ColorSource::Palette(Palette::SOLARIZED.to_vec())
    }

    pub fn resolve(&self, value: f64, index: usize) -> Color {
        match self {
            ColorSource::Solid(color) => *color,
            ColorSource::Palette(colors) if colors.is_empty() => Color::default(),
            ColorSource::Palette(colors) => colors[index % colors.len()],
            ColorSource::Custom(f) => f(value, index),
        }
    }
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        ColorSource::Solid(color)
    }
}

impl fmt::Debug for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSource::Solid(color) => f.debug_tuple("Solid").field(color).finish(),
            ColorSource::Palette(colors) => f.debug_tuple("Palette").field(colors).finish(),
            ColorSource::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let color = Color::from_hex(0xFF8000);
        assert_eq!(color.to_rgba_u8(), [255, 128, 0, 255]);
    }

    #[test]
    fn test_palette_cycles() {
        let source = ColorSource::solarized();
        assert_eq!(source.resolve(0.0, 0), Palette::SOLARIZED[0]);
        assert_eq!(source.resolve(0.0, 9), Palette::SOLARIZED[1]);
    }

    #[test]
    fn test_custom_source_sees_value_and_index() {
        let source = ColorSource::custom(|value, index| {
            if value > 50.0 && index == 2 {
                Color::RED
            } else {
                Color::BLUE
            }
        });
        assert_eq!(source.resolve(60.0, 2), Color::RED);
        assert_eq!(source.resolve(60.0, 1), Color::BLUE);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let source = ColorSource::Palette(Vec::new());
        assert_eq!(source.resolve(1.0, 3), Color::default());
    }
}
