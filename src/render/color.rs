//=========================================================================
// Colors
//
// Plain color values shared by the animator and the drawing surface.
//
// - `Rgb`: opaque 8-bit color, (de)serialized as `#rrggbb`
// - `Rgba`: an `Rgb` paired with a fill opacity
// - `Palette`: non-empty list of colors stars are tinted from
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::fmt;
use std::str::FromStr;

//=== External Crates =====================================================
use rand::Rng;
use serde::{Deserialize, Serialize};

//=== ColorError ==========================================================

/// Errors produced while building colors or palettes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not of the form `#rrggbb`.
    #[error("invalid hex color {0:?} (expected #rrggbb)")]
    InvalidHex(String),

    /// A palette needs at least one color to pick from.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}

//=== Rgb =================================================================

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pairs this color with an opacity, clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self, alpha)
    }

    /// Packs into the `0x00RRGGBB` layout used by the framebuffer.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpacks a `0x00RRGGBB` pixel. The top byte is ignored.
    pub const fn from_u32(pixel: u32) -> Self {
        Self {
            r: (pixel >> 16) as u8,
            g: (pixel >> 8) as u8,
            b: pixel as u8,
        }
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

//=== Rgba ================================================================

/// Fill style: a color with an opacity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// Creates a fill style. Out-of-range (or NaN) alpha is clamped.
    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        Self { rgb, alpha }
    }

    pub fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

//=== Palette =============================================================

/// Non-empty set of colors stars are tinted from.
///
/// Emptiness is rejected at construction, so picking a color can never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Picks a color uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.colors[rng.random_range(0..self.colors.len())]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Palette {
    /// White, warm white, ice blue, blue and violet.
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb::new(0xff, 0xff, 0xff),
                Rgb::new(0xff, 0xe9, 0xc4),
                Rgb::new(0xd4, 0xfb, 0xff),
                Rgb::new(0x3b, 0x82, 0xf6),
                Rgb::new(0x8b, 0x5c, 0xf6),
            ],
        }
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = ColorError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
