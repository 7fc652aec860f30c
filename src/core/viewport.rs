//=========================================================================
// Viewport
//=========================================================================

/// Drawable area in pixels.
///
/// The viewport width doubles as the far depth bound of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero, negative or not finite
    /// (e.g. a minimized window). Nothing can be projected into it.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Depth at which stars (re)enter the field.
    pub fn far_bound(&self) -> f32 {
        self.width
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds check: points on the edge are inside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}
