//=========================================================================
// Star
//
// A single point light in the field, plus its perspective projection.
//
// Coordinates:
// ```text
//   x ∈ [-width, width)    lateral offset from the view axis
//   y ∈ [-height, height)  vertical offset from the view axis
//   z ∈ (0, width]         depth; shrinks every frame
//
//   screen_x = x / z * width  + width / 2
//   screen_y = y / z * height + height / 2
//   apparent = (1 - z / width) * size * 2
// ```
//
// Stars are never reallocated: once depth is exhausted the same record is
// re-randomized and sent back to the far bound.
//
//=========================================================================

//=== External Crates =====================================================
use rand::Rng;

//=== Internal Imports ====================================================
use super::Viewport;
use crate::render::{Palette, Rgb};

//=== Star ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Base size; the apparent size grows from 0 to `2 * size` as z → 0.
    pub size: f32,
    pub color: Rgb,
}

impl Star {
    //--- Construction -----------------------------------------------------

    /// Creates a star at a random position and a random depth in
    /// `(0, far_bound]`, so a fresh field is spread across all depths.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, palette: &Palette) -> Self {
        let mut star = Self {
            x: 0.0,
            y: 0.0,
            z: viewport.far_bound(),
            size: 0.0,
            color: Rgb::WHITE,
        };
        star.randomize(rng, viewport, palette);

        // 1 - [0, 1) keeps zero out of the range
        star.z = viewport.far_bound() * (1.0 - rng.random::<f32>());
        star
    }

    //--- Lifecycle --------------------------------------------------------

    /// Re-randomizes position, size and color in place and resets depth
    /// to the far bound.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport, palette: &Palette) {
        self.randomize(rng, viewport, palette);
        self.z = viewport.far_bound();
    }

    /// Moves the star `step` depth units toward the viewer.
    ///
    /// Returns `true` if depth was exhausted and the star was recycled.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        step: f32,
        rng: &mut R,
        viewport: Viewport,
        palette: &Palette,
    ) -> bool {
        self.z -= step;

        if self.z <= 0.0 {
            self.recycle(rng, viewport, palette);
            return true;
        }
        false
    }

    //--- Projection -------------------------------------------------------

    /// Projects onto the screen with a perspective divide by depth.
    pub fn project(&self, viewport: Viewport) -> Projection {
        let (cx, cy) = viewport.center();

        Projection {
            x: (self.x / self.z) * viewport.width + cx,
            y: (self.y / self.z) * viewport.height + cy,
            size: (1.0 - self.z / viewport.far_bound()) * self.size * 2.0,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport, palette: &Palette) {
        self.x = (rng.random::<f32>() - 0.5) * viewport.width * 2.0;
        self.y = (rng.random::<f32>() - 0.5) * viewport.height * 2.0;
        self.size = rng.random::<f32>() * 2.0;
        self.color = palette.pick(rng);
    }
}

//=== Projection ==========================================================

/// Screen-space position and apparent radius of a star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Projection {
    pub fn is_visible(&self, viewport: Viewport) -> bool {
        viewport.contains(self.x, self.y)
    }

    /// Glow applies strictly above the threshold.
    pub fn glows(&self, threshold: f32) -> bool {
        self.size > threshold
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
