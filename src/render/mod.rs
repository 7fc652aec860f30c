//=========================================================================
// Render Subsystem
//
// Drawing-surface abstraction used by the starfield animator, plus a
// software implementation that rasterizes into a CPU framebuffer.
//
// Architecture:
// ```text
//   StarfieldAnimator ──frame_tick()──> dyn Canvas
//                                          │
//                                          ├─ PixelCanvas (u32 framebuffer)
//                                          │     └─> platform presents it
//                                          └─ test doubles (record calls)
// ```
//
// The canvas is stateful like a 2D context: fill style and shadow settings
// persist until changed, and nothing is cleared between frames unless the
// caller paints over it.
//
//=========================================================================

//=== Submodules ==========================================================

mod color;
mod pixel_canvas;

//=== Public API ==========================================================

pub use color::{ColorError, Palette, Rgb, Rgba};
pub use pixel_canvas::PixelCanvas;

//=== Canvas ==============================================================

/// Minimal stateful 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left corner.
/// Drawing outside the surface is clipped silently.
pub trait Canvas {
    /// Surface dimensions in pixels.
    fn size(&self) -> (u32, u32);

    /// Sets the color and opacity used by subsequent fills.
    fn set_fill_style(&mut self, style: Rgba);

    /// Enables a blurred glow around subsequent fills.
    ///
    /// A `blur` of zero (or less) disables the glow.
    fn set_shadow(&mut self, blur: f32, color: Rgb);

    /// Disables the glow for subsequent fills.
    fn clear_shadow(&mut self) {
        self.set_shadow(0.0, Rgb::BLACK);
    }

    /// Fills an axis-aligned rectangle with the current fill style.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fills a circle with the current fill style (and glow, if enabled).
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
}
