//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use starfield::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Starfield, StarfieldBuilder};
pub use crate::error::StarfieldError;

// Animation
pub use crate::core::{
    FrameStats, InvalidSetting, StarfieldAnimator, StarfieldSettings, StopHandle, Viewport,
};

// Drawing
pub use crate::render::{Canvas, Palette, PixelCanvas, Rgb, Rgba};
