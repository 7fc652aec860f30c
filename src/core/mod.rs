//=========================================================================
// Core
//
// Platform-independent starfield logic.
//
// Responsibilities:
// - Star model: randomized placement, depth advance, in-place recycling
// - Perspective projection and glow selection
// - The animator owning the field and drawing frames onto a `Canvas`
// - Control queue letting other threads stop the frame loop
//
// Notes:
// Nothing here touches a window or the OS. The platform layer feeds the
// animator viewport sizes and a canvas, and schedules frames.
//
//=========================================================================

//=== Submodules ==========================================================

mod animator;
mod settings;
mod star;
mod viewport;

pub(crate) mod control;

//=== Public API ==========================================================

pub use animator::{FrameStats, StarfieldAnimator};
pub use control::{StopHandle, TickControl};
pub use settings::{InvalidSetting, StarfieldSettings};
pub use star::{Projection, Star};
pub use viewport::Viewport;
