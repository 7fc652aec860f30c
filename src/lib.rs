//=========================================================================
// Starfield Library Root
//
// Animated parallax starfield: stars drift toward the viewer, are
// projected with a perspective divide, and leave fading trails because
// each frame only dims the previous one.
//
// Responsibilities:
// - Expose the runtime facade (`StarfieldBuilder`, `Starfield`)
// - Expose the platform-independent animator and drawing surface so the
//   effect can be driven and tested without a window
// - Keep the windowing integration (`platform`) private
//
// Typical usage:
// ```no_run
// use starfield::StarfieldBuilder;
//
// fn main() {
//     StarfieldBuilder::new().build().run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the star model, the animator and its control queue.
// `render` holds the `Canvas` trait, colors and the software rasterizer.
// `config` and `logging` are the ambient layers used by the binary.
//
pub mod config;
pub mod core;
pub mod logging;
pub mod prelude;
pub mod render;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop, window and presentation surface.
// It is not part of the public API surface.
//
// `engine` defines the builder and runtime entry point.
//
mod engine;
mod error;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Starfield, StarfieldBuilder};
pub use error::StarfieldError;
pub use platform::PlatformError;
