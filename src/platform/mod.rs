//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS window, resize notifications, redraw scheduling) with
// the starfield animator.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ├─ resumed          → window + surface,    │
//  │   │                     animator.initialize  │
//  │   ├─ Resized          → animator.on_resize,  │
//  │   │                     canvas/surface resize│
//  │   ├─ RedrawRequested  (frame boundary)       │
//  │   │    ├─ ControlReceiver::poll() ◄──────────┼──── StopHandle
//  │   │    ├─ animator.frame_tick(canvas)        │     (any thread)
//  │   │    ├─ present canvas                     │
//  │   │    └─ request_redraw (next frame)        │
//  │   └─ user_event       → poll() ◄─────────────┼──── StopHandle wake-up
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one animator tick per display
//   refresh; the next frame is requested only after presenting this one
// - **Single thread**: resize handling and frame ticks never overlap, so
//   the animator needs no locking
// - **Zero-size resizes ignored**: minimized windows keep the last field
// - **Stops wake the loop**: an `EventLoopProxy` user event makes a hidden
//   window (no redraws) still honour a stop request
// - **Main thread requirement**: winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Starfield::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod presenter;

//=== External Crates =====================================================

use std::num::NonZeroU32;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowAttributes,
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::control::ControlReceiver;
use crate::core::{StarfieldAnimator, TickControl, Viewport};
use crate::render::PixelCanvas;
use presenter::Presenter;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: the event loop stops and the error is returned from
/// [`Starfield::run`](crate::Starfield::run).
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    /// The software presentation surface failed.
    #[error("presentation surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

//=== Platform ============================================================

/// Window owner and frame scheduler.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)`, no window yet
/// 2. **Execution**: `platform.run()` starts the event loop (blocks)
/// 3. **Frames**: each `RedrawRequested` ticks the animator and requests
///    the next one
/// 4. **Shutdown**: window closed, Escape, or a stop request
pub(crate) struct Platform {
    /// Window and surface (None until `resumed()` called).
    presenter: Option<Presenter>,

    /// Star field state, updated once per frame.
    animator: StarfieldAnimator,

    /// CPU framebuffer the animator draws into.
    canvas: PixelCanvas,

    /// Stop requests from other threads.
    control: ControlReceiver,

    /// Initial title and size.
    window_config: WindowConfig,

    /// First fatal error, reported after the loop exits.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        animator: StarfieldAnimator,
        control: ControlReceiver,
        window_config: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            presenter: None,
            animator,
            canvas: PixelCanvas::new(0, 0),
            control,
            window_config,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or a stop is requested.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start, or the
    /// first fatal error raised while it was running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        let proxy = event_loop.create_proxy();
        self.control.set_waker(move || {
            // Fails only once the loop has exited.
            let _ = proxy.send_event(());
        });

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        info!(
            target: "platform",
            "Event loop exited after {} frames",
            self.animator.frame_count()
        );

        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Logs a fatal error, keeps the first one and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        if self.failure.is_none() {
            self.failure = Some(error);
        }
        event_loop.exit();
    }

    /// Polls the control queue, exiting the loop on a stop request.
    ///
    /// Returns `true` if the loop is exiting.
    fn check_stop(&self, event_loop: &ActiveEventLoop) -> bool {
        if self.control.poll() == TickControl::Exit {
            info!(target: "platform", "Stop requested, exiting");
            event_loop.exit();
            return true;
        }
        false
    }

    /// Resizes the surface and canvas to the window.
    ///
    /// Returns `false` (and changes nothing) for zero-sized windows.
    fn resize_surfaces(&mut self, size: PhysicalSize<u32>) -> Result<bool, PlatformError> {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            debug!(target: "platform", "Ignoring zero-sized window ({}x{})", size.width, size.height);
            return Ok(false);
        };

        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height)?;
        }
        self.canvas.resize(size.width, size.height);
        Ok(true)
    }

    /// Applies a window resize to the surfaces and regenerates the field.
    fn apply_size(&mut self, size: PhysicalSize<u32>) -> Result<(), PlatformError> {
        if self.resize_surfaces(size)? {
            self.animator.on_resize(Viewport::from((size.width, size.height)));

            // Restarts the loop if it paused while the window had no area.
            if let Some(presenter) = &self.presenter {
                presenter.request_redraw();
            }
        }
        Ok(())
    }

    /// Ticks the animator, presents the result and requests the next frame.
    ///
    /// Nothing is drawn (and no frame requested) while the window has no
    /// area; the next non-zero resize restarts the loop.
    fn render_frame(&mut self) -> Result<(), PlatformError> {
        let Some(presenter) = &mut self.presenter else {
            return Ok(());
        };
        if self.canvas.pixels().is_empty() {
            trace!(target: "platform::render", "Skipping frame for zero-sized window");
            return Ok(());
        }

        self.animator.frame_tick(&mut self.canvas);
        presenter.present(&self.canvas)?;
        presenter.request_redraw();
        Ok(())
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn has_window(&self) -> bool {
        self.presenter.is_some()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when the app becomes active (startup or mobile resume).
    ///
    /// Creates the window, its surface and the initial star field.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(self.window_config.width, self.window_config.height));

        let presenter = match event_loop
            .create_window(attrs)
            .map_err(PlatformError::from)
            .and_then(Presenter::new)
        {
            Ok(presenter) => presenter,
            Err(e) => return self.fail(event_loop, e),
        };

        let size = presenter.window().inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            presenter.window().scale_factor()
        );

        self.presenter = Some(presenter);
        if let Err(e) = self.resize_surfaces(size) {
            return self.fail(event_loop, e);
        }
        self.animator.initialize(Viewport::from((size.width, size.height)));

        // First frame; every later one is requested by the frame before it.
        if let Some(presenter) = &self.presenter {
            presenter.request_redraw();
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. }
                if key_event.state == ElementState::Pressed
                    && key_event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                info!(target: "platform", "Escape pressed, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Err(e) = self.apply_size(size) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: honour stop requests before drawing
                if self.check_stop(event_loop) {
                    return;
                }

                if let Err(e) = self.render_frame() {
                    self.fail(event_loop, e);
                }
            }

            _ => {
                // Ignore: focus, cursor, scale changes (a Resized follows), etc.
            }
        }
    }

    /// Wake-up sent by [`StopHandle::stop`](crate::core::StopHandle::stop).
    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: ()) {
        trace!(target: "platform", "Woken by control queue");
        self.check_stop(event_loop);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::control_channel;
    use crate::core::StarfieldSettings;

    fn platform() -> Platform {
        let settings = StarfieldSettings {
            star_count: 16,
            seed: Some(1),
            ..Default::default()
        };
        let (_handle, control) = control_channel(4);
        Platform::new(StarfieldAnimator::new(settings), control, WindowConfig::default())
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform();
        assert!(!platform.has_window(), "Window should be created lazily");
        assert!(platform.failure.is_none());
    }

    #[test]
    fn apply_size_without_window_resizes_field_and_canvas() {
        let mut platform = platform();

        platform.apply_size(PhysicalSize::new(320, 200)).unwrap();

        assert_eq!(platform.animator.viewport(), Viewport::new(320.0, 200.0));
        assert_eq!(platform.animator.stars().len(), 16);
        assert_eq!(platform.canvas.pixels().len(), 320 * 200);
    }

    #[test]
    fn zero_size_is_ignored() {
        let mut platform = platform();
        platform.apply_size(PhysicalSize::new(320, 200)).unwrap();
        let stars = platform.animator.stars().to_vec();

        platform.apply_size(PhysicalSize::new(0, 0)).unwrap();

        assert_eq!(platform.animator.viewport(), Viewport::new(320.0, 200.0));
        assert_eq!(platform.animator.stars(), &stars[..]);
        assert_eq!(platform.canvas.pixels().len(), 320 * 200);
    }

    #[test]
    fn render_without_window_is_noop() {
        let mut platform = platform();
        platform.apply_size(PhysicalSize::new(64, 64)).unwrap();

        platform.render_frame().unwrap();

        assert_eq!(platform.animator.frame_count(), 0);
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
