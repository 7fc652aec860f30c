//=========================================================================
// Presenter
//
// Owns the OS window and the softbuffer surface the finished frame is
// copied into. Both share the window through `Rc`, as softbuffer keeps
// its own handle to it.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::num::NonZeroU32;
use std::rc::Rc;

//=== External Crates =====================================================
use log::debug;
use softbuffer::{Context, Surface};
use winit::window::Window;

//=== Internal Imports ====================================================
use super::PlatformError;
use crate::render::PixelCanvas;

//=== Presenter ===========================================================

pub(crate) struct Presenter {
    window: Rc<Window>,
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

impl Presenter {
    /// Attaches a software presentation surface to `window`.
    pub(crate) fn new(window: Window) -> Result<Self, PlatformError> {
        let window = Rc::new(window);
        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;

        Ok(Self {
            window,
            _context: context,
            surface,
        })
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the surface. Must happen before the first present.
    pub(crate) fn resize(&mut self, width: NonZeroU32, height: NonZeroU32) -> Result<(), PlatformError> {
        debug!(target: "platform::render", "Surface resized to {}x{}", width, height);
        self.surface.resize(width, height)?;
        Ok(())
    }

    /// Copies the canvas into the surface and shows it.
    pub(crate) fn present(&mut self, canvas: &PixelCanvas) -> Result<(), PlatformError> {
        let mut buffer = self.surface.buffer_mut()?;
        canvas.copy_to(&mut buffer);

        self.window.pre_present_notify();
        buffer.present()?;
        Ok(())
    }

    /// Schedules the next `RedrawRequested`.
    pub(crate) fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
