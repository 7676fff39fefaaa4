use winit::dpi::PhysicalSize;

use crate::device::{GlApi, StartupError};

/// Window + context request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Requested size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// `(major, minor)` of the requested core-profile context.
    pub gl_version: (u8, u8),
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shaders Tutorial".to_string(),
            width: 800,
            height: 800,
            gl_version: (3, 3),
            resizable: false,
        }
    }
}

/// Poll-style windowing layer with one window and one current GL context.
///
/// Call order: `create_window`, `load_gl`, then any number of
/// `poll_events` / `swap_buffers`, then `terminate`. `terminate` must be
/// safe to call at any point, including after a failed `create_window`.
pub trait WindowBackend {
    type Gl: GlApi;

    /// Creates the window and its context and makes the context current.
    fn create_window(&mut self, config: &WindowConfig) -> Result<(), StartupError>;

    /// Loads the GL function table for the current context.
    fn load_gl(&mut self) -> Result<Self::Gl, StartupError>;

    /// Drawable size in physical pixels.
    fn framebuffer_size(&self) -> PhysicalSize<u32>;

    /// Dispatches pending events without waiting for new ones.
    fn poll_events(&mut self);

    /// Set once the user asked to close the window.
    fn should_close(&self) -> bool;

    fn swap_buffers(&mut self);

    /// Releases the surface, context, window and event loop.
    fn terminate(&mut self);
}
