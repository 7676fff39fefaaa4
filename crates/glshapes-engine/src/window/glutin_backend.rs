use std::ffi::CStr;
use std::time::Duration;

use anyhow::Context as _;
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::device::StartupError;

use super::{WindowBackend, WindowConfig};

/// Entry points the renderer cannot run without.
const REQUIRED_SYMBOLS: &[&CStr] = &[
    c"glGenVertexArrays",
    c"glBindVertexArray",
    c"glGenBuffers",
    c"glBindBuffer",
    c"glBufferData",
    c"glEnableVertexAttribArray",
    c"glVertexAttribPointer",
    c"glDrawArrays",
];

/// winit window + glutin context, driven by `pump_app_events` so the frame
/// loop stays a plain `while` loop on the calling thread.
#[derive(Default)]
pub struct GlutinBackend {
    // Field order is drop order: GL objects go before the event loop.
    window: Option<WindowState>,
    event_loop: Option<EventLoop<()>>,
    events: CloseWatcher,
}

struct WindowState {
    // Surface and context are released before the window they render into.
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

/// Event handler for pumped events. Only the close request matters.
#[derive(Default)]
struct CloseWatcher {
    close_requested: bool,
}

impl ApplicationHandler for CloseWatcher {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            log::debug!("close requested");
            self.close_requested = true;
        }
    }
}

impl GlutinBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self, config: &WindowConfig) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit event loop")?;

        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        // WGL only exposes modern GL through a display opened against a
        // window. Everywhere else the chosen config sets the window's visual,
        // so the window is created after it.
        #[cfg(target_os = "windows")]
        let early_window = {
            #[allow(deprecated)]
            let window = event_loop
                .create_window(attrs.clone())
                .context("failed to create window")?;
            Some(window)
        };
        #[cfg(not(target_os = "windows"))]
        let early_window: Option<Window> = None;

        let early_handle = early_window
            .as_ref()
            .map(|window| window.window_handle().map(|handle| handle.as_raw()))
            .transpose()
            .context("window has no native handle")?;

        let raw_display = event_loop
            .display_handle()
            .context("event loop has no display handle")?
            .as_raw();
        // SAFETY: the display handle belongs to `event_loop`, which outlives
        // every GL object created from it (see `GlutinBackend` drop order).
        let display = unsafe { Display::new(raw_display, display_preference(early_handle)) }
            .context("failed to open GL display")?;

        let mut template = ConfigTemplateBuilder::new();
        if let Some(handle) = early_handle {
            template = template.compatible_with_native_window(handle);
        }
        // SAFETY: `early_handle`, when present, refers to the live `early_window`.
        let configs = unsafe { display.find_configs(template.build()) }
            .context("failed to query GL configs")?;
        let gl_config = pick_config(configs).context("display offered no GL configs")?;

        let window = match early_window {
            Some(window) => window,
            None => glutin_winit::finalize_window(&event_loop, attrs, &gl_config)
                .context("failed to create window")?,
        };

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw window handle comes from `window`, which outlives
        // both the context and the surface (see `WindowState` drop order).
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let size = window.inner_size();
        log::info!(
            "created \"{}\" window: requested {}x{}, framebuffer {}x{}",
            config.title,
            config.width,
            config.height,
            size.width,
            size.height,
        );

        self.window = Some(WindowState {
            surface,
            context,
            window,
        });
        self.event_loop = Some(event_loop);
        Ok(())
    }
}

/// Prefers a hardware-accelerated config. `None` when the display matched none.
fn pick_config(configs: impl Iterator<Item = Config>) -> Option<Config> {
    configs.max_by_key(|c| c.hardware_accelerated())
}

/// The platform GL API, falling back to EGL where the native one is missing.
#[cfg(target_os = "windows")]
fn display_preference(window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window)
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(target_os = "android")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::GlxThenEgl(Box::new(winit::platform::x11::register_xlib_error_hook))
}

impl WindowBackend for GlutinBackend {
    type Gl = glow::Context;

    fn create_window(&mut self, config: &WindowConfig) -> Result<(), StartupError> {
        self.open(config)
            .map_err(|source| StartupError::WindowCreation { source })
    }

    fn load_gl(&mut self) -> Result<glow::Context, StartupError> {
        let Some(state) = self.window.as_ref() else {
            return Err(StartupError::FunctionLoader {
                symbol: REQUIRED_SYMBOLS[0],
            });
        };
        let display = state.context.display();

        if let Some(symbol) = REQUIRED_SYMBOLS
            .iter()
            .copied()
            .find(|symbol| display.get_proc_address(symbol).is_null())
        {
            log::error!("GL entry point {symbol:?} did not resolve");
            return Err(StartupError::FunctionLoader { symbol });
        }

        // SAFETY: the context is current on this thread and the returned
        // table is only used while `state.context` is alive.
        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        let version = gl.version();
        log::info!(
            "OpenGL {}.{} loaded ({})",
            version.major,
            version.minor,
            version.vendor_info
        );
        Ok(gl)
    }

    fn framebuffer_size(&self) -> PhysicalSize<u32> {
        self.window
            .as_ref()
            .map(|state| state.window.inner_size())
            .unwrap_or_default()
    }

    fn poll_events(&mut self) {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.events) {
            log::debug!("event loop exited with code {code}");
            self.events.close_requested = true;
        }
    }

    fn should_close(&self) -> bool {
        self.events.close_requested
    }

    fn swap_buffers(&mut self) {
        let Some(state) = self.window.as_ref() else {
            return;
        };

        state.window.pre_present_notify();
        if let Err(e) = state.surface.swap_buffers(&state.context) {
            log::warn!("buffer swap failed: {e}");
        }
    }

    fn terminate(&mut self) {
        if self.window.take().is_some() {
            log::debug!("window and GL context released");
        }
        self.event_loop = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_configs_is_an_error_not_a_panic() {
        assert!(pick_config(std::iter::empty()).is_none());
    }
}
