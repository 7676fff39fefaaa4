use std::io::{self, Write};
use std::process::ExitCode;

use crate::device::StartupError;
use crate::paint::Color;
use crate::render::Renderer;
use crate::time::FrameClock;

use super::{WindowBackend, WindowConfig};

/// Everything the runtime needs besides the shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub window: WindowConfig,
    pub clear_color: Color,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: Color::SLATE_TEAL,
        }
    }
}

/// Frame loop state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    /// Terminal; no further frames are drawn.
    Closing,
}

impl LoopState {
    /// Next state given the window's close flag.
    pub fn advance(self, close_requested: bool) -> Self {
        match self {
            LoopState::Running if close_requested => LoopState::Closing,
            state => state,
        }
    }
}

/// Totals for a completed run.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub draw_calls: u64,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Brings up the window and context, uploads `shapes` in order, and draws
    /// them every frame until the window is closed.
    ///
    /// The backend is terminated on every path, after all GPU objects have
    /// been released.
    pub fn run<B: WindowBackend>(
        backend: &mut B,
        config: &RuntimeConfig,
        shapes: &[&[f32]],
    ) -> Result<RunSummary, StartupError> {
        let result = Self::run_until_closed(backend, config, shapes);
        backend.terminate();

        if let Ok(summary) = &result {
            log::info!(
                "shutdown complete after {} frames ({} draw calls)",
                summary.frames,
                summary.draw_calls
            );
        }
        result
    }

    /// Like [`Runtime::run`], reporting failures the way a process entry
    /// point should: the fixed message on stdout, the cause chain in the log,
    /// and a non-zero exit code.
    pub fn run_to_exit<B: WindowBackend>(
        backend: &mut B,
        config: &RuntimeConfig,
        shapes: &[&[f32]],
    ) -> ExitCode {
        match Self::run(backend, config, shapes) {
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                if let Err(e) = Self::report_failure(&err, &mut io::stdout().lock()) {
                    log::warn!("could not write failure message to stdout: {e}");
                }
                log::error!("{:#}", anyhow::Error::from(err));
                ExitCode::FAILURE
            }
        }
    }

    /// Writes the one-line user-facing message for `err`, without its cause.
    pub fn report_failure(err: &StartupError, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{err}")?;
        out.flush()
    }

    fn run_until_closed<B: WindowBackend>(
        backend: &mut B,
        config: &RuntimeConfig,
        shapes: &[&[f32]],
    ) -> Result<RunSummary, StartupError> {
        backend.create_window(&config.window)?;
        let gl = backend.load_gl()?;

        let framebuffer = backend.framebuffer_size();
        let mut renderer = Renderer::new(gl, framebuffer, config.clear_color);
        log::debug!("viewport set to {:?}", renderer.context().viewport());

        // On error the renderer drops here and releases what was uploaded.
        for vertices in shapes {
            renderer.add_shape(vertices.to_vec())?;
        }

        Ok(Self::frame_loop(backend, &mut renderer))
    }

    fn frame_loop<B: WindowBackend>(backend: &mut B, renderer: &mut Renderer<B::Gl>) -> RunSummary {
        let mut clock = FrameClock::new();
        let mut summary = RunSummary::default();
        let mut state = LoopState::Running;

        loop {
            state = state.advance(backend.should_close());
            if state == LoopState::Closing {
                break;
            }

            backend.poll_events();
            let stats = renderer.render_frame();
            backend.swap_buffers();

            summary.frames += 1;
            summary.draw_calls += stats.draw_calls as u64;

            if let Some(rate) = clock.tick() {
                log::debug!("{:.1} fps over {} frames", rate.per_second(), rate.frames);
            }
        }

        log::debug!("frame loop closing after {} frames", clock.frame_index());
        summary
    }
}
