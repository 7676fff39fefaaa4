//! Test doubles: a GL that records calls instead of issuing them, and a
//! window backend driven by a script.

use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::rc::Rc;

use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::device::{AttribLayout, GlApi, StartupError};
use crate::paint::Color;
use crate::window::{WindowBackend, WindowConfig};

/// One observable side effect, GL or windowing, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateWindow { width: u32, height: u32, resizable: bool },
    LoadGl,
    PollEvents,
    SwapBuffers,
    Terminate,

    CreateVertexArray(u32),
    CreateBuffer(u32),
    DeleteVertexArray(u32),
    DeleteBuffer(u32),
    BindVertexArray(Option<u32>),
    BindArrayBuffer(Option<u32>),
    BufferDataStatic(Vec<u8>),
    EnableVertexAttrib(u32),
    VertexAttrib(u32, AttribLayout),
    Viewport(Viewport),
    ClearColor(Color),
    Clear,
    DrawTriangles { first: i32, count: i32 },
}

/// Shared, append-only call log.
#[derive(Debug, Clone, Default)]
pub(crate) struct Trace(Rc<RefCell<Vec<Call>>>);

impl Trace {
    pub(crate) fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Calls after the initial viewport setup.
    pub(crate) fn calls_since_setup(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .skip_while(|c| matches!(c, Call::Viewport(_)))
            .collect()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(|c| pred(c))
    }

    pub(crate) fn rposition(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.0.borrow().iter().rposition(|c| pred(c))
    }
}

/// `GlApi` that hands out sequential ids starting at 1 and logs every call.
pub(crate) struct RecordingGl {
    trace: Trace,
    next_id: Cell<u32>,
    fail_buffers: bool,
}

impl RecordingGl {
    pub(crate) fn new(trace: Trace) -> Self {
        Self {
            trace,
            next_id: Cell::new(0),
            fail_buffers: false,
        }
    }

    /// Every `create_buffer` call fails.
    pub(crate) fn failing_buffers(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    fn next_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GlApi for RecordingGl {
    type VertexArray = u32;
    type Buffer = u32;

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next_id();
        self.trace.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffers {
            return Err("out of memory".to_string());
        }
        let id = self.next_id();
        self.trace.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.trace.push(Call::DeleteVertexArray(vertex_array));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.trace.push(Call::DeleteBuffer(buffer));
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.trace.push(Call::BindVertexArray(vertex_array));
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.trace.push(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data_static(&self, bytes: &[u8]) {
        self.trace.push(Call::BufferDataStatic(bytes.to_vec()));
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.trace.push(Call::EnableVertexAttrib(index));
    }

    fn vertex_attrib_f32(&self, index: u32, layout: AttribLayout) {
        self.trace.push(Call::VertexAttrib(index, layout));
    }

    fn viewport(&self, viewport: Viewport) {
        self.trace.push(Call::Viewport(viewport));
    }

    fn clear_color(&self, color: Color) {
        self.trace.push(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.trace.push(Call::Clear);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.trace.push(Call::DrawTriangles { first, count });
    }
}

/// `WindowBackend` whose failures and close timing are set up front.
pub(crate) struct ScriptedBackend {
    trace: Trace,
    pub(crate) fail_window: bool,
    pub(crate) missing_symbol: Option<&'static CStr>,
    pub(crate) fail_buffers: bool,
    pub(crate) framebuffer: PhysicalSize<u32>,
    /// Raise the close flag during this poll (1-based).
    pub(crate) close_on_poll: Option<u32>,
    pub(crate) close_requested: bool,
    polls: u32,
}

impl ScriptedBackend {
    pub(crate) fn new(trace: Trace) -> Self {
        Self {
            trace,
            fail_window: false,
            missing_symbol: None,
            fail_buffers: false,
            framebuffer: PhysicalSize::new(800, 800),
            close_on_poll: None,
            close_requested: false,
            polls: 0,
        }
    }
}

impl WindowBackend for ScriptedBackend {
    type Gl = RecordingGl;

    fn create_window(&mut self, config: &WindowConfig) -> Result<(), StartupError> {
        self.trace.push(Call::CreateWindow {
            width: config.width,
            height: config.height,
            resizable: config.resizable,
        });
        if self.fail_window {
            return Err(StartupError::WindowCreation {
                source: anyhow::anyhow!("no display available"),
            });
        }
        Ok(())
    }

    fn load_gl(&mut self) -> Result<RecordingGl, StartupError> {
        self.trace.push(Call::LoadGl);
        if let Some(symbol) = self.missing_symbol {
            return Err(StartupError::FunctionLoader { symbol });
        }
        let gl = RecordingGl::new(self.trace.clone());
        Ok(if self.fail_buffers { gl.failing_buffers() } else { gl })
    }

    fn framebuffer_size(&self) -> PhysicalSize<u32> {
        self.framebuffer
    }

    fn poll_events(&mut self) {
        self.trace.push(Call::PollEvents);
        self.polls += 1;
        if self.close_on_poll == Some(self.polls) {
            self.close_requested = true;
        }
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn swap_buffers(&mut self) {
        self.trace.push(Call::SwapBuffers);
    }

    fn terminate(&mut self) {
        self.trace.push(Call::Terminate);
    }
}
