use std::fmt;

use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::paint::Color;

use super::{AttribLayout, GlApi, StartupError};

/// Owned vertex array object.
///
/// Not `Clone`: the only way to dispose of one is to hand it back to
/// [`GpuContext::delete_vertex_array`], so it is deleted exactly once.
pub struct VertexArray<G: GlApi> {
    raw: G::VertexArray,
}

impl<G: GlApi> VertexArray<G> {
    pub fn raw(&self) -> G::VertexArray {
        self.raw
    }
}

impl<G: GlApi> fmt::Debug for VertexArray<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexArray").field(&self.raw).finish()
    }
}

/// Owned vertex buffer object. Same ownership rules as [`VertexArray`].
pub struct VertexBuffer<G: GlApi> {
    raw: G::Buffer,
}

impl<G: GlApi> VertexBuffer<G> {
    pub fn raw(&self) -> G::Buffer {
        self.raw
    }
}

impl<G: GlApi> fmt::Debug for VertexBuffer<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexBuffer").field(&self.raw).finish()
    }
}

/// Mirror of the GL bindings this crate touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BindingState<V, B> {
    pub vertex_array: Option<V>,
    pub array_buffer: Option<B>,
}

impl<V, B> BindingState<V, B> {
    pub const fn none() -> Self {
        Self {
            vertex_array: None,
            array_buffer: None,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.vertex_array.is_none() && self.array_buffer.is_none()
    }
}

impl<V, B> Default for BindingState<V, B> {
    fn default() -> Self {
        Self::none()
    }
}

/// The current GL context plus the binding state it carries.
///
/// Binds only happen through [`GpuContext::with_vertex_array`] and
/// [`VertexArrayScope::with_array_buffer`]; both restore the previous binding
/// when the closure returns. Uploads and attribute setup need an
/// [`ArrayBufferScope`], draws need a [`VertexArrayScope`], so the
/// bind → operate → unbind order cannot be skipped.
pub struct GpuContext<G: GlApi> {
    gl: G,
    bindings: BindingState<G::VertexArray, G::Buffer>,
    viewport: Viewport,
}

impl<G: GlApi> GpuContext<G> {
    /// Wraps a current GL context and sets the viewport to the full framebuffer.
    pub fn new(gl: G, framebuffer: PhysicalSize<u32>) -> Self {
        let viewport = Viewport::full(framebuffer);
        if viewport.is_empty() {
            log::warn!(
                "framebuffer is {}x{}; nothing will be visible",
                framebuffer.width,
                framebuffer.height
            );
        }
        gl.viewport(viewport);

        Self {
            gl,
            bindings: BindingState::none(),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bindings(&self) -> BindingState<G::VertexArray, G::Buffer> {
        self.bindings
    }

    pub fn create_vertex_array(&mut self) -> Result<VertexArray<G>, StartupError> {
        let raw = self
            .gl
            .create_vertex_array()
            .map_err(|reason| StartupError::Allocation {
                resource: "vertex array",
                reason,
            })?;
        Ok(VertexArray { raw })
    }

    pub fn create_vertex_buffer(&mut self) -> Result<VertexBuffer<G>, StartupError> {
        let raw = self
            .gl
            .create_buffer()
            .map_err(|reason| StartupError::Allocation {
                resource: "vertex buffer",
                reason,
            })?;
        Ok(VertexBuffer { raw })
    }

    pub fn delete_vertex_array(&mut self, vertex_array: VertexArray<G>) {
        debug_assert_ne!(self.bindings.vertex_array, Some(vertex_array.raw));
        self.gl.delete_vertex_array(vertex_array.raw);
    }

    pub fn delete_vertex_buffer(&mut self, buffer: VertexBuffer<G>) {
        debug_assert_ne!(self.bindings.array_buffer, Some(buffer.raw));
        self.gl.delete_buffer(buffer.raw);
    }

    /// Clears the color buffer to `color`.
    pub fn clear(&mut self, color: Color) {
        self.gl.clear_color(color);
        self.gl.clear_color_buffer();
    }

    /// Binds `vertex_array` for the duration of `f`, then restores the
    /// previous binding.
    pub fn with_vertex_array<R>(
        &mut self,
        vertex_array: &VertexArray<G>,
        f: impl FnOnce(&mut VertexArrayScope<'_, G>) -> R,
    ) -> R {
        let previous = self.bindings.vertex_array.replace(vertex_array.raw);
        self.gl.bind_vertex_array(Some(vertex_array.raw));

        let out = f(&mut VertexArrayScope { ctx: self });

        self.gl.bind_vertex_array(previous);
        self.bindings.vertex_array = previous;
        out
    }
}

/// Proof that a vertex array is bound.
pub struct VertexArrayScope<'c, G: GlApi> {
    ctx: &'c mut GpuContext<G>,
}

impl<G: GlApi> VertexArrayScope<'_, G> {
    /// The vertex array this scope was opened for.
    pub fn bound(&self) -> Option<G::VertexArray> {
        self.ctx.bindings.vertex_array
    }

    /// Binds `buffer` to the array-buffer target for the duration of `f`,
    /// then restores the previous binding.
    pub fn with_array_buffer<R>(
        &mut self,
        buffer: &VertexBuffer<G>,
        f: impl FnOnce(&ArrayBufferScope<'_, G>) -> R,
    ) -> R {
        let ctx = &mut *self.ctx;
        let previous = ctx.bindings.array_buffer.replace(buffer.raw);
        ctx.gl.bind_array_buffer(Some(buffer.raw));

        let out = f(&ArrayBufferScope { gl: &ctx.gl });

        ctx.gl.bind_array_buffer(previous);
        ctx.bindings.array_buffer = previous;
        out
    }

    /// Draws `count` vertices starting at `first` as a triangle list.
    pub fn draw_triangles(&self, first: usize, count: usize) {
        self.ctx.gl.draw_triangles(first as i32, count as i32);
    }
}

/// Proof that both a vertex array and an array buffer are bound.
pub struct ArrayBufferScope<'c, G: GlApi> {
    gl: &'c G,
}

impl<G: GlApi> ArrayBufferScope<'_, G> {
    /// Uploads `data` once as static draw data. Byte size is
    /// `data.len() * size_of::<f32>()`.
    pub fn upload_static(&self, data: &[f32]) {
        self.gl.array_buffer_data_static(bytemuck::cast_slice(data));
    }

    /// Enables attribute `index` and points it at the bound buffer.
    pub fn describe_attrib(&self, index: u32, layout: AttribLayout) {
        self.gl.enable_vertex_attrib(index);
        self.gl.vertex_attrib_f32(index, layout);
    }
}
