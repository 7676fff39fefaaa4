use std::fmt::Debug;

use glow::HasContext;

use crate::coords::Viewport;
use crate::paint::Color;

/// Description of one float vertex attribute inside a bound array buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribLayout {
    /// Floats per vertex for this attribute.
    pub components: i32,
    pub normalized: bool,
    /// Byte distance between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

impl AttribLayout {
    /// Tightly packed `x, y, z` position.
    pub const POSITION_3F: Self = Self {
        components: 3,
        normalized: false,
        stride: 3 * std::mem::size_of::<f32>() as i32,
        offset: 0,
    };
}

/// The GL calls the renderer issues, and nothing more.
///
/// Implementations assume their GL context is current on the calling thread.
/// Operations on "the bound" object act on whatever the last bind call
/// selected; `GpuContext` is what keeps that ordering straight.
pub trait GlApi {
    type VertexArray: Copy + Eq + Debug;
    type Buffer: Copy + Eq + Debug;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// `None` binds vertex array zero.
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// `None` binds buffer zero to the array-buffer target.
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);

    /// Uploads `bytes` into the bound array buffer with `STATIC_DRAW` usage.
    fn array_buffer_data_static(&self, bytes: &[u8]);
    fn enable_vertex_attrib(&self, index: u32);
    /// Points attribute `index` of the bound vertex array at the bound array buffer.
    fn vertex_attrib_f32(&self, index: u32, layout: AttribLayout);

    fn viewport(&self, viewport: Viewport);
    fn clear_color(&self, color: Color);
    fn clear_color_buffer(&self);
    /// Draws `count` vertices of the bound vertex array as a triangle list.
    fn draw_triangles(&self, first: i32, count: i32);
}

// SAFETY (all blocks below): the window backend only hands out a
// `glow::Context` after making its GL context current on this thread, and the
// context never leaves that thread. Handles passed in were created by this
// same context.
impl GlApi for glow::Context {
    type VertexArray = <glow::Context as HasContext>::VertexArray;
    type Buffer = <glow::Context as HasContext>::Buffer;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data_static(&self, bytes: &[u8]) {
        unsafe {
            HasContext::buffer_data_u8_slice(self, glow::ARRAY_BUFFER, bytes, glow::STATIC_DRAW)
        }
    }

    fn enable_vertex_attrib(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_f32(&self, index: u32, layout: AttribLayout) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                layout.components,
                glow::FLOAT,
                layout.normalized,
                layout.stride,
                layout.offset,
            )
        }
    }

    fn viewport(&self, viewport: Viewport) {
        let (w, h) = viewport.gl_extent();
        unsafe { HasContext::viewport(self, viewport.x, viewport.y, w, h) }
    }

    fn clear_color(&self, color: Color) {
        unsafe { HasContext::clear_color(self, color.r, color.g, color.b, color.a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { HasContext::clear(self, glow::COLOR_BUFFER_BIT) }
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, first, count) }
    }
}
