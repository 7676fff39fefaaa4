use winit::dpi::PhysicalSize;

use crate::device::{GlApi, GpuContext, StartupError};
use crate::paint::Color;

use super::{Shape, ShapeList};

/// What one call to [`Renderer::render_frame`] submitted.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub vertices: usize,
}

/// Owns the GL context and the shapes drawn into it.
///
/// Dropping the renderer deletes every shape's vertex array and vertex
/// buffer; it must be dropped while its GL context is still alive.
pub struct Renderer<G: GlApi> {
    ctx: GpuContext<G>,
    shapes: ShapeList<G>,
    clear_color: Color,
}

impl<G: GlApi> Renderer<G> {
    pub fn new(gl: G, framebuffer: PhysicalSize<u32>, clear_color: Color) -> Self {
        Self {
            ctx: GpuContext::new(gl, framebuffer),
            shapes: ShapeList::new(),
            clear_color,
        }
    }

    /// Uploads `vertices` as a new shape drawn after all existing ones.
    pub fn add_shape(&mut self, vertices: Vec<f32>) -> Result<usize, StartupError> {
        let shape = Shape::upload(&mut self.ctx, vertices)?;
        Ok(self.shapes.push(shape))
    }

    pub fn context(&self) -> &GpuContext<G> {
        &self.ctx
    }

    pub fn shapes(&self) -> &ShapeList<G> {
        &self.shapes
    }

    /// Clears the color buffer and draws each shape once, in order.
    ///
    /// Presenting the frame is the window backend's job.
    pub fn render_frame(&mut self) -> FrameStats {
        self.ctx.clear(self.clear_color);
        let vertices = self.shapes.draw_all(&mut self.ctx);

        FrameStats {
            draw_calls: self.shapes.len(),
            vertices,
        }
    }
}

impl<G: GlApi> Drop for Renderer<G> {
    fn drop(&mut self) {
        if !self.shapes.is_empty() {
            log::info!("releasing {} shapes", self.shapes.len());
        }
        self.shapes.release_all(&mut self.ctx);
    }
}
