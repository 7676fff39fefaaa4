use crate::device::{AttribLayout, GlApi, GpuContext, StartupError, VertexArray, VertexBuffer};

/// Floats per vertex (`x, y, z`).
pub const FLOATS_PER_VERTEX: usize = 3;

/// Attribute slot the position is bound to.
pub const POSITION_ATTRIB: u32 = 0;

/// A vertex list uploaded once into its own vertex buffer, with its own
/// vertex array describing it.
///
/// The GPU objects live until [`Shape::release`], which consumes the shape.
pub struct Shape<G: GlApi> {
    vertices: Vec<f32>,
    vertex_array: VertexArray<G>,
    vertex_buffer: VertexBuffer<G>,
}

impl<G: GlApi> Shape<G> {
    /// Uploads `vertices` as static draw data and describes attribute 0 as
    /// packed `vec3` positions.
    ///
    /// Bindings are back to none when this returns. If the buffer cannot be
    /// allocated, the vertex array created before it is deleted again.
    pub fn upload(ctx: &mut GpuContext<G>, vertices: Vec<f32>) -> Result<Self, StartupError> {
        if vertices.len() % FLOATS_PER_VERTEX != 0 {
            // Triangle assembly of the trailing floats is undefined; drawn anyway.
            log::warn!(
                "shape has {} floats, not a multiple of {FLOATS_PER_VERTEX}",
                vertices.len()
            );
        }

        let vertex_array = ctx.create_vertex_array()?;
        let vertex_buffer = match ctx.create_vertex_buffer() {
            Ok(buffer) => buffer,
            Err(err) => {
                ctx.delete_vertex_array(vertex_array);
                return Err(err);
            }
        };

        ctx.with_vertex_array(&vertex_array, |va| {
            va.with_array_buffer(&vertex_buffer, |buffer| {
                buffer.upload_static(&vertices);
                buffer.describe_attrib(POSITION_ATTRIB, AttribLayout::POSITION_3F);
            });
        });

        log::debug!(
            "uploaded shape: {} vertices, {} bytes ({:?}, {:?})",
            vertices.len() / FLOATS_PER_VERTEX,
            std::mem::size_of_val(vertices.as_slice()),
            vertex_array,
            vertex_buffer,
        );

        Ok(Self {
            vertices,
            vertex_array,
            vertex_buffer,
        })
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Number of vertices the draw call covers.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn vertex_array(&self) -> &VertexArray<G> {
        &self.vertex_array
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer<G> {
        &self.vertex_buffer
    }

    /// Binds this shape's vertex array, draws it as a triangle list, unbinds.
    pub fn draw(&self, ctx: &mut GpuContext<G>) {
        let count = self.vertex_count();
        ctx.with_vertex_array(&self.vertex_array, |va| va.draw_triangles(0, count));
    }

    /// Deletes the vertex array and vertex buffer.
    pub fn release(self, ctx: &mut GpuContext<G>) {
        ctx.delete_vertex_array(self.vertex_array);
        ctx.delete_vertex_buffer(self.vertex_buffer);
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalSize;

    use super::*;
    use crate::testing::{Call, RecordingGl, Trace};

    const TRIANGLE: [f32; 9] = [-1.0, -0.5, 0.0, 0.0, -0.5, 0.0, -0.5, 0.5, 0.0];

    fn context(trace: &Trace) -> GpuContext<RecordingGl> {
        GpuContext::new(RecordingGl::new(trace.clone()), PhysicalSize::new(800, 800))
    }

    #[test]
    fn upload_issues_fixed_sequence_and_unbinds() {
        let trace = Trace::default();
        let mut ctx = context(&trace);

        let shape = Shape::upload(&mut ctx, TRIANGLE.to_vec()).unwrap();
        let (va, vb) = (shape.vertex_array().raw(), shape.vertex_buffer().raw());

        assert_eq!(
            trace.calls_since_setup(),
            vec![
                Call::CreateVertexArray(va),
                Call::CreateBuffer(vb),
                Call::BindVertexArray(Some(va)),
                Call::BindArrayBuffer(Some(vb)),
                Call::BufferDataStatic(bytemuck::cast_slice(&TRIANGLE).to_vec()),
                Call::EnableVertexAttrib(0),
                Call::VertexAttrib(0, AttribLayout::POSITION_3F),
                Call::BindArrayBuffer(None),
                Call::BindVertexArray(None),
            ]
        );
        assert!(ctx.bindings().is_clear());

        shape.release(&mut ctx);
    }

    #[test]
    fn upload_size_is_element_count_times_float_size() {
        let trace = Trace::default();
        let mut ctx = context(&trace);
        let shape = Shape::upload(&mut ctx, TRIANGLE.to_vec()).unwrap();

        let uploaded = trace.calls().into_iter().find_map(|c| match c {
            Call::BufferDataStatic(bytes) => Some(bytes.len()),
            _ => None,
        });
        assert_eq!(uploaded, Some(TRIANGLE.len() * 4));
        assert_eq!(shape.vertex_count(), 3);
        assert_eq!(shape.vertices(), &TRIANGLE);

        shape.release(&mut ctx);
    }

    #[test]
    fn draw_is_bracketed_by_bind_and_unbind() {
        let trace = Trace::default();
        let mut ctx = context(&trace);
        let shape = Shape::upload(&mut ctx, TRIANGLE.to_vec()).unwrap();
        let va = shape.vertex_array().raw();
        let before = trace.calls().len();

        shape.draw(&mut ctx);

        assert_eq!(
            &trace.calls()[before..],
            &[
                Call::BindVertexArray(Some(va)),
                Call::DrawTriangles { first: 0, count: 3 },
                Call::BindVertexArray(None),
            ]
        );
        shape.release(&mut ctx);
    }

    #[test]
    fn release_deletes_both_handles_once() {
        let trace = Trace::default();
        let mut ctx = context(&trace);
        let shape = Shape::upload(&mut ctx, TRIANGLE.to_vec()).unwrap();
        let (va, vb) = (shape.vertex_array().raw(), shape.vertex_buffer().raw());

        shape.release(&mut ctx);

        assert_eq!(trace.count(|c| *c == Call::DeleteVertexArray(va)), 1);
        assert_eq!(trace.count(|c| *c == Call::DeleteBuffer(vb)), 1);
    }

    #[test]
    fn failed_buffer_allocation_leaks_nothing() {
        let trace = Trace::default();
        let mut ctx = GpuContext::new(
            RecordingGl::new(trace.clone()).failing_buffers(),
            PhysicalSize::new(800, 800),
        );

        let err = Shape::upload(&mut ctx, TRIANGLE.to_vec()).err();
        assert!(matches!(err, Some(StartupError::Allocation { .. })));

        let created = trace.calls().into_iter().find_map(|c| match c {
            Call::CreateVertexArray(id) => Some(id),
            _ => None,
        });
        let va = created.expect("vertex array was created first");
        assert_eq!(trace.count(|c| *c == Call::DeleteVertexArray(va)), 1);
        assert_eq!(trace.count(|c| matches!(c, Call::BindVertexArray(_))), 0);
    }

    #[test]
    fn ragged_vertex_list_is_still_uploaded() {
        let trace = Trace::default();
        let mut ctx = context(&trace);
        let shape = Shape::upload(&mut ctx, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(shape.vertex_count(), 1);
        shape.release(&mut ctx);
    }
}
