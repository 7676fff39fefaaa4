use crate::device::{GlApi, GpuContext};

use super::Shape;

/// Ordered shapes. Insertion order is draw order.
pub struct ShapeList<G: GlApi> {
    shapes: Vec<Shape<G>>,
}

impl<G: GlApi> ShapeList<G> {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Appends `shape` and returns its draw index.
    pub fn push(&mut self, shape: Shape<G>) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape<G>> {
        self.shapes.get(index)
    }

    /// Draws every shape in insertion order. Returns the vertex total.
    pub fn draw_all(&self, ctx: &mut GpuContext<G>) -> usize {
        self.shapes.iter().fold(0, |total, shape| {
            shape.draw(ctx);
            total + shape.vertex_count()
        })
    }

    /// Releases every shape, leaving the list empty.
    pub fn release_all(&mut self, ctx: &mut GpuContext<G>) {
        for shape in self.shapes.drain(..) {
            shape.release(ctx);
        }
    }
}

impl<G: GlApi> Default for ShapeList<G> {
    fn default() -> Self {
        Self::new()
    }
}
