//! Rendering subsystem.
//!
//! Each [`Shape`] owns its vertex array and vertex buffer. A [`Renderer`]
//! owns the GL context and an ordered [`ShapeList`]; dropping it releases
//! every shape's GPU objects.
//!
//! Convention:
//! - positions are clip-space `x, y, z` floats, no index buffer
//! - attribute slot 0 is the only attribute (position)

mod list;
mod renderer;
mod shape;

pub use list::ShapeList;
pub use renderer::{FrameStats, Renderer};
pub use shape::{Shape, FLOATS_PER_VERTEX, POSITION_ATTRIB};
