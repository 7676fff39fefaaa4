//! GL device layer.
//!
//! This module is responsible for:
//! - the `GlApi` seam over the GL entry points the renderer issues
//! - owning GPU handles (vertex arrays, vertex buffers) so each is deleted once
//! - mirroring GL binding state and scoping every bind to a closure
//! - the startup error type shared by the window and render layers

mod context;
mod error;
mod gl;

pub use context::{ArrayBufferScope, BindingState, GpuContext, VertexArray, VertexArrayScope, VertexBuffer};
pub use error::StartupError;
pub use gl::{AttribLayout, GlApi};
