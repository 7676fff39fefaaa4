//! Window + frame loop.
//!
//! `WindowBackend` is the seam between the loop and the platform;
//! `GlutinBackend` implements it with winit + glutin.

mod backend;
mod glutin_backend;
mod runtime;

pub use backend::{WindowBackend, WindowConfig};
pub use glutin_backend::GlutinBackend;
pub use runtime::{LoopState, RunSummary, Runtime, RuntimeConfig};
