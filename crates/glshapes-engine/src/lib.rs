//! glshapes engine crate.
//!
//! Owns the window + GL context bootstrap, the GPU handles behind each shape,
//! and the blocking frame loop that draws them.

pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
