use std::process::ExitCode;

use glshapes_engine::logging::{init_logging, LoggingConfig};
use glshapes_engine::window::{GlutinBackend, Runtime, RuntimeConfig};

/// One triangle in the left half of clip space.
#[rustfmt::skip]
const TRIANGLE: [f32; 9] = [
    -1.0, -0.5, 0.0,
    0.0, -0.5, 0.0,
    -0.5, 0.5, 0.0,
];

/// A square in the right half, as two triangles with repeated vertices.
#[rustfmt::skip]
const QUAD: [f32; 18] = [
    // first triangle
    0.0, -0.5, 0.0,
    1.0, -0.5, 0.0,
    0.0, 0.5, 0.0,
    // second triangle
    0.0, 0.5, 0.0,
    1.0, -0.5, 0.0,
    1.0, 0.5, 0.0,
];

/// Draw order.
const SHAPES: [&[f32]; 2] = [&TRIANGLE, &QUAD];

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default();
    log::debug!("starting with {config:?}");

    let mut backend = GlutinBackend::new();
    Runtime::run_to_exit(&mut backend, &config, &SHAPES)
}
