//#![deny(warnings)]

pub mod error;
pub mod geometry;
pub mod gpu;
pub mod render_loop;
pub mod scene;
pub mod settings;
mod serialization;
mod utils;

/// Log filter that keeps the graphics stack quiet while showing the tracer's own lifecycle.
#[must_use]
pub fn get_reasonable_log_filter() -> &'static str {
    "info,wgpu=warn,naga=warn"
}
