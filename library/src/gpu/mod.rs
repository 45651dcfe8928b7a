pub mod device;
pub mod frame_buffer_size;
pub mod per_pixel_state;
pub mod uniforms;
pub mod wgpu_device;
mod adapter_features;
mod binding_layout;
mod rasterization_pipeline;
mod screen_quad;
