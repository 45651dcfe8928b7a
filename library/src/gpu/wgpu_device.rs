use crate::error::TracerError;
use crate::gpu::adapter_features::{check_adapter_capabilities, log_adapter_info};
use crate::gpu::device::{DeviceProvider, ShaderBindings};
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::rasterization_pipeline::RasterizationPipeline;
use crate::gpu::screen_quad::ScreenQuad;
use log::{debug, info, warn};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wgpu::wgt::PollType;
use wgpu::{BufferUsages, ErrorFilter, Trace};
use winit::window::Window;

const DEVICE_LABEL: &str = "Progressive Path Tracer";

/// The pre-recorded full-screen draw with all five buffers bound.
pub struct WgpuBindings {
    bundle: wgpu::RenderBundle,
}

/// [`DeviceProvider`] over a window surface: every pass draws the full-screen
/// quad into the next swapchain image and presents it.
pub struct WgpuDevice {
    /*The loop is single-threaded, but the device-lost callback
    must be Send, hence the atomic.*/
    device_was_lost: Arc<AtomicBool>,

    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,

    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    pipeline: RasterizationPipeline,
    screen_quad: ScreenQuad,
}

impl WgpuDevice {
    pub async fn new(window: Arc<Window>, frame_size: FrameBufferSize) -> Result<Self, TracerError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags: wgpu::InstanceFlags::empty(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())
            .map_err(|e| TracerError::allocation_failure(format!("window surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(|e| TracerError::allocation_failure(format!("graphics adapter: {e}")))?;

        log_adapter_info(&adapter);
        check_adapter_capabilities(&adapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(DEVICE_LABEL),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: Trace::Off,
            })
            .await
            .map_err(|e| TracerError::allocation_failure(format!("graphics device: {e}")))?;

        let device_was_lost = Arc::new(AtomicBool::new(false));
        let lost_device_handler = {
            let device_was_lost = Arc::clone(&device_was_lost);
            move |reason, message| {
                warn!("device was lost: {:?}, {}", reason, message);
                device_was_lost.store(true, Ordering::SeqCst);
            }
        };
        device.set_device_lost_callback(lost_device_handler);

        let surface_capabilities = surface.get_capabilities(&adapter);
        let surface_format = surface_capabilities.formats.iter().copied()
            .find(|format| !format.is_srgb())
            .or(surface_capabilities.formats.first().copied())
            .ok_or_else(|| TracerError::allocation_failure("surface is incompatible with the adapter"))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            view_formats: vec![surface_format],
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            width: frame_size.width(),
            height: frame_size.height(),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &surface_config);
        info!("surface configured: {} in {:?}", frame_size, surface_format);

        let pipeline = RasterizationPipeline::new(&device, surface_format);
        let screen_quad = ScreenQuad::new(&device);

        Ok(Self { device_was_lost, window, device, queue, surface, surface_config, pipeline, screen_quad })
    }

    fn check_device_alive(&self) -> Result<(), TracerError> {
        if self.device_was_lost.load(Ordering::SeqCst) {
            return Err(TracerError::device_lost("device lost callback fired"));
        }
        Ok(())
    }

    fn acquire_surface_texture(&self) -> Result<wgpu::SurfaceTexture, TracerError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost | wgpu::SurfaceError::Timeout) => {
                warn!("swapchain image unavailable, reconfiguring the surface");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture()
                    .map_err(|e| TracerError::device_lost(format!("surface unavailable after reconfiguration: {e}")))
            }
            Err(e) => Err(TracerError::device_lost(format!("surface unavailable: {e}"))),
        }
    }
}

/// Rejects sizes the device cannot serve before asking the driver.
pub(crate) fn check_allocation_limits(label: &str, size_bytes: u64, usage: BufferUsages, limits: &wgpu::Limits) -> Result<(), TracerError> {
    if 0 == size_bytes {
        return Err(TracerError::allocation_failure(format!("'{label}' requested with zero size")));
    }
    if size_bytes > limits.max_buffer_size {
        return Err(TracerError::allocation_failure(format!(
            "'{label}' needs {size_bytes} bytes, device allows {}", limits.max_buffer_size)));
    }
    if usage.contains(BufferUsages::STORAGE) && size_bytes > u64::from(limits.max_storage_buffer_binding_size) {
        return Err(TracerError::allocation_failure(format!(
            "'{label}' needs {size_bytes} bytes, storage bindings are limited to {}", limits.max_storage_buffer_binding_size)));
    }
    if usage.contains(BufferUsages::UNIFORM) && size_bytes > u64::from(limits.max_uniform_buffer_binding_size) {
        return Err(TracerError::allocation_failure(format!(
            "'{label}' needs {size_bytes} bytes, uniform bindings are limited to {}", limits.max_uniform_buffer_binding_size)));
    }
    Ok(())
}

impl DeviceProvider for WgpuDevice {
    type Buffer = Rc<wgpu::Buffer>;
    type Bindings = WgpuBindings;

    fn allocate_buffer(&mut self, label: &str, size_bytes: u64, usage: BufferUsages) -> Result<Self::Buffer, TracerError> {
        self.check_device_alive()?;
        check_allocation_limits(label, size_bytes, usage, &self.device.limits())?;

        self.device.push_error_scope(ErrorFilter::OutOfMemory);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size_bytes,
            usage,
            mapped_at_creation: false,
        });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(TracerError::allocation_failure(format!("'{label}': {error}")));
        }

        debug!("allocated '{}' of {} bytes", label, size_bytes);
        Ok(Rc::new(buffer))
    }

    fn write_buffer(&mut self, buffer: &Self::Buffer, offset_bytes: u64, bytes: &[u8]) -> Result<(), TracerError> {
        self.check_device_alive()?;
        self.queue.write_buffer(buffer, offset_bytes, bytes);
        Ok(())
    }

    fn bind(&mut self, bindings: ShaderBindings<Self::Buffer>) -> Result<Self::Bindings, TracerError> {
        let entries: Vec<wgpu::BindGroupEntry> = bindings.in_slot_order().into_iter()
            .map(|(slot, buffer)| wgpu::BindGroupEntry {
                binding: slot.index(),
                resource: buffer.as_entire_binding(),
            })
            .collect();

        self.device.push_error_scope(ErrorFilter::Validation);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("path tracing bind group"),
            layout: self.pipeline.bind_group_layout(),
            entries: &entries,
        });
        let bundle = self.pipeline.record_bundle(&self.device, &bind_group, &self.screen_quad);
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(TracerError::allocation_failure(format!("bind group: {error}")));
        }

        debug!("path tracing draw recorded into a render bundle");
        Ok(WgpuBindings { bundle })
    }

    fn submit_pass(&mut self, bindings: &Self::Bindings) -> Result<(), TracerError> {
        self.check_device_alive()?;

        let surface_texture = self.acquire_surface_texture()?;
        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.device.push_error_scope(ErrorFilter::Validation);
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("path tracing pass encoder") }); {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("path tracing pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.execute_bundles(std::iter::once(&bindings.bundle));
        }
        self.queue.submit(Some(encoder.finish()));
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(TracerError::device_lost(format!("pass rejected: {error}")));
        }

        self.window.pre_present_notify();
        surface_texture.present();

        self.device.poll(PollType::Wait).map_err(|e| TracerError::device_lost(format!("failed to poll the device: {e}")))?;
        self.check_device_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, BufferUsages::STORAGE)]
    #[case(u64::MAX, BufferUsages::COPY_DST)]
    #[case(u64::from(wgpu::Limits::default().max_storage_buffer_binding_size) + 1, BufferUsages::STORAGE)]
    #[case(u64::from(wgpu::Limits::default().max_uniform_buffer_binding_size) + 1, BufferUsages::UNIFORM)]
    fn test_allocation_limits_reject(#[case] size_bytes: u64, #[case] usage: BufferUsages) {
        let actual = check_allocation_limits("test", size_bytes, usage, &wgpu::Limits::default());

        assert!(matches!(actual, Err(TracerError::ResourceAllocationFailure { .. })));
    }

    #[rstest]
    #[case(32, BufferUsages::UNIFORM)]
    #[case(1280 * 720 * 16, BufferUsages::STORAGE)]
    #[case(1280 * 720 * 4, BufferUsages::STORAGE | BufferUsages::COPY_DST)]
    fn test_allocation_limits_accept(#[case] size_bytes: u64, #[case] usage: BufferUsages) {
        assert_eq!(check_allocation_limits("test", size_bytes, usage, &wgpu::Limits::default()), Ok(()));
    }
}
