use crate::error::TracerError;
use crate::gpu::device::{DeviceProvider, ShaderBindings};
use crate::gpu::frame_buffer_size::FrameBufferSize;
use crate::gpu::per_pixel_state::PerPixelStateBuffers;
use crate::gpu::uniforms::FrameUniforms;
use crate::render_loop::clock::{Clock, SystemClock};
use crate::render_loop::progress::{should_continue, Progress, ProgressDisplay};
use crate::render_loop::scheduler::FrameScheduler;
use crate::render_loop::state::LoopState;
use crate::scene::geometry_record::PrimitiveRecord;
use crate::scene::material_record::MaterialRecord;
use crate::scene::scene::SerializedScene;
use crate::serialization::gpu_ready_serialization_buffer::GpuReadySerializationBuffer;
use crate::serialization::serializable_for_gpu::GpuSerializationSize;
use crate::settings::RenderSettings;
use crate::utils::sliding_time_frame::SlidingTimeFrame;
use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use wgpu::BufferUsages;

const STEP_TIME_MEASUREMENT_SAMPLES: usize = 32;

/// Drives progressive accumulation: every step uploads fresh uniforms and
/// submits exactly one pass, until the samples target is reached.
///
/// All GPU resources are created once in the constructor; rendering a new
/// scene means building a new loop.
pub struct ProgressiveRenderLoop<Device: DeviceProvider> {
    device: Device,
    bindings: Device::Bindings,

    uniforms: FrameUniforms,
    uniforms_buffer: Device::Buffer,
    per_pixel_state: PerPixelStateBuffers<Device::Buffer>,

    samples_target: u32,
    step_deadline: Option<Duration>,
    sample_index: u32,
    state: LoopState,

    clock: Box<dyn Clock>,
    step_times: SlidingTimeFrame,
}

impl<Device: DeviceProvider> ProgressiveRenderLoop<Device> {
    pub fn new(device: Device, scene: &SerializedScene, settings: &RenderSettings) -> Result<Self, TracerError> {
        Self::with_clock(device, scene, settings, Box::new(SystemClock::start()))
    }

    pub fn with_clock(mut device: Device, scene: &SerializedScene, settings: &RenderSettings, clock: Box<dyn Clock>) -> Result<Self, TracerError> {
        let frame_buffer_size = settings.frame_size();

        let mut rng = match settings.rng_seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let per_pixel_state = PerPixelStateBuffers::create(&mut device, frame_buffer_size, &mut rng)?;

        let (primitives, materials) = upload_scene(&mut device, scene)?;

        let uniforms = FrameUniforms::new(frame_buffer_size, scene.primitive_count());
        let uniforms_buffer = device.create_buffer("frame uniforms", BufferUsages::UNIFORM, uniforms.serialize().backend())?;

        let bindings = device.bind(ShaderBindings {
            uniforms: uniforms_buffer.clone(),
            rng_state: per_pixel_state.rng_state().clone(),
            accumulator: per_pixel_state.accumulator().clone(),
            primitives,
            materials,
        })?;

        info!(
            "render loop ready: {} primitives, {} frame, {} samples target",
            scene.primitive_count(), frame_buffer_size, settings.samples_target(),
        );

        Ok(Self {
            device,
            bindings,
            uniforms,
            uniforms_buffer,
            per_pixel_state,
            samples_target: settings.samples_target(),
            step_deadline: settings.step_deadline(),
            sample_index: 0,
            state: LoopState::Idle,
            clock,
            step_times: SlidingTimeFrame::new(STEP_TIME_MEASUREMENT_SAMPLES),
        })
    }

    /// Asks for the first step; does nothing once the loop has left `Idle`.
    pub fn start(&self, scheduler: &dyn FrameScheduler) {
        if LoopState::Idle == self.state {
            scheduler.request_next_step();
        }
    }

    /// Accumulates one more sample. A finished loop ignores the call and
    /// touches no buffer. A failed step halts the loop for good.
    pub fn step(&mut self, scheduler: &dyn FrameScheduler, display: &mut dyn ProgressDisplay) -> Result<LoopState, TracerError> {
        if self.state.is_finished() {
            return Ok(self.state);
        }

        if let Err(failure) = self.accumulate_one_sample() {
            error!("render loop halted after {} samples: {}", self.sample_index, failure);
            self.state = LoopState::Halted;
            return Err(failure);
        }

        display.show(self.progress());

        if should_continue(self.sample_index, self.samples_target) {
            self.state = LoopState::Accumulating;
            scheduler.request_next_step();
        } else {
            self.state = LoopState::Converged;
            info!("converged after {} samples; recent step time {:?}", self.sample_index, self.average_step_time());
        }

        Ok(self.state)
    }

    /// Presents the converged image again with a display-only pass: no paths
    /// are traced and the per-pixel state stays as it is. Other states ignore
    /// the call. A failure halts the loop.
    pub fn redisplay(&mut self) -> Result<(), TracerError> {
        if LoopState::Converged != self.state {
            return Ok(());
        }
        if let Err(failure) = self.submit_display_pass() {
            error!("render loop halted while presenting the converged image: {}", failure);
            self.state = LoopState::Halted;
            return Err(failure);
        }
        Ok(())
    }

    fn submit_display_pass(&mut self) -> Result<(), TracerError> {
        self.uniforms.set_display_only(true);
        self.uniforms.set_elapsed(self.clock.elapsed());
        self.device.write_buffer(&self.uniforms_buffer, 0, self.uniforms.serialize().backend())?;
        self.device.submit_pass(&self.bindings)?;
        trace!("redisplayed the image of {} samples", self.sample_index);
        Ok(())
    }

    fn accumulate_one_sample(&mut self) -> Result<(), TracerError> {
        let step_start = self.clock.elapsed();
        let sample_index = self.sample_index + 1;

        self.uniforms.set_sample_index(sample_index);
        self.uniforms.set_elapsed(step_start);
        self.device.write_buffer(&self.uniforms_buffer, 0, self.uniforms.serialize().backend())?;
        self.device.submit_pass(&self.bindings)?;
        self.sample_index = sample_index;

        let step_duration = self.clock.elapsed().saturating_sub(step_start);
        self.step_times.add_delta(step_duration);
        trace!("sample {} took {:?}", sample_index, step_duration);

        match self.step_deadline {
            Some(deadline) if step_duration > deadline => {
                Err(TracerError::device_lost(format!("step {sample_index} took {step_duration:?}, deadline is {deadline:?}")))
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    #[must_use]
    pub fn samples_target(&self) -> u32 {
        self.samples_target
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress::new(self.sample_index, self.samples_target)
    }

    #[must_use]
    pub fn frame_buffer_size(&self) -> FrameBufferSize {
        self.per_pixel_state.frame_buffer_size()
    }

    #[must_use]
    pub fn average_step_time(&self) -> Duration {
        self.step_times.average_delta()
    }

    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    #[must_use]
    pub fn per_pixel_state(&self) -> &PerPixelStateBuffers<Device::Buffer> {
        &self.per_pixel_state
    }
}

/// An empty scene still needs non-empty storage bindings, so it gets one
/// zeroed record that the shading unit never reads (the primitive count is 0).
fn upload_scene<Device: DeviceProvider>(device: &mut Device, scene: &SerializedScene) -> Result<(Device::Buffer, Device::Buffer), TracerError> {
    if scene.is_empty() {
        debug!("empty scene: binding placeholder records");
        let primitives = GpuReadySerializationBuffer::make_filled(1, PrimitiveRecord::SERIALIZED_QUARTET_COUNT, 0.0);
        let materials = GpuReadySerializationBuffer::make_filled(1, MaterialRecord::SERIALIZED_QUARTET_COUNT, 0.0);
        let primitives = device.create_buffer("primitives", BufferUsages::STORAGE, primitives.backend())?;
        let materials = device.create_buffer("materials", BufferUsages::STORAGE, materials.backend())?;
        return Ok((primitives, materials));
    }
    let primitives = device.create_buffer("primitives", BufferUsages::STORAGE, scene.primitives())?;
    let materials = device.create_buffer("materials", BufferUsages::STORAGE, scene.materials())?;
    Ok((primitives, materials))
}
