use crate::error::{check_buffer_size, TracerError};
use crate::gpu::device::DeviceProvider;
use crate::gpu::frame_buffer_size::FrameBufferSize;
use log::info;
use rand::Rng;
use wgpu::BufferUsages;

pub const RNG_SEED_SIZE_BYTES: usize = size_of::<u32>();
pub const ACCUMULATOR_TEXEL_SIZE_BYTES: usize = 4 * size_of::<f32>();

/// Per-pixel buffers owned by the shading unit once created: one `u32`
/// random seed and one RGBA `f32` radiance sum for every pixel. The host
/// only writes them here and never touches their contents again.
pub struct PerPixelStateBuffers<Buffer> {
    rng_state: Buffer,
    accumulator: Buffer,
    frame_buffer_size: FrameBufferSize,
}

impl<Buffer: Clone> PerPixelStateBuffers<Buffer> {
    pub fn create<Device, Random>(device: &mut Device, frame_buffer_size: FrameBufferSize, rng: &mut Random) -> Result<Self, TracerError>
    where
        Device: DeviceProvider<Buffer = Buffer>,
        Random: Rng,
    {
        let pixels_count = frame_buffer_size.pixels_count();

        let seeds = make_rng_seeds(pixels_count, rng);
        check_buffer_size("rng state", seeds.len(), RNG_SEED_SIZE_BYTES, pixels_count)?;

        let accumulation = vec![0_u8; pixels_count * ACCUMULATOR_TEXEL_SIZE_BYTES];
        check_buffer_size("accumulator", accumulation.len(), ACCUMULATOR_TEXEL_SIZE_BYTES, pixels_count)?;

        let rng_state = device.create_buffer("rng state", BufferUsages::STORAGE, &seeds)?;
        let accumulator = device.create_buffer("accumulator", BufferUsages::STORAGE, &accumulation)?;

        info!("per-pixel state created for {} frame: {} + {} bytes", frame_buffer_size, seeds.len(), accumulation.len());

        Ok(Self { rng_state, accumulator, frame_buffer_size })
    }

    #[must_use]
    pub fn rng_state(&self) -> &Buffer {
        &self.rng_state
    }

    #[must_use]
    pub fn accumulator(&self) -> &Buffer {
        &self.accumulator
    }

    #[must_use]
    pub fn frame_buffer_size(&self) -> FrameBufferSize {
        self.frame_buffer_size
    }
}

/// Zero is excluded: a xorshift state stuck at zero never leaves it.
#[must_use]
pub(crate) fn make_rng_seeds<Random: Rng>(count: usize, rng: &mut Random) -> Vec<u8> {
    let mut result = Vec::with_capacity(count * RNG_SEED_SIZE_BYTES);
    for _ in 0..count {
        let seed: u32 = rng.random_range(1..=u32::MAX);
        result.extend_from_slice(&seed.to_le_bytes());
    }
    result
}
