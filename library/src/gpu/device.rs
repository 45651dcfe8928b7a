use crate::error::TracerError;
use derive_more::Display;
use num_enum::IntoPrimitive;
use strum_macros::{EnumCount, EnumIter};
use wgpu::BufferUsages;

/// Binding index of each resource consumed by the shading unit.
/// The numbering is part of the shader interface.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display, IntoPrimitive, EnumCount, EnumIter)]
pub enum BindingSlot {
    Uniforms = 0,
    RngState = 1,
    Accumulator = 2,
    Primitives = 3,
    Materials = 4,
}

impl BindingSlot {
    #[must_use]
    pub fn index(self) -> u32 {
        self.into()
    }

    #[must_use]
    pub fn is_uniform(self) -> bool {
        BindingSlot::Uniforms == self
    }

    /// Whether the shading unit writes into the bound buffer.
    #[must_use]
    pub fn is_mutated_by_shader(self) -> bool {
        matches!(self, BindingSlot::RngState | BindingSlot::Accumulator)
    }
}

/// The five buffers bound together for every pass.
#[derive(Clone, Debug)]
pub struct ShaderBindings<Buffer> {
    pub uniforms: Buffer,
    pub rng_state: Buffer,
    pub accumulator: Buffer,
    pub primitives: Buffer,
    pub materials: Buffer,
}

impl<Buffer> ShaderBindings<Buffer> {
    #[must_use]
    pub fn in_slot_order(&self) -> [(BindingSlot, &Buffer); 5] {
        [
            (BindingSlot::Uniforms, &self.uniforms),
            (BindingSlot::RngState, &self.rng_state),
            (BindingSlot::Accumulator, &self.accumulator),
            (BindingSlot::Primitives, &self.primitives),
            (BindingSlot::Materials, &self.materials),
        ]
    }
}

/// Everything the render loop needs from a GPU: buffer allocation and
/// upload, one-time binding of the shader resources and ordered
/// submission of full-screen passes.
pub trait DeviceProvider {
    type Buffer: Clone;
    type Bindings;

    fn allocate_buffer(&mut self, label: &str, size_bytes: u64, usage: BufferUsages) -> Result<Self::Buffer, TracerError>;

    fn write_buffer(&mut self, buffer: &Self::Buffer, offset_bytes: u64, bytes: &[u8]) -> Result<(), TracerError>;

    fn bind(&mut self, bindings: ShaderBindings<Self::Buffer>) -> Result<Self::Bindings, TracerError>;

    fn submit_pass(&mut self, bindings: &Self::Bindings) -> Result<(), TracerError>;

    fn create_buffer(&mut self, label: &str, usage: BufferUsages, contents: &[u8]) -> Result<Self::Buffer, TracerError> {
        let buffer = self.allocate_buffer(label, contents.len() as u64, usage | BufferUsages::COPY_DST)?;
        self.write_buffer(&buffer, 0, contents)?;
        Ok(buffer)
    }
}
