use derive_more::Display;

/// Position of a primitive inside its scene; the shading unit refers to primitives by this value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub struct PrimitiveIndex(pub u32);

impl PrimitiveIndex {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<usize> for PrimitiveIndex {
    fn from(value: usize) -> Self {
        PrimitiveIndex(value as u32)
    }
}
