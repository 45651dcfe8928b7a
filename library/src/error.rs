use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TracerError {
    #[error("invalid geometry: {what}")]
    InvalidGeometry {
        what: String,
    },
    #[error("buffer size mismatch for {what}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("device lost: {what}")]
    DeviceLost {
        what: String,
    },
    #[error("failed to allocate resource: {what}")]
    ResourceAllocationFailure {
        what: String,
    },
}

impl TracerError {
    #[must_use]
    pub(crate) fn invalid_geometry(what: impl Into<String>) -> Self {
        TracerError::InvalidGeometry { what: what.into() }
    }

    #[must_use]
    pub(crate) fn device_lost(what: impl Into<String>) -> Self {
        TracerError::DeviceLost { what: what.into() }
    }

    #[must_use]
    pub(crate) fn allocation_failure(what: impl Into<String>) -> Self {
        TracerError::ResourceAllocationFailure { what: what.into() }
    }
}

pub(crate) fn check_buffer_size(what: &'static str, actual: usize, stride: usize, count: usize) -> Result<(), TracerError> {
    let expected = stride * count;
    if actual != expected {
        return Err(TracerError::BufferSizeMismatch { what, expected, actual });
    }
    Ok(())
}
