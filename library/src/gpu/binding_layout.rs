use crate::gpu::device::BindingSlot;
use strum::IntoEnumIterator;
use wgpu::{BindGroupLayoutEntry, BindingType, BufferBindingType, ShaderStages};

#[must_use]
pub(crate) fn describe_binding(slot: BindingSlot) -> BindGroupLayoutEntry {
    let buffer_type = if slot.is_uniform() {
        BufferBindingType::Uniform
    } else {
        BufferBindingType::Storage { read_only: !slot.is_mutated_by_shader() }
    };
    BindGroupLayoutEntry {
        binding: slot.index(),
        visibility: ShaderStages::FRAGMENT,
        ty: BindingType::Buffer {
            ty: buffer_type,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[must_use]
pub(crate) fn describe_bindings() -> Vec<BindGroupLayoutEntry> {
    BindingSlot::iter().map(describe_binding).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[must_use]
    fn buffer_type_of(entry: &BindGroupLayoutEntry) -> BufferBindingType {
        match entry.ty {
            BindingType::Buffer { ty, .. } => ty,
            other => panic!("unexpected binding type {other:?}"),
        }
    }

    #[rstest]
    #[case(BindingSlot::Uniforms, BufferBindingType::Uniform)]
    #[case(BindingSlot::RngState, BufferBindingType::Storage { read_only: false })]
    #[case(BindingSlot::Accumulator, BufferBindingType::Storage { read_only: false })]
    #[case(BindingSlot::Primitives, BufferBindingType::Storage { read_only: true })]
    #[case(BindingSlot::Materials, BufferBindingType::Storage { read_only: true })]
    fn test_binding_types(#[case] slot: BindingSlot, #[case] expected: BufferBindingType) {
        let system_under_test = describe_binding(slot);

        assert_eq!(buffer_type_of(&system_under_test), expected);
        assert_eq!(system_under_test.visibility, ShaderStages::FRAGMENT);
    }

    #[test]
    fn test_bindings_follow_slot_numbering() {
        let system_under_test = describe_bindings();

        let bindings: Vec<u32> = system_under_test.iter().map(|entry| entry.binding).collect();
        assert_eq!(bindings, vec![0, 1, 2, 3, 4]);
    }
}
