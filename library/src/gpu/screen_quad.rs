use wgpu::util::DeviceExt;

// float32x4 positions covering the whole clip space
pub(crate) const QUAD_VERTICES: [[f32; 4]; 4] = [
    [-1.0, -1.0, 0.0, 1.0],
    [ 1.0, -1.0, 0.0, 1.0],
    [ 1.0,  1.0, 0.0, 1.0],
    [-1.0,  1.0, 0.0, 1.0],
];

pub(crate) const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

pub(super) struct ScreenQuad {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
}

impl ScreenQuad {
    #[must_use]
    pub(super) fn new(device: &wgpu::Device) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("screen quad vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("screen quad indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });
        Self { vertices, indices }
    }

    #[must_use]
    pub(super) fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 4]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }

    pub(super) fn record<'a>(&'a self, bundle: &mut wgpu::RenderBundleEncoder<'a>) {
        bundle.set_vertex_buffer(0, self.vertices.slice(..));
        bundle.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        bundle.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_reference_existing_vertices() {
        assert!(QUAD_INDICES.iter().all(|index| (*index as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn test_triangles_cover_clip_space_corners() {
        let corners: Vec<[f32; 2]> = QUAD_INDICES.iter().map(|index| {
            let vertex = QUAD_VERTICES[*index as usize];
            [vertex[0], vertex[1]]
        }).collect();

        for expected in [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]] {
            assert!(corners.contains(&expected), "corner {expected:?} is not covered");
        }
    }

    #[test]
    fn test_vertex_layout() {
        let system_under_test = ScreenQuad::vertex_buffer_layout();

        assert_eq!(system_under_test.array_stride, 16);
        assert_eq!(system_under_test.attributes[0].format, wgpu::VertexFormat::Float32x4);
        assert_eq!(system_under_test.attributes[0].shader_location, 0);
    }
}
