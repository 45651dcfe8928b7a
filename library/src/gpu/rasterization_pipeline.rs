use crate::gpu::binding_layout::describe_bindings;
use crate::gpu::screen_quad::ScreenQuad;
use wgpu::{BindGroup, BindGroupLayout, TextureFormat};

pub(crate) const VERTEX_SHADER_CODE: &str = include_str!("../../assets/shaders/vertex.wgsl");
pub(crate) const FRAGMENT_SHADER_CODE: &str = include_str!("../../assets/shaders/fragment.wgsl");

pub(crate) const VERTEX_ENTRY_POINT: &str = "vs_main";
pub(crate) const FRAGMENT_ENTRY_POINT: &str = "fs_main";

const SAMPLE_COUNT: u32 = 1;

/// Full-screen draw whose fragment stage performs the path tracing.
pub(super) struct RasterizationPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: BindGroupLayout,
    presentation_format: TextureFormat,
}

impl RasterizationPipeline {
    const LABEL: &'static str = "path tracing pipeline";

    #[must_use]
    pub(super) fn new(device: &wgpu::Device, presentation_format: TextureFormat) -> Self {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("screen quad vertex shader"),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER_CODE.into()),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("path tracing fragment shader"),
            source: wgpu::ShaderSource::Wgsl(FRAGMENT_SHADER_CODE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("path tracing bind group layout"),
            entries: &describe_bindings(),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("path tracing pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(Self::LABEL),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[ScreenQuad::vertex_buffer_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: presentation_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState { count: SAMPLE_COUNT, ..Default::default() },
            multiview: None,
            cache: None,
        });

        Self { pipeline, bind_group_layout, presentation_format }
    }

    #[must_use]
    pub(super) fn bind_group_layout(&self) -> &BindGroupLayout {
        &self.bind_group_layout
    }

    /// Records the whole draw once; every pass replays the bundle.
    #[must_use]
    pub(super) fn record_bundle(&self, device: &wgpu::Device, bind_group: &BindGroup, screen_quad: &ScreenQuad) -> wgpu::RenderBundle {
        let color_formats = [Some(self.presentation_format)];
        let mut bundle = device.create_render_bundle_encoder(&bundle_encoder_descriptor(&color_formats));
        bundle.set_pipeline(&self.pipeline);
        bundle.set_bind_group(0, bind_group, &[]);
        screen_quad.record(&mut bundle);
        bundle.finish(&wgpu::RenderBundleDescriptor { label: Some("path tracing bundle") })
    }
}

/// Must agree with the pass the bundle is executed in: one color target, no depth.
#[must_use]
fn bundle_encoder_descriptor(color_formats: &[Option<TextureFormat>]) -> wgpu::RenderBundleEncoderDescriptor<'_> {
    wgpu::RenderBundleEncoderDescriptor {
        label: Some("path tracing bundle encoder"),
        color_formats,
        depth_stencil: None,
        sample_count: SAMPLE_COUNT,
        multiview: None,
    }
}
