// src/renderer/pipeline_builder.rs

use crate::error::{DemoError, Result};

/// Fluent wrapper around `RenderPipelineDescriptor` for the demo's passes.
///
/// Defaults: `vs_main`/`fs_main` entry points, the [`super::Vertex`]
/// buffer layout, triangle lists with CCW front faces and back-face culling.
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    label: Option<&'a str>,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    fragment_entry: Option<&'a str>,
    fragment_constants: &'a [(&'a str, f64)],
    color_targets: Vec<Option<wgpu::ColorTargetState>>,
    depth_stencil: Option<wgpu::DepthStencilState>,
    primitive: wgpu::PrimitiveState,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        layout: &'a wgpu::PipelineLayout,
        shader: &'a wgpu::ShaderModule,
    ) -> Self {
        Self {
            device,
            label: None,
            layout,
            shader,
            fragment_entry: Some("fs_main"),
            fragment_constants: &[],
            color_targets: Vec::new(),
            depth_stencil: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// No fragment stage; only depth is written.
    pub fn depth_only(mut self) -> Self {
        self.fragment_entry = None;
        self
    }

    /// Values for the fragment stage's `override` declarations.
    pub fn with_fragment_constants(mut self, constants: &'a [(&'a str, f64)]) -> Self {
        self.fragment_constants = constants;
        self
    }

    pub fn with_color_target(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_targets.push(Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        }));
        self
    }

    /// Depth test `LessEqual` with writes enabled.
    pub fn with_depth(self, format: wgpu::TextureFormat) -> Self {
        self.with_depth_biased(format, 0, 0.0)
    }

    pub fn with_depth_biased(
        mut self,
        format: wgpu::TextureFormat,
        constant_bias: i32,
        slope_bias: f32,
    ) -> Self {
        self.depth_stencil = Some(wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState {
                constant: constant_bias,
                slope_scale: slope_bias,
                clamp: 0.0,
            },
        });
        self
    }

    pub fn with_no_culling(mut self) -> Self {
        self.primitive.cull_mode = None;
        self
    }

    /// Create the pipeline inside a validation error scope. Backend shader
    /// translation runs here, so a program that validated on its own can
    /// still be rejected.
    pub fn build(self) -> Result<wgpu::RenderPipeline> {
        let label = self.label.unwrap_or("RenderPipeline");

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: Some(self.layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some("vs_main"),
                buffers: &[super::Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: self.fragment_entry.map(|entry| wgpu::FragmentState {
                module: self.shader,
                entry_point: Some(entry),
                targets: &self.color_targets,
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: self.fragment_constants,
                    ..Default::default()
                },
            }),
            primitive: self.primitive,
            depth_stencil: self.depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(self.device.pop_error_scope()) {
            log::error!("Pipeline `{}` was rejected:\n{}", label, err);
            return Err(DemoError::Pipeline {
                label: label.to_string(),
                message: err.to_string(),
            });
        }

        Ok(pipeline)
    }
}
