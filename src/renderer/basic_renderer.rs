use std::path::Path;

use crate::asset::Assets;
use crate::error::Result;
use crate::scene::MeshScene;

use super::context::{RenderContext, DEPTH_FORMAT};
use super::frame::FrameBindings;
use super::lights::LightsUniform;
use super::objects::ObjectsBuffer;
use super::pipeline_builder::PipelineBuilder;
use super::shader::BASIC_SHADER;
use super::shadow_renderer::begin_surface_pass;
use super::uniforms::GlobalsUniform;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Single-pass renderer for the mesh viewer: unlit, position-coloured
/// geometry with depth testing.
pub struct BasicRenderer {
    frame: FrameBindings,
    objects: ObjectsBuffer,
    pipeline: wgpu::RenderPipeline,
}

impl BasicRenderer {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        shader_dir: Option<&Path>,
    ) -> Result<Self> {
        let frame = FrameBindings::new(device);
        let objects = ObjectsBuffer::new(device);

        let shader = BASIC_SHADER.compile(device, shader_dir)?;
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("BasicPipelineLayout"),
            bind_group_layouts: &[&frame.bind_layout, &objects.bind_layout],
            push_constant_ranges: &[],
        });
        let pipeline = PipelineBuilder::new(device, &layout, &shader)
            .with_label("BasicPipeline")
            .with_color_target(color_format)
            .with_depth(DEPTH_FORMAT)
            .with_no_culling()
            .build()?;

        Ok(Self {
            frame,
            objects,
            pipeline,
        })
    }

    pub fn render(
        &mut self,
        context: &RenderContext,
        assets: &Assets,
        scene: &MeshScene,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = &scene.camera;
        let globals = GlobalsUniform::new(
            camera.view_matrix(),
            camera.projection(context.aspect_ratio()),
            glam::Mat4::IDENTITY,
            camera.position(),
        );
        self.frame
            .write(&context.queue, &globals, &LightsUniform::default());
        self.objects
            .write(&context.device, &context.queue, &scene.object_data());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("MeshEncoder"),
            });

        {
            let mut pass = begin_surface_pass(
                &mut encoder,
                context,
                &view,
                "MeshPass",
                wgpu::LoadOp::Clear(CLEAR_COLOR),
                wgpu::LoadOp::Clear(1.0),
            );
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame.bind_group, &[]);
            pass.set_bind_group(1, &self.objects.bind_group, &[]);

            for (index, object) in scene.objects.iter().enumerate() {
                match assets.meshes.get(object.mesh) {
                    Some(mesh) => mesh.draw(&mut pass, index as u32),
                    None => log::warn!("Skipping object {index} with invalid mesh handle"),
                }
            }
        }

        context.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
