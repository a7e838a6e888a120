use std::mem;
use std::num::NonZeroU64;
use std::path::Path;

use wgpu::util::DeviceExt;

use crate::asset::Assets;
use crate::error::Result;
use crate::scene::ShadowScene;

use super::context::{RenderContext, DEPTH_FORMAT};
use super::frame::{FrameBindings, FramePass, FRAME_PASSES};
use super::lights::{DirectionalLight, LightsUniform};
use super::mesh::Mesh;
use super::objects::ObjectsBuffer;
use super::pipeline_builder::PipelineBuilder;
use super::shader::{DEPTH_DEBUG_SHADER, LIT_SHADER, SHADOW_SHADER};
use super::shadow_map::{fit_shadow_map_size, ShadowMap, ShadowMapLayouts, SHADOW_FORMAT};
use super::texture::Texture;
use super::uniforms::{GlobalsUniform, ShadowViewUniform};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Shadow map depth bias, in depth-buffer units and slope scale.
const SHADOW_DEPTH_BIAS: (i32, f32) = (2, 2.0);

/// A scene object with its handles resolved for this frame.
struct Draw<'a> {
    object_index: u32,
    mesh: &'a Mesh,
    texture: &'a Texture,
}

/// Three-pass renderer: light depth, lit scene, shadow map preview.
pub struct ShadowRenderer {
    frame: FrameBindings,
    objects: ObjectsBuffer,
    texture_layout: wgpu::BindGroupLayout,
    shadow_map: ShadowMap,
    shadow_view_buffer: wgpu::Buffer,
    shadow_view_bind_group: wgpu::BindGroup,
    shadow_pipeline: wgpu::RenderPipeline,
    lit_pipeline: wgpu::RenderPipeline,
    depth_debug_pipeline: wgpu::RenderPipeline,
}

impl ShadowRenderer {
    /// Build every pipeline and allocate the shadow map sized for `light`,
    /// shrunk to what the device supports. `color_format` is the format of
    /// the surface the lit and preview passes draw into.
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        light: &DirectionalLight,
        shader_dir: Option<&Path>,
    ) -> Result<Self> {
        let frame = FrameBindings::new(device);
        let objects = ObjectsBuffer::new(device);
        let texture_layout = Texture::bind_group_layout(device);
        let shadow_layouts = ShadowMapLayouts::new(device);
        let map_size = fit_shadow_map_size(light.shadow_map_size(), &device.limits());
        let shadow_map = ShadowMap::new(device, &shadow_layouts, map_size);

        let shadow_view_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ShadowViewLayout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(mem::size_of::<ShadowViewUniform>() as u64),
                },
                count: None,
            }],
        });

        let shadow_view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ShadowViewBuffer"),
            contents: bytemuck::bytes_of(&ShadowViewUniform::new(light.light_transform())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shadow_view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ShadowViewBindGroup"),
            layout: &shadow_view_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shadow_view_buffer.as_entire_binding(),
            }],
        });

        let shadow_shader = SHADOW_SHADER.compile(device, shader_dir)?;
        let shadow_layout_pipeline =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("ShadowPipelineLayout"),
                bind_group_layouts: &[&shadow_view_layout, &objects.bind_layout],
                push_constant_ranges: &[],
            });
        let (constant_bias, slope_bias) = SHADOW_DEPTH_BIAS;
        let shadow_pipeline = PipelineBuilder::new(device, &shadow_layout_pipeline, &shadow_shader)
            .with_label("ShadowPipeline")
            .depth_only()
            .with_depth_biased(SHADOW_FORMAT, constant_bias, slope_bias)
            .build()?;

        let lit_shader = LIT_SHADER.compile(device, shader_dir)?;
        let lit_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("LitPipelineLayout"),
            bind_group_layouts: &[
                &frame.bind_layout,
                &objects.bind_layout,
                &texture_layout,
                &shadow_layouts.compare,
            ],
            push_constant_ranges: &[],
        });
        let lit_pipeline = PipelineBuilder::new(device, &lit_layout, &lit_shader)
            .with_label("LitPipeline")
            .with_color_target(color_format)
            .with_depth(DEPTH_FORMAT)
            .build()?;

        let debug_shader = DEPTH_DEBUG_SHADER.compile(device, shader_dir)?;
        let debug_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("DepthDebugPipelineLayout"),
            bind_group_layouts: &[
                &frame.bind_layout,
                &objects.bind_layout,
                &shadow_layouts.preview,
            ],
            push_constant_ranges: &[],
        });
        let debug_constants = [(
            "SURFACE_IS_SRGB",
            if color_format.is_srgb() { 1.0 } else { 0.0 },
        )];
        let depth_debug_pipeline = PipelineBuilder::new(device, &debug_layout, &debug_shader)
            .with_label("DepthDebugPipeline")
            .with_color_target(color_format)
            .with_depth(DEPTH_FORMAT)
            .with_fragment_constants(&debug_constants)
            .with_no_culling()
            .build()?;

        Ok(Self {
            frame,
            objects,
            texture_layout,
            shadow_map,
            shadow_view_buffer,
            shadow_view_bind_group,
            shadow_pipeline,
            lit_pipeline,
            depth_debug_pipeline,
        })
    }

    /// Layout textures must be created with to be drawn by the lit pass.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Edge length in texels of the allocated shadow map.
    pub fn shadow_map_size(&self) -> u32 {
        self.shadow_map.size()
    }

    /// Encode and present one frame: shadow, lit and depth-debug passes in
    /// [`FRAME_PASSES`] order.
    pub fn render(
        &mut self,
        context: &RenderContext,
        assets: &Assets,
        scene: &ShadowScene,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.upload(context, scene);
        let draws = resolve_draws(assets, scene);

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("FrameEncoder"),
            });

        for pass in FRAME_PASSES {
            match pass {
                FramePass::Shadow => self.directional_shadow_map_pass(&mut encoder, &draws),
                FramePass::Lit => self.lit_pass(&mut encoder, context, &view, &draws),
                FramePass::DepthDebug => {
                    self.depth_map_pass(&mut encoder, context, &view, assets, scene)
                }
            }
        }

        context.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn upload(&mut self, context: &RenderContext, scene: &ShadowScene) {
        let light_transform = scene.main_light.light_transform();
        let camera = &scene.camera;

        self.objects
            .write(&context.device, &context.queue, &scene.object_data());

        context.queue.write_buffer(
            &self.shadow_view_buffer,
            0,
            bytemuck::bytes_of(&ShadowViewUniform::new(light_transform)),
        );

        let globals = GlobalsUniform::new(
            camera.view_matrix(),
            camera.projection(context.aspect_ratio()),
            light_transform,
            camera.position(),
        );
        let lights =
            LightsUniform::from_lights(&scene.main_light, &scene.point_lights, &scene.spot_lights);
        self.frame.write(&context.queue, &globals, &lights);
    }

    /// Scene depth from the light into the shadow map. The pass owns the
    /// shadow target only until it is dropped.
    fn directional_shadow_map_pass(&self, encoder: &mut wgpu::CommandEncoder, draws: &[Draw<'_>]) {
        let mut pass = self.shadow_map.write(encoder);
        pass.set_pipeline(&self.shadow_pipeline);
        pass.set_bind_group(0, &self.shadow_view_bind_group, &[]);
        pass.set_bind_group(1, &self.objects.bind_group, &[]);

        for draw in draws {
            draw.mesh.draw(&mut pass, draw.object_index);
        }
    }

    fn lit_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        context: &RenderContext,
        view: &wgpu::TextureView,
        draws: &[Draw<'_>],
    ) {
        let mut pass = begin_surface_pass(
            encoder,
            context,
            view,
            FramePass::Lit.label(),
            wgpu::LoadOp::Clear(CLEAR_COLOR),
            wgpu::LoadOp::Clear(1.0),
        );
        pass.set_pipeline(&self.lit_pipeline);
        pass.set_bind_group(0, &self.frame.bind_group, &[]);
        pass.set_bind_group(1, &self.objects.bind_group, &[]);
        pass.set_bind_group(3, self.shadow_map.read(), &[]);

        for draw in draws {
            pass.set_bind_group(2, &draw.texture.bind_group, &[]);
            draw.mesh.draw(&mut pass, draw.object_index);
        }
    }

    fn depth_map_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        context: &RenderContext,
        view: &wgpu::TextureView,
        assets: &Assets,
        scene: &ShadowScene,
    ) {
        let (Some(quad), Some(index)) = (scene.depth_debug, scene.depth_debug_index()) else {
            return;
        };
        let Some(mesh) = assets.meshes.get(quad.mesh) else {
            log::warn!("Depth debug quad has an invalid mesh handle");
            return;
        };

        let mut pass = begin_surface_pass(
            encoder,
            context,
            view,
            FramePass::DepthDebug.label(),
            wgpu::LoadOp::Load,
            wgpu::LoadOp::Load,
        );
        pass.set_pipeline(&self.depth_debug_pipeline);
        pass.set_bind_group(0, &self.frame.bind_group, &[]);
        pass.set_bind_group(1, &self.objects.bind_group, &[]);
        pass.set_bind_group(2, self.shadow_map.preview(), &[]);
        mesh.draw(&mut pass, index);
    }
}

fn resolve_draws<'a>(assets: &'a Assets, scene: &ShadowScene) -> Vec<Draw<'a>> {
    scene
        .objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| {
            let Some(mesh) = assets.meshes.get(object.mesh) else {
                log::warn!("Skipping object {index} with invalid mesh handle");
                return None;
            };
            let Some(texture) = assets.textures.get(object.texture) else {
                log::warn!("Skipping object {index} with invalid texture handle");
                return None;
            };
            Some(Draw {
                object_index: index as u32,
                mesh,
                texture,
            })
        })
        .collect()
}

/// Colour + depth pass on the window surface with a window-sized viewport.
pub(crate) fn begin_surface_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    context: &RenderContext,
    view: &wgpu::TextureView,
    label: &str,
    color_load: wgpu::LoadOp<wgpu::Color>,
    depth_load: wgpu::LoadOp<f32>,
) -> wgpu::RenderPass<'e> {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load: color_load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &context.depth.view,
            depth_ops: Some(wgpu::Operations {
                load: depth_load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    context.set_window_viewport(&mut render_pass);
    render_pass
}
