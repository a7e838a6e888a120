use std::mem;
use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use super::lights::LightsUniform;
use super::uniforms::GlobalsUniform;

/// The passes of one shadow-demo frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePass {
    /// Depth from the light into the shadow map.
    Shadow,
    /// Textured, lit scene sampling the shadow map.
    Lit,
    /// Raw shadow map shown on the preview quad.
    DepthDebug,
}

/// Fixed per-frame order. Every pass that samples the shadow map comes
/// after the one that writes it.
pub const FRAME_PASSES: [FramePass; 3] = [FramePass::Shadow, FramePass::Lit, FramePass::DepthDebug];

impl FramePass {
    pub fn label(self) -> &'static str {
        match self {
            FramePass::Shadow => "ShadowPass",
            FramePass::Lit => "LitPass",
            FramePass::DepthDebug => "DepthDebugPass",
        }
    }

    pub fn writes_shadow_map(self) -> bool {
        matches!(self, FramePass::Shadow)
    }

    pub fn reads_shadow_map(self) -> bool {
        matches!(self, FramePass::Lit | FramePass::DepthDebug)
    }
}

/// Group 0 of the on-screen passes: camera/light matrices and light
/// parameters, rewritten once per frame.
pub struct FrameBindings {
    globals_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    pub bind_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl FrameBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("GlobalsBuffer"),
            contents: bytemuck::bytes_of(&GlobalsUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("LightsBuffer"),
            size: mem::size_of::<LightsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("FrameBindLayout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(mem::size_of::<GlobalsUniform>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(mem::size_of::<LightsUniform>() as u64),
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("FrameBindGroup"),
            layout: &bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            globals_buffer,
            lights_buffer,
            bind_layout,
            bind_group,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, globals: &GlobalsUniform, lights: &LightsUniform) {
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(lights));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_map_is_written_before_it_is_read() {
        let first_read = FRAME_PASSES
            .iter()
            .position(|pass| pass.reads_shadow_map())
            .unwrap();
        let last_write = FRAME_PASSES
            .iter()
            .rposition(|pass| pass.writes_shadow_map())
            .unwrap();
        assert!(last_write < first_read);
    }

    #[test]
    fn frame_order_is_shadow_lit_debug() {
        assert_eq!(
            FRAME_PASSES,
            [FramePass::Shadow, FramePass::Lit, FramePass::DepthDebug]
        );
        assert!(FRAME_PASSES.iter().skip(1).all(|pass| !pass.writes_shadow_map()));
    }

    #[test]
    fn pass_labels_are_distinct() {
        let labels: Vec<_> = FRAME_PASSES.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["ShadowPass", "LitPass", "DepthDebugPass"]);
    }
}
