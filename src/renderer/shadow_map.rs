use super::frame::FramePass;

pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Bind group layouts for the two ways a shadow map is sampled.
pub struct ShadowMapLayouts {
    /// Depth texture with a comparison sampler, for PCF in the lit pass.
    pub compare: wgpu::BindGroupLayout,
    /// The same texture viewed as unfilterable floats, for showing raw
    /// depth values. Depth textures cannot be read with a plain sampler on
    /// every backend.
    pub preview: wgpu::BindGroupLayout,
}

impl ShadowMapLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let compare = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ShadowMapBindLayout"),
            entries: &[
                texture_entry(wgpu::TextureSampleType::Depth),
                sampler_entry(wgpu::SamplerBindingType::Comparison),
            ],
        });
        let preview = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ShadowPreviewBindLayout"),
            entries: &[
                texture_entry(wgpu::TextureSampleType::Float { filterable: false }),
                sampler_entry(wgpu::SamplerBindingType::NonFiltering),
            ],
        });
        Self { compare, preview }
    }
}

fn texture_entry(sample_type: wgpu::TextureSampleType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type,
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(ty: wgpu::SamplerBindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 1,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(ty),
        count: None,
    }
}

/// Off-screen depth target rendered from a light's point of view.
///
/// Within a frame the map is first written by [`ShadowMap::write`] and then
/// sampled through [`ShadowMap::read`] or [`ShadowMap::preview`]. wgpu
/// tracks the usage transition, so the two never overlap as long as the
/// shadow pass is encoded first.
pub struct ShadowMap {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    preview_bind_group: wgpu::BindGroup,
    size: u32,
}

impl ShadowMap {
    /// `size` must already fit the device's texture limits.
    pub fn new(device: &wgpu::Device, layouts: &ShadowMapLayouts, size: u32) -> Self {
        let size = size.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("DirectionalShadowMap"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let compare_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ShadowCompareSampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let depth_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ShadowDepthSampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ShadowMapBindGroup"),
            layout: &layouts.compare,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&compare_sampler),
                },
            ],
        });

        let preview_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ShadowPreviewBindGroup"),
            layout: &layouts.preview,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&depth_sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            view,
            bind_group,
            preview_bind_group,
            size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Begin a depth-only pass into the map. Depth is cleared to 1.0 and
    /// the viewport covers the whole map.
    pub fn write<'e>(&self, encoder: &'e mut wgpu::CommandEncoder) -> wgpu::RenderPass<'e> {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(FramePass::Shadow.label()),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_viewport(0.0, 0.0, self.size as f32, self.size as f32, 0.0, 1.0);
        pass
    }

    /// Bind group for depth-compare sampling in a later pass.
    pub fn read(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Bind group exposing the stored depth values as plain floats.
    pub fn preview(&self) -> &wgpu::BindGroup {
        &self.preview_bind_group
    }
}

/// Largest square shadow map the device can allocate, never below one texel.
pub fn fit_shadow_map_size(requested: u32, limits: &wgpu::Limits) -> u32 {
    let max = limits.max_texture_dimension_2d.max(1);
    if requested > max {
        log::warn!("Shadow map size {requested} exceeds the device limit, using {max}");
    }
    requested.clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_maps_are_clamped_to_the_device_limit() {
        let limits = wgpu::Limits::default();
        let max = limits.max_texture_dimension_2d;

        assert_eq!(fit_shadow_map_size(1_000_000, &limits), max);
        assert_eq!(fit_shadow_map_size(max, &limits), max);
        assert_eq!(fit_shadow_map_size(1024, &limits), 1024);
        assert_eq!(fit_shadow_map_size(0, &limits), 1);
    }

    #[test]
    fn downlevel_limits_shrink_the_map() {
        let limits = wgpu::Limits::downlevel_webgl2_defaults();
        assert_eq!(fit_shadow_map_size(8192, &limits), 2048);
    }
}
