use glam::Vec3;
use shadow_demo::renderer::{BasicRenderer, DirectionalLight, LightBase, ShadowRenderer};

const MAX_MAP_SIZE: u32 = 2048;

/// A device without a surface, or `None` when the machine has no adapter.
fn headless_device() -> Option<wgpu::Device> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;

    let (device, _queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("HeadlessDevice"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits {
            max_texture_dimension_2d: MAX_MAP_SIZE,
            ..wgpu::Limits::default()
        },
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::MemoryUsage,
        trace: wgpu::Trace::Off,
    }))
    .ok()?;

    Some(device)
}

fn light(shadow_map_size: u32) -> DirectionalLight {
    DirectionalLight::new(
        LightBase::new(Vec3::ONE, 0.1, 0.6),
        Vec3::new(0.0, -7.0, -1.0),
        shadow_map_size,
    )
}

#[test]
fn shadow_renderer_builds_all_three_pipelines() {
    let Some(device) = headless_device() else {
        eprintln!("no graphics adapter available, skipping");
        return;
    };

    for format in [
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureFormat::Rgba8Unorm,
    ] {
        match ShadowRenderer::new(&device, format, &light(256), None) {
            Ok(renderer) => assert_eq!(renderer.shadow_map_size(), 256),
            Err(err) => panic!("{format:?}: {err}"),
        }
    }
}

#[test]
fn oversized_shadow_map_is_shrunk_to_the_device_limit() {
    let Some(device) = headless_device() else {
        eprintln!("no graphics adapter available, skipping");
        return;
    };

    let renderer = ShadowRenderer::new(
        &device,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        &light(1_000_000),
        None,
    )
    .unwrap();
    assert_eq!(renderer.shadow_map_size(), MAX_MAP_SIZE);
}

#[test]
fn basic_renderer_builds_its_pipeline() {
    let Some(device) = headless_device() else {
        eprintln!("no graphics adapter available, skipping");
        return;
    };

    let renderer = BasicRenderer::new(&device, wgpu::TextureFormat::Rgba8UnormSrgb, None);
    assert!(renderer.is_ok(), "{:?}", renderer.err());
}

#[test]
fn rejected_pipeline_is_an_error_not_a_panic() {
    let Some(device) = headless_device() else {
        eprintln!("no graphics adapter available, skipping");
        return;
    };

    // Declares the binding without any layout to back it.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("basic.wgsl"),
        r#"
@group(3) @binding(0) var<uniform> tint: vec4<f32>;

@vertex
fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(pos, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint;
}
"#,
    )
    .unwrap();

    let result = BasicRenderer::new(
        &device,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        Some(dir.path()),
    );
    assert!(matches!(
        result,
        Err(shadow_demo::DemoError::Pipeline { .. })
    ));
}
