use glam::{Mat4, Vec3};
use shadow_demo::input::{InputState, KeyCode};
use shadow_demo::renderer::{
    floor_mesh, pyramid_mesh, shadow_coords, DirectionalLight, FramePass, LightBase, Material,
    FRAME_PASSES,
};
use shadow_demo::scene::{Camera, SceneObject, ShadowScene};

const EPSILON: f32 = 1e-5;

fn demo_light() -> DirectionalLight {
    DirectionalLight::new(
        LightBase::new(Vec3::ONE, 0.1, 0.6),
        Vec3::new(0.0, -7.0, -1.0),
        256,
    )
}

fn compute_ndc(matrix: Mat4, world_pos: Vec3) -> Vec3 {
    let clip = matrix * world_pos.extend(1.0);
    clip.truncate() / clip.w
}

fn assert_in_unit_cube(coords: Vec3) {
    assert!(coords.x >= -EPSILON && coords.x <= 1.0 + EPSILON, "{coords:?}");
    assert!(coords.y >= -EPSILON && coords.y <= 1.0 + EPSILON, "{coords:?}");
    assert!(coords.z >= -EPSILON && coords.z <= 1.0 + EPSILON, "{coords:?}");
}

fn approx_eq(a: Vec3, b: Vec3) {
    assert!(a.abs_diff_eq(b, EPSILON), "{a:?} != {b:?}");
}

#[test]
fn demo_geometry_fits_inside_the_shadow_volume() {
    let light_transform = demo_light().light_transform();

    let pyramids = [
        Mat4::from_translation(Vec3::new(0.0, 0.0, -2.5)),
        Mat4::from_translation(Vec3::new(0.0, 3.0, -2.5)),
    ];
    for model in pyramids {
        for vertex in pyramid_mesh().vertices {
            let world = model.transform_point3(Vec3::from_array(vertex.pos));
            assert_in_unit_cube(shadow_coords(light_transform, world));
        }
    }

    let floor = Mat4::from_translation(Vec3::new(0.0, -2.0, 0.0));
    for vertex in floor_mesh().vertices {
        let world = floor.transform_point3(Vec3::from_array(vertex.pos));
        assert_in_unit_cube(shadow_coords(light_transform, world));
    }
}

#[test]
fn shadow_coords_match_manual_projection() {
    let light_transform = demo_light().light_transform();

    for world in [
        Vec3::new(-3.5, 0.0, -2.0),
        Vec3::new(2.0, 1.0, 4.0),
        Vec3::new(4.5, -0.5, -3.0),
    ] {
        let ndc = compute_ndc(light_transform, world);
        let expected = Vec3::new(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5, ndc.z);
        approx_eq(shadow_coords(light_transform, world), expected);
    }
}

#[test]
fn pyramid_occludes_the_floor_behind_it() {
    let light = demo_light();
    let light_transform = light.light_transform();
    let direction = light.direction().normalize();

    // Follow the light ray through the lower pyramid's centre down to the floor.
    let centre = Vec3::new(0.0, 0.0, -2.5);
    let t = (-2.0 - centre.y) / direction.y;
    let on_floor = centre + direction * t;
    assert!((on_floor.y + 2.0).abs() < EPSILON);

    let occluder = shadow_coords(light_transform, centre);
    let receiver = shadow_coords(light_transform, on_floor);

    assert!((occluder.x - receiver.x).abs() < 1e-4);
    assert!((occluder.y - receiver.y).abs() < 1e-4);
    assert!(occluder.z < receiver.z);
}

#[test]
fn shadow_texture_axis_is_flipped_from_clip_space() {
    let light_transform = demo_light().light_transform();

    // The light's view-space up axis leans towards world -Z.
    let far_side = Vec3::new(0.0, 0.0, -5.0);
    let near_side = Vec3::new(0.0, 0.0, 5.0);

    let ndc_far = compute_ndc(light_transform, far_side);
    let ndc_near = compute_ndc(light_transform, near_side);
    assert!(ndc_far.y > ndc_near.y);

    let tex_far = shadow_coords(light_transform, far_side);
    let tex_near = shadow_coords(light_transform, near_side);
    assert!(tex_far.y < tex_near.y);
}

#[test]
fn points_behind_a_perspective_light_are_rejected() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Z);
    let projection = Mat4::perspective_rh(60_f32.to_radians(), 1.0, 0.1, 30.0);
    let light_transform = projection * view;

    let behind = Vec3::new(0.0, 15.0, 0.0);
    assert_eq!(shadow_coords(light_transform, behind), Vec3::splat(-1.0));
    assert_in_unit_cube(shadow_coords(light_transform, Vec3::ZERO));
}

#[test]
fn frame_starts_with_the_shadow_pass() {
    assert_eq!(FRAME_PASSES[0], FramePass::Shadow);
    let writer = FRAME_PASSES
        .iter()
        .position(|pass| pass.writes_shadow_map())
        .unwrap();
    for (index, pass) in FRAME_PASSES.iter().enumerate() {
        if pass.reads_shadow_map() {
            assert!(index > writer, "{pass:?} reads before the shadow pass");
        }
    }
}

#[test]
fn steering_the_light_moves_its_shadow() {
    let mut scene = ShadowScene::new(Camera::default(), demo_light());
    scene.add_object(SceneObject {
        mesh: shadow_demo::asset::Handle::new(0),
        texture: shadow_demo::asset::Handle::new(0),
        material: Material::shiny(),
        transform: Mat4::from_translation(Vec3::new(0.0, 0.0, -2.5)),
    });

    let apex = Vec3::new(0.0, 1.0, -2.5);
    let before = shadow_coords(scene.main_light.light_transform(), apex);

    let mut input = InputState::new();
    input.press(KeyCode::ArrowRight);
    for _ in 0..5 {
        scene.update(&mut input, 1.0 / 60.0);
    }

    let direction = scene.main_light.direction();
    assert!((direction.x - 0.5).abs() < 1e-5);

    let after = shadow_coords(scene.main_light.light_transform(), apex);
    assert!(!before.abs_diff_eq(after, 1e-4));
    assert_eq!(scene.object_data().len(), 1);
}
