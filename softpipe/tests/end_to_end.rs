use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

use softpipe::math_prelude::*;
use softpipe::{
    color, Camera, CullMode, Face, Framebuffer, Light, Material, Mesh, RenderConfig, RenderMode,
    RenderTarget, Renderer, SceneContext, Texture, TextureMaps, Transform,
};

const SIZE: usize = 100;
const RED: u32 = 0xFFFF0000;
const GREEN: u32 = 0xFF00FF00;
const CLEAR: u32 = 0xFF000000;

fn config(mode: RenderMode) -> RenderConfig {
    RenderConfig {
        fov_y: FRAC_PI_2,
        znear: 1.0,
        zfar: 100.0,
        render_mode: mode,
        cull_mode: CullMode::None,
        ..Default::default()
    }
}

fn unlit_scene() -> SceneContext {
    SceneContext::new(Camera::default(), Light::default(), Material::unlit(color::WHITE))
}

/// A triangle at depth `z` whose screen footprint is the same for every `z`.
fn triangle_at(z: f32, color: u32) -> Mesh {
    let s = z / 5.0;
    let vertices = vec![
        Vec3::new(-s, -s, z),
        Vec3::new(0.0, s, z),
        Vec3::new(s, -s, z),
    ];
    let face = Face::new([0, 1, 2], [Vec2::ZERO; 3]).with_color(color::unpack(color));
    Mesh::new(vertices, Vec::new(), vec![face]).unwrap()
}

fn render(config: RenderConfig, scene: &SceneContext) -> Framebuffer {
    let mut renderer = Renderer::new(config, SIZE, SIZE).unwrap();
    let mut fb = Framebuffer::new(SIZE, SIZE).unwrap();
    renderer.render(scene, &mut fb);
    fb
}

#[test_log::test]
fn flat_red_triangle_fills_its_footprint() {
    for mode in [RenderMode::Filled, RenderMode::AabbFilled] {
        let scene = unlit_scene().with_mesh(triangle_at(5.0, RED));
        let fb = render(config(mode), &scene);

        // corners land on (40, 60), (50, 40) and (60, 60): 200 square pixels
        let red: Vec<_> = fb.coords().filter(|&(x, y)| fb.pixel(x, y) == Some(RED)).collect();
        assert!((red.len() as i32 - 200).abs() <= 10, "{} pixels", red.len());
        assert_eq!(fb.pixel(50, 55), Some(RED));

        for (x, y) in fb.coords() {
            let depth = fb.depth(x, y).unwrap();
            match fb.pixel(x, y) {
                Some(RED) => assert!((depth - 0.8).abs() < 1e-5),
                Some(CLEAR) => assert_eq!(depth, 1.0),
                other => panic!("unexpected color {:?} at ({}, {})", other, x, y),
            }
        }
    }
}

#[test_log::test]
fn nearer_triangle_wins_in_either_order() {
    let far = triangle_at(10.0, RED);
    let near = triangle_at(2.0, GREEN);
    for meshes in [vec![far.clone(), near.clone()], vec![near.clone(), far.clone()]] {
        for mode in [RenderMode::Filled, RenderMode::AabbFilled] {
            let mut scene = unlit_scene();
            scene.meshes = meshes.clone();
            let fb = render(config(mode), &scene);
            assert_eq!(fb.pixel(50, 55), Some(GREEN));
            assert!((fb.depth(50, 55).unwrap() - 0.5).abs() < 1e-5);
        }
    }
}

#[test_log::test]
fn texture_coordinates_are_perspective_correct() {
    // a slanted plane z = 4 + 2x; u = 0.5 at x = 0, which projects to the
    // center column whatever the depth
    let vertices = vec![
        Vec3::new(-1.0, -1.0, 2.0),
        Vec3::new(1.0, -1.0, 6.0),
        Vec3::new(1.0, 1.0, 6.0),
    ];
    let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0)];
    let halves = Texture::from_argb(2, 1, &[RED, GREEN]).unwrap();
    let mesh = Mesh::new(vertices, Vec::new(), vec![Face::new([0, 1, 2], uvs)])
        .unwrap()
        .with_maps(TextureMaps::with_albedo(halves));
    let scene = unlit_scene().with_mesh(mesh);

    for mode in [RenderMode::Textured, RenderMode::AabbTextured] {
        let fb = render(config(mode), &scene);
        // an affine blend would move the seam to about x = 42
        assert_eq!(fb.pixel(45, 56), Some(RED));
        assert_eq!(fb.pixel(49, 56), Some(RED));
        assert_eq!(fb.pixel(50, 56), Some(GREEN));
        assert_eq!(fb.pixel(55, 56), Some(GREEN));
    }
}

#[test_log::test]
fn scanline_and_bounding_box_cover_the_same_pixels() {
    let mut cube = Mesh::cube();
    cube.transform = Transform {
        rotation: Vec3::new(0.4, 0.7, 0.1),
        translation: Vec3::new(0.3, -0.2, 5.0),
        ..Default::default()
    };
    let scene = unlit_scene().with_mesh(cube);
    let lit = |mode| {
        let fb = render(
            RenderConfig {
                cull_mode: CullMode::Backface,
                ..config(mode)
            },
            &scene,
        );
        fb.coords()
            .filter(|&(x, y)| fb.pixel(x, y) != Some(CLEAR))
            .collect::<HashSet<_>>()
    };

    let scanline = lit(RenderMode::Filled);
    let bounding_box = lit(RenderMode::AabbFilled);
    assert!(scanline.len() > 500);
    assert!(scanline.symmetric_difference(&bounding_box).count() <= scanline.len() / 100);
}
