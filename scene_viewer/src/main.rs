pub mod obj;
pub mod ppm;
pub mod texture;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use softpipe::math_prelude::*;
use softpipe::{
    Camera, CullMode, Framebuffer, Light, Material, Mesh, RenderConfig, RenderMode, Renderer,
    SceneContext, ShadingModel, TextureMaps, Transform,
};

/// Seconds of animation between two frames.
const FRAME_DT: f32 = 1.0 / 30.0;
/// Mesh spin in radians per second about each axis.
const SPIN: Vec3 = Vec3::new(0.3, 0.6, 0.0);

/// Renders a mesh on the CPU and writes the frames as PPM images.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value_t = 800)]
    width: usize,
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Wavefront OBJ mesh; the built-in cube when omitted.
    #[arg(long)]
    obj: Option<PathBuf>,
    #[arg(long)]
    albedo: Option<PathBuf>,
    #[arg(long)]
    normal_map: Option<PathBuf>,
    #[arg(long)]
    glow_map: Option<PathBuf>,
    #[arg(long)]
    metallic_map: Option<PathBuf>,
    #[arg(long)]
    roughness_map: Option<PathBuf>,
    #[arg(long)]
    ao_map: Option<PathBuf>,
    #[arg(long)]
    specular_map: Option<PathBuf>,
    #[arg(long)]
    glossiness_map: Option<PathBuf>,

    #[arg(long, default_value_t = RenderMode::Filled)]
    mode: RenderMode,
    #[arg(long, default_value_t = CullMode::Backface)]
    cull: CullMode,
    #[arg(long, default_value_t = ShadingModel::BlinnPhong)]
    shading: ShadingModel,
    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 60.0)]
    fov: f32,
    /// Distance from the camera to the mesh.
    #[arg(long, default_value_t = 5.0)]
    distance: f32,

    #[arg(long, default_value_t = 1)]
    frames: usize,
    /// Output image; with several frames the frame number is appended to
    /// the file name.
    #[arg(long, default_value = "frame.ppm")]
    output: PathBuf,
}

impl Args {
    fn maps(&self) -> Result<TextureMaps> {
        let load = |p: &Option<PathBuf>| texture::load_optional(p.as_deref());
        Ok(TextureMaps {
            albedo: load(&self.albedo)?,
            normal: load(&self.normal_map)?,
            glow: load(&self.glow_map)?,
            specular: load(&self.specular_map)?,
            metallic: load(&self.metallic_map)?,
            roughness: load(&self.roughness_map)?,
            ambient_occlusion: load(&self.ao_map)?,
            glossiness: load(&self.glossiness_map)?,
        })
    }

    fn mesh(&self) -> Result<Mesh> {
        let mesh = match &self.obj {
            Some(path) => obj::load(path)?,
            None => Mesh::cube(),
        };
        Ok(mesh
            .with_maps(self.maps()?)
            .with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, self.distance))))
    }
}

fn frame_path(output: &Path, frame: usize, frames: usize) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let extension = output.extension().and_then(|s| s.to_str()).unwrap_or("ppm");
    output.with_file_name(format!("{}_{:04}.{}", stem, frame, extension))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = RenderConfig {
        fov_y: args.fov.to_radians(),
        render_mode: args.mode,
        cull_mode: args.cull,
        ..Default::default()
    };
    let mut renderer =
        Renderer::new(config, args.width, args.height).context("invalid render settings")?;
    let mut framebuffer = Framebuffer::new(args.width, args.height)?;

    let material = Material {
        shading: args.shading,
        ..Default::default()
    };
    let light = Light::new(Vec3::new(0.3, -0.5, 1.0), Vec3::ONE, 0.1);
    let mut scene = SceneContext::new(Camera::default(), light, material).with_mesh(args.mesh()?);
    log::info!(
        "rendering {} frame(s) at {}x{}, mode {}, cull {}, shading {}",
        args.frames,
        args.width,
        args.height,
        args.mode,
        args.cull,
        args.shading
    );

    for frame in 0..args.frames {
        let stats = renderer.render(&scene, &mut framebuffer);
        log::info!("frame {}: {}", frame, stats);

        let path = frame_path(&args.output, frame, args.frames);
        ppm::save(&framebuffer, &path)?;
        log::debug!("wrote {}", path.display());

        for mesh in scene.meshes.iter_mut() {
            mesh.transform.rotation += SPIN * FRAME_DT;
        }
    }

    Ok(())
}
