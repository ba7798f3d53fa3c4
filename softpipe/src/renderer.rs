use std::time::Instant;

use crate::config::{CullMode, RenderConfig, RenderMode};
use crate::error::ConfigError;
use crate::framebuffer::RenderTarget;
use crate::pipeline::Pipeline;
use crate::raster::Rasterizer;
use crate::scene::SceneContext;
use crate::stats::FrameStats;

/// Runs whole frames: clear, geometry, rasterization.
pub struct Renderer {
    config: RenderConfig,
    pipeline: Pipeline,
    rasterizer: Rasterizer,
    stats: FrameStats,
}

impl Renderer {
    /// Fails when `config` or the viewport size is invalid.
    pub fn new(config: RenderConfig, width: usize, height: usize) -> Result<Self, ConfigError> {
        let pipeline = Pipeline::new(&config, width, height)?;
        let rasterizer = Rasterizer::new(&config);
        log::debug!(
            "renderer ready: {}x{}, mode {}, cull {}",
            width,
            height,
            config.render_mode,
            config.cull_mode
        );
        Ok(Self {
            config,
            pipeline,
            rasterizer,
            stats: FrameStats::default(),
        })
    }

    /// Renders one frame of `scene` into `target` and returns its stats.
    ///
    /// The projection follows the target: drawing into a target of another
    /// size rebuilds it first.
    pub fn render<T: RenderTarget + ?Sized>(&mut self, scene: &SceneContext, target: &mut T) -> &FrameStats {
        self.stats.reset();

        let size = (target.width(), target.height());
        if size != self.pipeline.viewport() {
            if let Err(err) = self.pipeline.resize(size.0, size.1) {
                log::warn!("frame skipped: {}", err);
                return &self.stats;
            }
        }

        target.clear_color(self.config.clear_color);
        target.clear_depth();

        let start = Instant::now();
        self.pipeline
            .run(scene, self.config.render_mode, self.config.cull_mode, &mut self.stats);
        self.stats.geometry_time = start.elapsed();

        let start = Instant::now();
        self.rasterizer.draw(
            self.pipeline.triangles(),
            scene,
            self.pipeline.light(),
            target,
            &mut self.stats,
        );
        self.stats.raster_time = start.elapsed();

        log::debug!("{}", self.stats);
        &self.stats
    }

    /// Stats of the last rendered frame.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn set_fov(&mut self, fov_y: f32) -> Result<(), ConfigError> {
        self.pipeline.set_fov(fov_y)?;
        self.config.fov_y = fov_y;
        Ok(())
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.config.render_mode = mode;
        self.rasterizer.set_mode(mode);
    }

    pub fn set_cull_mode(&mut self, cull: CullMode) {
        self.config.cull_mode = cull;
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), ConfigError> {
        self.pipeline.resize(width, height)
    }
}
