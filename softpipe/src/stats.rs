use std::fmt;
use std::time::Duration;

/// Counters and stage timings of the last rendered frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameStats {
    pub geometry_time: Duration,
    pub raster_time: Duration,

    pub faces: usize,
    pub faces_culled: usize,
    pub faces_clipped: usize,
    /// Meshes skipped because their world matrix is singular.
    pub meshes_skipped: usize,
    pub clip_overflows: usize,

    pub triangles: usize,
    /// Triangles that did not fit the render list.
    pub triangles_dropped: usize,
    /// Triangles with zero screen area or an unusable `w`.
    pub triangles_degenerate: usize,

    pub fragments_written: usize,
    pub fragments_occluded: usize,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_time(&self) -> Duration {
        self.geometry_time + self.raster_time
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "geometry {:?}, raster {:?}, faces {} (culled {}, clipped {}), \
             triangles {} (dropped {}, degenerate {}), fragments {} (occluded {})",
            self.geometry_time,
            self.raster_time,
            self.faces,
            self.faces_culled,
            self.faces_clipped,
            self.triangles,
            self.triangles_dropped,
            self.triangles_degenerate,
            self.fragments_written,
            self.fragments_occluded,
        )
    }
}
