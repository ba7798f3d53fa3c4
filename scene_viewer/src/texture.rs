use std::path::Path;

use anyhow::{Context, Result};
use softpipe::Texture;

/// Decodes any image format the `image` crate knows into a texture.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Texture> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgba8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let texture = Texture::from_rgba8(width, height, img.as_raw())
        .with_context(|| format!("failed to decode {}", path.display()))?;
    log::info!("loaded {}: {}x{}", path.display(), width, height);
    Ok(texture)
}

/// Loads the map when a path was given.
pub fn load_optional(path: Option<&Path>) -> Result<Option<Texture>> {
    path.map(load).transpose()
}
