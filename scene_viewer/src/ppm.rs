use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use softpipe::{color, Framebuffer, RenderTarget};

/// Writes the color buffer as a plain text (P3) PPM image.
pub fn write_to<W: Write>(framebuffer: &Framebuffer, mut w: W) -> std::io::Result<()> {
    write!(w, "P3\n{} {}\n255\n", framebuffer.width(), framebuffer.height())?;
    for row in framebuffer.color_buffer().chunks(framebuffer.width()) {
        for &pixel in row {
            let c = color::unpack(pixel) * 255.0;
            write!(w, "{:.0} {:.0} {:.0} ", c.x, c.y, c.z)?;
        }
        writeln!(w)?;
    }
    w.flush()
}

pub fn save<P: AsRef<Path>>(framebuffer: &Framebuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_to(framebuffer, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", path.display()))
}
