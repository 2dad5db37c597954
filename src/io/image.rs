use crate::core::framebuffer::FrameBuffer;
use image::{ImageBuffer, ImageError, Rgba};
use log::info;
use std::path::Path;

/// Saves the resolved framebuffer colors to an image file (format from the extension).
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), ImageError> {
    let path = path.as_ref();
    let (width, height) = (framebuffer.width as u32, framebuffer.height as u32);

    let img_buf: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, framebuffer.to_rgba8()).ok_or_else(|| {
            ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))
        })?;

    img_buf.save(path)?;
    info!("Saved {}x{} frame to {}", width, height, path.display());
    Ok(())
}
