use crate::core::{EnvError, RenderFrame, Result};

/// Encode a `RenderFrame::Pixels` (RGBA) to PNG bytes.
/// Requires the `image` feature; without it this returns `EnvError::NotSupported`.
pub fn encode_png(frame: &RenderFrame) -> Result<Vec<u8>> {
    match frame {
        RenderFrame::Pixels { width, height, data } => encode_rgba_png(*width, *height, data),
        RenderFrame::Text(_) => Err(EnvError::NotSupported("Text frames cannot be encoded to PNG".into())),
    }
}

#[cfg(feature = "image")]
fn encode_rgba_png(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>> {
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    let expected = (width as usize) * (height as usize) * 4;
    if data.len() != expected {
        return Err(EnvError::Other(format!(
            "Pixel data length {} does not match {}x{} RGBA ({})",
            data.len(), width, height, expected
        )));
    }

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(data, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EnvError::Other(format!("PNG encode error: {}", e)))?;
    Ok(buf)
}

#[cfg(not(feature = "image"))]
fn encode_rgba_png(_width: u32, _height: u32, _data: &[u8]) -> Result<Vec<u8>> {
    Err(EnvError::NotSupported("PNG encoding requires the `image` feature".into()))
}

/// Save a `RenderFrame::Pixels` as a PNG file.
pub fn save_png<P: AsRef<std::path::Path>>(path: P, frame: &RenderFrame) -> Result<()> {
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).map_err(|e| EnvError::Other(format!("Failed to write PNG: {}", e)))
}
