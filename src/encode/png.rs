use std::io::Cursor;

use base64::Engine as _;

use crate::foundation::error::{LockerError, LockerResult};

/// Encode a tightly packed straight RGBA8 buffer as PNG.
pub fn encode_png(width: u32, height: u32, rgba8: &[u8]) -> LockerResult<Vec<u8>> {
    let expected = (width as usize) * (height as usize) * 4;
    if rgba8.len() != expected {
        return Err(LockerError::encoding(format!(
            "png {width}x{height} expects {expected} bytes, got {}",
            rgba8.len()
        )));
    }
    let mut buf = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut buf),
        rgba8,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| LockerError::encoding(format!("png {width}x{height}: {e}")))?;
    Ok(buf)
}

/// Standard base64 (with padding) of arbitrary bytes.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
