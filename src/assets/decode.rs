use anyhow::Context;

use crate::foundation::error::LockerResult;

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_template(bytes: &[u8]) -> LockerResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode template image from memory")?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
