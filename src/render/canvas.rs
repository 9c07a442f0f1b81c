use image::RgbaImage;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{LockerError, LockerResult};
use crate::render::composite::{over_in_place, over_straight, unpremultiply};

/// Owned premultiplied RGBA8 pixel buffer for one render.
///
/// Allocated once per render, mutated in place by each paint layer and consumed by
/// [`Canvas::into_rgba8`]. Drawing calls clip to the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fill: Rgb8) -> LockerResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| {
                LockerError::Other(anyhow::anyhow!("canvas size overflow: {width}x{height}"))
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            LockerError::Other(anyhow::anyhow!(
                "allocate {width}x{height} canvas: {e}"
            ))
        })?;
        data.extend(std::iter::repeat_n(fill.to_rgba(), len / 4).flatten());
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Fill `[x0, x1) x [y0, y1)` with an opaque color.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let px = color.to_rgba();
        for y in y0..y1 {
            let start = self.index(x0, y);
            let end = self.index(x1, y);
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    /// Horizontal line on row `y` covering `[x0, x1)`.
    pub fn hline(&mut self, y: u32, x0: u32, x1: u32, color: Rgb8) {
        self.fill_rect(x0, y, x1, y.saturating_add(1), color);
    }

    /// Vertical line on column `x` covering `[y0, y1)`.
    pub fn vline(&mut self, x: u32, y0: u32, y1: u32, color: Rgb8) {
        self.fill_rect(x, y0, x.saturating_add(1), y1, color);
    }

    /// Composite a straight-alpha image with its top-left at `(x, y)`; may start off-canvas.
    pub fn draw_image(&mut self, img: &RgbaImage, x: i64, y: i64) {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        for (sx, sy, px) in img.enumerate_pixels() {
            let dx = x + i64::from(sx);
            let dy = y + i64::from(sy);
            if dx < 0 || dy < 0 || dx >= w || dy >= h {
                continue;
            }
            let idx = self.index(dx as u32, dy as u32);
            let dst = [
                self.data[idx],
                self.data[idx + 1],
                self.data[idx + 2],
                self.data[idx + 3],
            ];
            self.data[idx..idx + 4].copy_from_slice(&over_straight(dst, px.0));
        }
    }

    /// Composite a tightly packed premultiplied RGBA8 buffer of `src_w x src_h` at `(x, y)`.
    pub fn draw_premul(
        &mut self,
        src: &[u8],
        src_w: u32,
        src_h: u32,
        x: u32,
        y: u32,
    ) -> LockerResult<()> {
        if src.len() != (src_w as usize) * (src_h as usize) * 4 {
            return Err(LockerError::Other(anyhow::anyhow!(
                "draw_premul expects {src_w}x{src_h} rgba8 buffer, got {} bytes",
                src.len()
            )));
        }
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        let cols = src_w.min(self.width - x) as usize;
        let rows = src_h.min(self.height - y);
        for row in 0..rows {
            let s = (row as usize) * (src_w as usize) * 4;
            let d = self.index(x, y + row);
            over_in_place(&mut self.data[d..d + cols * 4], &src[s..s + cols * 4])?;
        }
        Ok(())
    }

    /// Consume the canvas into a straight-alpha image.
    pub fn into_rgba8(self) -> RgbaImage {
        let Self {
            width,
            height,
            mut data,
        } = self;
        for px in data.chunks_exact_mut(4) {
            let out = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        RgbaImage::from_raw(width, height, data)
            .unwrap_or_else(|| RgbaImage::new(width, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
