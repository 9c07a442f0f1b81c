use image::RgbaImage;

use crate::foundation::core::Rgb8;
use crate::foundation::math::mul_div255_u8;

/// Recolor a template to `target`, keeping its shading.
///
/// The template is reduced to luminance and every channel becomes `target * luma / 255`; alpha
/// is copied through. The template itself is never modified. Tinting an already tinted buffer
/// is not meaningful: always start from the original template.
pub fn tint_template(template: &RgbaImage, target: Rgb8) -> RgbaImage {
    let luma = image::imageops::grayscale(template);
    let mut out = RgbaImage::new(template.width(), template.height());
    for ((dst, src), l) in out
        .pixels_mut()
        .zip(template.pixels())
        .zip(luma.pixels())
    {
        let l = u16::from(l.0[0]);
        dst.0 = [
            mul_div255_u8(u16::from(target.r), l),
            mul_div255_u8(u16::from(target.g), l),
            mul_div255_u8(u16::from(target.b), l),
            src.0[3],
        ];
    }
    out
}

/// Mean color of all non-transparent pixels, or `None` for a fully transparent image.
pub fn average_color(img: &RgbaImage) -> Option<Rgb8> {
    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for px in img.pixels().filter(|p| p.0[3] > 0) {
        for (acc, c) in sum.iter_mut().zip(px.0) {
            *acc += u64::from(c);
        }
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let avg = |v: u64| ((v + n / 2) / n) as u8;
    Some(Rgb8::new(avg(sum[0]), avg(sum[1]), avg(sum[2])))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tint.rs"]
mod tests;
