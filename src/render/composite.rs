use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{LockerError, LockerResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

/// Source-over of a straight-alpha pixel onto a premultiplied one.
pub fn over_straight(dst: PremulRgba8, src: [u8; 4]) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        a => over(
            dst,
            Rgba8Premul::from_straight_rgba(src[0], src[1], src[2], a).to_array(),
        ),
    }
}

/// Source-over of a premultiplied row onto another of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> LockerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(LockerError::Other(anyhow::anyhow!(
            "over_in_place expects equal-length rgba8 buffers"
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Undo premultiplication for output encoding.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = px[3];
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let a32 = u32::from(a);
            let un = |c: u8| ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), a]
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
