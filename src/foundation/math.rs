/// Round-half-up for non-negative pixel coordinates. Every pixel boundary in the
/// layout goes through this function.
pub(crate) fn round_half_up(v: f64) -> u32 {
    let r = (v + 0.5).floor();
    if r <= 0.0 { 0 } else { r as u32 }
}

/// Split `total` pixels into `weights.len()` runs proportional to `weights`.
///
/// Every run but the last is `round_half_up(total * weight / sum)`; the last run takes
/// whatever remains, so the runs always sum to `total` exactly. Runs are clamped so the
/// remainder never goes negative.
pub(crate) fn split_weighted(total: u32, weights: &[f64]) -> Vec<u32> {
    let Some((_, head)) = weights.split_last() else {
        return Vec::new();
    };
    let sum: f64 = weights.iter().sum();

    let mut out = Vec::with_capacity(weights.len());
    let mut used = 0u32;
    for w in head {
        let run = round_half_up(f64::from(total) * w / sum).min(total - used);
        used += run;
        out.push(run);
    }
    out.push(total - used);
    out
}

/// Split `total` pixels into `parts` near-equal runs.
pub(crate) fn split_even(total: u32, parts: usize) -> Vec<u32> {
    split_weighted(total, &vec![1.0; parts])
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}
