use serde::Serialize;

use crate::config::model::TierHeightMode;
use crate::foundation::core::PixelSpan;
use crate::foundation::error::{ConfigViolations, LockerError, LockerResult};
use crate::foundation::math::split_weighted;

/// Pixel height of every tier, top to bottom. Always sums to the body height exactly.
///
/// A plan is never patched: changing the tier count or the height mode means resolving a new
/// plan, because ratios are relative to each other rather than absolute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TierHeightPlan {
    heights: Vec<u32>,
}

impl TierHeightPlan {
    pub fn resolve(tiers: u32, mode: &TierHeightMode, total_height: u32) -> LockerResult<Self> {
        if let TierHeightMode::Custom(ratios) = mode
            && ratios.len() != tiers as usize
        {
            let mut v = ConfigViolations::default();
            v.push(
                "tierRatios",
                format!("expected {tiers} ratios, got {}", ratios.len()),
            );
            return Err(LockerError::InvalidConfig(v));
        }

        let ratios = mode.ratios(tiers);
        if ratios.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            let mut v = ConfigViolations::default();
            v.push("tierRatios", "ratios must be finite and > 0");
            return Err(LockerError::InvalidConfig(v));
        }

        let heights = split_weighted(total_height, &ratios);
        if let Some(idx) = heights.iter().position(|h| *h == 0) {
            return Err(LockerError::settings(format!(
                "tier {idx} resolves to 0 px at total_height {total_height}"
            )));
        }

        tracing::debug!(?heights, "tier heights resolved");
        Ok(Self { heights })
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.heights.iter().sum()
    }

    /// Row of every tier edge, `0` and the body height included.
    pub fn boundaries(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.heights.len() + 1);
        let mut y = 0;
        out.push(y);
        for h in &self.heights {
            y += h;
            out.push(y);
        }
        out
    }

    pub fn spans(&self) -> Vec<PixelSpan> {
        let mut y = 0;
        self.heights
            .iter()
            .map(|&h| {
                let span = PixelSpan::new(y, h);
                y += h;
                span
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tiers.rs"]
mod tests;
