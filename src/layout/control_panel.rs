use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::model::LayoutConfig;
use crate::config::settings::LayoutMetrics;
use crate::foundation::core::PixelSpan;
use crate::foundation::math::split_even;

/// Vertical layout of the control-panel column.
///
/// The asset slot is fixed by [`LayoutMetrics`] and never moves with the tier grid. One filler
/// cell always sits above it; the space below is split into `span - 1` fillers. The fillers,
/// the asset and the uncovered remainder (if any) tile the column height exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlPanelPlacement {
    /// 1-based column index.
    pub column: u32,
    pub asset: PixelSpan,
    pub fillers_above: Vec<PixelSpan>,
    pub fillers_below: Vec<PixelSpan>,
    total_height: u32,
}

impl ControlPanelPlacement {
    /// Plan the control-panel column, or `None` when the config has no control panel.
    pub fn plan(config: &LayoutConfig, metrics: &LayoutMetrics) -> Option<Self> {
        if !config.has_control_panel() {
            return None;
        }

        let asset = PixelSpan::new(metrics.control_panel_top, metrics.control_panel_height);
        let fillers_above = vec![PixelSpan::new(0, asset.y)];

        let below_count = config.control_panel_tier_span.saturating_sub(1) as usize;
        let below_space = metrics.total_height.saturating_sub(asset.end());
        let mut fillers_below = Vec::with_capacity(below_count);
        let mut y = asset.end();
        for h in split_even(below_space, below_count) {
            fillers_below.push(PixelSpan::new(y, h));
            y += h;
        }

        if fillers_below.is_empty() {
            // Bare fill below the asset. Flag it so degenerate previews get reviewed.
            tracing::warn!(
                column = config.control_panel_column,
                below_px = below_space,
                "control panel has no filler cells below the asset"
            );
        }

        let placement = Self {
            column: config.control_panel_column,
            asset,
            fillers_above,
            fillers_below,
            total_height: metrics.total_height,
        };
        tracing::debug!(?placement, "control panel placed");
        Some(placement)
    }

    /// Every filler cell, top to bottom.
    pub fn fillers(&self) -> impl Iterator<Item = PixelSpan> + '_ {
        self.fillers_above
            .iter()
            .chain(self.fillers_below.iter())
            .copied()
    }

    pub fn filler_count(&self) -> usize {
        self.fillers_above.len() + self.fillers_below.len()
    }

    /// Rows that carry a horizontal grid line inside this column, body-relative and
    /// deduplicated: column top and bottom, both asset edges and every filler edge.
    pub fn boundary_rows(&self) -> BTreeSet<u32> {
        let mut rows = BTreeSet::new();
        rows.insert(0);
        rows.insert(self.total_height);
        rows.insert(self.asset.y);
        rows.insert(self.asset.end());
        for f in self.fillers() {
            rows.insert(f.y);
            rows.insert(f.end());
        }
        rows
    }

    /// Pixels of the column covered by fillers plus the asset.
    pub fn covered_height(&self) -> u32 {
        self.fillers().map(|f| f.height).sum::<u32>() + self.asset.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/control_panel.rs"]
mod tests;
