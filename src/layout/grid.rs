use serde::Serialize;

use crate::layout::control_panel::ControlPanelPlacement;
use crate::layout::tiers::TierHeightPlan;

/// One-pixel-high horizontal line, canvas coordinates, `x_end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HLine {
    pub y: u32,
    pub x_start: u32,
    pub x_end: u32,
}

/// One-pixel-wide vertical line, canvas coordinates, `y_end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VLine {
    pub x: u32,
    pub y_start: u32,
    pub y_end: u32,
}

/// Every grid line of the locker body.
///
/// Regular tier rows run across the body but skip the control-panel column; that column gets
/// its own row set from [`ControlPanelPlacement::boundary_rows`]. No two horizontal lines
/// share a pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GridPlan {
    pub horizontal: Vec<HLine>,
    pub vertical: Vec<VLine>,
}

/// Inputs for [`GridPlan::build`], all in canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct GridGeometry {
    pub origin_x: u32,
    pub origin_y: u32,
    pub columns: u32,
    pub cell_width: u32,
    pub total_height: u32,
}

impl GridGeometry {
    /// Horizontal extent `[left, right]` (both line columns included) of column `idx`.
    pub fn column_bounds(&self, idx: u32) -> (u32, u32) {
        let left = self.origin_x + idx * self.cell_width;
        (left, left + self.cell_width)
    }

    /// Exclusive right edge of the body including the closing line.
    fn x_end(&self) -> u32 {
        self.origin_x + self.columns * self.cell_width + 1
    }
}

impl GridPlan {
    pub fn build(
        geom: GridGeometry,
        tiers: &TierHeightPlan,
        control_panel: Option<&ControlPanelPlacement>,
    ) -> Self {
        let mut plan = Self::default();
        let body_x_end = geom.x_end();
        let cp_bounds = control_panel.map(|cp| geom.column_bounds(cp.column - 1));

        for row in tiers.boundaries() {
            let y = geom.origin_y + row;
            match cp_bounds {
                None => plan.push_h(y, geom.origin_x, body_x_end),
                Some((left, right)) => {
                    plan.push_h(y, geom.origin_x, left);
                    plan.push_h(y, right + 1, body_x_end);
                }
            }
        }

        if let (Some(cp), Some((left, right))) = (control_panel, cp_bounds) {
            for row in cp.boundary_rows() {
                plan.push_h(geom.origin_y + row, left, right + 1);
            }
        }

        for col in 0..=geom.columns {
            plan.vertical.push(VLine {
                x: geom.origin_x + col * geom.cell_width,
                y_start: geom.origin_y,
                y_end: geom.origin_y + geom.total_height + 1,
            });
        }

        plan
    }

    fn push_h(&mut self, y: u32, x_start: u32, x_end: u32) {
        if x_start < x_end {
            self.horizontal.push(HLine { y, x_start, x_end });
        }
    }

    /// Horizontal lines that intersect the pixel column range `[x0, x1)`.
    pub fn horizontal_within(&self, x0: u32, x1: u32) -> impl Iterator<Item = &HLine> {
        self.horizontal
            .iter()
            .filter(move |l| l.x_start < x1 && x0 < l.x_end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
