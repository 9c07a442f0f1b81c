use serde::Serialize;

use crate::config::model::LayoutConfig;
use crate::config::settings::LayoutMetrics;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::LockerResult;
use crate::layout::control_panel::ControlPanelPlacement;
use crate::layout::grid::{GridGeometry, GridPlan};
use crate::layout::tiers::TierHeightPlan;

/// Whether a cell is a regular tier or a filler synthesized around the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Tier,
    Filler,
}

/// One locker compartment, canvas coordinates. `width`/`height` exclude the closing line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellRect {
    /// 0-based column index.
    pub column: u32,
    pub kind: CellKind,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Complete pixel geometry of one render, derived from a [`LayoutConfig`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub config: LayoutConfig,
    pub metrics: LayoutMetrics,
    pub canvas: CanvasSize,
    /// Top-left of the locker body after frame insets.
    pub origin_x: u32,
    pub origin_y: u32,
    pub tiers: TierHeightPlan,
    pub control_panel: Option<ControlPanelPlacement>,
    pub grid: GridPlan,
    pub cells: Vec<CellRect>,
}

impl LayoutPlan {
    pub fn build(config: &LayoutConfig, metrics: &LayoutMetrics) -> LockerResult<Self> {
        metrics.validate()?;

        let canvas = metrics.canvas_size(config.columns, config.frame_type);
        let origin_x = metrics.side_inset(config.frame_type);
        let origin_y = metrics.top_inset(config.frame_type);

        let tiers = TierHeightPlan::resolve(
            config.tiers,
            &config.tier_height_mode,
            metrics.total_height,
        )?;
        let control_panel = ControlPanelPlacement::plan(config, metrics);

        let geom = GridGeometry {
            origin_x,
            origin_y,
            columns: config.columns,
            cell_width: metrics.cell_width,
            total_height: metrics.total_height,
        };
        let grid = GridPlan::build(geom, &tiers, control_panel.as_ref());

        let mut cells = Vec::new();
        for col in 0..config.columns {
            let (x, _) = geom.column_bounds(col);
            let (kind, spans) = match &control_panel {
                Some(cp) if cp.column == col + 1 => {
                    (CellKind::Filler, cp.fillers().collect::<Vec<_>>())
                }
                _ => (CellKind::Tier, tiers.spans()),
            };
            for span in spans {
                cells.push(CellRect {
                    column: col,
                    kind,
                    x,
                    y: origin_y + span.y,
                    width: metrics.cell_width,
                    height: span.height,
                });
            }
        }

        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            cells = cells.len(),
            "layout planned"
        );

        Ok(Self {
            config: config.clone(),
            metrics: *metrics,
            canvas,
            origin_x,
            origin_y,
            tiers,
            control_panel,
            grid,
            cells,
        })
    }

    /// Locker body bounds `(x0, y0, x1, y1)`, exclusive ends, closing lines included.
    pub fn body_bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.origin_x,
            self.origin_y,
            self.origin_x + self.metrics.body_width(self.config.columns) + 1,
            self.origin_y + self.metrics.total_height + 1,
        )
    }

    pub fn cells_in_column(&self, column: u32) -> impl Iterator<Item = &CellRect> {
        self.cells.iter().filter(move |c| c.column == column)
    }

    pub fn filler_cells(&self) -> impl Iterator<Item = &CellRect> {
        self.cells.iter().filter(|c| c.kind == CellKind::Filler)
    }

    /// Canvas-space left edge of the control-panel column.
    pub fn control_panel_x(&self) -> Option<u32> {
        self.control_panel
            .as_ref()
            .map(|cp| self.origin_x + (cp.column - 1) * self.metrics.cell_width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
