use crate::config::model::{FrameType, LayoutConfig};
use crate::config::settings::RenderSettings;
use crate::foundation::error::LockerResult;
use crate::layout::plan::LayoutPlan;
use crate::render::canvas::Canvas;

/// Minimal grid used when templates are unavailable: flat uncolored cells and grid lines,
/// no frame, no hardware, no control panel.
pub fn render_fallback(config: &LayoutConfig, settings: &RenderSettings) -> LockerResult<Canvas> {
    let bare = LayoutConfig {
        control_panel_column: 0,
        frame_type: FrameType::None,
        handle: false,
        ..config.clone()
    };
    let plan = LayoutPlan::build(&bare, &settings.metrics)?;
    let mut canvas = Canvas::new(plan.canvas.width, plan.canvas.height, settings.background)?;

    for cell in &plan.cells {
        canvas.fill_rect(
            cell.x,
            cell.y,
            cell.x + cell.width,
            cell.y + cell.height,
            settings.fallback_cell,
        );
    }
    for l in &plan.grid.horizontal {
        canvas.hline(l.y, l.x_start, l.x_end, settings.grid_line);
    }
    for l in &plan.grid.vertical {
        canvas.vline(l.x, l.y_start, l.y_end, settings.grid_line);
    }
    Ok(canvas)
}
