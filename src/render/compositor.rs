use image::{RgbaImage, imageops::FilterType};

use crate::assets::store::{AssetStore, Templates};
use crate::assets::tint::{average_color, tint_template};
use crate::config::settings::RenderSettings;
use crate::foundation::core::Rgb8;
use crate::foundation::error::LockerResult;
use crate::layout::plan::LayoutPlan;
use crate::render::canvas::Canvas;
use crate::render::text::{LabelStyle, render_label};

/// Luma above which the frame label switches from white to near-black.
const LABEL_DARK_TEXT_LUMA: u8 = 140;
const LABEL_DARK_TEXT: Rgb8 = Rgb8::new(24, 24, 24);

/// Paint `plan` onto a fresh canvas using the given templates.
///
/// Layers, in order: background, frame bands, body fill, handles, grid lines, frame label,
/// control-panel asset. A failing label is logged and skipped.
pub fn compose(
    plan: &LayoutPlan,
    templates: Templates<'_>,
    assets: &AssetStore,
    settings: &RenderSettings,
) -> LockerResult<Canvas> {
    let mut canvas = Canvas::new(plan.canvas.width, plan.canvas.height, settings.background)?;

    let fill = body_color(templates.cell, plan.config.color.rgb());
    tracing::debug!(fill = %fill.to_hex(), "body color derived from cell template");

    paint_frame_bands(&mut canvas, plan, fill);
    paint_body_fill(&mut canvas, plan, fill);
    if let Some(handle) = templates.handle {
        paint_handles(&mut canvas, plan, handle);
    }
    paint_grid(&mut canvas, plan, settings.grid_line);
    if plan.config.frame_type.has_top() {
        paint_frame_label(&mut canvas, plan, fill, assets, settings);
    }
    if let Some(cp) = templates.control_panel {
        paint_control_panel(&mut canvas, plan, cp, settings.grid_line);
    }

    Ok(canvas)
}

/// Flood color for the body: the tinted cell template's mean color.
pub(crate) fn body_color(cell: &RgbaImage, target: Rgb8) -> Rgb8 {
    average_color(&tint_template(cell, target)).unwrap_or(target)
}

fn paint_frame_bands(canvas: &mut Canvas, plan: &LayoutPlan, color: Rgb8) {
    let (w, h) = (plan.canvas.width, plan.canvas.height);
    let top = plan.origin_y;
    let side = plan.origin_x;
    if top > 0 {
        canvas.fill_rect(0, 0, w, top, color);
    }
    if side > 0 {
        canvas.fill_rect(0, top, side, h, color);
        canvas.fill_rect(w - side, top, w, h, color);
    }
}

fn paint_body_fill(canvas: &mut Canvas, plan: &LayoutPlan, color: Rgb8) {
    let (x0, y0, x1, y1) = plan.body_bounds();
    canvas.fill_rect(x0, y0, x1, y1, color);
}

fn paint_handles(canvas: &mut Canvas, plan: &LayoutPlan, template: &RgbaImage) {
    let m = &plan.metrics;
    let handle = image::imageops::resize(
        template,
        m.handle_width,
        m.handle_height,
        FilterType::Triangle,
    );
    for cell in &plan.cells {
        let x = i64::from(cell.x + cell.width - m.handle_margin - m.handle_width);
        let y = i64::from(cell.y) + (i64::from(cell.height) - i64::from(m.handle_height)) / 2;
        canvas.draw_image(&handle, x, y);
    }
}

fn paint_grid(canvas: &mut Canvas, plan: &LayoutPlan, color: Rgb8) {
    for l in &plan.grid.horizontal {
        canvas.hline(l.y, l.x_start, l.x_end, color);
    }
    for l in &plan.grid.vertical {
        canvas.vline(l.x, l.y_start, l.y_end, color);
    }
}

fn paint_frame_label(
    canvas: &mut Canvas,
    plan: &LayoutPlan,
    band: Rgb8,
    assets: &AssetStore,
    settings: &RenderSettings,
) {
    let color = if band.luma() > LABEL_DARK_TEXT_LUMA {
        LABEL_DARK_TEXT
    } else {
        Rgb8::WHITE
    };
    let families: Vec<String> = assets
        .registered_families()
        .iter()
        .chain(settings.font_families.iter())
        .cloned()
        .collect();
    let style = LabelStyle {
        font_size: plan.metrics.frame_font_size,
        color,
        families: &families,
    };

    let drawn = render_label(
        &plan.config.frame_text,
        plan.canvas.width,
        plan.origin_y,
        &style,
        assets.fontdb(),
    )
    .and_then(|label| canvas.draw_premul(&label.data, label.width, label.height, 0, 0));
    if let Err(e) = drawn {
        tracing::warn!(error = %e, "frame label skipped");
    }
}

fn paint_control_panel(canvas: &mut Canvas, plan: &LayoutPlan, template: &RgbaImage, line: Rgb8) {
    let (Some(cp), Some(x)) = (plan.control_panel.as_ref(), plan.control_panel_x()) else {
        return;
    };
    let m = &plan.metrics;
    let asset = image::imageops::resize(
        template,
        m.cell_width,
        m.control_panel_height,
        FilterType::Triangle,
    );
    let y = plan.origin_y + cp.asset.y;
    canvas.draw_image(&asset, i64::from(x), i64::from(y));
    // The asset covers the column's left grid line.
    canvas.vline(x, y, y + cp.asset.height, line);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
