use super::*;
use crate::config::model::{FrameType, LayoutConfig, LockerColor, TierHeightMode};
use crate::config::settings::LayoutMetrics;

const TARGET: Rgb8 = Rgb8::new(40, 96, 170);
const CP_RED: [u8; 4] = [220, 0, 0, 255];
const HANDLE_BLUE: [u8; 4] = [0, 0, 250, 255];

fn config(frame_type: FrameType, control_panel_column: u32, handle: bool) -> LayoutConfig {
    LayoutConfig {
        columns: 3,
        tiers: 8,
        tier_height_mode: TierHeightMode::Uniform,
        control_panel_column,
        control_panel_tier_span: 4,
        frame_type,
        color: LockerColor::Custom(TARGET),
        handle,
        frame_text: "HUB".to_string(),
    }
}

fn store() -> AssetStore {
    AssetStore::from_templates(
        Some(RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]))),
        Some(RgbaImage::from_pixel(4, 8, image::Rgba(HANDLE_BLUE))),
        Some(RgbaImage::from_pixel(10, 24, image::Rgba(CP_RED))),
    )
}

fn render(cfg: &LayoutConfig) -> (LayoutPlan, Canvas) {
    let settings = RenderSettings::default();
    let plan = LayoutPlan::build(cfg, &settings.metrics).unwrap();
    let assets = store();
    let templates = assets.require(cfg).unwrap();
    let canvas = compose(&plan, templates, &assets, &settings).unwrap();
    (plan, canvas)
}

fn line() -> [u8; 4] {
    RenderSettings::default().grid_line.to_rgba()
}

#[test]
fn white_cell_template_fills_with_exact_target() {
    let (_, canvas) = render(&config(FrameType::None, 0, false));
    assert_eq!(canvas.pixel(50, 50), Some(TARGET.to_rgba()));
    assert_eq!(canvas.pixel(250, 750), Some(TARGET.to_rgba()));
}

#[test]
fn body_color_follows_template_shading() {
    let gray = RgbaImage::from_pixel(2, 2, image::Rgba([128, 128, 128, 255]));
    let c = body_color(&gray, Rgb8::new(200, 100, 0));
    assert_eq!(c, Rgb8::new(100, 50, 0));
}

#[test]
fn grid_lines_sit_on_tier_and_column_boundaries() {
    let (plan, canvas) = render(&config(FrameType::None, 0, false));
    for row in plan.tiers.boundaries() {
        assert_eq!(canvas.pixel(50, row), Some(line()), "row {row}");
    }
    for x in [0, 100, 200, 300] {
        assert_eq!(canvas.pixel(x, 50), Some(line()), "col {x}");
    }
    assert_eq!(canvas.pixel(50, 99), Some(TARGET.to_rgba()));
}

#[test]
fn control_panel_column_uses_its_own_rows() {
    let (plan, canvas) = render(&config(FrameType::None, 2, false));
    let m = LayoutMetrics::default();
    let cp = plan.control_panel.as_ref().unwrap();

    // Regular boundary at 100 and 600 are suppressed inside the column.
    assert_eq!(canvas.pixel(150, 100), Some(TARGET.to_rgba()));
    assert_eq!(canvas.pixel(150, 600), Some(TARGET.to_rgba()));
    // ...but drawn in the neighbours.
    assert_eq!(canvas.pixel(50, 600), Some(line()));
    assert_eq!(canvas.pixel(250, 100), Some(line()));

    for row in cp.fillers_below.iter().map(|f| f.y) {
        assert_eq!(canvas.pixel(150, row), Some(line()), "filler row {row}");
    }
    assert_eq!(canvas.pixel(150, m.total_height), Some(line()));
}

#[test]
fn control_panel_asset_sits_on_top_with_left_border() {
    let (_, canvas) = render(&config(FrameType::None, 2, true));
    let m = LayoutMetrics::default();
    let mid = m.control_panel_top + m.control_panel_height / 2;
    assert_eq!(canvas.pixel(150, mid), Some(CP_RED));
    assert_eq!(canvas.pixel(199, mid), Some(CP_RED));
    assert_eq!(canvas.pixel(100, mid), Some(line()));
    assert_eq!(canvas.pixel(200, mid), Some(line()));
}

#[test]
fn handles_are_centered_in_each_cell() {
    let (plan, canvas) = render(&config(FrameType::None, 2, true));
    let m = plan.metrics;
    for cell in &plan.cells {
        let x = cell.x + cell.width - m.handle_margin - m.handle_width / 2;
        let y = cell.y + cell.height / 2;
        assert_eq!(canvas.pixel(x, y), Some(HANDLE_BLUE), "cell {cell:?}");
    }
}

#[test]
fn frame_bands_hold_no_body_pixels() {
    let (plan, canvas) = render(&config(FrameType::FullSet, 1, false));
    let m = plan.metrics;
    let (x0, y0, x1, _) = plan.body_bounds();
    assert_eq!((x0, y0), (m.side_frame_thickness, m.top_frame_thickness));

    // Bands are flat fill: no grid lines leak into them. The label is skipped for lack of
    // fonts in the in-memory store.
    for y in 0..plan.canvas.height {
        for x in (0..x0).chain(x1..plan.canvas.width) {
            assert_eq!(canvas.pixel(x, y), Some(TARGET.to_rgba()), "({x}, {y})");
        }
    }
    for x in 0..plan.canvas.width {
        assert_eq!(canvas.pixel(x, y0 - 1), Some(TARGET.to_rgba()));
    }
    assert_eq!(canvas.pixel(x0, y0), Some(line()));
}

#[test]
fn full_set_label_is_painted_in_the_top_band() {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        eprintln!("no system fonts; skipping frame label check");
        return;
    }

    let cfg = config(FrameType::FullSet, 0, false);
    let settings = RenderSettings::default();
    let plan = LayoutPlan::build(&cfg, &settings.metrics).unwrap();
    let assets = store().with_fontdb(db);
    let templates = assets.require(&cfg).unwrap();
    let canvas = compose(&plan, templates, &assets, &settings).unwrap();

    let band = TARGET.to_rgba();
    let mut lit = 0usize;
    for y in 0..plan.origin_y {
        for x in 0..plan.canvas.width {
            if canvas.pixel(x, y) != Some(band) {
                lit += 1;
            }
        }
    }
    assert!(lit > 0, "top band carries no label pixels");
    // The label never spills into the body.
    assert_eq!(canvas.pixel(50, plan.origin_y + 50), Some(band));
}
