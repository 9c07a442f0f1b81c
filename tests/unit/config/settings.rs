use super::*;

#[test]
fn default_metrics_are_valid() {
    LayoutMetrics::default().validate().unwrap();
    RenderSettings::default().validate().unwrap();
}

#[test]
fn control_panel_slot_must_fit_body() {
    let m = LayoutMetrics {
        control_panel_top: 600,
        control_panel_height: 200,
        ..LayoutMetrics::default()
    };
    assert!(m.validate().is_err());
}

#[test]
fn canvas_size_without_frame() {
    let m = LayoutMetrics::default();
    let size = m.canvas_size(5, FrameType::None);
    assert_eq!(size.width, 5 * m.cell_width + 1);
    assert_eq!(size.height, m.total_height + 1);
}

#[test]
fn canvas_size_grows_with_frame_edges() {
    let m = LayoutMetrics::default();
    let none = m.canvas_size(4, FrameType::None);
    let top = m.canvas_size(4, FrameType::TopOnly);
    let side = m.canvas_size(4, FrameType::SideOnly);
    let full = m.canvas_size(4, FrameType::FullSet);

    assert_eq!(top.width, none.width);
    assert_eq!(top.height, none.height + m.top_frame_thickness);
    assert_eq!(side.width, none.width + 2 * m.side_frame_thickness);
    assert_eq!(side.height, none.height);
    assert_eq!(full, m.canvas_size(4, FrameType::TopAndSide));
    assert_eq!(full.width, side.width);
    assert_eq!(full.height, top.height);
}

#[test]
fn canvas_width_is_monotonic_in_columns() {
    let m = LayoutMetrics::default();
    for frame in [FrameType::None, FrameType::SideOnly, FrameType::FullSet] {
        let mut prev = 0;
        for cols in 1..=20 {
            let w = m.canvas_size(cols, frame).width;
            assert!(w > prev);
            prev = w;
        }
    }
}

#[test]
fn settings_json_fills_missing_fields() {
    let dir = std::path::PathBuf::from("target").join("settings_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("settings.json");
    std::fs::write(
        &path,
        r#"{ "frame_label": "DEPOT", "metrics": { "cell_width": 80 } }"#,
    )
    .unwrap();

    let s = RenderSettings::from_path(&path).unwrap();
    assert_eq!(s.frame_label, "DEPOT");
    assert_eq!(s.metrics.cell_width, 80);
    assert_eq!(s.metrics.total_height, LayoutMetrics::default().total_height);
    assert_eq!(s.asset_dir, std::path::PathBuf::from("assets"));
}

#[test]
fn settings_json_rejects_bad_metrics() {
    let dir = std::path::PathBuf::from("target").join("settings_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad_settings.json");
    std::fs::write(&path, r#"{ "metrics": { "cell_width": 0 } }"#).unwrap();
    assert!(matches!(
        RenderSettings::from_path(&path),
        Err(LockerError::Settings(_))
    ));
}

#[test]
fn oversized_geometry_is_rejected_before_layout() {
    let wide = LayoutMetrics {
        cell_width: 300_000_000,
        ..LayoutMetrics::default()
    };
    assert!(matches!(wide.validate(), Err(LockerError::Settings(_))));

    let framed = LayoutMetrics {
        side_frame_thickness: u32::MAX / 2 + 1,
        ..LayoutMetrics::default()
    };
    assert!(framed.validate().is_err());

    let tall = LayoutMetrics {
        total_height: u32::MAX,
        ..LayoutMetrics::default()
    };
    assert!(tall.validate().is_err());
}
