use super::*;
use image::RgbaImage;

fn full_store() -> AssetStore {
    AssetStore::from_templates(
        Some(RgbaImage::from_pixel(6, 6, image::Rgba([200, 200, 200, 255]))),
        Some(RgbaImage::from_pixel(4, 10, image::Rgba([30, 30, 30, 255]))),
        Some(RgbaImage::from_pixel(10, 24, image::Rgba([90, 90, 90, 255]))),
    )
}

fn req(columns: i64, tiers: i64) -> LockerRequest {
    LockerRequest {
        color: Some("navy".to_string()),
        ..LockerRequest::new(columns, tiers)
    }
}

#[test]
fn complete_store_renders_non_degraded() {
    let img = render_locker_image(&req(3, 4), &full_store(), &RenderSettings::default()).unwrap();
    assert!(!img.degraded);
    assert_eq!((img.width, img.height), (301, 801));
    assert_eq!(img.data.len(), 301 * 801 * 4);
}

#[test]
fn missing_handle_only_matters_when_handles_are_requested() {
    let assets = AssetStore::from_templates(
        Some(RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]))),
        None,
        None,
    );
    let settings = RenderSettings::default();

    let plain = render_locker_image(&req(2, 3), &assets, &settings).unwrap();
    assert!(!plain.degraded);

    let with_handle = LockerRequest {
        handle: Some(true),
        ..req(2, 3)
    };
    let degraded = render_locker_image(&with_handle, &assets, &settings).unwrap();
    assert!(degraded.degraded);
    assert_eq!((degraded.width, degraded.height), (201, 801));
}

#[test]
fn fallback_ignores_frame_insets() {
    let assets = AssetStore::from_templates(None, None, None);
    let framed = LockerRequest {
        frame_type: Some("full_set".to_string()),
        ..req(4, 2)
    };
    let img = render_locker_image(&framed, &assets, &RenderSettings::default()).unwrap();
    assert!(img.degraded);
    assert_eq!((img.width, img.height), (401, 801));
}

#[test]
fn invalid_request_fails_before_rendering() {
    let err = render_locker_grid(&req(0, 11), &full_store(), &RenderSettings::default())
        .unwrap_err();
    let v = err.violations().expect("invalid config");
    assert!(v.has_field("columns"));
    assert!(v.has_field("tiers"));
}

#[test]
fn batch_keeps_input_order_and_per_item_errors() {
    let settings = RenderSettings::default();
    let assets = full_store();
    let reqs = vec![req(1, 1), req(0, 3), req(2, 5)];
    let out = render_batch(&reqs, &assets, &settings);
    assert_eq!(out.len(), 3);
    assert!(out[1].is_err());
    for i in [0, 2] {
        let expected = render_locker_grid(&reqs[i], &assets, &settings).unwrap();
        assert_eq!(out[i].as_ref().unwrap(), &expected);
    }
}

#[test]
fn plan_layout_matches_render_dimensions() {
    let settings = RenderSettings::default();
    let plan = plan_layout(&req(5, 6), &settings).unwrap();
    assert_eq!((plan.canvas.width, plan.canvas.height), (501, 801));
    assert!(plan.control_panel.is_none());
}
