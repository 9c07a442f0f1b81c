use super::*;
use crate::config::model::{FrameType, LockerColor, TierHeightMode};

fn config(handle: bool, control_panel_column: u32) -> LayoutConfig {
    LayoutConfig {
        columns: 3,
        tiers: 6,
        tier_height_mode: TierHeightMode::Uniform,
        control_panel_column,
        control_panel_tier_span: 4,
        frame_type: FrameType::None,
        color: LockerColor::default(),
        handle,
        frame_text: "X".to_string(),
    }
}

fn write_png(path: &Path, img: &RgbaImage) {
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

#[test]
fn load_reads_templates_from_asset_dir() {
    let dir = PathBuf::from("target").join("asset_store_unit").join("full");
    std::fs::create_dir_all(&dir).unwrap();
    for kind in TemplateKind::ALL {
        write_png(
            &dir.join(kind.file_name()),
            &RgbaImage::from_pixel(4, 4, image::Rgba([200, 200, 200, 255])),
        );
    }

    let settings = RenderSettings {
        asset_dir: dir.clone(),
        ..RenderSettings::default()
    };
    let store = AssetStore::load(&settings);
    assert_eq!(store.root(), dir.as_path());
    for kind in TemplateKind::ALL {
        assert_eq!(store.template(kind).unwrap().dimensions(), (4, 4));
    }
    let t = store.require(&config(true, 1)).unwrap();
    assert!(t.handle.is_some());
    assert!(t.control_panel.is_some());
}

#[test]
fn missing_dir_loads_with_failed_templates() {
    let settings = RenderSettings {
        asset_dir: PathBuf::from("target").join("asset_store_unit").join("does_not_exist"),
        ..RenderSettings::default()
    };
    let store = AssetStore::load(&settings);
    let err = store.template(TemplateKind::Cell).unwrap_err();
    assert!(matches!(err, LockerError::AssetLoad(_)));
    assert!(err.to_string().contains("cell.png"));
}

#[test]
fn require_only_demands_templates_in_use() {
    let cell = RgbaImage::from_pixel(2, 2, image::Rgba([128, 128, 128, 255]));
    let store = AssetStore::from_templates(Some(cell), None, None);

    let t = store.require(&config(false, 0)).unwrap();
    assert!(t.handle.is_none());
    assert!(t.control_panel.is_none());

    assert!(store.require(&config(true, 0)).is_err());
    assert!(store.require(&config(false, 2)).is_err());
}

#[test]
fn missing_cell_template_always_fails() {
    let store = AssetStore::from_templates(None, None, None);
    assert!(matches!(
        store.require(&config(false, 0)),
        Err(LockerError::AssetLoad(_))
    ));
}

#[test]
fn in_memory_store_has_no_fonts() {
    let store = AssetStore::from_templates(None, None, None);
    assert_eq!(store.fontdb().len(), 0);
    assert!(store.registered_families().is_empty());
}
