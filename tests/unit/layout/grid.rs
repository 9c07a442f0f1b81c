use std::collections::HashSet;

use super::*;
use crate::config::model::{FrameType, LayoutConfig, LockerColor, TierHeightMode};
use crate::config::settings::LayoutMetrics;

fn geom(columns: u32) -> GridGeometry {
    GridGeometry {
        origin_x: 30,
        origin_y: 80,
        columns,
        cell_width: 100,
        total_height: 800,
    }
}

fn placement(column: u32, tiers: u32, span: u32) -> ControlPanelPlacement {
    let cfg = LayoutConfig {
        columns: 5,
        tiers,
        tier_height_mode: TierHeightMode::Uniform,
        control_panel_column: column,
        control_panel_tier_span: span,
        frame_type: FrameType::FullSet,
        color: LockerColor::default(),
        handle: false,
        frame_text: "X".to_string(),
    };
    ControlPanelPlacement::plan(&cfg, &LayoutMetrics::default()).unwrap()
}

#[test]
fn plain_grid_has_full_width_rows_and_all_columns() {
    let tiers = TierHeightPlan::resolve(6, &TierHeightMode::Uniform, 800).unwrap();
    let plan = GridPlan::build(geom(5), &tiers, None);

    assert_eq!(plan.horizontal.len(), 7);
    for l in &plan.horizontal {
        assert_eq!(l.x_start, 30);
        assert_eq!(l.x_end, 30 + 500 + 1);
    }
    assert_eq!(plan.vertical.len(), 6);
    assert_eq!(plan.vertical[5].x, 530);
    assert_eq!(plan.vertical[0].y_start, 80);
    assert_eq!(plan.vertical[0].y_end, 881);
}

#[test]
fn regular_rows_skip_the_control_panel_column() {
    let tiers = TierHeightPlan::resolve(8, &TierHeightMode::Uniform, 800).unwrap();
    let cp = placement(2, 8, 4);
    let g = geom(5);
    let plan = GridPlan::build(g, &tiers, Some(&cp));
    let (left, right) = g.column_bounds(1);

    let inside: Vec<&HLine> = plan.horizontal_within(left, right + 1).collect();
    let cp_rows: Vec<u32> = cp.boundary_rows().into_iter().map(|r| r + 80).collect();
    assert_eq!(inside.len(), cp_rows.len());
    for l in inside {
        assert_eq!((l.x_start, l.x_end), (left, right + 1));
        assert!(cp_rows.contains(&l.y));
    }
}

#[test]
fn no_pixel_is_covered_twice_by_horizontal_lines() {
    for (column, tiers, span) in [(1, 3, 1), (2, 8, 4), (5, 10, 8), (3, 6, 2)] {
        let tier_plan = TierHeightPlan::resolve(tiers, &TierHeightMode::Uniform, 800).unwrap();
        let cp = placement(column, tiers, span);
        let plan = GridPlan::build(geom(5), &tier_plan, Some(&cp));

        let mut seen = HashSet::new();
        for l in &plan.horizontal {
            for x in l.x_start..l.x_end {
                assert!(seen.insert((x, l.y)), "pixel ({x}, {}) drawn twice", l.y);
            }
        }
    }
}
