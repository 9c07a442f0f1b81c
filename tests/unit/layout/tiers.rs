use super::*;

const H: u32 = 800;

fn all_modes(tiers: u32) -> Vec<TierHeightMode> {
    let custom = (0..tiers).map(|i| 1.0 + f64::from(i % 3) * 0.75).collect();
    vec![
        TierHeightMode::Uniform,
        TierHeightMode::TopLarge,
        TierHeightMode::BottomLarge,
        TierHeightMode::BothLarge,
        TierHeightMode::Custom(custom),
    ]
}

#[test]
fn heights_sum_exactly_for_every_tier_count_and_mode() {
    for tiers in 1..=10 {
        for mode in all_modes(tiers) {
            let plan = TierHeightPlan::resolve(tiers, &mode, H).unwrap();
            assert_eq!(plan.len(), tiers as usize);
            assert_eq!(plan.total(), H, "tiers={tiers} mode={mode:?}");
            assert!(plan.heights().iter().all(|h| *h > 0));
        }
    }
}

#[test]
fn uniform_rounding_remainder_goes_to_the_last_tier() {
    let plan = TierHeightPlan::resolve(6, &TierHeightMode::Uniform, H).unwrap();
    assert_eq!(plan.heights(), &[133, 133, 133, 133, 133, 135]);

    for tiers in 1..=10u32 {
        let plan = TierHeightPlan::resolve(tiers, &TierHeightMode::Uniform, H).unwrap();
        let (last, head) = plan.heights().split_last().unwrap();
        let expected = (f64::from(H) / f64::from(tiers)).round() as u32;
        assert!(head.iter().all(|h| *h == expected), "tiers={tiers}");
        assert_eq!(*last, H - expected * (tiers - 1));
    }
}

#[test]
fn custom_first_tier_is_double() {
    let mode = TierHeightMode::Custom(vec![2.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    let plan = TierHeightPlan::resolve(6, &mode, H).unwrap();
    let h = plan.heights();
    for other in &h[1..] {
        let diff = i64::from(h[0]) - 2 * i64::from(*other);
        assert!(diff.abs() <= 2, "first={} other={other}", h[0]);
    }
}

#[test]
fn large_modes_weight_edge_tiers() {
    let top = TierHeightPlan::resolve(5, &TierHeightMode::TopLarge, 600).unwrap();
    assert_eq!(top.heights(), &[200, 100, 100, 100, 100]);

    let bottom = TierHeightPlan::resolve(5, &TierHeightMode::BottomLarge, 600).unwrap();
    assert_eq!(bottom.heights(), &[100, 100, 100, 100, 200]);

    let both = TierHeightPlan::resolve(4, &TierHeightMode::BothLarge, 600).unwrap();
    assert_eq!(both.heights(), &[200, 100, 100, 200]);

    // A single tier is both first and last.
    let single = TierHeightPlan::resolve(1, &TierHeightMode::BothLarge, 600).unwrap();
    assert_eq!(single.heights(), &[600]);
}

#[test]
fn boundaries_and_spans_agree() {
    let plan = TierHeightPlan::resolve(3, &TierHeightMode::Uniform, 10).unwrap();
    assert_eq!(plan.heights(), &[3, 3, 4]);
    assert_eq!(plan.boundaries(), vec![0, 3, 6, 10]);
    let spans = plan.spans();
    assert_eq!(spans[1], PixelSpan::new(3, 3));
    assert_eq!(spans[2].end(), 10);
}

#[test]
fn custom_length_mismatch_is_rejected() {
    let mode = TierHeightMode::Custom(vec![1.0, 2.0]);
    let err = TierHeightPlan::resolve(3, &mode, H).unwrap_err();
    assert!(err.violations().unwrap().has_field("tierRatios"));
}

#[test]
fn resolving_after_tier_change_is_a_fresh_plan() {
    let mode = TierHeightMode::TopLarge;
    let six = TierHeightPlan::resolve(6, &mode, H).unwrap();
    let seven = TierHeightPlan::resolve(7, &mode, H).unwrap();
    assert_ne!(six.heights()[0], seven.heights()[0]);
    assert_eq!(seven.total(), H);
}
