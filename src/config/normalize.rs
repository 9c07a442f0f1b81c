use crate::config::model::{
    DEFAULT_CONTROL_PANEL_TIER_SPAN, FrameType, LayoutConfig, LockerColor, MAX_COLUMNS,
    MAX_CUSTOM_RATIO, MAX_FRAME_TEXT_CHARS, MAX_TIERS, MIN_COLUMNS, MIN_CUSTOM_RATIO, MIN_TIERS,
    NamedColor, TierHeightMode, canonical_token,
};
use crate::config::request::LockerRequest;
use crate::config::settings::RenderSettings;
use crate::foundation::core::Rgb8;
use crate::foundation::error::{ConfigViolations, LockerError, LockerResult};

/// Default for `customColor` when `color` is `custom` and no value is given.
pub const DEFAULT_CUSTOM_COLOR: &str = "#808080";

/// Validate a raw request and fill every default, producing a canonical [`LayoutConfig`].
///
/// All fields are checked before returning, so a failure lists every violated field.
pub fn normalize_request(
    req: &LockerRequest,
    settings: &RenderSettings,
) -> LockerResult<LayoutConfig> {
    let mut violations = ConfigViolations::default();

    let columns = required_in_range(
        &mut violations,
        "columns",
        req.columns,
        MIN_COLUMNS,
        MAX_COLUMNS,
    );
    let tiers = required_in_range(&mut violations, "tiers", req.tiers, MIN_TIERS, MAX_TIERS);

    let tier_height_mode = normalize_height_mode(&mut violations, req, tiers);

    let control_panel_column = match req.control_panel_column {
        None => 0,
        Some(c) if c < 0 => {
            violations.push("controlPanelColumn", format!("must be >= 0, got {c}"));
            0
        }
        Some(c) => match columns {
            Some(cols) if c > i64::from(cols) => {
                violations.push(
                    "controlPanelColumn",
                    format!("must be 0 or in 1..={cols}, got {c}"),
                );
                0
            }
            _ => u32::try_from(c).unwrap_or(0),
        },
    };

    let control_panel_tier_span = match req.control_panel_tier_span {
        Some(span) if span < 1 => {
            violations.push(
                "controlPanelTierSpan",
                format!("must be >= 1, got {span}"),
            );
            1
        }
        span => {
            let span = span.unwrap_or(i64::from(DEFAULT_CONTROL_PANEL_TIER_SPAN));
            let upper = tiers.map_or(1, |t| t.saturating_sub(2).max(1));
            u32::try_from(span.min(i64::from(upper))).unwrap_or(1)
        }
    };

    let frame_type = match req.frame_type.as_deref() {
        None => FrameType::None,
        Some(s) => FrameType::parse(s).unwrap_or_else(|| {
            violations.push(
                "frameType",
                format!(
                    "unknown frame type \"{s}\" (expected none, full_set, top_only, side_only, top_and_side)"
                ),
            );
            FrameType::None
        }),
    };

    let color = normalize_color(&mut violations, req);

    let frame_text = match req.frame_text.as_deref().map(str::trim) {
        None => settings.frame_label.clone(),
        Some("") => {
            violations.push("frameText", "must be non-empty");
            String::new()
        }
        Some(t) if t.chars().count() > MAX_FRAME_TEXT_CHARS => {
            violations.push(
                "frameText",
                format!("must be at most {MAX_FRAME_TEXT_CHARS} characters"),
            );
            String::new()
        }
        Some(t) => t.to_string(),
    };

    if !violations.is_empty() {
        tracing::debug!(%violations, "request rejected");
        return Err(LockerError::InvalidConfig(violations));
    }

    // Both are Some when no violation was recorded.
    let (Some(columns), Some(tiers)) = (columns, tiers) else {
        return Err(LockerError::settings("normalizer lost required fields"));
    };

    let config = LayoutConfig {
        columns,
        tiers,
        tier_height_mode,
        control_panel_column,
        control_panel_tier_span,
        frame_type,
        color,
        handle: req.handle.unwrap_or(false),
        frame_text,
    };
    tracing::debug!(?config, "request normalized");
    Ok(config)
}

fn required_in_range(
    violations: &mut ConfigViolations,
    field: &str,
    value: Option<i64>,
    min: u32,
    max: u32,
) -> Option<u32> {
    match value {
        None => {
            violations.push(field, "is required");
            None
        }
        Some(v) if v < i64::from(min) || v > i64::from(max) => {
            violations.push(field, format!("must be in {min}..={max}, got {v}"));
            None
        }
        Some(v) => u32::try_from(v).ok(),
    }
}

fn normalize_height_mode(
    violations: &mut ConfigViolations,
    req: &LockerRequest,
    tiers: Option<u32>,
) -> TierHeightMode {
    let mode = match req.tier_height_mode.as_deref() {
        None if req.tier_ratios.is_some() => "custom".to_string(),
        None => "uniform".to_string(),
        Some(s) => canonical_token(s),
    };

    match mode.as_str() {
        "uniform" => TierHeightMode::Uniform,
        "toplarge" => TierHeightMode::TopLarge,
        "bottomlarge" => TierHeightMode::BottomLarge,
        "bothlarge" => TierHeightMode::BothLarge,
        "custom" => {
            let mut ratios = req.tier_ratios.clone().unwrap_or_default();
            // Entries past the tier count are dropped, not checked.
            if let Some(t) = tiers {
                reconcile_ratios(&mut ratios, t);
            }
            for (idx, r) in ratios.iter().enumerate() {
                if !r.is_finite() || *r < MIN_CUSTOM_RATIO || *r > MAX_CUSTOM_RATIO {
                    violations.push(
                        "tierRatios",
                        format!(
                            "ratio[{idx}] must be in {MIN_CUSTOM_RATIO}..={MAX_CUSTOM_RATIO}, got {r}"
                        ),
                    );
                }
            }
            TierHeightMode::Custom(ratios)
        }
        _ => {
            violations.push(
                "tierHeightMode",
                format!(
                    "unknown tier height mode \"{}\" (expected uniform, top_large, bottom_large, both_large, custom)",
                    req.tier_height_mode.as_deref().unwrap_or_default()
                ),
            );
            TierHeightMode::Uniform
        }
    }
}

/// Fit `ratios` to `tiers` entries: existing values are kept, new tiers get weight 1.
pub(crate) fn reconcile_ratios(ratios: &mut Vec<f64>, tiers: u32) {
    ratios.resize(tiers as usize, 1.0);
}

fn normalize_color(violations: &mut ConfigViolations, req: &LockerRequest) -> LockerColor {
    let custom = |violations: &mut ConfigViolations| {
        let hex = req.custom_color.as_deref().unwrap_or(DEFAULT_CUSTOM_COLOR);
        match Rgb8::from_hex(hex) {
            Ok(c) => LockerColor::Custom(c),
            Err(e) => {
                violations.push("customColor", e);
                LockerColor::default()
            }
        }
    };

    match req.color.as_deref().map(str::trim) {
        None if req.custom_color.is_some() => custom(violations),
        None => LockerColor::Named(NamedColor::default()),
        Some(s) if canonical_token(s) == "custom" => custom(violations),
        Some(s) if s.starts_with('#') => match Rgb8::from_hex(s) {
            Ok(c) => LockerColor::Custom(c),
            Err(e) => {
                violations.push("color", e);
                LockerColor::default()
            }
        },
        Some(s) => match NamedColor::parse(s) {
            Some(n) => LockerColor::Named(n),
            None => {
                violations.push("color", format!("unknown color \"{s}\""));
                LockerColor::default()
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/normalize.rs"]
mod tests;
