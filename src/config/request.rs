use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::LockerResult;

/// Raw, possibly partial render request as it arrives from the caller.
///
/// Integer fields are signed so that out-of-range values reach the normalizer and are reported
/// as field violations instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockerRequest {
    pub columns: Option<i64>,
    pub tiers: Option<i64>,
    pub control_panel_column: Option<i64>,
    pub control_panel_tier_span: Option<i64>,
    pub frame_type: Option<String>,
    pub color: Option<String>,
    pub custom_color: Option<String>,
    pub handle: Option<bool>,
    pub tier_height_mode: Option<String>,
    pub tier_ratios: Option<Vec<f64>>,
    pub frame_text: Option<String>,
}

impl LockerRequest {
    /// Request with only the two required fields set.
    pub fn new(columns: i64, tiers: i64) -> Self {
        Self {
            columns: Some(columns),
            tiers: Some(tiers),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> LockerResult<Self> {
        Ok(serde_json::from_str(s).context("parse locker request JSON")?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LockerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
        let req = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse request '{}'", path.display()))?;
        Ok(req)
    }

    /// Field-wise overlay: every `Some` in `other` replaces the value in `self`.
    pub fn merged_with(mut self, other: Self) -> Self {
        macro_rules! take {
            ($($f:ident),*) => {
                $(if other.$f.is_some() { self.$f = other.$f; })*
            };
        }
        take!(
            columns,
            tiers,
            control_panel_column,
            control_panel_tier_span,
            frame_type,
            color,
            custom_color,
            handle,
            tier_height_mode,
            tier_ratios,
            frame_text
        );
        self
    }
}
