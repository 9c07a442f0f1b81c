use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::config::model::{FrameType, MAX_COLUMNS};
use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{LockerError, LockerResult};

/// Environment variable that overrides [`RenderSettings::asset_dir`].
pub const ASSET_DIR_ENV: &str = "LOCKERGRID_ASSET_DIR";

/// Fixed pixel geometry of the locker body, frame bands and hardware.
///
/// The control-panel slot is positioned from the column top and does not scale with the tier
/// grid; every other vertical quantity is derived from `total_height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Width of one column in pixels.
    pub cell_width: u32,
    /// Height of the locker body (all tiers) in pixels.
    pub total_height: u32,
    /// Top of the control-panel asset, measured from the column top.
    pub control_panel_top: u32,
    /// Height of the control-panel asset.
    pub control_panel_height: u32,
    /// Thickness of the top frame band.
    pub top_frame_thickness: u32,
    /// Thickness of each side frame band.
    pub side_frame_thickness: u32,
    /// Handle resize target width.
    pub handle_width: u32,
    /// Handle resize target height.
    pub handle_height: u32,
    /// Gap between a handle and the right edge of its cell.
    pub handle_margin: u32,
    /// Frame label font size in pixels.
    pub frame_font_size: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            cell_width: 100,
            total_height: 800,
            control_panel_top: 200,
            control_panel_height: 240,
            top_frame_thickness: 80,
            side_frame_thickness: 30,
            handle_width: 12,
            handle_height: 48,
            handle_margin: 10,
            frame_font_size: 36,
        }
    }
}

impl LayoutMetrics {
    pub fn validate(&self) -> LockerResult<()> {
        if self.cell_width == 0 || self.total_height == 0 {
            return Err(LockerError::settings(
                "cell_width and total_height must be > 0",
            ));
        }
        if self.control_panel_top == 0 || self.control_panel_height == 0 {
            return Err(LockerError::settings(
                "control panel slot must have a non-zero top offset and height",
            ));
        }
        let slot_end = self
            .control_panel_top
            .saturating_add(self.control_panel_height);
        if slot_end >= self.total_height {
            return Err(LockerError::settings(format!(
                "control panel slot {}..{slot_end} must end above total_height {}",
                self.control_panel_top, self.total_height
            )));
        }
        if self.handle_width == 0 || self.handle_height == 0 {
            return Err(LockerError::settings("handle size must be > 0"));
        }
        if self.handle_width.saturating_add(self.handle_margin) > self.cell_width {
            return Err(LockerError::settings(
                "handle_width + handle_margin must fit inside cell_width",
            ));
        }
        if self.frame_font_size == 0 {
            return Err(LockerError::settings("frame_font_size must be > 0"));
        }
        // Every later coordinate is bounded by the widest, tallest canvas.
        let max_width = self
            .cell_width
            .checked_mul(MAX_COLUMNS)
            .and_then(|w| w.checked_add(1))
            .and_then(|w| w.checked_add(self.side_frame_thickness.checked_mul(2)?));
        let max_height = self
            .total_height
            .checked_add(1)
            .and_then(|h| h.checked_add(self.top_frame_thickness));
        if max_width.is_none() || max_height.is_none() {
            return Err(LockerError::settings(format!(
                "canvas for {MAX_COLUMNS} framed columns overflows u32 pixel coordinates"
            )));
        }
        Ok(())
    }

    /// Top band thickness actually applied for `frame` (zero when the edge is disabled).
    pub fn top_inset(&self, frame: FrameType) -> u32 {
        if frame.has_top() {
            self.top_frame_thickness
        } else {
            0
        }
    }

    /// Side band thickness actually applied for `frame` (zero when the edges are disabled).
    pub fn side_inset(&self, frame: FrameType) -> u32 {
        if frame.has_sides() {
            self.side_frame_thickness
        } else {
            0
        }
    }

    /// Width of the locker body excluding the closing grid line.
    pub fn body_width(&self, columns: u32) -> u32 {
        columns * self.cell_width
    }

    /// Output raster size. The extra row and column hold the closing bottom/right grid line.
    pub fn canvas_size(&self, columns: u32, frame: FrameType) -> CanvasSize {
        CanvasSize {
            width: self.body_width(columns) + 1 + 2 * self.side_inset(frame),
            height: self.total_height + 1 + self.top_inset(frame),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_frame_label() -> String {
    "SMART LOCKER".to_string()
}

fn default_font_families() -> Vec<String> {
    ["Noto Sans CJK JP", "Noto Sans", "DejaVu Sans", "Arial"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Process-level engine settings. Loaded once, shared by every render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Fixed geometry.
    pub metrics: LayoutMetrics,
    /// Directory holding `cell.png`, `handle.png`, `control_panel.png` and `fonts/`.
    pub asset_dir: PathBuf,
    /// Frame label used when the request carries no `frameText`.
    pub frame_label: String,
    /// System font families tried, in order, after registered fonts.
    pub font_families: Vec<String>,
    /// Canvas background.
    pub background: Rgb8,
    /// Grid line color.
    pub grid_line: Rgb8,
    /// Flat cell color used by the fallback renderer.
    pub fallback_cell: Rgb8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            asset_dir: default_asset_dir(),
            frame_label: default_frame_label(),
            font_families: default_font_families(),
            background: Rgb8::WHITE,
            grid_line: Rgb8::new(40, 40, 40),
            fallback_cell: Rgb8::new(217, 217, 217),
        }
    }
}

impl RenderSettings {
    /// Read settings JSON from `path`. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> LockerResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| LockerError::settings(format!("parse '{}': {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply [`ASSET_DIR_ENV`] if set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(ASSET_DIR_ENV).filter(|v| !v.is_empty()) {
            self.asset_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn validate(&self) -> LockerResult<()> {
        self.metrics.validate()?;
        if self.frame_label.trim().is_empty() {
            return Err(LockerError::settings("frame_label must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
