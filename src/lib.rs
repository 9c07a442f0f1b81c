//! Lockergrid turns a compact locker-bank configuration into a raster preview.
//!
//! The pipeline is a pure function of its inputs:
//!
//! - Normalize a raw [`LockerRequest`] into a canonical [`LayoutConfig`]
//! - Resolve pixel geometry into a [`LayoutPlan`] (tier heights, control-panel slot, grid lines)
//! - Composite templates from an [`AssetStore`] onto a [`Canvas`] and encode PNG
//!
//! Missing templates degrade to a flat fallback grid. Only invalid input, invalid settings and
//! encoding failures reach the caller.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod render;

pub use crate::foundation::core::{CanvasSize, PixelSpan, Rgb8};
pub use crate::foundation::error::{ConfigViolations, FieldViolation, LockerError, LockerResult};

pub use crate::config::model::{
    DEFAULT_CONTROL_PANEL_TIER_SPAN, FrameType, LayoutConfig, LockerColor, MAX_COLUMNS,
    MAX_CUSTOM_RATIO, MAX_FRAME_TEXT_CHARS, MAX_TIERS, MIN_COLUMNS, MIN_CUSTOM_RATIO, MIN_TIERS,
    NamedColor, TierHeightMode,
};
pub use crate::config::normalize::{DEFAULT_CUSTOM_COLOR, normalize_request};
pub use crate::config::request::LockerRequest;
pub use crate::config::settings::{ASSET_DIR_ENV, LayoutMetrics, RenderSettings};

pub use crate::layout::control_panel::ControlPanelPlacement;
pub use crate::layout::grid::{GridGeometry, GridPlan, HLine, VLine};
pub use crate::layout::plan::{CellKind, CellRect, LayoutPlan};
pub use crate::layout::tiers::TierHeightPlan;

pub use crate::assets::decode::decode_template;
pub use crate::assets::store::{AssetStore, FONT_DIR, TemplateKind, Templates};
pub use crate::assets::tint::{average_color, tint_template};

pub use crate::render::canvas::Canvas;
pub use crate::render::compositor::compose;
pub use crate::render::fallback::render_fallback;
pub use crate::render::text::{LabelRaster, LabelStyle, render_label};

pub use crate::encode::png::{encode_base64, encode_png};

pub use crate::pipeline::{
    RenderedImage, plan_layout, render_batch, render_config, render_locker_grid,
    render_locker_grid_base64, render_locker_image,
};
