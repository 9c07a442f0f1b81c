use rayon::prelude::*;

use crate::{
    assets::store::AssetStore,
    config::{
        model::LayoutConfig, normalize::normalize_request, request::LockerRequest,
        settings::RenderSettings,
    },
    encode::png::{encode_base64, encode_png},
    foundation::error::{LockerError, LockerResult},
    layout::plan::LayoutPlan,
    render::{compositor::compose, fallback::render_fallback},
};

/// A finished raster, straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// `true` when a required template was unavailable and the minimal grid was drawn instead.
    pub degraded: bool,
}

/// Validate `req` and resolve its geometry without rendering.
pub fn plan_layout(req: &LockerRequest, settings: &RenderSettings) -> LockerResult<LayoutPlan> {
    let config = normalize_request(req, settings)?;
    LayoutPlan::build(&config, &settings.metrics)
}

/// Render a validated config.
///
/// Missing templates degrade to [`render_fallback`]; every other failure is returned.
pub fn render_config(
    config: &LayoutConfig,
    assets: &AssetStore,
    settings: &RenderSettings,
) -> LockerResult<RenderedImage> {
    let plan = LayoutPlan::build(config, &settings.metrics)?;
    tracing::debug!(
        width = plan.canvas.width,
        height = plan.canvas.height,
        tiers = ?plan.tiers.heights(),
        control_panel = ?plan.control_panel.as_ref().map(|cp| cp.asset),
        "layout resolved"
    );

    let (canvas, degraded) = match assets.require(config) {
        Ok(templates) => (compose(&plan, templates, assets, settings)?, false),
        Err(LockerError::AssetLoad(msg)) => {
            tracing::warn!(error = %msg, "template unavailable; drawing fallback grid");
            (render_fallback(config, settings)?, true)
        }
        Err(e) => return Err(e),
    };

    let (width, height) = (canvas.width(), canvas.height());
    Ok(RenderedImage {
        width,
        height,
        data: canvas.into_rgba8().into_raw(),
        degraded,
    })
}

/// Validate and render one request to raw pixels.
#[tracing::instrument(skip_all, fields(columns = ?req.columns, tiers = ?req.tiers))]
pub fn render_locker_image(
    req: &LockerRequest,
    assets: &AssetStore,
    settings: &RenderSettings,
) -> LockerResult<RenderedImage> {
    let config = normalize_request(req, settings)?;
    render_config(&config, assets, settings)
}

/// Validate and render one request to PNG bytes.
pub fn render_locker_grid(
    req: &LockerRequest,
    assets: &AssetStore,
    settings: &RenderSettings,
) -> LockerResult<Vec<u8>> {
    let img = render_locker_image(req, assets, settings)?;
    encode_png(img.width, img.height, &img.data)
}

/// [`render_locker_grid`], then standard base64 with padding.
pub fn render_locker_grid_base64(
    req: &LockerRequest,
    assets: &AssetStore,
    settings: &RenderSettings,
) -> LockerResult<String> {
    render_locker_grid(req, assets, settings).map(|png| encode_base64(&png))
}

/// Render independent requests on the global rayon pool. Results keep input order.
#[tracing::instrument(skip_all, fields(requests = reqs.len()))]
pub fn render_batch(
    reqs: &[LockerRequest],
    assets: &AssetStore,
    settings: &RenderSettings,
) -> Vec<LockerResult<Vec<u8>>> {
    reqs.par_iter()
        .map(|req| render_locker_grid(req, assets, settings))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
