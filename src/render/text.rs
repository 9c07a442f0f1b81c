use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{LockerError, LockerResult};

/// Rasterized frame label: premultiplied RGBA8, `width x height`.
#[derive(Clone, Debug)]
pub struct LabelRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Parameters for [`render_label`].
#[derive(Clone, Debug)]
pub struct LabelStyle<'a> {
    pub font_size: u32,
    pub color: Rgb8,
    /// Families tried in order; a generic `sans-serif` is always appended.
    pub families: &'a [String],
}

/// Render `text` centered in a `width x height` sub-canvas.
///
/// Fails when no font in `fontdb` can shape the text; callers are expected to skip the label
/// rather than fail the render.
pub fn render_label(
    text: &str,
    width: u32,
    height: u32,
    style: &LabelStyle<'_>,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> LockerResult<LabelRaster> {
    if width == 0 || height == 0 {
        return Err(LockerError::text_render("label area is empty"));
    }
    if fontdb.is_empty() {
        return Err(LockerError::text_render("no fonts available"));
    }

    // Keep glyphs inside the band even when the configured size is larger.
    let size = style.font_size.min(height * 7 / 10).max(1);
    let svg = label_svg(text, width, height, size, style.color, style.families);

    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .map_err(|e| LockerError::text_render(format!("parse label svg: {e}")))?;
    if count_text_nodes(tree.root()) == 0 {
        return Err(LockerError::text_render(format!(
            "no font could shape label \"{text}\""
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LockerError::text_render("failed to allocate label pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(LabelRaster {
        width,
        height,
        data: pixmap.take(),
    })
}

fn label_svg(
    text: &str,
    width: u32,
    height: u32,
    size: u32,
    color: Rgb8,
    families: &[String],
) -> String {
    let mut family_list = String::new();
    for f in families {
        family_list.push_str(&format!("'{}', ", escape_xml(f)));
    }
    family_list.push_str("sans-serif");

    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central" "#,
            r#"font-family="{fam}" font-size="{size}" font-weight="bold" fill="{fill}">{text}</text>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        cx = f64::from(width) / 2.0,
        cy = f64::from(height) / 2.0,
        fam = family_list,
        size = size,
        fill = color.to_hex(),
        text = escape_xml(text),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn count_text_nodes(group: &usvg::Group) -> usize {
    let mut n = 0usize;
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => n += count_text_nodes(g.as_ref()),
            usvg::Node::Text(_) => n += 1,
            usvg::Node::Path(_) | usvg::Node::Image(_) => {}
        }
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
