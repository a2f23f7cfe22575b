use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::sprite::SpriteImage;
use crate::foundation::error::{PatchError, PatchResult};

/// Largest raster edge produced from an SVG sprite.
const MAX_SVG_DIM: u32 = 2048;

/// Decode a PNG (or any format `image` recognises) into premultiplied RGBA8.
pub(crate) fn decode_image(bytes: &[u8]) -> PatchResult<SpriteImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(SpriteImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse an SVG document and rasterise it at its intrinsic size.
pub(crate) fn rasterize_svg(bytes: &[u8]) -> PatchResult<SpriteImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let to_px = |v: f32| -> PatchResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PatchError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).clamp(1, MAX_SVG_DIM))
    };
    let (width, height) = (to_px(size.width())?, to_px(size.height())?);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PatchError::asset("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Ok(SpriteImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

/// Read and decode a sprite file, choosing the decoder from its extension.
pub(crate) fn decode_sprite_file(path: &Path) -> PatchResult<SpriteImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        rasterize_svg(&bytes)
    } else {
        decode_image(&bytes)
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
