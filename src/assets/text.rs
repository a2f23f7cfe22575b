use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PatchError, PatchResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Raw font file shared between layout and rasterisation.
#[derive(Clone, Debug)]
pub struct FontBytes(Arc<Vec<u8>>);

impl FontBytes {
    /// Read a TTF/OTF file.
    pub fn from_path(path: &Path) -> PatchResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        Self::from_vec(bytes)
    }

    /// Wrap in-memory font data.
    pub fn from_vec(bytes: Vec<u8>) -> PatchResult<Self> {
        if bytes.is_empty() {
            return Err(PatchError::asset("font file is empty"));
        }
        Ok(Self(Arc::new(bytes)))
    }

    /// First bold sans-serif face installed on the system, if any.
    pub fn system_sans() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let query = usvg::fontdb::Query {
            families: &[usvg::fontdb::Family::SansSerif],
            weight: usvg::fontdb::Weight::BOLD,
            ..Default::default()
        };
        let id = db.query(&query)?;
        let bytes = db.with_face_data(id, |data, _index| data.to_vec())?;
        tracing::debug!(faces = db.len(), "caption font resolved from system fonts");
        Self::from_vec(bytes).ok()
    }

    /// Borrow the bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// Stateful helper for shaping single-line captions with Parley.
pub(crate) struct TextLayoutEngine {
    font: FontBytes,
    family_name: Option<String>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: FontBytes) -> Self {
        Self {
            font,
            family_name: None,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    pub(crate) fn font(&self) -> &FontBytes {
        &self.font
    }

    fn family_name(&mut self) -> PatchResult<String> {
        if let Some(name) = &self.family_name {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(self.font.as_slice().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PatchError::asset("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PatchError::asset("registered font family has no name"))?
            .to_string();
        self.family_name = Some(name.clone());
        Ok(name)
    }

    /// Shape `text` on one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PatchResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PatchError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_name()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
