use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::sprite::{Sprite, SpriteImage, SpriteSource};
use crate::assets::text::{FontBytes, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{Affine, BezPath, Point, Rgba8, Vec2};
use crate::foundation::error::{PatchError, PatchResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::{DrawOp, Scene};

/// Options for the CPU backend.
#[derive(Debug, Clone, Default)]
pub struct CpuBackendOpts {
    /// Font used for the caption. Without one the caption is skipped.
    pub font: Option<FontBytes>,
    /// If set, the frame is cleared to this premultiplied RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
}

impl CpuBackendOpts {
    /// Return options with a caption font.
    pub fn with_font(mut self, font: Option<FontBytes>) -> Self {
        self.font = font;
        self
    }

    /// Return options with a configured clear color.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    top: Rgba8,
    bottom: Rgba8,
    h: u32,
}

struct SpritePaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

struct CaptionFont {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
    sprite_cache: HashMap<Sprite, SpritePaint>,
    caption: Option<CaptionFont>,
    warned_no_font: bool,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("has_font", &self.caption.is_some())
            .field("cached_sprites", &self.sprite_cache.len())
            .field("cached_gradients", &self.gradient_cache.len())
            .finish()
    }
}

impl CpuBackend {
    /// Construct a backend.
    pub fn new(opts: CpuBackendOpts) -> Self {
        let caption = opts.font.clone().map(|font| {
            let data = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font.as_slice().to_vec()),
                0,
            );
            CaptionFont {
                engine: TextLayoutEngine::new(font),
                font: data,
            }
        });
        Self {
            opts,
            ctx: None,
            gradient_cache: HashMap::new(),
            sprite_cache: HashMap::new(),
            caption,
            warned_no_font: false,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PatchResult<R>,
    ) -> PatchResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        sprites: &dyn SpriteSource,
    ) -> PatchResult<()> {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Fill { path, color } => {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::LinearGradient { rect, top, bottom } => {
                let (w, h) = (rect.width(), rect.height());
                if w <= 0.0 || h <= 0.0 {
                    return Ok(());
                }
                let img = self.gradient_paint(*top, *bottom, h.ceil() as u32)?;
                // One-pixel-wide strip stretched horizontally.
                ctx.set_transform(affine_to_cpu(
                    Affine::translate((rect.x0, rect.y0)) * Affine::scale_non_uniform(w, 1.0),
                ));
                ctx.set_paint(img);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 1.0, h.ceil()));
                Ok(())
            }
            DrawOp::Image {
                sprite,
                transform,
                size,
            } => {
                let Some(image) = sprites.sprite(*sprite) else {
                    return Ok(());
                };
                if image.width == 0 || image.height == 0 {
                    return Ok(());
                }
                let p = self.sprite_paint(*sprite, image)?;
                let (pw, ph) = (f64::from(p.w), f64::from(p.h));
                let fit = Affine::scale_non_uniform(size.x / pw, size.y / ph);
                ctx.set_transform(affine_to_cpu(*transform * fit));
                ctx.set_paint(p.paint.clone());
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, pw, ph));
                Ok(())
            }
            DrawOp::Text {
                text,
                anchor,
                size_px,
                fill,
                outline,
                outline_px,
            } => self.draw_caption(ctx, text, *anchor, *size_px, *fill, *outline, *outline_px),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_caption(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        size_px: f32,
        fill: Rgba8,
        outline: Rgba8,
        outline_px: f64,
    ) -> PatchResult<()> {
        let Some(caption) = self.caption.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!("no caption font available; progress text is not drawn");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = caption
            .engine
            .layout_line(text, size_px, TextBrushRgba8::from(fill))?;
        let baseline = layout
            .lines()
            .next()
            .map(|l| f64::from(l.metrics().baseline))
            .unwrap_or(0.0);
        let origin = Vec2::new(
            anchor.x - f64::from(layout.width()) / 2.0,
            anchor.y - baseline,
        );

        let r = outline_px / 2.0;
        let mut passes: Vec<(Vec2, Rgba8)> = (0..8)
            .map(|i| {
                let d = Vec2::from_angle(std::f64::consts::TAU * f64::from(i) / 8.0) * r;
                (d, outline)
            })
            .collect();
        passes.push((Vec2::ZERO, fill));

        for (offset, color) in passes {
            ctx.set_transform(affine_to_cpu(Affine::translate(origin + offset)));
            ctx.set_paint(color_to_cpu(color));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&caption.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }

    fn gradient_paint(&mut self, top: Rgba8, bottom: Rgba8, h: u32) -> PatchResult<vello_cpu::Image> {
        let h = h.max(1);
        let key = GradientKey { top, bottom, h };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let mut bytes = Vec::with_capacity(h as usize * 4);
        let h1 = f64::from(h - 1);
        for y in 0..h {
            let t = if h1 <= 0.0 { 0.0 } else { f64::from(y) / h1 };
            bytes.extend_from_slice(&top.lerp(bottom, t).premul());
        }
        let img = rgba_premul_to_image(&bytes, 1, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    fn sprite_paint(&mut self, sprite: Sprite, image: &SpriteImage) -> PatchResult<&SpritePaint> {
        let stale = self
            .sprite_cache
            .get(&sprite)
            .is_none_or(|p| !Arc::ptr_eq(&p.source, &image.rgba8_premul));
        if stale {
            let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
            self.sprite_cache.insert(
                sprite,
                SpritePaint {
                    source: image.rgba8_premul.clone(),
                    paint,
                    w: image.width,
                    h: image.height,
                },
            );
        }
        self.sprite_cache
            .get(&sprite)
            .ok_or_else(|| PatchError::render("sprite paint missing after insert"))
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        sprites: &dyn SpriteSource,
    ) -> PatchResult<FrameRGBA> {
        let width: u16 = scene
            .canvas
            .width
            .try_into()
            .map_err(|_| PatchError::render("canvas width exceeds u16"))?;
        let height: u16 = scene
            .canvas
            .height
            .try_into()
            .map_err(|_| PatchError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        if let Some(clear) = self.opts.clear_rgba {
            for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
                px.copy_from_slice(&clear);
            }
        }

        self.with_ctx_mut(width, height, |this, ctx| {
            for layer in &scene.layers {
                for op in &layer.ops {
                    this.draw_op(ctx, op, sprites)?;
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> PatchResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PatchError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PatchError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PatchError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> PatchResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
