use super::*;
use crate::animation::pledge::AnimationPhase;
use crate::assets::sprite::NoSprites;
use crate::foundation::core::{Canvas, Rect};
use crate::render::plan::{Layer, LayerKind};

fn close(a: Rgba8, b: Rgba8, tol: i16) -> bool {
    [(a.r, b.r), (a.g, b.g), (a.b, b.b), (a.a, b.a)]
        .iter()
        .all(|&(x, y)| (i16::from(x) - i16::from(y)).abs() <= tol)
}

fn scene(ops: Vec<DrawOp>) -> Scene {
    Scene {
        canvas: Canvas::new(16, 8).unwrap(),
        layers: vec![Layer {
            kind: LayerKind::Soil,
            ops,
        }],
        slots: Vec::new(),
        progress_text: String::new(),
        phase: AnimationPhase::Idle,
    }
}

struct OneSprite(SpriteImage);

impl SpriteSource for OneSprite {
    fn sprite(&self, sprite: Sprite) -> Option<&SpriteImage> {
        (sprite == Sprite::Carrot).then_some(&self.0)
    }
}

#[test]
fn empty_scene_is_transparent_unless_cleared() {
    let mut be = CpuBackend::new(CpuBackendOpts::default());
    let frame = be.render_scene(&scene(Vec::new()), &NoSprites).unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|b| *b == 0));

    let mut be = CpuBackend::new(CpuBackendOpts::default().with_clear_rgba(Some([1, 2, 3, 255])));
    let frame = be.render_scene(&scene(Vec::new()), &NoSprites).unwrap();
    assert_eq!(frame.pixel(5, 5), Some(Rgba8 { r: 1, g: 2, b: 3, a: 255 }));
}

#[test]
fn fill_covers_its_path() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((8.0, 0.0));
    path.line_to((8.0, 8.0));
    path.line_to((0.0, 8.0));
    path.close_path();
    let red = Rgba8::hex(0xFF0000);
    let mut be = CpuBackend::new(CpuBackendOpts::default());
    let frame = be
        .render_scene(&scene(vec![DrawOp::Fill { path, color: red }]), &NoSprites)
        .unwrap();
    assert!(close(frame.pixel(4, 4).unwrap(), red, 1));
    assert_eq!(frame.pixel(12, 4).map(|p| p.a), Some(0));
}

#[test]
fn gradient_runs_top_to_bottom() {
    let top = Rgba8::hex(0x000000);
    let bottom = Rgba8::hex(0xFFFFFF);
    let mut be = CpuBackend::new(CpuBackendOpts::default());
    let op = DrawOp::LinearGradient {
        rect: Rect::new(0.0, 0.0, 16.0, 8.0),
        top,
        bottom,
    };
    let frame = be.render_scene(&scene(vec![op]), &NoSprites).unwrap();
    let first = frame.pixel(8, 0).unwrap();
    let last = frame.pixel(8, 7).unwrap();
    assert_eq!(first.a, 255);
    assert!(first.r < 60, "{first:?}");
    assert!(last.r > 195, "{last:?}");
    assert!(close(frame.pixel(0, 4).unwrap(), frame.pixel(15, 4).unwrap(), 2));
}

#[test]
fn sprites_are_drawn_only_once_loaded() {
    let green = SpriteImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new([0, 255, 0, 255].repeat(4)),
    };
    let op = DrawOp::Image {
        sprite: Sprite::Carrot,
        transform: Affine::translate((4.0, 0.0)),
        size: Vec2::new(8.0, 8.0),
    };
    let mut be = CpuBackend::new(CpuBackendOpts::default());

    let frame = be.render_scene(&scene(vec![op.clone()]), &NoSprites).unwrap();
    assert_eq!(frame.pixel(8, 4).map(|p| p.a), Some(0));

    let frame = be
        .render_scene(&scene(vec![op]), &OneSprite(green))
        .unwrap();
    assert!(close(frame.pixel(8, 4).unwrap(), Rgba8::hex(0x00FF00), 2));
    assert_eq!(frame.pixel(1, 4).map(|p| p.a), Some(0));
}

#[test]
fn missing_font_skips_caption() {
    let op = DrawOp::Text {
        text: "50.0% Grown".to_owned(),
        anchor: Point::new(8.0, 6.0),
        size_px: 6.0,
        fill: Rgba8::hex(0xFFFFFF),
        outline: Rgba8::hex(0x2E7D32),
        outline_px: 4.0,
    };
    let mut be = CpuBackend::new(CpuBackendOpts::default());
    let frame = be.render_scene(&scene(vec![op]), &NoSprites).unwrap();
    assert!(frame.data.iter().all(|b| *b == 0));
}
