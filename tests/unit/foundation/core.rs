use super::*;

#[test]
fn canvas_rejects_empty_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(800, 400).unwrap();
    assert_eq!((c.w(), c.h()), (800.0, 400.0));
}

#[test]
fn hex_colors_decode_channels() {
    let sky = Rgba8::hex(0x87CEEB);
    assert_eq!((sky.r, sky.g, sky.b, sky.a), (0x87, 0xCE, 0xEB, 255));
}

#[test]
fn premul_scales_color_by_alpha() {
    let c = Rgba8::hex(0x8B4513).with_alpha(77);
    let [r, g, b, a] = c.premul();
    assert_eq!(a, 77);
    assert_eq!(r, ((0x8Bu16 * 77 + 127) / 255) as u8);
    assert_eq!(g, ((0x45u16 * 77 + 127) / 255) as u8);
    assert_eq!(b, ((0x13u16 * 77 + 127) / 255) as u8);
    assert_eq!(Rgba8::hex(0xFFFFFF).with_alpha(0).premul(), [0, 0, 0, 0]);
}

#[test]
fn lerp_hits_endpoints() {
    let a = Rgba8::hex(0x8B4513);
    let b = Rgba8::hex(0x654321);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
}

#[test]
fn frame_index_saturates() {
    assert_eq!(FrameIndex(3).next(), FrameIndex(4));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}
