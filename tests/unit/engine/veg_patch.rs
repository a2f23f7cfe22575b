use super::*;
use crate::render::plan::LayerKind;

fn engine(total: u64, goal: u64) -> VegPatch {
    let cfg = PatchConfig {
        initial_total: total,
        goal,
        ..PatchConfig::default()
    };
    VegPatch::new(&cfg).unwrap()
}

#[test]
fn new_rejects_zero_goal() {
    let cfg = PatchConfig {
        goal: 0,
        ..PatchConfig::default()
    };
    assert!(VegPatch::new(&cfg).is_err());
}

#[test]
fn init_grows_display_toward_initial_total() {
    let mut p = engine(50_000, 100_000);
    assert_eq!(p.progress().display_percentage(), 0.0);
    assert!(p.is_settled());

    p.init();
    assert!(p.is_tweening());
    let first = p.tick();
    assert!(first.repaint && first.wants_more);
    assert!(p.progress().display_percentage() > 0.0);

    p.run_until_settled(1_000);
    assert!(p.is_settled());
    assert_eq!(p.progress().display_percentage(), 50.0);
    assert_eq!(p.compose().slots.len(), 18);

    let idle = p.tick();
    assert_eq!(idle, Tick::default());
}

#[test]
fn tween_is_suspended_while_a_pledge_animates() {
    let mut p = engine(0, 100);
    p.init();
    p.update(80, 100).unwrap();
    p.queue_pledge_animation(5).unwrap();
    assert!(!p.is_tweening());
    assert_eq!(p.in_flight_tokens(), 5);

    let display = p.progress().display_percentage();
    while !p.phase().is_idle() {
        p.tick();
        if !p.phase().is_idle() {
            assert_eq!(p.progress().display_percentage(), display);
        }
    }
    assert_eq!(p.progress().total(), 85);
    assert!(p.is_tweening());
}

#[test]
fn completion_reports_committed_tokens_once() {
    let mut p = engine(0, 100_000);
    p.queue_pledge_animation(12).unwrap();
    let committed: Vec<u64> = (0..400).filter_map(|_| p.tick().committed).collect();
    assert_eq!(committed, vec![12]);
    assert_eq!(p.state().submissions, 1);
    assert_eq!(p.summary().tokens_to_goal, 100_000 - 12);
}

#[test]
fn rejected_awards_do_not_touch_the_queue() {
    let mut p = engine(10, 100);
    assert!(p.queue_pledge_animation(0).is_err());
    assert!(p.queue_pledge_animation(-2).is_err());
    assert!(p.phase().is_idle());
    assert_eq!(p.pending_events(), 0);
    assert_eq!(p.progress().total(), 10);
}

#[test]
fn animating_frames_carry_the_pledge_layer() {
    let mut p = engine(0, 100);
    p.queue_pledge_animation(1).unwrap();
    p.tick();
    let scene = p.compose();
    assert!(scene.has_layer(LayerKind::PledgeAnimation));
    assert!(!scene.has_layer(LayerKind::WateringCan));
    assert_eq!(p.frame(), FrameIndex(1));
}

#[test]
fn pending_sprite_loads_keep_the_loop_running() {
    use crate::assets::sprite::{Sprite, SpriteImage};
    use std::sync::{Arc, mpsc};

    let (tx, rx) = mpsc::channel();
    let mut p = engine(0, 100).with_sprites(SpriteStore::from_channel(rx, 1));
    p.run_until_settled(50);
    assert!(!p.is_settled());
    assert!(p.sprites().is_loading());

    let tick = p.tick();
    assert!(!tick.repaint);
    assert!(tick.wants_more);

    let img = SpriteImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255]),
    };
    tx.send((Sprite::Carrot, Ok(img))).unwrap();
    let tick = p.tick();
    assert!(tick.repaint);
    assert!(!tick.wants_more);
    assert!(p.is_settled());
    assert_eq!(p.sprites().loaded(), 1);
}
