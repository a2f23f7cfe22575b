use super::*;

fn event(tokens: i64) -> PledgeEvent {
    PledgeEvent::new(tokens).unwrap()
}

#[test]
fn idle_machine_does_nothing() {
    let mut m = PledgeAnimator::default();
    assert!(m.is_idle());
    assert_eq!(m.advance(), PhaseStep::Idle);
    assert_eq!(m.phase().progress(), 0.0);
}

#[test]
fn phases_run_in_order_and_complete_once() {
    let mut m = PledgeAnimator::default();
    m.start(event(7)).unwrap();
    assert_eq!(m.current_tokens(), Some(7));

    let mut seen = vec![m.phase().name()];
    let mut completed = None;
    for _ in 0..1000 {
        match m.advance() {
            PhaseStep::Advanced => {
                let name = m.phase().name();
                if seen.last() != Some(&name) {
                    seen.push(name);
                }
            }
            PhaseStep::Completed(ev) => {
                completed = Some(ev);
                break;
            }
            PhaseStep::Idle => panic!("went idle without completing"),
        }
    }

    assert_eq!(seen, vec!["seed_falling", "seed_planting", "watering"]);
    assert_eq!(completed.map(|e| e.tokens_awarded), Some(7));
    assert!(m.is_idle());
    assert_eq!(m.current_tokens(), None);
    assert_eq!(m.advance(), PhaseStep::Idle);
}

#[test]
fn counter_is_monotonic_within_each_phase() {
    let mut m = PledgeAnimator::default();
    m.start(event(1)).unwrap();
    let mut last = m.phase();
    while let PhaseStep::Advanced = m.advance() {
        let now = m.phase();
        assert!(now.progress() > last.progress(), "{last:?} -> {now:?}");
        match now {
            AnimationPhase::SeedFalling { t } => assert!((0.0..PLANT_START).contains(&t)),
            AnimationPhase::SeedPlanting { t } => assert!((PLANT_START..PLANT_END).contains(&t)),
            AnimationPhase::Watering { t } => assert!((WATER_START..WATER_END).contains(&t)),
            AnimationPhase::Idle => unreachable!(),
        }
        last = now;
    }
}

#[test]
fn running_animation_cannot_be_restarted() {
    let mut m = PledgeAnimator::default();
    m.start(event(3)).unwrap();
    m.advance();
    assert!(m.start(event(4)).is_err());
    assert_eq!(m.current_tokens(), Some(3));
}

#[test]
fn frame_count_is_fixed_per_event() {
    let count = |tokens| {
        let mut m = PledgeAnimator::default();
        m.start(event(tokens)).unwrap();
        let mut frames = 0;
        while let PhaseStep::Advanced = m.advance() {
            frames += 1;
        }
        frames
    };
    assert_eq!(count(1), count(500));
    assert!(count(1) > 100);
}
