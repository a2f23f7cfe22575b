use super::*;

const ALL: [Ease; 2] = [Ease::InQuad, Ease::OutQuad];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-2.0), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn falling_seed_accelerates_and_tilt_decelerates() {
    assert!(Ease::InQuad.apply(0.5) < 0.5);
    assert!(Ease::OutQuad.apply(0.5) > 0.5);
}

#[test]
fn between_maps_subrange() {
    assert_eq!(Ease::InQuad.between(4.0, 3.5, 4.5), 0.25);
    assert_eq!(Ease::OutQuad.between(1.0, 2.0, 2.0), 0.0);
    assert_eq!(Ease::OutQuad.between(2.0, 2.0, 2.0), 1.0);
}
