use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{}", ease.name());
        assert_eq!(ease.apply(1.0), 1.0, "{}", ease.name());
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{}", ease.name());
        assert!(b < c, "{}", ease.name());
    }
}

#[test]
fn names_round_trip_and_accept_prefix() {
    for ease in Ease::ALL {
        assert_eq!(Ease::lookup(ease.name()), Some(ease));
    }
    assert_eq!(Ease::lookup("easeCubicOut"), Some(Ease::OutCubic));
    assert_eq!(Ease::lookup(" QUADINOUT "), Some(Ease::InOutQuad));
}

#[test]
fn unknown_names_fall_back_to_linear() {
    assert_eq!(Ease::lookup("bounce"), None);
    assert_eq!(Ease::from_name("bounce"), Ease::Linear);
}
