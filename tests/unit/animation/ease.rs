use super::*;

const ALL: [Ease; 9] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::OutExpo,
];

#[test]
fn endpoints_are_fixed() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for e in ALL {
        assert_eq!(e.apply(-3.0), e.apply(0.0));
        assert_eq!(e.apply(7.0), e.apply(1.0));
    }
}

#[test]
fn curves_are_monotonic() {
    for e in ALL {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(i as f64 / 100.0);
            assert!(v + 1e-12 >= prev, "{e:?} dipped at step {i}");
            prev = v;
        }
    }
}

#[test]
fn symmetric_curves_hit_half_at_midpoint() {
    for e in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine, Ease::Linear] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-9, "{e:?}");
    }
}
