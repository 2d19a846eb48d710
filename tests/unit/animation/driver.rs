use super::*;
use crate::animation::ease::Ease;

#[test]
fn untouched_props_sit_at_rest() {
    let d = Driver::new();
    assert_eq!(d.value(Prop::Scale), 1.0);
    assert_eq!(d.value(Prop::TranslateX), 0.0);
    assert_eq!(d.value(Prop::RippleScale), 0.01);
    assert!(d.is_idle());
}

#[test]
fn timing_segments_run_in_declared_order() {
    let mut d = Driver::new();
    d.run(
        Prop::TranslateX,
        [
            Segment::timing_eased(-4.0, 60.0, Ease::Linear),
            Segment::timing_eased(4.0, 120.0, Ease::Linear),
            Segment::timing_eased(0.0, 80.0, Ease::Linear),
        ],
    );
    d.tick(30.0);
    assert!((d.value(Prop::TranslateX) + 2.0).abs() < 1e-9);
    d.tick(30.0);
    assert_eq!(d.value(Prop::TranslateX), -4.0);
    d.tick(60.0);
    assert!(d.value(Prop::TranslateX).abs() < 1e-9);
    d.tick(60.0);
    assert_eq!(d.value(Prop::TranslateX), 4.0);
    d.tick(80.0);
    assert_eq!(d.value(Prop::TranslateX), 0.0);
    assert!(d.is_idle());
}

#[test]
fn one_large_tick_crosses_segment_boundaries() {
    let mut d = Driver::new();
    d.run(
        Prop::Scale,
        [Segment::timing(1.2, 100.0), Segment::timing(1.0, 100.0)],
    );
    d.tick(150.0);
    let v = d.value(Prop::Scale);
    assert!(v > 1.0 && v < 1.2, "{v}");
    d.tick(1_000.0);
    assert_eq!(d.value(Prop::Scale), 1.0);
    assert!(d.is_idle());
}

#[test]
fn leading_jump_applies_without_a_tick() {
    let mut d = Driver::new();
    d.run(
        Prop::RippleOpacity,
        [Segment::jump(0.18), Segment::timing(0.0, 450.0)],
    );
    assert_eq!(d.value(Prop::RippleOpacity), 0.18);
    assert!(d.is_running(Prop::RippleOpacity));
}

#[test]
fn wait_holds_the_value() {
    let mut d = Driver::new();
    d.run(
        Prop::Opacity,
        [Segment::wait(100.0), Segment::jump(0.5)],
    );
    d.tick(99.0);
    assert_eq!(d.value(Prop::Opacity), 1.0);
    d.tick(1.0);
    assert_eq!(d.value(Prop::Opacity), 0.5);
}

#[test]
fn spring_settles_and_finishes() {
    let mut d = Driver::new();
    d.run(Prop::Scale, [Segment::spring(0.94, SpringConfig::new(20.0, 280.0))]);
    for _ in 0..200 {
        d.tick(16.0);
    }
    assert_eq!(d.value(Prop::Scale), 0.94);
    assert!(d.is_idle());
}

#[test]
fn capped_spring_hands_over() {
    let mut d = Driver::new();
    d.run(
        Prop::TranslateX,
        [
            Segment::spring_for(100.0, SpringConfig::new(3.0, 50.0), 400.0),
            Segment::jump(-1.0),
        ],
    );
    d.tick(399.0);
    assert!(d.is_running(Prop::TranslateX));
    assert_ne!(d.value(Prop::TranslateX), -1.0);
    d.tick(1.0);
    assert_eq!(d.value(Prop::TranslateX), -1.0);
    assert!(d.is_idle());
}

#[test]
fn rerun_replaces_from_current_value() {
    let mut d = Driver::new();
    d.run(Prop::Scale, [Segment::timing_eased(2.0, 100.0, Ease::Linear)]);
    d.tick(50.0);
    assert!((d.value(Prop::Scale) - 1.5).abs() < 1e-9);
    d.run(Prop::Scale, [Segment::timing_eased(1.0, 100.0, Ease::Linear)]);
    d.tick(50.0);
    assert!((d.value(Prop::Scale) - 1.25).abs() < 1e-9);
}

#[test]
fn stop_cancels_everything() {
    let mut d = Driver::new();
    d.run(Prop::Scale, [Segment::timing(2.0, 100.0)]);
    d.run(Prop::Opacity, [Segment::timing(0.0, 100.0)]);
    d.tick(10.0);
    let frozen = d.value(Prop::Scale);
    d.stop();
    assert!(d.is_idle());
    d.tick(100.0);
    assert_eq!(d.value(Prop::Scale), frozen);
}

#[test]
fn zero_and_bad_durations_complete_immediately() {
    let mut d = Driver::new();
    d.run(
        Prop::Rotate,
        [
            Segment::timing(90.0, 0.0),
            Segment::timing(45.0, f64::NAN),
            Segment::wait(-5.0),
        ],
    );
    assert_eq!(d.value(Prop::Rotate), 45.0);
    assert!(d.is_idle());
}

#[test]
fn set_cancels_the_props_queue() {
    let mut d = Driver::new();
    d.run(Prop::RotateY, [Segment::timing(360.0, 800.0)]);
    d.set(Prop::RotateY, 0.0);
    assert!(!d.is_running(Prop::RotateY));
    d.tick(100.0);
    assert_eq!(d.value(Prop::RotateY), 0.0);
}
