use std::rc::Rc;

use super::*;
use crate::{
    effects::instance::Liveness,
    test_support::{TestHost, registry},
};

fn center() -> Point {
    Point::new(100.0, 200.0)
}

#[test]
fn sparkle_draws_twelve_particles_in_range() {
    let b = BurstOverlay::new(BurstStyle::Sparkle, center(), "#fff", 680.0, 7);
    assert_eq!(b.particles().len(), 12);
    for p in b.particles() {
        assert!((36.0..84.0).contains(&p.reach));
        assert!((3.0..8.0).contains(&p.size));
    }
}

#[test]
fn same_seed_same_burst() {
    let a = BurstOverlay::new(BurstStyle::Fireworks, center(), "#fff", 800.0, 42);
    let b = BurstOverlay::new(BurstStyle::Fireworks, center(), "#fff", 800.0, 42);
    let c = BurstOverlay::new(BurstStyle::Fireworks, center(), "#fff", 800.0, 43);
    assert_eq!(a.particles(), b.particles());
    assert_ne!(a.particles(), c.particles());
}

#[test]
fn sparkle_particles_fly_out_and_fade() {
    let mut b = BurstOverlay::new(BurstStyle::Sparkle, center(), "#fff", 680.0, 1);
    for d in b.dots() {
        assert_eq!(d.center, center());
        assert_eq!(d.opacity, 1.0);
    }
    assert!(b.tick(680.0));
    for (d, p) in b.dots().iter().zip(b.particles()) {
        assert!(((d.center - center()).hypot() - p.reach).abs() < 1e-9);
        assert_eq!(d.opacity, 0.0);
        assert!((d.scale - 0.7).abs() < 1e-12);
    }
}

#[test]
fn fireworks_add_a_center_flash() {
    let b = BurstOverlay::new(BurstStyle::Fireworks, center(), "#fde68a", 800.0, 3);
    let dots = b.dots();
    assert_eq!(dots.len(), 17);
    assert_eq!(dots[0].size, 8.0);
    assert!((dots[0].opacity - 0.8).abs() < 1e-12);
    assert!((dots[0].scale - 2.5).abs() < 1e-12);
}

#[test]
fn rings_finish_after_the_last_delay() {
    let mut b = BurstOverlay::new(BurstStyle::Rings, center(), "#93c5fd", 700.0, 0);
    assert!(b.particles().is_empty());
    assert_eq!(b.total_ms(), 940.0);
    assert!(!b.tick(700.0));
    let dots = b.dots();
    assert_eq!(dots.len(), 3);
    assert!(dots.iter().all(|d| d.ring));
    assert_eq!(dots[0].opacity, 0.0);
    assert!(dots[2].opacity > 0.0);
    assert!(b.tick(240.0));
}

#[test]
fn render_is_input_transparent() {
    let b = BurstOverlay::new(BurstStyle::Sparkle, center(), "#fff", 680.0, 1);
    let el = b.render();
    assert_eq!(el.props.pointer_events, PointerEvents::None);
    assert_eq!(el.children.len(), 12);
    assert_eq!(el.children[3].key.as_deref(), Some("3"));
}

#[test]
fn launch_mounts_at_the_measured_center() {
    let host = TestHost::new();
    let registry = registry(&host);
    let source = NodeRef::new();
    host.mount(&source, 9, MeasuredBox::new(10.0, 20.0, 40.0, 60.0));
    let live = Rc::new(Liveness::default());

    launch(
        &registry,
        BurstStyle::Rings,
        "#93c5fd".to_string(),
        700.0,
        &source,
        PendingGuard::begin(&live),
    );
    let ids = registry.overlay_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(registry.overlay_kind(ids[0]), Some("rings"));
    let layer = registry.render_overlay(ids[0]);
    let first = layer.as_ref().map(|l| &l.children[0]);
    // Ring diameter 48 centred on (30, 50).
    assert_eq!(first.and_then(|d| d.attr("left")), Some(&6.0.into()));
}

#[test]
fn launch_without_a_mounted_source_does_nothing() {
    let host = TestHost::new();
    let registry = registry(&host);
    let live = Rc::new(Liveness::default());
    launch(
        &registry,
        BurstStyle::Sparkle,
        "#fff".to_string(),
        680.0,
        &NodeRef::new(),
        PendingGuard::begin(&live),
    );
    assert_eq!(registry.overlay_count(), 0);
    assert_eq!(live.pending(), 0);
}
