use std::rc::Rc;

use super::*;
use crate::{
    effects::instance::Liveness,
    element::node::Props,
    test_support::{TestHost, registry},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn boxes() -> (MeasuredBox, MeasuredBox) {
    (
        MeasuredBox::new(0.0, 500.0, 40.0, 40.0),
        MeasuredBox::new(300.0, 0.0, 24.0, 24.0),
    )
}

#[test]
fn control_points_follow_the_arc_rule() {
    let (s, e) = boxes();
    let path = FlyPath::new(s, e, 12.0);
    // Centers (20, 520) and (312, 12); |dy| = 508 so the lift is 228.6.
    let c = path.curve;
    assert_eq!(c.p0, Point::new(20.0, 520.0));
    assert_eq!(c.p3, Point::new(312.0, 12.0));
    assert!(close(path.lift(), 228.6));
    assert!(close(c.p1.x, 0.7 * 20.0 + 0.3 * 166.0));
    assert!(close(c.p1.y, 12.0 - 228.6));
    assert!(close(c.p2.x, 0.3 * 166.0 + 0.7 * 312.0));
    assert!(close(c.p2.y, 12.0 - 228.6 - 0.2 * 228.6));
}

#[test]
fn lift_never_drops_below_minimum() {
    let a = MeasuredBox::new(0.0, 100.0, 20.0, 20.0);
    let b = MeasuredBox::new(200.0, 110.0, 20.0, 20.0);
    let path = FlyPath::new(a, b, 12.0);
    assert!(close(path.lift(), MIN_LIFT));
    assert!(close(path.curve.p1.y, 110.0 - MIN_LIFT));
}

#[test]
fn tiny_boxes_are_sanitized() {
    let a = MeasuredBox::new(0.0, 0.0, 2.0, 0.0);
    let b = MeasuredBox::new(100.0, 100.0, 40.0, 40.0);
    let f = FlyPath::new(a, b, 12.0).sample(0.0);
    assert_eq!((f.width, f.height), (12.0, 12.0));
    assert_eq!(f.center, Point::new(6.0, 6.0));
}

#[test]
fn samples_interpolate_size_opacity_and_scale() {
    let (s, e) = boxes();
    let path = FlyPath::new(s, e, 12.0);

    let start = path.sample(0.0);
    assert_eq!(start.center, s.center());
    assert_eq!((start.opacity, start.scale), (1.0, 1.0));

    let end = path.sample(1.0);
    assert!(close(end.center.x, 312.0) && close(end.center.y, 12.0));
    assert!(close(end.opacity, 0.3) && close(end.scale, 0.6));
    assert_eq!((end.width, end.height), (24.0, 24.0));

    let mid = path.sample(0.5);
    assert_eq!(mid.width, 32.0);
    assert_eq!(path.sample(f64::NAN).t, 0.0);
    assert_eq!(path.sample(3.0).t, 1.0);
}

#[test]
fn frames_include_both_endpoints() {
    let (s, e) = boxes();
    let path = FlyPath::new(s, e, 12.0);
    let frames = path.frames(5);
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[0].t, 0.0);
    assert_eq!(frames[2].t, 0.5);
    assert_eq!(frames[4].t, 1.0);
    assert!(path.frames(0).is_empty());
    assert_eq!(path.frames(1).len(), 1);
}

#[test]
fn overlay_runs_for_its_duration() {
    let (s, e) = boxes();
    let mut overlay = FlyOverlay::new(Element::host("view"), FlyPath::new(s, e, 12.0), 400.0);
    assert_eq!(overlay.frame().t, 0.0);
    assert!(!overlay.tick(200.0));
    // In-out cubic is symmetric around the midpoint.
    assert!(close(overlay.frame().t, 0.5));
    assert!(overlay.tick(200.0));
    assert_eq!(overlay.frame().t, 1.0);
}

#[test]
fn overlay_renders_an_inert_ghost() {
    let (s, e) = boxes();
    let base = Element::host("button").with_props(Props::new().on_press(|_| {}));
    let overlay = FlyOverlay::new(base, FlyPath::new(s, e, 12.0), 100.0);
    let el = overlay.render();
    assert_eq!(el.props.pointer_events, PointerEvents::None);
    assert_eq!(el.attr("left"), Some(&0.0.into()));
    assert_eq!(el.attr("top"), Some(&500.0.into()));
    let ghost = &el.children[0];
    assert!(ghost.props.on_press.is_none());
    assert_eq!(ghost.props.pointer_events, PointerEvents::None);
}

struct Scene {
    host: Rc<TestHost>,
    registry: FxRegistry,
    source: NodeRef,
    live: Rc<Liveness>,
}

fn scene(with_target: bool) -> Scene {
    let host = TestHost::new();
    let registry = registry(&host);
    let source = NodeRef::new();
    host.mount(&source, 1, MeasuredBox::new(0.0, 500.0, 40.0, 40.0));
    if with_target {
        let cart = NodeRef::new();
        host.mount(&cart, 2, MeasuredBox::new(300.0, 0.0, 24.0, 24.0));
        registry.register_target("cart", cart);
    }
    Scene {
        host,
        registry,
        source,
        live: Rc::new(Liveness::default()),
    }
}

fn request(s: &Scene, arrival: Arrival) -> FlyRequest {
    FlyRequest {
        target: None,
        duration_ms: 650.0,
        arrival,
        ghost: Element::host("view"),
        source: s.source.clone(),
    }
}

#[test]
fn launch_mounts_a_flight_to_the_default_target() {
    let s = scene(true);
    launch(&s.registry, request(&s, Arrival::Quiet), PendingGuard::begin(&s.live));
    let ids = s.registry.overlay_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(s.registry.overlay_kind(ids[0]), Some("fly"));
    assert_eq!(s.live.pending(), 0);
}

#[test]
fn missing_target_is_a_no_op_for_fly() {
    let s = scene(false);
    launch(&s.registry, request(&s, Arrival::Quiet), PendingGuard::begin(&s.live));
    assert_eq!(s.registry.overlay_count(), 0);
}

#[test]
fn missing_target_toasts_for_cart() {
    let s = scene(false);
    launch(&s.registry, request(&s, Arrival::CartToast), PendingGuard::begin(&s.live));
    let ids = s.registry.overlay_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(s.registry.overlay_kind(ids[0]), Some("toast"));
    let rendered = s.registry.render_overlay(ids[0]).map(|e| e.outline());
    assert!(rendered.is_some_and(|o| o.contains("Adicionado ao carrinho")));
}

#[test]
fn failed_measurement_degrades() {
    let s = scene(false);
    let cart = NodeRef::new();
    s.host.mount_unmeasurable(&cart, 2);
    s.registry.register_target("cart", cart);
    assert!(s.registry.target_handle("cart").is_some());

    launch(&s.registry, request(&s, Arrival::Quiet), PendingGuard::begin(&s.live));
    assert_eq!(s.registry.overlay_count(), 0);
    launch(&s.registry, request(&s, Arrival::CartToast), PendingGuard::begin(&s.live));
    assert_eq!(s.registry.overlay_count(), 1);
}

#[test]
fn cart_flight_toasts_on_arrival() {
    let s = scene(true);
    launch(&s.registry, request(&s, Arrival::CartToast), PendingGuard::begin(&s.live));
    s.registry.tick(650.0);
    let ids = s.registry.overlay_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(s.registry.overlay_kind(ids[0]), Some("toast"));
}

#[test]
fn late_measurement_after_unmount_does_nothing() {
    let s = scene(true);
    s.host.defer();
    launch(&s.registry, request(&s, Arrival::CartToast), PendingGuard::begin(&s.live));
    assert_eq!(s.live.pending(), 1);
    assert_eq!(s.host.queued(), 2);

    drop(s.live);
    s.host.flush();
    assert_eq!(s.registry.overlay_count(), 0);
}

#[test]
fn late_measurement_after_teardown_does_nothing() {
    let s = scene(true);
    s.host.defer();
    launch(&s.registry, request(&s, Arrival::Quiet), PendingGuard::begin(&s.live));
    s.registry.teardown();
    s.host.flush();
    assert_eq!(s.registry.overlay_count(), 0);
    assert_eq!(s.live.pending(), 0);
}

#[test]
fn dropped_callbacks_release_the_pending_count() {
    let s = scene(true);
    s.host.defer();
    launch(&s.registry, request(&s, Arrival::Quiet), PendingGuard::begin(&s.live));
    assert_eq!(s.live.pending(), 1);
    s.host.forget();
    assert_eq!(s.live.pending(), 0);
}
