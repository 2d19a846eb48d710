use kurbo::ParamCurve as _;

use crate::{
    animation::{
        driver::{Driver, Prop},
        ease::Ease,
        segment::Segment,
    },
    effects::{instance::PendingGuard, reaction::Arrival},
    element::{
        host::measure_pair,
        node::{Element, PointerEvents, Props},
    },
    foundation::{
        core::{CubicBez, MeasuredBox, NodeRef, Point, Rect, Size},
        math::lerp,
    },
    registry::{
        context::FxRegistry,
        overlay::{FinishAction, OverlayNode},
    },
};

/// Smallest arc height above the higher of the two centers.
pub const MIN_LIFT: f64 = 72.0;

/// Arc from a source box to a target box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlyPath {
    pub start: MeasuredBox,
    pub end: MeasuredBox,
    pub curve: CubicBez,
}

/// Ghost placement at one point of the flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FlyFrame {
    pub t: f64,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl FlyFrame {
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Size::new(self.width, self.height))
    }
}

impl FlyPath {
    /// Both boxes are sanitized with `min_size` first.
    pub fn new(start: MeasuredBox, end: MeasuredBox, min_size: f64) -> Self {
        let start = start.sanitized_with(min_size);
        let end = end.sanitized_with(min_size);
        let s = start.center();
        let e = end.center();

        let mid_x = (s.x + e.x) / 2.0;
        let lift = MIN_LIFT.max((s.y - e.y).abs() * 0.45);
        let peak_y = s.y.min(e.y) - lift;
        let c1 = Point::new(0.7 * s.x + 0.3 * mid_x, peak_y);
        let c2 = Point::new(0.3 * mid_x + 0.7 * e.x, peak_y - 0.2 * lift);

        Self {
            start,
            end,
            curve: CubicBez::new(s, c1, c2, e),
        }
    }

    pub fn lift(&self) -> f64 {
        self.start.center().y.min(self.end.center().y) - self.curve.p1.y
    }

    pub fn sample(&self, t: f64) -> FlyFrame {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        FlyFrame {
            t,
            center: self.curve.eval(t),
            width: lerp(self.start.width, self.end.width, t),
            height: lerp(self.start.height, self.end.height, t),
            opacity: 1.0 - 0.7 * t,
            scale: 1.0 - 0.4 * t,
        }
    }

    /// `samples` frames evenly spaced over `[0, 1]`, endpoints included.
    pub fn frames(&self, samples: usize) -> Vec<FlyFrame> {
        match samples {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            n => (0..n)
                .map(|i| self.sample(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

/// Ghost moving along a [`FlyPath`].
#[derive(Debug)]
pub struct FlyOverlay {
    ghost: Element,
    path: FlyPath,
    driver: Driver,
    on_finish: Option<FinishAction>,
}

impl FlyOverlay {
    pub fn new(ghost: Element, path: FlyPath, duration_ms: f64) -> Self {
        let mut driver = Driver::new();
        driver.run(
            Prop::Progress,
            [Segment::timing_eased(1.0, duration_ms, Ease::InOutCubic)],
        );
        Self {
            ghost: ghost.ghost(),
            path,
            driver,
            on_finish: None,
        }
    }

    pub fn with_finish(mut self, action: FinishAction) -> Self {
        self.on_finish = Some(action);
        self
    }

    pub fn path(&self) -> &FlyPath {
        &self.path
    }

    pub fn frame(&self) -> FlyFrame {
        self.path.sample(self.driver.value(Prop::Progress))
    }

    pub(crate) fn tick(&mut self, dt_ms: f64) -> bool {
        self.driver.tick(dt_ms);
        self.driver.is_idle()
    }

    pub(crate) fn finish_action(&self) -> Option<&FinishAction> {
        self.on_finish.as_ref()
    }

    pub fn render(&self) -> Element {
        let f = self.frame();
        let props = Props::new()
            .attr("position", "absolute")
            .attr("left", f.center.x - f.width / 2.0)
            .attr("top", f.center.y - f.height / 2.0)
            .attr("width", f.width)
            .attr("height", f.height)
            .attr("opacity", f.opacity)
            .attr("scale", f.scale)
            .pointer_events(PointerEvents::None);
        Element::host("fx:fly")
            .with_props(props)
            .with_child(self.ghost.clone())
    }
}

/// Everything a fly trigger needs once its press handler has returned.
pub(crate) struct FlyRequest {
    pub target: Option<String>,
    pub duration_ms: f64,
    pub arrival: Arrival,
    pub ghost: Element,
    pub source: NodeRef,
}

fn fall_back(registry: &FxRegistry, arrival: Arrival) {
    if arrival == Arrival::CartToast {
        let toast = &registry.config().toast;
        registry.toast(toast.cart_fallback_text.clone(), toast.cart_duration_ms);
    }
}

/// Resolve both ends, measure them, and mount the flight. Degrades instead of failing.
pub(crate) fn launch(registry: &FxRegistry, req: FlyRequest, guard: PendingGuard) {
    let cfg = registry.config();
    let name = req
        .target
        .clone()
        .unwrap_or_else(|| cfg.default_target.clone());
    let host = registry.host();
    let source = req.source.current().and_then(|i| host.find_handle(i));
    let target = registry.target_handle(&name);

    let (Some(source), Some(target)) = (source, target) else {
        if cfg.dev_warnings {
            tracing::warn!(
                target_name = %name,
                source_mounted = source.is_some(),
                "fly target {name:?} not found; give the destination fxTarget=\"{name}\""
            );
        }
        fall_back(registry, req.arrival);
        return;
    };

    let weak = registry.downgrade();
    measure_pair(&*host, source, target, move |boxes| {
        if !guard.is_live() {
            return;
        }
        let Some(registry) = weak.upgrade() else {
            return;
        };
        let cfg = registry.config();
        let Some((start, end)) = boxes else {
            if cfg.dev_warnings {
                tracing::warn!(target_name = %name, "could not measure the views for fly");
            }
            fall_back(&registry, req.arrival);
            return;
        };

        let path = FlyPath::new(start, end, cfg.min_box_size);
        let mut overlay = FlyOverlay::new(req.ghost, path, req.duration_ms);
        if req.arrival == Arrival::CartToast {
            overlay = overlay.with_finish(FinishAction::Toast {
                text: cfg.toast.cart_added_text.clone(),
                duration_ms: cfg.toast.cart_duration_ms,
            });
        }
        registry.mount_overlay(OverlayNode::Fly(overlay));
    });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fly.rs"]
mod tests;
