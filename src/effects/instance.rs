use std::{
    cell::Cell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    animation::driver::{Driver, Prop},
    effects::{
        fly::{self, FlyRequest},
        kind::EffectKind,
        particles,
        reaction::{Action, Trigger},
        visual::Visual,
    },
    element::node::{
        Element, ElementKind, LayoutHandler, PointerEvents, PressEvent, PressSlot, Props,
    },
    foundation::{
        core::NodeRef,
        error::{FxError, FxResult},
    },
    registry::context::{FxRegistry, WeakFxRegistry},
};

/// Mounted-instance token. Dropped on unmount; callbacks that outlive it do nothing.
#[derive(Debug, Default)]
pub(crate) struct Liveness {
    pending: Cell<usize>,
}

impl Liveness {
    pub(crate) fn pending(&self) -> usize {
        self.pending.get()
    }
}

/// Held by an in-flight measurement callback.
#[derive(Debug)]
pub(crate) struct PendingGuard(Weak<Liveness>);

impl PendingGuard {
    pub(crate) fn begin(live: &Rc<Liveness>) -> Self {
        live.pending.set(live.pending.get() + 1);
        Self(Rc::downgrade(live))
    }

    pub(crate) fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if let Some(live) = self.0.upgrade() {
            live.pending.set(live.pending.get().saturating_sub(1));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Triggered, still waiting on a measurement.
    Triggered,
    Animating,
}

#[derive(Debug)]
enum Inner {
    Effect(Box<EffectInstance>),
    Leaf(Element),
}

/// A mounted behavior wrapper and, through `inner`, the rest of its chain.
///
/// The host routes press events to the outermost instance; each wrapper reacts and forwards the
/// event inward exactly once, so the base element's own handlers see it once.
pub struct EffectInstance {
    kind: EffectKind,
    driver: Driver,
    inner: Inner,
    host_ref: NodeRef,
    on_layout: Option<LayoutHandler>,
    registry: WeakFxRegistry,
    live: Option<Rc<Liveness>>,
    since_ambient_ms: f64,
}

impl EffectInstance {
    /// Mount `element` (an effect wrapper) and every wrapper nested inside it.
    pub fn mount(element: &Element, registry: &FxRegistry) -> FxResult<Self> {
        let ElementKind::Effect(kind) = &element.kind else {
            return Err(FxError::invalid_child(format!(
                "{} is not an effect wrapper",
                element.label()
            )));
        };
        let Some(child) = element.only_child() else {
            return Err(FxError::invalid_child(format!(
                "{} expects exactly one element child, got {} child(ren)",
                kind.name(),
                element.children.len()
            )));
        };

        let inner = match child.kind {
            ElementKind::Effect(_) => Inner::Effect(Box::new(Self::mount(child, registry)?)),
            _ => Inner::Leaf(child.clone()),
        };

        let mut instance = Self {
            kind: kind.clone(),
            driver: Driver::new(),
            inner,
            host_ref: element.props.node_ref.clone().unwrap_or_default(),
            on_layout: element.props.on_layout.clone(),
            registry: registry.downgrade(),
            live: Some(Rc::new(Liveness::default())),
            since_ambient_ms: 0.0,
        };
        for (prop, value) in instance.kind.initial_values() {
            instance.driver.set(prop, value);
        }
        if instance.kind.ambient_period_ms().is_some() {
            instance.react(Trigger::Ambient);
        }
        tracing::trace!(effect = instance.kind.name(), "effect mounted");
        Ok(instance)
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn value(&self, prop: Prop) -> f64 {
        self.driver.value(prop)
    }

    /// Ref the host fills in for this wrapper's own node.
    pub fn host_ref(&self) -> &NodeRef {
        &self.host_ref
    }

    /// The next wrapper inward, if any.
    pub fn inner(&self) -> Option<&EffectInstance> {
        match &self.inner {
            Inner::Effect(inner) => Some(inner),
            Inner::Leaf(_) => None,
        }
    }

    /// The wrapped base element, handlers included.
    pub fn leaf(&self) -> &Element {
        match &self.inner {
            Inner::Effect(inner) => inner.leaf(),
            Inner::Leaf(el) => el,
        }
    }

    /// Effect names from this wrapper inward.
    pub fn chain(&self) -> Vec<&'static str> {
        let mut names = vec![self.kind.name()];
        if let Some(inner) = self.inner() {
            names.extend(inner.chain());
        }
        names
    }

    pub fn is_mounted(&self) -> bool {
        self.live.is_some()
    }

    pub fn phase(&self) -> Phase {
        if !self.driver.is_idle() {
            Phase::Animating
        } else if self.live.as_ref().is_some_and(|l| l.pending() > 0) {
            Phase::Triggered
        } else {
            Phase::Idle
        }
    }

    pub fn press_in(&mut self, event: &PressEvent) {
        self.dispatch(PressSlot::PressIn, event);
    }

    pub fn press_out(&mut self, event: &PressEvent) {
        self.dispatch(PressSlot::PressOut, event);
    }

    pub fn press(&mut self, event: &PressEvent) {
        self.dispatch(PressSlot::Press, event);
    }

    pub fn dispatch(&mut self, slot: PressSlot, event: &PressEvent) {
        if !self.is_mounted() {
            return;
        }
        let action = self.react(slot.into());
        let (before, after) = match action {
            Some(a) if a.runs_before_child() => (Some(a), None),
            a => (None, a),
        };
        if let Some(a) = before {
            self.perform(a);
        }
        match &mut self.inner {
            Inner::Effect(inner) => inner.dispatch(slot, event),
            Inner::Leaf(el) => {
                if let Some(handler) = el.props.handler(slot) {
                    handler(event);
                }
            }
        }
        if let Some(a) = after {
            self.perform(a);
        }
    }

    /// Advance this wrapper and everything inside it.
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.is_mounted() {
            return;
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.driver.tick(dt_ms);
        if let Some(period) = self.kind.ambient_period_ms() {
            self.since_ambient_ms += dt_ms;
            if self.since_ambient_ms >= period {
                self.since_ambient_ms %= period;
                self.react(Trigger::Ambient);
            }
        }
        if let Inner::Effect(inner) = &mut self.inner {
            inner.tick(dt_ms);
        }
    }

    /// Stop animating and drop the liveness token, for the whole chain.
    pub fn unmount(&mut self) {
        self.driver.stop();
        self.live = None;
        if let Inner::Effect(inner) = &mut self.inner {
            inner.unmount();
        }
        tracing::trace!(effect = self.kind.name(), "effect unmounted");
    }

    pub fn visual(&self) -> Visual {
        Visual::of(&self.kind, &self.driver)
    }

    /// Current frame of the chain as host elements, outermost first.
    pub fn render(&self) -> Element {
        let visual = self.visual();
        let mut props = Props::new()
            .node_ref(self.host_ref.clone())
            .pointer_events(PointerEvents::BoxNone);
        props.attrs = visual.attrs();
        props.on_layout = self.on_layout.clone();

        let mut out = Element::host(format!("fx:{}", self.kind.name())).with_props(props);
        if let Some(ripple) = visual.ripple {
            let circle = Props::new()
                .attr("position", "absolute")
                .attr("width", ripple.radius * 2.0)
                .attr("height", ripple.radius * 2.0)
                .attr("borderRadius", ripple.radius)
                .attr("scale", ripple.scale)
                .attr("opacity", ripple.opacity)
                .pointer_events(PointerEvents::None);
            out = out.with_child(Element::host("fx:ripple").with_props(circle));
        }
        let child = match &self.inner {
            Inner::Effect(inner) => inner.render(),
            Inner::Leaf(el) => el.without_press_handlers(),
        };
        out.with_child(child)
    }

    fn react(&mut self, trigger: Trigger) -> Option<Action> {
        let reaction = self.kind.react(trigger, &self.driver)?;
        reaction.start(&mut self.driver);
        reaction.action
    }

    fn perform(&self, action: Action) {
        let (Some(registry), Some(live)) = (self.registry.upgrade(), self.live.as_ref()) else {
            return;
        };
        match action {
            Action::Toast { text, duration_ms } => {
                let defaults = &registry.config().toast;
                registry.toast(
                    text.unwrap_or_else(|| defaults.default_text.clone()),
                    duration_ms.unwrap_or(defaults.duration_ms),
                );
            }
            Action::Fly {
                target,
                duration_ms,
                arrival,
            } => fly::launch(
                &registry,
                FlyRequest {
                    target,
                    duration_ms,
                    arrival,
                    // Base element only; the wrappers' own transforms stay behind.
                    ghost: self.leaf().clone(),
                    source: self.host_ref.clone(),
                },
                PendingGuard::begin(live),
            ),
            Action::Burst {
                style,
                color,
                duration_ms,
            } => particles::launch(
                &registry,
                style,
                color,
                duration_ms,
                &self.host_ref,
                PendingGuard::begin(live),
            ),
        }
    }
}

impl fmt::Debug for EffectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectInstance")
            .field("kind", &self.kind)
            .field("inner", &self.inner)
            .field("host_ref", &self.host_ref)
            .field("on_layout", &self.on_layout.is_some())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/instance.rs"]
mod tests;
