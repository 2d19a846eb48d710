use std::fmt;

use crate::{
    effects::{fly::FlyOverlay, particles::BurstOverlay, toast::ToastOverlay},
    element::node::{Element, PointerEvents, Props},
};

/// Handle returned by [`FxRegistry::mount_overlay`](crate::FxRegistry::mount_overlay).
///
/// Allocated from a per-registry counter, so ids are never reused while the registry lives.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx-overlay-{}", self.0)
    }
}

/// Follow-up run by the registry once an overlay finished and was unmounted.
#[derive(Clone, Debug, PartialEq)]
pub enum FinishAction {
    Toast { text: String, duration_ms: f64 },
}

/// Content of the overlay layer.
#[derive(Debug)]
pub enum OverlayNode {
    Fly(FlyOverlay),
    Toast(ToastOverlay),
    Burst(BurstOverlay),
    /// Caller-provided element; stays until unmounted explicitly.
    Static(Element),
}

impl OverlayNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Fly(_) => "fly",
            Self::Toast(_) => "toast",
            Self::Burst(b) => b.style().name(),
            Self::Static(_) => "static",
        }
    }

    /// Advance by `dt_ms`; true once finished.
    pub(crate) fn tick(&mut self, dt_ms: f64) -> bool {
        match self {
            Self::Fly(f) => f.tick(dt_ms),
            Self::Toast(t) => t.tick(dt_ms),
            Self::Burst(b) => b.tick(dt_ms),
            Self::Static(_) => false,
        }
    }

    pub(crate) fn finish_action(&self) -> Option<FinishAction> {
        match self {
            Self::Fly(f) => f.finish_action().cloned(),
            _ => None,
        }
    }

    pub fn render(&self) -> Element {
        match self {
            Self::Fly(f) => f.render(),
            Self::Toast(t) => t.render(),
            Self::Burst(b) => b.render(),
            Self::Static(el) => el.clone(),
        }
    }
}

impl From<Element> for OverlayNode {
    fn from(el: Element) -> Self {
        Self::Static(el)
    }
}

#[derive(Debug)]
pub struct OverlayEntry {
    pub id: OverlayId,
    pub node: OverlayNode,
}

/// Overlays in insertion order.
#[derive(Debug, Default)]
pub(crate) struct OverlayStack {
    entries: Vec<OverlayEntry>,
    last_id: u64,
}

impl OverlayStack {
    pub(crate) fn allocate(&mut self) -> OverlayId {
        self.last_id += 1;
        OverlayId(self.last_id)
    }

    pub(crate) fn push(&mut self, id: OverlayId, node: OverlayNode) {
        self.entries.push(OverlayEntry { id, node });
    }

    pub(crate) fn remove(&mut self, id: OverlayId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub(crate) fn ids(&self) -> Vec<OverlayId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub(crate) fn get(&self, id: OverlayId) -> Option<&OverlayNode> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.node)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance every overlay; returns the ones that finished, still mounted.
    pub(crate) fn tick(&mut self, dt_ms: f64) -> Vec<(OverlayId, Option<FinishAction>)> {
        self.entries
            .iter_mut()
            .filter_map(|e| {
                e.node
                    .tick(dt_ms)
                    .then(|| (e.id, e.node.finish_action()))
            })
            .collect()
    }

    /// Top-most, input-transparent, viewport-covering layer.
    pub(crate) fn layer(&self) -> Element {
        let props = Props::new()
            .attr("position", "absolute")
            .attr("inset", 0.0)
            .pointer_events(PointerEvents::None);
        Element::host("fx:overlay-layer")
            .with_props(props)
            .with_children(
                self.entries
                    .iter()
                    .map(|e| e.node.render().with_key(e.id.to_string())),
            )
    }
}
