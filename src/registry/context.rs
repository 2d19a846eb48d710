use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    effects::toast::ToastOverlay,
    element::{
        host::Host,
        node::{Element, Props},
    },
    foundation::{config::FxConfig, core::TargetHandle, math::Rng64},
    registry::{
        overlay::{FinishAction, OverlayId, OverlayNode, OverlayStack},
        targets::{HandleSource, TargetMap},
    },
};

const SEED_BASE: u64 = 0x5EED_F00D;

#[derive(Debug, Default)]
struct State {
    targets: TargetMap,
    overlays: OverlayStack,
    torn_down: bool,
    bursts: u64,
}

struct Shared {
    state: RefCell<State>,
    host: Rc<dyn Host>,
    config: FxConfig,
}

/// Per-tree registry of named targets and overlays.
///
/// Cheap to clone; every clone talks to the same state. Asynchronous work holds a
/// [`WeakFxRegistry`] instead so it never keeps a torn-down tree alive.
#[derive(Clone)]
pub struct FxRegistry {
    shared: Rc<Shared>,
}

/// Non-owning counterpart of [`FxRegistry`].
#[derive(Clone, Default)]
pub struct WeakFxRegistry {
    shared: Weak<Shared>,
}

impl WeakFxRegistry {
    /// A handle that never upgrades.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade(&self) -> Option<FxRegistry> {
        self.shared.upgrade().map(|shared| FxRegistry { shared })
    }
}

impl fmt::Debug for WeakFxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakFxRegistry")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl FxRegistry {
    pub fn new(host: Rc<dyn Host>, config: FxConfig) -> Self {
        tracing::debug!("fx registry created");
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(State::default()),
                host,
                config,
            }),
        }
    }

    pub fn with_host(host: Rc<dyn Host>) -> Self {
        Self::new(host, FxConfig::default())
    }

    pub fn config(&self) -> &FxConfig {
        &self.shared.config
    }

    pub fn host(&self) -> Rc<dyn Host> {
        Rc::clone(&self.shared.host)
    }

    pub fn downgrade(&self) -> WeakFxRegistry {
        WeakFxRegistry {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn is_live(&self) -> bool {
        !self.shared.state.borrow().torn_down
    }

    /// Bind `name` to whatever `source` resolves to. Resolving to nothing removes the name.
    pub fn register_target(&self, name: &str, source: impl Into<HandleSource>) {
        let handle = source.into().resolve(&*self.shared.host);
        let mut state = self.shared.state.borrow_mut();
        if state.torn_down {
            return;
        }
        state.targets.set(name, handle);
        tracing::debug!(target_name = name, ?handle, "fx target registered");
    }

    pub fn unregister_target(&self, name: &str) {
        let mut state = self.shared.state.borrow_mut();
        if state.targets.remove(name) {
            tracing::debug!(target_name = name, "fx target unregistered");
        }
    }

    pub fn target_handle(&self, name: &str) -> Option<TargetHandle> {
        self.shared.state.borrow().targets.get(name)
    }

    /// Registered names, sorted.
    pub fn target_names(&self) -> Vec<String> {
        self.shared.state.borrow().targets.names()
    }

    /// Append `node` to the overlay layer.
    ///
    /// After teardown the id is still allocated but nothing is mounted.
    pub fn mount_overlay(&self, node: impl Into<OverlayNode>) -> OverlayId {
        let node = node.into();
        let mut state = self.shared.state.borrow_mut();
        let id = state.overlays.allocate();
        if state.torn_down {
            tracing::debug!(%id, "overlay dropped, registry torn down");
            return id;
        }
        tracing::debug!(%id, kind = node.kind_name(), "overlay mounted");
        state.overlays.push(id, node);
        id
    }

    pub fn unmount_overlay(&self, id: OverlayId) {
        if self.shared.state.borrow_mut().overlays.remove(id) {
            tracing::debug!(%id, "overlay unmounted");
        }
    }

    /// Mounted overlay ids in insertion order.
    pub fn overlay_ids(&self) -> Vec<OverlayId> {
        self.shared.state.borrow().overlays.ids()
    }

    pub fn overlay_count(&self) -> usize {
        self.shared.state.borrow().overlays.len()
    }

    /// Kind name of a mounted overlay.
    pub fn overlay_kind(&self, id: OverlayId) -> Option<&'static str> {
        self.shared
            .state
            .borrow()
            .overlays
            .get(id)
            .map(OverlayNode::kind_name)
    }

    /// Current frame of a mounted overlay.
    pub fn render_overlay(&self, id: OverlayId) -> Option<Element> {
        self.shared
            .state
            .borrow()
            .overlays
            .get(id)
            .map(OverlayNode::render)
    }

    pub fn overlay_layer(&self) -> Element {
        self.shared.state.borrow().overlays.layer()
    }

    /// Provider output: `content` with the overlay layer stacked on top.
    pub fn wrap(&self, content: Element) -> Element {
        Element::host("fx:provider")
            .with_props(Props::new().attr("flex", 1.0))
            .with_child(content)
            .with_child(self.overlay_layer())
    }

    /// Mount a toast that expires after `duration_ms`.
    pub fn toast(&self, text: impl Into<String>, duration_ms: f64) -> OverlayId {
        self.mount_overlay(OverlayNode::Toast(ToastOverlay::new(text, duration_ms)))
    }

    /// Advance overlays by `dt_ms`, unmount the finished ones and run their follow-ups.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&self, dt_ms: f64) {
        let finished = {
            let mut state = self.shared.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.overlays.tick(dt_ms)
        };
        for (id, action) in finished {
            self.unmount_overlay(id);
            if let Some(FinishAction::Toast { text, duration_ms }) = action {
                self.toast(text, duration_ms);
            }
        }
    }

    /// Fresh seed for a particle burst.
    pub(crate) fn next_seed(&self) -> u64 {
        let mut state = self.shared.state.borrow_mut();
        state.bursts += 1;
        Rng64::new(SEED_BASE ^ state.bursts).next_u64()
    }

    /// Drop every target and overlay; later operations become no-ops.
    pub fn teardown(&self) {
        let mut state = self.shared.state.borrow_mut();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        state.targets.clear();
        state.overlays.clear();
        tracing::debug!("fx registry torn down");
    }
}

impl fmt::Debug for FxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("FxRegistry")
            .field("targets", &state.targets)
            .field("overlays", &state.overlays.ids())
            .field("torn_down", &state.torn_down)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/context.rs"]
mod tests;
