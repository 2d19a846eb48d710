use std::{cell::Cell, rc::Rc};

use crate::{
    element::node::{Element, ElementKind, LayoutEvent, LayoutHandler},
    foundation::{
        core::NodeRef,
        error::{FxError, FxResult},
    },
    registry::{
        context::{FxRegistry, WeakFxRegistry},
        targets::HandleSource,
    },
};

/// Keeps one node registered under a target name for as long as it is attached.
///
/// Attach registers right away if the ref is already filled in, and every layout event
/// re-registers. Detaching (explicitly or by drop) unregisters the name.
#[derive(Debug)]
pub struct FxTarget {
    name: String,
    registry: WeakFxRegistry,
    node_ref: NodeRef,
    attached: Rc<Cell<bool>>,
}

impl FxTarget {
    pub fn new(name: impl Into<String>, registry: &FxRegistry) -> Self {
        Self::with_ref(name, registry, NodeRef::new())
    }

    pub fn with_ref(name: impl Into<String>, registry: &FxRegistry, node_ref: NodeRef) -> Self {
        let target = Self {
            name: name.into(),
            registry: registry.downgrade(),
            node_ref,
            attached: Rc::new(Cell::new(true)),
        };
        target.refresh();
        target
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ref to hand to the node that should be registered.
    pub fn node_ref(&self) -> &NodeRef {
        &self.node_ref
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Register from the ref, if it is filled in.
    pub fn refresh(&self) {
        if !self.is_attached() || self.node_ref.current().is_none() {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.register_target(&self.name, HandleSource::Pending(self.node_ref.clone()));
        }
    }

    pub fn on_layout(&self, event: &LayoutEvent) {
        (self.layout_handler())(event);
    }

    /// Layout callback for the registered node; a no-op once detached.
    pub fn layout_handler(&self) -> LayoutHandler {
        let name = self.name.clone();
        let registry = self.registry.clone();
        let node_ref = self.node_ref.clone();
        let attached = Rc::clone(&self.attached);
        Rc::new(move |event: &LayoutEvent| {
            if !attached.get() {
                return;
            }
            let Some(registry) = registry.upgrade() else {
                return;
            };
            let source = match event.target {
                Some(handle) => HandleSource::Direct(handle),
                None => HandleSource::Pending(node_ref.clone()),
            };
            registry.register_target(&name, source);
        })
    }

    pub fn detach(&mut self) {
        if !self.attached.replace(false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister_target(&self.name);
        }
    }
}

impl Drop for FxTarget {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Mounted form of a target-boundary element.
///
/// The host mounts [`TargetBoundary::child`] in place of the boundary. That child keeps its own
/// ref (or gets a fresh one) and has its layout callback chained after the registration.
#[derive(Debug)]
pub struct TargetBoundary {
    target: FxTarget,
    child: Element,
}

impl TargetBoundary {
    pub fn mount(element: &Element, registry: &FxRegistry) -> FxResult<Self> {
        let ElementKind::TargetBoundary(name) = &element.kind else {
            return Err(FxError::invalid_child(format!(
                "{} is not a target boundary",
                element.label()
            )));
        };
        let Some(child) = element.only_child() else {
            return Err(FxError::invalid_child(format!(
                "target({name}) expects exactly one element child, got {} child(ren)",
                element.children.len()
            )));
        };

        let node_ref = child.props.node_ref.clone().unwrap_or_default();
        let target = FxTarget::with_ref(name.clone(), registry, node_ref.clone());
        let register = target.layout_handler();
        let chained = child.props.on_layout.clone();
        let child = child.clone_with(|p| {
            p.node_ref = Some(node_ref);
            p.on_layout = Some(Rc::new(move |event: &LayoutEvent| {
                register(event);
                if let Some(h) = &chained {
                    h(event);
                }
            }));
        });

        Ok(Self { target, child })
    }

    pub fn name(&self) -> &str {
        self.target.name()
    }

    pub fn node_ref(&self) -> &NodeRef {
        self.target.node_ref()
    }

    pub fn child(&self) -> &Element {
        &self.child
    }

    /// Re-register after the host filled in the ref.
    pub fn refresh(&self) {
        self.target.refresh();
    }

    pub fn on_layout(&self, event: &LayoutEvent) {
        if let Some(h) = &self.child.props.on_layout {
            h(event);
        }
    }

    pub fn unmount(&mut self) {
        self.target.detach();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/attach/boundary.rs"]
mod tests;
