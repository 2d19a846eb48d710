use std::collections::HashMap;

use crate::{
    element::host::Host,
    foundation::core::{NodeRef, TargetHandle},
};

/// What a caller hands over when registering a target.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HandleSource {
    /// Nothing to register; clears the name.
    #[default]
    Unset,
    Direct(TargetHandle),
    /// A ref still to be resolved through [`Host::find_handle`].
    Pending(NodeRef),
}

impl HandleSource {
    /// Resolve now. An empty ref or a node the host does not know yields `None`.
    pub fn resolve(&self, host: &dyn Host) -> Option<TargetHandle> {
        match self {
            Self::Unset => None,
            Self::Direct(handle) => Some(*handle),
            Self::Pending(node_ref) => node_ref.current().and_then(|i| host.find_handle(i)),
        }
    }
}

impl From<TargetHandle> for HandleSource {
    fn from(handle: TargetHandle) -> Self {
        Self::Direct(handle)
    }
}

impl From<Option<TargetHandle>> for HandleSource {
    fn from(handle: Option<TargetHandle>) -> Self {
        handle.map_or(Self::Unset, Self::Direct)
    }
}

impl From<NodeRef> for HandleSource {
    fn from(node_ref: NodeRef) -> Self {
        Self::Pending(node_ref)
    }
}

/// Name to handle map. Last registration wins.
#[derive(Debug, Default)]
pub(crate) struct TargetMap {
    handles: HashMap<String, TargetHandle>,
}

impl TargetMap {
    /// Store `handle`, or drop the name when there is none.
    pub(crate) fn set(&mut self, name: &str, handle: Option<TargetHandle>) {
        match handle {
            Some(h) => {
                self.handles.insert(name.to_string(), h);
            }
            None => {
                self.handles.remove(name);
            }
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.handles.remove(name).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<TargetHandle> {
        self.handles.get(name).copied()
    }

    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handles.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn clear(&mut self) {
        self.handles.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/targets.rs"]
mod tests;
