//! In-crate test host: nodes are numbered, handles equal node ids, measurements come from a table.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use crate::{
    element::host::{Host, MeasureCallback},
    foundation::{
        config::FxConfig,
        core::{HostInstance, MeasuredBox, NodeRef, TargetHandle},
    },
    registry::context::FxRegistry,
};

#[derive(Default)]
pub(crate) struct TestHost {
    boxes: RefCell<HashMap<u64, Option<MeasuredBox>>>,
    deferred: Cell<bool>,
    queue: RefCell<Vec<(TargetHandle, MeasureCallback)>>,
}

impl TestHost {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Mount node `id` with box `b` and point `node_ref` at it.
    pub(crate) fn mount(&self, node_ref: &NodeRef, id: u64, b: MeasuredBox) {
        self.boxes.borrow_mut().insert(id, Some(b));
        node_ref.set(HostInstance(id));
    }

    /// Known node whose measurement fails.
    pub(crate) fn mount_unmeasurable(&self, node_ref: &NodeRef, id: u64) {
        self.boxes.borrow_mut().insert(id, None);
        node_ref.set(HostInstance(id));
    }

    pub(crate) fn defer(&self) {
        self.deferred.set(true);
    }

    pub(crate) fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Answer every queued measurement.
    pub(crate) fn flush(&self) {
        let queue: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        for (handle, done) in queue {
            let b = self.boxes.borrow().get(&handle.0).copied().flatten();
            done(b);
        }
    }

    /// Drop every queued callback without answering.
    pub(crate) fn forget(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl Host for TestHost {
    fn find_handle(&self, instance: HostInstance) -> Option<TargetHandle> {
        self.boxes
            .borrow()
            .contains_key(&instance.0)
            .then_some(TargetHandle(instance.0))
    }

    fn measure(&self, handle: TargetHandle, done: MeasureCallback) {
        if self.deferred.get() {
            self.queue.borrow_mut().push((handle, done));
            return;
        }
        let b = self.boxes.borrow().get(&handle.0).copied().flatten();
        done(b);
    }
}

pub(crate) fn registry(host: &Rc<TestHost>) -> FxRegistry {
    registry_with(host, FxConfig::default())
}

pub(crate) fn registry_with(host: &Rc<TestHost>, config: FxConfig) -> FxRegistry {
    let host: Rc<dyn Host> = host.clone();
    FxRegistry::new(host, config)
}
