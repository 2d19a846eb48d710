use std::{cell::RefCell, rc::Rc};

use crate::foundation::core::{HostInstance, MeasuredBox, TargetHandle};

/// Receives the result of [`Host::measure`]; `None` means the measurement failed.
pub type MeasureCallback = Box<dyn FnOnce(Option<MeasuredBox>)>;

/// Capabilities the hosting UI framework lends to sparkfx.
///
/// `measure` may answer synchronously (calling `done` before returning) or later from the host's
/// event loop. Either way it must call `done` at most once.
pub trait Host {
    /// Resolve a mounted node to its measurable handle.
    fn find_handle(&self, instance: HostInstance) -> Option<TargetHandle>;

    /// Measure the page-space box of `handle`.
    fn measure(&self, handle: TargetHandle, done: MeasureCallback);
}

/// A host with nothing mounted: every lookup and measurement fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedHost;

impl Host for DetachedHost {
    fn find_handle(&self, _instance: HostInstance) -> Option<TargetHandle> {
        None
    }

    fn measure(&self, _handle: TargetHandle, done: MeasureCallback) {
        done(None);
    }
}

/// Measure two handles and hand both results over once the second one lands.
pub(crate) fn measure_pair(
    host: &dyn Host,
    a: TargetHandle,
    b: TargetHandle,
    done: impl FnOnce(Option<(MeasuredBox, MeasuredBox)>) + 'static,
) {
    type Done = Box<dyn FnOnce(Option<(MeasuredBox, MeasuredBox)>)>;

    struct Pair {
        a: Option<Option<MeasuredBox>>,
        b: Option<Option<MeasuredBox>>,
        done: Option<Done>,
    }

    fn land(state: &Rc<RefCell<Pair>>, first: bool, result: Option<MeasuredBox>) {
        let ready = {
            let mut s = state.borrow_mut();
            let result = result.and_then(MeasuredBox::checked);
            if first {
                s.a = Some(result);
            } else {
                s.b = Some(result);
            }
            match (s.a, s.b) {
                (Some(a), Some(b)) => s.done.take().map(|d| (d, a.zip(b))),
                _ => None,
            }
        };
        if let Some((done, boxes)) = ready {
            done(boxes);
        }
    }

    let state = Rc::new(RefCell::new(Pair {
        a: None,
        b: None,
        done: Some(Box::new(done)),
    }));

    let sa = Rc::clone(&state);
    host.measure(a, Box::new(move |r| land(&sa, true, r)));
    let sb = Rc::clone(&state);
    host.measure(b, Box::new(move |r| land(&sb, false, r)));
}
