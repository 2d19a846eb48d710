use std::collections::{BTreeMap, VecDeque};

use crate::animation::{
    segment::Segment,
    spring::{MAX_SETTLE_MS, SpringConfig},
};

/// Animatable scalar slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Prop {
    Scale,
    ScaleX,
    ScaleY,
    TranslateX,
    TranslateY,
    /// Degrees.
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Opacity,
    ShadowOpacity,
    RippleScale,
    RippleOpacity,
    /// Normalized `[0, 1]` parameter for overlays.
    Progress,
}

impl Prop {
    pub fn rest(self) -> f64 {
        match self {
            Self::Scale | Self::ScaleX | Self::ScaleY | Self::Opacity => 1.0,
            Self::RippleScale => 0.01,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Active {
    seg: Segment,
    from: f64,
    elapsed: f64,
}

#[derive(Clone, Debug, Default)]
struct Track {
    queue: VecDeque<Segment>,
    active: Option<Active>,
}

impl Track {
    fn is_done(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }
}

/// Runs one queue of [`Segment`]s per [`Prop`].
///
/// Starting a new queue for a prop replaces whatever that prop was doing, starting from its
/// current value. Segments of one queue run strictly in order; queues of different props are
/// independent. [`Driver::stop`] is the only cancellation primitive.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    values: BTreeMap<Prop, f64>,
    velocities: BTreeMap<Prop, f64>,
    tracks: BTreeMap<Prop, Track>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, prop: Prop) -> f64 {
        self.values.get(&prop).copied().unwrap_or_else(|| prop.rest())
    }

    /// Assign directly, cancelling any queue for `prop`.
    pub fn set(&mut self, prop: Prop, value: f64) {
        self.tracks.remove(&prop);
        self.velocities.remove(&prop);
        self.values.insert(prop, value);
    }

    pub fn run(&mut self, prop: Prop, segments: impl IntoIterator<Item = Segment>) {
        let track = Track {
            queue: segments.into_iter().collect(),
            active: None,
        };
        self.tracks.insert(prop, track);
        // Leading jumps take effect immediately, like a plain assignment would.
        self.advance(prop, 0.0);
    }

    pub fn tick(&mut self, dt_ms: f64) {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let props: Vec<Prop> = self.tracks.keys().copied().collect();
        for prop in props {
            self.advance(prop, dt_ms);
        }
    }

    pub fn stop(&mut self) {
        self.tracks.clear();
        self.velocities.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_running(&self, prop: Prop) -> bool {
        self.tracks.contains_key(&prop)
    }

    pub fn snapshot(&self) -> BTreeMap<Prop, f64> {
        self.values.clone()
    }

    fn advance(&mut self, prop: Prop, dt_ms: f64) {
        let Some(mut track) = self.tracks.remove(&prop) else {
            return;
        };
        let mut x = self.value(prop);
        let mut v = self.velocities.get(&prop).copied().unwrap_or(0.0);
        let mut remaining = dt_ms;

        loop {
            let mut active = match track.active.take() {
                Some(a) => a,
                None => match track.queue.pop_front() {
                    Some(seg) => Active {
                        seg,
                        from: x,
                        elapsed: 0.0,
                    },
                    None => break,
                },
            };

            let finished = match active.seg {
                Segment::Jump { to } => {
                    x = to;
                    v = 0.0;
                    true
                }
                Segment::Wait { ms } => consume(&mut active.elapsed, &mut remaining, ms),
                Segment::Timing {
                    to,
                    duration_ms,
                    ease,
                } => {
                    v = 0.0;
                    if duration_ms.is_nan() || duration_ms <= 0.0 {
                        x = to;
                        true
                    } else {
                        let done = consume(&mut active.elapsed, &mut remaining, duration_ms);
                        let t = active.elapsed / duration_ms;
                        x = if done {
                            to
                        } else {
                            active.from + (to - active.from) * ease.apply(t)
                        };
                        done
                    }
                }
                Segment::Spring { to, config, max_ms } => {
                    let cap = max_ms.unwrap_or(MAX_SETTLE_MS).min(MAX_SETTLE_MS);
                    let budget = remaining.min((cap - active.elapsed).max(0.0));
                    let used = config.advance(&mut x, &mut v, to, budget);
                    active.elapsed += used;
                    remaining -= used;
                    let at_rest = SpringConfig::is_at_rest(x, v, to);
                    if active.elapsed >= cap && max_ms.is_none() {
                        // Never settled; snap rather than ring forever.
                        x = to;
                        v = 0.0;
                    }
                    at_rest || active.elapsed >= cap
                }
            };

            if !finished {
                track.active = Some(active);
                break;
            }
        }

        self.values.insert(prop, x);
        if v == 0.0 {
            self.velocities.remove(&prop);
        } else {
            self.velocities.insert(prop, v);
        }
        if !track.is_done() {
            self.tracks.insert(prop, track);
        }
    }
}

/// Move time from `remaining` into `elapsed`, up to `total`. True once `elapsed` reached it.
fn consume(elapsed: &mut f64, remaining: &mut f64, total: f64) -> bool {
    let left = (total - *elapsed).max(0.0);
    if *remaining >= left {
        *elapsed = total.max(*elapsed);
        *remaining -= left;
        true
    } else {
        *elapsed += *remaining;
        *remaining = 0.0;
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
