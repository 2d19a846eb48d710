//! sparkfx attaches declarative animation effects to UI elements.
//!
//! Authors write a compact effect string such as `"bounce|ripple(r=120)|fly(cart)"` on any
//! element. sparkfx parses it, wraps the element in a chain of behaviors (first effect
//! innermost), and at trigger time animates scalar values, resolves named targets, measures
//! boxes and mounts overlays. The host UI framework paints; sparkfx only computes.
//!
//! # Pipeline overview
//!
//! 1. **Intercept**: [`ElementFactory`] strips the `fx` / `fxTarget` attributes.
//! 2. **Parse**: [`parse_fx`] turns the effect string into [`FxItem`]s.
//! 3. **Compose**: [`Composer`] folds the items over the element.
//! 4. **Mount**: the host mounts [`EffectInstance`]s and [`TargetBoundary`]s against one
//!    [`FxRegistry`] per tree, and forwards presses, layout events and frame ticks.
//!
//! Everything is single-threaded (`Rc`-based and `!Send`), matching a UI thread.
#![forbid(unsafe_code)]

mod animation;
mod attach;
mod compose;
mod effects;
mod element;
mod foundation;
mod fx;
mod registry;

pub use crate::animation::driver::{Driver, Prop};
pub use crate::animation::ease::Ease;
pub use crate::animation::segment::Segment;
pub use crate::animation::spring::SpringConfig;
pub use crate::attach::bootstrap::{FxBootstrap, FxRoot};
pub use crate::attach::boundary::{FxTarget, TargetBoundary};
pub use crate::attach::factory::ElementFactory;
pub use crate::compose::composer::{Composer, WrapFn};
pub use crate::effects::fly::{FlyFrame, FlyOverlay, FlyPath, MIN_LIFT};
pub use crate::effects::instance::{EffectInstance, Phase};
pub use crate::effects::kind::{BurstStyle, EffectKind};
pub use crate::effects::particles::{BurstOverlay, Dot, Particle};
pub use crate::effects::reaction::{Action, Arrival, Reaction, Trigger};
pub use crate::effects::toast::ToastOverlay;
pub use crate::effects::visual::{RippleVisual, Shadow, Visual};
pub use crate::element::host::{DetachedHost, Host, MeasureCallback};
pub use crate::element::node::{
    Element, ElementKind, LayoutEvent, LayoutHandler, PointerEvents, PressEvent, PressHandler,
    PressSlot, Props,
};
pub use crate::foundation::config::{FxConfig, ToastConfig};
pub use crate::foundation::core::{
    Affine, CubicBez, HostInstance, MIN_SIZE, MeasuredBox, NodeRef, Point, Rect, Size,
    TargetHandle, Value, Vec2,
};
pub use crate::foundation::error::{FxError, FxResult};
pub use crate::foundation::math::Rng64;
pub use crate::fx::args::{FxArgs, TargetPick};
pub use crate::fx::parse::{FxItem, parse_fx, parse_fx_str};
pub use crate::registry::context::{FxRegistry, WeakFxRegistry};
pub use crate::registry::overlay::{FinishAction, OverlayEntry, OverlayId, OverlayNode};
pub use crate::registry::targets::HandleSource;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
