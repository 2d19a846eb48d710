use crate::{
    animation::{
        driver::{Driver, Prop},
        ease::Ease,
        segment::Segment,
        spring::SpringConfig,
    },
    effects::kind::{BurstStyle, CART_FLY_MS, EffectKind},
    element::node::PressSlot,
};

/// What woke a behavior up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Mount and every period tick of an ambient behavior.
    Ambient,
    PressIn,
    PressOut,
    Press,
}

impl From<PressSlot> for Trigger {
    fn from(slot: PressSlot) -> Self {
        match slot {
            PressSlot::PressIn => Self::PressIn,
            PressSlot::PressOut => Self::PressOut,
            PressSlot::Press => Self::Press,
        }
    }
}

/// What happens after a fly lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrival {
    Quiet,
    /// `addtocart`: toast on arrival, fallback toast when the fly cannot start.
    CartToast,
}

/// Work a behavior does outside its own animated values.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Fly {
        target: Option<String>,
        duration_ms: f64,
        arrival: Arrival,
    },
    Toast {
        text: Option<String>,
        duration_ms: Option<f64>,
    },
    Burst {
        style: BurstStyle,
        color: String,
        duration_ms: f64,
    },
}

impl Action {
    /// Toasts mount before the inner handler runs; everything that measures runs after it.
    pub fn runs_before_child(&self) -> bool {
        matches!(self, Self::Toast { .. })
    }
}

/// Segment queues to start plus an optional side action.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reaction {
    pub tracks: Vec<(Prop, Vec<Segment>)>,
    pub action: Option<Action>,
}

impl Reaction {
    fn track(mut self, prop: Prop, segments: impl IntoIterator<Item = Segment>) -> Self {
        self.tracks.push((prop, segments.into_iter().collect()));
        self
    }

    fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn start(&self, driver: &mut Driver) {
        for (prop, segments) in &self.tracks {
            driver.run(*prop, segments.iter().copied());
        }
    }
}

fn t(to: f64, ms: f64) -> Segment {
    Segment::timing(to, ms)
}

fn te(to: f64, ms: f64, ease: Ease) -> Segment {
    Segment::timing_eased(to, ms, ease)
}

fn sp(to: f64, damping: f64, stiffness: f64) -> Segment {
    Segment::spring(to, SpringConfig::new(damping, stiffness))
}

fn damped(to: f64, damping: f64) -> Segment {
    Segment::spring(
        to,
        SpringConfig {
            damping,
            ..SpringConfig::default()
        },
    )
}

fn sine(to: f64, ms: f64) -> Segment {
    te(to, ms, Ease::InOutSine)
}

/// Keyframe list `(value, ms)` as default-eased timings.
fn steps(keys: &[(f64, f64)]) -> Vec<Segment> {
    keys.iter().map(|&(to, ms)| t(to, ms)).collect()
}

impl EffectKind {
    /// Values assigned before any trigger fires.
    pub fn initial_values(&self) -> Vec<(Prop, f64)> {
        match self {
            Self::Glow => vec![(Prop::ShadowOpacity, 0.7)],
            _ => Vec::new(),
        }
    }

    /// The reaction to `trigger`, or `None` when this behavior ignores it.
    ///
    /// `driver` is the instance's current state; only `flipcard` looks at it.
    pub fn react(&self, trigger: Trigger, driver: &Driver) -> Option<Reaction> {
        use Trigger::*;

        let r = Reaction::default();
        let reaction = match (self, trigger) {
            (Self::Bounce { scale }, PressIn) => r.track(Prop::Scale, [sp(*scale, 20.0, 280.0)]),
            (Self::Bounce { .. }, PressOut) => r.track(Prop::Scale, [sp(1.0, 14.0, 240.0)]),

            (Self::Ripple { opacity, .. }, PressIn) => r
                .track(Prop::RippleOpacity, [Segment::jump(*opacity), t(0.0, 450.0)])
                .track(Prop::RippleScale, [Segment::jump(0.01), t(1.0, 420.0)]),

            (Self::PressPop { scale }, PressIn) => {
                r.track(Prop::Scale, [te(*scale, 90.0, Ease::OutCubic)])
            }
            (Self::PressPop { .. }, PressOut) => r.track(Prop::Scale, [sp(1.0, 12.0, 220.0)]),

            (Self::Shake, Press) => r.track(
                Prop::TranslateX,
                steps(&[(-4.0, 60.0), (4.0, 120.0), (-3.0, 100.0), (3.0, 100.0), (0.0, 80.0)]),
            ),

            (
                Self::Fly {
                    target,
                    duration_ms,
                },
                Press,
            ) => r.action(Action::Fly {
                target: target.clone(),
                duration_ms: *duration_ms,
                arrival: Arrival::Quiet,
            }),

            (Self::Toast { text, duration_ms }, Press) => r.action(Action::Toast {
                text: text.clone(),
                duration_ms: *duration_ms,
            }),

            (Self::Jelly, Press) => r
                .track(
                    Prop::ScaleX,
                    [
                        te(1.25, 240.0, Ease::OutCubic),
                        t(0.85, 180.0),
                        t(1.08, 140.0),
                        t(0.98, 100.0),
                        damped(1.0, 12.0),
                    ],
                )
                .track(
                    Prop::ScaleY,
                    [
                        te(0.75, 240.0, Ease::OutCubic),
                        t(1.15, 180.0),
                        t(0.92, 140.0),
                        t(1.02, 100.0),
                        damped(1.0, 12.0),
                    ],
                ),

            (Self::Wobble, Press) => r
                .track(
                    Prop::Rotate,
                    steps(&[
                        (-8.0, 120.0),
                        (6.0, 120.0),
                        (-5.0, 100.0),
                        (3.0, 100.0),
                        (-2.0, 80.0),
                        (0.0, 80.0),
                    ]),
                )
                .track(
                    Prop::TranslateX,
                    steps(&[
                        (-6.0, 120.0),
                        (5.0, 120.0),
                        (-4.0, 100.0),
                        (3.0, 100.0),
                        (-2.0, 80.0),
                        (0.0, 80.0),
                    ]),
                ),

            (Self::Pulse { interval_ms }, Ambient) => {
                let half = interval_ms / 2.0;
                r.track(Prop::Scale, [sine(1.18, half), sine(1.0, half)])
                    .track(Prop::Opacity, [t(0.85, half), t(1.0, half)])
            }

            (Self::Glow, Ambient) => {
                r.track(Prop::ShadowOpacity, [sine(1.0, 1200.0), sine(0.7, 1200.0)])
            }

            (Self::Float, Ambient) => {
                r.track(Prop::TranslateY, [sine(-12.0, 1600.0), sine(0.0, 1600.0)])
            }

            (Self::Heartbeat, Ambient) => r.track(
                Prop::Scale,
                [
                    te(1.15, 196.0, Ease::OutCubic),
                    t(1.0, 140.0),
                    t(1.2, 196.0),
                    t(1.0, 420.0),
                ],
            ),

            (Self::AddToCart { target }, Press) => r
                .track(Prop::Scale, [damped(0.88, 20.0), damped(1.0, 14.0)])
                .action(Action::Fly {
                    target: target.clone(),
                    duration_ms: CART_FLY_MS,
                    arrival: Arrival::CartToast,
                }),

            (Self::QuickView, Press) => r
                .track(Prop::Scale, [damped(1.08, 18.0), damped(1.0, 15.0)])
                .track(Prop::Opacity, [t(0.85, 150.0), t(1.0, 150.0)]),

            (Self::ElasticScale { intensity }, Press) => r.track(
                Prop::Scale,
                [
                    Segment::spring_for(
                        *intensity,
                        SpringConfig::new(3.0, 100.0).with_mass(0.5),
                        100.0,
                    ),
                    Segment::spring(1.0, SpringConfig::new(8.0, 150.0).with_mass(0.8)),
                ],
            ),

            (Self::NeonGlow { .. }, Ambient) => r
                .track(Prop::Opacity, [sine(0.4, 800.0), sine(1.0, 800.0)])
                .track(Prop::Scale, [sine(1.05, 800.0), sine(1.0, 800.0)]),

            (Self::PerspectiveTilt, Press) => {
                let tilt = SpringConfig::new(10.0, 100.0);
                r.track(
                    Prop::RotateX,
                    [Segment::spring_for(-10.0, tilt, 200.0), sp(0.0, 8.0, 80.0)],
                )
                .track(
                    Prop::RotateY,
                    [Segment::spring_for(10.0, tilt, 200.0), sp(0.0, 8.0, 80.0)],
                )
            }

            (Self::MagneticHover, PressIn) => r
                .track(Prop::TranslateX, [sp(5.0, 15.0, 150.0)])
                .track(Prop::TranslateY, [sp(-3.0, 15.0, 150.0)])
                .track(Prop::Scale, [sp(1.08, 10.0, 100.0)]),
            (Self::MagneticHover, PressOut) => r
                .track(Prop::TranslateX, [sp(0.0, 12.0, 120.0)])
                .track(Prop::TranslateY, [sp(0.0, 12.0, 120.0)])
                .track(Prop::Scale, [sp(1.0, 10.0, 100.0)]),

            (Self::Gravity, Press) => r
                .track(
                    Prop::TranslateY,
                    [
                        te(-50.0, 300.0, Ease::OutQuad),
                        te(300.0, 600.0, Ease::InQuad),
                        sp(0.0, 8.0, 100.0),
                    ],
                )
                .track(
                    Prop::Rotate,
                    [t(-15.0, 300.0), t(180.0, 600.0), sp(0.0, 10.0, 80.0)],
                ),

            (Self::SpringPhysics { damping, stiffness }, Press) => {
                let cfg = SpringConfig::new(*damping, *stiffness);
                r.track(
                    Prop::TranslateX,
                    [
                        Segment::spring_for(100.0, cfg, 400.0),
                        Segment::spring_for(-100.0, cfg, 400.0),
                        Segment::spring(
                            0.0,
                            SpringConfig::new(damping + 5.0, stiffness + 30.0).with_mass(0.8),
                        ),
                    ],
                )
            }

            (Self::Friction, Press) => r.track(
                Prop::TranslateX,
                [
                    te(120.0, 800.0, Ease::OutCubic),
                    Segment::spring(0.0, SpringConfig::new(20.0, 90.0).with_mass(1.5)),
                ],
            ),

            (Self::Inertia, Press) => r
                .track(
                    Prop::TranslateX,
                    [
                        te(80.0, 500.0, Ease::Linear),
                        Segment::wait(200.0),
                        sp(0.0, 15.0, 100.0),
                    ],
                )
                .track(
                    Prop::TranslateY,
                    [te(-40.0, 500.0, Ease::OutQuad), te(0.0, 500.0, Ease::InQuad)],
                ),

            (Self::Rotate3d, Press) => {
                let spin = [sine(360.0, 800.0), Segment::jump(0.0)];
                r.track(Prop::RotateX, spin)
                    .track(Prop::RotateY, spin)
                    .track(Prop::RotateZ, spin)
            }

            (Self::FlipCard, Press) => {
                let facing_back = (driver.value(Prop::RotateY) % 360.0).abs() > 90.0;
                let to = if facing_back { 0.0 } else { 180.0 };
                r.track(Prop::RotateY, [sp(to, 15.0, 80.0)])
            }

            (Self::Wave3d, Ambient) => r
                .track(Prop::TranslateY, [sine(-15.0, 600.0), sine(0.0, 600.0)])
                .track(Prop::RotateX, [sine(10.0, 600.0), sine(0.0, 600.0)]),

            (Self::QuantumBlur, Press) => r
                .track(Prop::Opacity, [t(0.2, 150.0), sp(1.0, 10.0, 100.0)])
                .track(Prop::Scale, [t(0.92, 150.0), sp(1.0, 10.0, 100.0)]),

            (Self::LiquidSwipe, Press) => {
                let back = [Segment::wait(50.0), sp(0.0, 15.0, 100.0)];
                r.track(
                    Prop::TranslateX,
                    [sine(300.0, 400.0), Segment::jump(-300.0), back[0], back[1]],
                )
                .track(
                    Prop::Scale,
                    [
                        t(0.8, 400.0),
                        Segment::jump(0.8),
                        Segment::wait(50.0),
                        sp(1.0, 15.0, 100.0),
                    ],
                )
                .track(
                    Prop::Opacity,
                    [
                        t(0.0, 400.0),
                        Segment::jump(0.0),
                        Segment::wait(50.0),
                        t(1.0, 300.0),
                    ],
                )
            }

            (Self::ParticleExplosion, Press) => r
                .track(Prop::Scale, [te(2.0, 300.0, Ease::OutExpo), Segment::jump(1.0)])
                .track(Prop::Opacity, [t(0.0, 300.0), sp(1.0, 10.0, 100.0)]),

            (
                Self::Burst {
                    style,
                    color,
                    duration_ms,
                },
                Press,
            ) => r.action(Action::Burst {
                style: *style,
                color: color.clone(),
                duration_ms: *duration_ms,
            }),

            _ => return None,
        };
        Some(reaction)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reaction.rs"]
mod tests;
