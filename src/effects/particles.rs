use std::f64::consts::TAU;

use crate::{
    animation::ease::Ease,
    effects::{instance::PendingGuard, kind::BurstStyle},
    element::node::{Element, PointerEvents, Props},
    foundation::{
        core::{MeasuredBox, NodeRef, Point, Vec2},
        math::Rng64,
    },
    registry::{context::FxRegistry, overlay::OverlayNode},
};

const SPARKLE_COUNT: usize = 12;
const FIREWORK_COUNT: usize = 16;
const RING_DELAYS_MS: [f64; 3] = [0.0, 120.0, 240.0];
const RING_RADIUS: f64 = 24.0;
const RING_THICKNESS: f64 = 2.0;
const FLASH_SIZE: f64 = 8.0;

/// Per-particle parameters drawn once when the burst is created.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    pub angle: f64,
    /// Travel distance for sparkles, speed for fireworks.
    pub reach: f64,
    pub size: f64,
}

/// One painted shape of a burst frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Dot {
    pub center: Point,
    pub size: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Outline circle instead of a filled dot.
    pub ring: bool,
}

/// Sparkle, ring or firework burst around a point.
#[derive(Debug)]
pub struct BurstOverlay {
    style: BurstStyle,
    center: Point,
    color: String,
    duration_ms: f64,
    particles: Vec<Particle>,
    elapsed_ms: f64,
}

impl BurstOverlay {
    pub fn new(
        style: BurstStyle,
        center: Point,
        color: impl Into<String>,
        duration_ms: f64,
        seed: u64,
    ) -> Self {
        let mut rng = Rng64::new(seed);
        let particles = match style {
            BurstStyle::Sparkle => (0..SPARKLE_COUNT)
                .map(|i| Particle {
                    angle: TAU * i as f64 / SPARKLE_COUNT as f64 + rng.range(-0.3, 0.3),
                    reach: rng.range(36.0, 84.0),
                    size: rng.range(3.0, 8.0),
                })
                .collect(),
            BurstStyle::Fireworks => (0..FIREWORK_COUNT)
                .map(|i| Particle {
                    angle: TAU * i as f64 / FIREWORK_COUNT as f64 + rng.range(-0.2, 0.2),
                    reach: rng.range(60.0, 150.0),
                    size: rng.range(3.0, 7.0),
                })
                .collect(),
            BurstStyle::Rings => Vec::new(),
        };
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(1.0)
        } else {
            1.0
        };
        Self {
            style,
            center,
            color: color.into(),
            duration_ms,
            particles,
            elapsed_ms: 0.0,
        }
    }

    pub fn style(&self) -> BurstStyle {
        self.style
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Until the last ring has finished for `rings`, the duration otherwise.
    pub fn total_ms(&self) -> f64 {
        match self.style {
            BurstStyle::Rings => self.duration_ms + RING_DELAYS_MS[RING_DELAYS_MS.len() - 1],
            _ => self.duration_ms,
        }
    }

    pub(crate) fn tick(&mut self, dt_ms: f64) -> bool {
        if dt_ms.is_finite() {
            self.elapsed_ms += dt_ms.max(0.0);
        }
        self.elapsed_ms >= self.total_ms()
    }

    fn progress(&self, delay_ms: f64) -> f64 {
        ((self.elapsed_ms - delay_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Shapes of the current frame.
    pub fn dots(&self) -> Vec<Dot> {
        let dir = |angle: f64| Vec2::new(angle.cos(), angle.sin());
        match self.style {
            BurstStyle::Sparkle => {
                let t = Ease::OutQuad.apply(self.progress(0.0));
                self.particles
                    .iter()
                    .map(|p| Dot {
                        center: self.center + dir(p.angle) * (p.reach * t),
                        size: p.size,
                        opacity: 1.0 - t,
                        scale: 1.0 - 0.3 * t,
                        ring: false,
                    })
                    .collect()
            }
            BurstStyle::Fireworks => {
                let t = Ease::OutCubic.apply(self.progress(0.0));
                let spread = t * (2.0 - t);
                let flash = Dot {
                    center: self.center,
                    size: FLASH_SIZE,
                    opacity: 0.8 * (1.0 - t),
                    scale: 1.0 + 1.5 * (1.0 - t),
                    ring: false,
                };
                std::iter::once(flash)
                    .chain(self.particles.iter().map(|p| {
                        let drop = Vec2::new(0.0, -30.0 * t * (1.0 - t));
                        Dot {
                            center: self.center + dir(p.angle) * (p.reach * spread) + drop,
                            size: p.size,
                            opacity: 1.0 - t,
                            scale: 0.8 + 0.4 * (1.0 - t),
                            ring: false,
                        }
                    }))
                    .collect()
            }
            BurstStyle::Rings => RING_DELAYS_MS
                .iter()
                .map(|&delay| {
                    let t = Ease::OutQuad.apply(self.progress(delay));
                    Dot {
                        center: self.center,
                        size: RING_RADIUS * 2.0,
                        opacity: 1.0 - t,
                        scale: 0.6 + 1.6 * t,
                        ring: true,
                    }
                })
                .collect(),
        }
    }

    pub fn render(&self) -> Element {
        let layer = Props::new()
            .attr("position", "absolute")
            .attr("inset", 0.0)
            .pointer_events(PointerEvents::None);
        let dots = self.dots().into_iter().enumerate().map(|(i, d)| {
            let mut props = Props::new()
                .attr("position", "absolute")
                .attr("left", d.center.x - d.size / 2.0)
                .attr("top", d.center.y - d.size / 2.0)
                .attr("width", d.size)
                .attr("height", d.size)
                .attr("borderRadius", d.size / 2.0)
                .attr("opacity", d.opacity)
                .attr("scale", d.scale)
                .pointer_events(PointerEvents::None);
            props = if d.ring {
                props
                    .attr("borderWidth", RING_THICKNESS)
                    .attr("borderColor", self.color.as_str())
            } else {
                props.attr("backgroundColor", self.color.as_str())
            };
            Element::host("view").with_props(props).with_key(i.to_string())
        });
        Element::host(format!("fx:{}", self.style.name()))
            .with_props(layer)
            .with_children(dots)
    }
}

/// Measure the source and mount a burst at its center. Silently does nothing on failure.
pub(crate) fn launch(
    registry: &FxRegistry,
    style: BurstStyle,
    color: String,
    duration_ms: f64,
    source: &NodeRef,
    guard: PendingGuard,
) {
    let host = registry.host();
    let Some(handle) = source.current().and_then(|i| host.find_handle(i)) else {
        tracing::debug!(effect = style.name(), "burst source not mounted");
        return;
    };
    let weak = registry.downgrade();
    host.measure(
        handle,
        Box::new(move |measured| {
            if !guard.is_live() {
                return;
            }
            let Some(registry) = weak.upgrade() else {
                return;
            };
            let Some(center) = measured.and_then(MeasuredBox::checked).map(MeasuredBox::center)
            else {
                tracing::debug!(effect = style.name(), "burst source could not be measured");
                return;
            };
            let seed = registry.next_seed();
            registry.mount_overlay(OverlayNode::Burst(BurstOverlay::new(
                style,
                center,
                color,
                duration_ms,
                seed,
            )));
        }),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/effects/particles.rs"]
mod tests;
