use crate::fx::args::{FxArgs, TargetPick};

/// Fly duration used by `addtocart`.
pub(crate) const CART_FLY_MS: f64 = 650.0;

/// Which particle overlay a burst mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstStyle {
    Sparkle,
    Rings,
    Fireworks,
}

impl BurstStyle {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sparkle => "sparkle",
            Self::Rings => "rings",
            Self::Fireworks => "fireworks",
        }
    }

    fn default_color(self) -> &'static str {
        match self {
            Self::Sparkle => "#f5d0fe",
            Self::Rings => "#93c5fd",
            Self::Fireworks => "#fde68a",
        }
    }

    fn default_duration_ms(self) -> f64 {
        match self {
            Self::Sparkle => 680.0,
            Self::Rings => 700.0,
            Self::Fireworks => 800.0,
        }
    }
}

/// A configured behavior, with every argument default already resolved.
///
/// Target names and toast texts stay `None` when the effect string left them out; those fall back
/// to [`FxConfig`](crate::FxConfig) at trigger time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum EffectKind {
    Bounce { scale: f64 },
    Ripple { radius: f64, opacity: f64 },
    PressPop { scale: f64 },
    Shake,
    Fly { target: Option<String>, duration_ms: f64 },
    Toast { text: Option<String>, duration_ms: Option<f64> },
    Jelly,
    Wobble,
    Pulse { interval_ms: f64 },
    Glow,
    Float,
    Heartbeat,
    AddToCart { target: Option<String> },
    QuickView,
    ElasticScale { intensity: f64 },
    NeonGlow { color: String },
    PerspectiveTilt,
    MagneticHover,
    Gravity,
    SpringPhysics { damping: f64, stiffness: f64 },
    Friction,
    Inertia,
    Rotate3d,
    FlipCard,
    Wave3d,
    QuantumBlur,
    LiquidSwipe,
    ParticleExplosion,
    Burst { style: BurstStyle, color: String, duration_ms: f64 },
}

/// Names (aliases included) the default composer knows.
pub(crate) const BUILTIN_NAMES: &[&str] = &[
    "bounce",
    "ripple",
    "presspop",
    "shake",
    "fly",
    "toast",
    "jelly",
    "wobble",
    "pulse",
    "glow",
    "float",
    "heartbeat",
    "addtocart",
    "quickview",
    "elasticscale",
    "elastic",
    "neonglow",
    "neon",
    "perspectivetilt",
    "tilt",
    "magnetichover",
    "magnetic",
    "gravity",
    "springphysics",
    "spring",
    "friction",
    "inertia",
    "rotate3d",
    "flipcard",
    "flip",
    "wave3d",
    "wave",
    "quantumblur",
    "quantum",
    "liquidswipe",
    "liquid",
    "particleexplosion",
    "explosion",
    "particles",
    "sparkle",
    "rings",
    "fireworks",
];

fn positive(v: Option<f64>, default: f64) -> f64 {
    v.filter(|v| *v > 0.0).unwrap_or(default)
}

fn pick_target(args: &FxArgs) -> Option<String> {
    match args.target_or("") {
        TargetPick::Explicit(name) | TargetPick::Flag(name) => Some(name.to_string()),
        TargetPick::Ambiguous(_) => {
            tracing::debug!(
                flags = ?args.flags().collect::<Vec<_>>(),
                "several bare flags, falling back to the default target"
            );
            None
        }
        TargetPick::Default(_) => None,
    }
}

fn burst(style: BurstStyle, a: &FxArgs) -> EffectKind {
    EffectKind::Burst {
        style,
        color: a.text("color").unwrap_or(style.default_color()).to_string(),
        duration_ms: positive(a.first_number(&["t", "duration"]), style.default_duration_ms()),
    }
}

impl EffectKind {
    /// Build the built-in behavior registered under `name`, resolving argument defaults.
    pub fn from_args(name: &str, a: &FxArgs) -> Option<Self> {
        let kind = match name {
            "bounce" => Self::Bounce {
                scale: a.number_or("s", 0.94),
            },
            "ripple" => Self::Ripple {
                radius: positive(a.number("r"), 80.0),
                opacity: a.number_or("op", 0.18),
            },
            "presspop" => Self::PressPop {
                scale: a.number_or("s", 1.08),
            },
            "shake" => Self::Shake,
            "fly" => Self::Fly {
                target: pick_target(a),
                duration_ms: positive(a.first_number(&["t", "duration"]), 700.0),
            },
            "toast" => Self::Toast {
                text: a.first_text(&["text", "message"]).map(str::to_string),
                duration_ms: a.first_number(&["t", "duration"]).filter(|ms| *ms > 0.0),
            },
            "jelly" => Self::Jelly,
            "wobble" => Self::Wobble,
            "pulse" => Self::Pulse {
                interval_ms: positive(a.number("interval"), 1600.0),
            },
            "glow" => Self::Glow,
            "float" => Self::Float,
            "heartbeat" => Self::Heartbeat,
            "addtocart" => Self::AddToCart {
                target: pick_target(a),
            },
            "quickview" => Self::QuickView,
            "elasticscale" | "elastic" => Self::ElasticScale {
                intensity: a.number_or("intensity", 1.4),
            },
            "neonglow" | "neon" => Self::NeonGlow {
                color: a.text("color").unwrap_or("#00ffff").to_string(),
            },
            "perspectivetilt" | "tilt" => Self::PerspectiveTilt,
            "magnetichover" | "magnetic" => Self::MagneticHover,
            "gravity" => Self::Gravity,
            "springphysics" | "spring" => Self::SpringPhysics {
                damping: a.number_or("damping", 3.0),
                stiffness: a.number_or("stiffness", 50.0),
            },
            "friction" => Self::Friction,
            "inertia" => Self::Inertia,
            "rotate3d" => Self::Rotate3d,
            "flipcard" | "flip" => Self::FlipCard,
            "wave3d" | "wave" => Self::Wave3d,
            "quantumblur" | "quantum" => Self::QuantumBlur,
            "liquidswipe" | "liquid" => Self::LiquidSwipe,
            "particleexplosion" | "explosion" | "particles" => Self::ParticleExplosion,
            "sparkle" => burst(BurstStyle::Sparkle, a),
            "rings" => burst(BurstStyle::Rings, a),
            "fireworks" => burst(BurstStyle::Fireworks, a),
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical effect name (aliases resolve to the long form).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bounce { .. } => "bounce",
            Self::Ripple { .. } => "ripple",
            Self::PressPop { .. } => "presspop",
            Self::Shake => "shake",
            Self::Fly { .. } => "fly",
            Self::Toast { .. } => "toast",
            Self::Jelly => "jelly",
            Self::Wobble => "wobble",
            Self::Pulse { .. } => "pulse",
            Self::Glow => "glow",
            Self::Float => "float",
            Self::Heartbeat => "heartbeat",
            Self::AddToCart { .. } => "addtocart",
            Self::QuickView => "quickview",
            Self::ElasticScale { .. } => "elasticscale",
            Self::NeonGlow { .. } => "neonglow",
            Self::PerspectiveTilt => "perspectivetilt",
            Self::MagneticHover => "magnetichover",
            Self::Gravity => "gravity",
            Self::SpringPhysics { .. } => "springphysics",
            Self::Friction => "friction",
            Self::Inertia => "inertia",
            Self::Rotate3d => "rotate3d",
            Self::FlipCard => "flipcard",
            Self::Wave3d => "wave3d",
            Self::QuantumBlur => "quantumblur",
            Self::LiquidSwipe => "liquidswipe",
            Self::ParticleExplosion => "particleexplosion",
            Self::Burst { style, .. } => style.name(),
        }
    }

    /// `name(key=value, ...)` with the resolved arguments.
    pub fn describe(&self) -> String {
        let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "default".to_string());
        let args = match self {
            Self::Bounce { scale } | Self::PressPop { scale } => format!("s={scale}"),
            Self::Ripple { radius, opacity } => format!("r={radius}, op={opacity}"),
            Self::Fly {
                target,
                duration_ms,
            } => format!("to={}, t={duration_ms}", opt(target)),
            Self::Toast { text, duration_ms } => format!(
                "text={}, t={}",
                opt(text),
                duration_ms.map_or_else(|| "default".to_string(), |ms| ms.to_string())
            ),
            Self::Pulse { interval_ms } => format!("interval={interval_ms}"),
            Self::AddToCart { target } => format!("to={}", opt(target)),
            Self::ElasticScale { intensity } => format!("intensity={intensity}"),
            Self::NeonGlow { color } => format!("color={color}"),
            Self::SpringPhysics { damping, stiffness } => {
                format!("damping={damping}, stiffness={stiffness}")
            }
            Self::Burst {
                color, duration_ms, ..
            } => format!("color={color}, t={duration_ms}"),
            _ => return self.name().to_string(),
        };
        format!("{}({args})", self.name())
    }

    /// Period of the self-triggering loop, for ambient behaviors.
    pub fn ambient_period_ms(&self) -> Option<f64> {
        match self {
            Self::Pulse { interval_ms } => Some(*interval_ms),
            Self::Glow => Some(2400.0),
            Self::Float => Some(3200.0),
            Self::Heartbeat => Some(1400.0),
            Self::NeonGlow { .. } => Some(1600.0),
            Self::Wave3d => Some(1200.0),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kind.rs"]
mod tests;
