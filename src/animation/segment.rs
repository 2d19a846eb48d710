use crate::animation::{ease::Ease, spring::SpringConfig};

/// One declarative step of a property animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Segment {
    /// Eased transition from the current value to `to`.
    Timing { to: f64, duration_ms: f64, ease: Ease },
    /// Spring toward `to`. With `max_ms` set, the step hands over to the next segment after
    /// that long even if the spring is still moving.
    Spring {
        to: f64,
        config: SpringConfig,
        max_ms: Option<f64>,
    },
    /// Immediate assignment.
    Jump { to: f64 },
    /// Hold the current value.
    Wait { ms: f64 },
}

impl Segment {
    pub fn timing(to: f64, duration_ms: f64) -> Self {
        Self::Timing {
            to,
            duration_ms,
            ease: Ease::default(),
        }
    }

    pub fn timing_eased(to: f64, duration_ms: f64, ease: Ease) -> Self {
        Self::Timing {
            to,
            duration_ms,
            ease,
        }
    }

    pub fn spring(to: f64, config: SpringConfig) -> Self {
        Self::Spring {
            to,
            config,
            max_ms: None,
        }
    }

    pub fn spring_for(to: f64, config: SpringConfig, max_ms: f64) -> Self {
        Self::Spring {
            to,
            config,
            max_ms: Some(max_ms),
        }
    }

    pub fn jump(to: f64) -> Self {
        Self::Jump { to }
    }

    pub fn wait(ms: f64) -> Self {
        Self::Wait { ms }
    }

    /// Nominal length, `None` for open-ended springs.
    pub fn nominal_ms(&self) -> Option<f64> {
        match *self {
            Self::Timing { duration_ms, .. } => Some(duration_ms.max(0.0)),
            Self::Spring { max_ms, .. } => max_ms,
            Self::Jump { .. } => Some(0.0),
            Self::Wait { ms } => Some(ms.max(0.0)),
        }
    }
}
