/// Damped harmonic oscillator parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
        }
    }
}

/// Integration step in milliseconds.
const STEP_MS: f64 = 1.0;
const REST_DISPLACEMENT: f64 = 1e-3;
/// Units per second.
const REST_SPEED: f64 = 1e-2;
/// Hard stop for very underdamped configs.
pub(crate) const MAX_SETTLE_MS: f64 = 10_000.0;

impl SpringConfig {
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    fn sane(self) -> Self {
        let fix = |v: f64, min: f64, fallback: f64| {
            if v.is_finite() { v.max(min) } else { fallback }
        };
        Self {
            damping: fix(self.damping, 0.0, 10.0),
            stiffness: fix(self.stiffness, 1e-3, 100.0),
            mass: fix(self.mass, 1e-3, 1.0),
        }
    }

    pub fn is_at_rest(x: f64, v: f64, to: f64) -> bool {
        (x - to).abs() < REST_DISPLACEMENT && v.abs() < REST_SPEED
    }

    /// Advance `(x, v)` toward `to` for at most `budget_ms`. Returns the milliseconds consumed,
    /// which is less than the budget only when the spring came to rest (in which case `x == to`
    /// and `v == 0`).
    pub fn advance(self, x: &mut f64, v: &mut f64, to: f64, budget_ms: f64) -> f64 {
        let cfg = self.sane();
        let mut used = 0.0;
        while used < budget_ms {
            if Self::is_at_rest(*x, *v, to) {
                *x = to;
                *v = 0.0;
                return used;
            }
            let step = STEP_MS.min(budget_ms - used);
            let dt = step / 1000.0;
            // Backward Euler: stays stable for any stiffness/damping an effect string can carry.
            let k = cfg.stiffness / cfg.mass;
            let c = cfg.damping / cfg.mass;
            *v = (*v - dt * k * (*x - to)) / (1.0 + dt * c + dt * dt * k);
            *x += *v * dt;
            used += step;
        }
        if Self::is_at_rest(*x, *v, to) {
            *x = to;
            *v = 0.0;
        }
        used
    }
}
