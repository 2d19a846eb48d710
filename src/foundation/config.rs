use crate::foundation::{
    core::MIN_SIZE,
    error::{FxError, FxResult},
};

/// Runtime knobs shared by the factory, the registry and the behaviors.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// let cfg = sparkfx::FxConfig::from_json_str(r#"{ "default_target": "bag" }"#).unwrap();
/// assert_eq!(cfg.default_target, "bag");
/// assert_eq!(cfg.effect_attr, "fx");
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Attribute carrying the effect spec string.
    pub effect_attr: String,
    /// Attribute carrying the target name.
    pub target_attr: String,
    /// Floor applied to measured widths and heights.
    pub min_box_size: f64,
    /// Target used by `fly`/`addtocart` when the spec names none.
    pub default_target: String,
    /// Emit `tracing` warnings for missing targets and failed measurements.
    pub dev_warnings: bool,
    pub toast: ToastConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub default_text: String,
    pub duration_ms: f64,
    pub cart_added_text: String,
    pub cart_fallback_text: String,
    pub cart_duration_ms: f64,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            effect_attr: "fx".to_string(),
            target_attr: "fxTarget".to_string(),
            min_box_size: MIN_SIZE,
            default_target: "cart".to_string(),
            dev_warnings: cfg!(debug_assertions),
            toast: ToastConfig::default(),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_text: "Feito".to_string(),
            duration_ms: 1600.0,
            cart_added_text: "\u{2713} Produto adicionado!".to_string(),
            cart_fallback_text: "\u{2713} Adicionado ao carrinho".to_string(),
            cart_duration_ms: 1400.0,
        }
    }
}

impl FxConfig {
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> FxResult<()> {
        if self.effect_attr.trim().is_empty() || self.target_attr.trim().is_empty() {
            return Err(FxError::config("attribute names must be non-empty"));
        }
        if self.effect_attr == self.target_attr {
            return Err(FxError::config(
                "effect_attr and target_attr must be different",
            ));
        }
        if !self.min_box_size.is_finite() || self.min_box_size < 0.0 {
            return Err(FxError::config("min_box_size must be finite and >= 0"));
        }
        if self.default_target.trim().is_empty() {
            return Err(FxError::config("default_target must be non-empty"));
        }
        for (what, ms) in [
            ("toast.duration_ms", self.toast.duration_ms),
            ("toast.cart_duration_ms", self.toast.cart_duration_ms),
        ] {
            if !ms.is_finite() || ms <= 0.0 {
                return Err(FxError::config(format!("{what} must be finite and > 0")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
