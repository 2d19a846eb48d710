use std::collections::BTreeMap;

use crate::{
    animation::driver::{Driver, Prop},
    effects::kind::EffectKind,
    foundation::core::{Affine, Point, Value, Vec2},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Shadow {
    pub color: String,
    pub opacity: f64,
    pub radius: f64,
}

/// Expanding circle drawn behind the child by `ripple`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RippleVisual {
    pub radius: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Everything the host needs to paint one behavior wrapper for the current frame.
///
/// Angles are in degrees. `perspective` is set for the 3D behaviors only.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Visual {
    pub scale: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub opacity: f64,
    pub perspective: Option<f64>,
    pub shadow: Option<Shadow>,
    pub ripple: Option<RippleVisual>,
}

impl Default for Visual {
    fn default() -> Self {
        Self::of(&EffectKind::Shake, &Driver::new())
    }
}

impl Visual {
    pub fn of(kind: &EffectKind, driver: &Driver) -> Self {
        let v = |p: Prop| driver.value(p);
        let perspective = match kind {
            EffectKind::PerspectiveTilt | EffectKind::FlipCard => Some(1000.0),
            EffectKind::Rotate3d => Some(1200.0),
            EffectKind::Wave3d => Some(800.0),
            _ => None,
        };
        let shadow = match kind {
            EffectKind::Glow => {
                let op = v(Prop::ShadowOpacity);
                Some(Shadow {
                    color: "#a78bfa".to_string(),
                    opacity: op,
                    radius: 16.0 + op * 12.0,
                })
            }
            EffectKind::NeonGlow { color } => Some(Shadow {
                color: color.clone(),
                opacity: 0.8,
                radius: 20.0,
            }),
            _ => None,
        };
        let ripple = match kind {
            EffectKind::Ripple { radius, .. } => Some(RippleVisual {
                radius: *radius,
                scale: v(Prop::RippleScale),
                opacity: v(Prop::RippleOpacity),
            }),
            _ => None,
        };

        Self {
            scale: v(Prop::Scale),
            scale_x: v(Prop::ScaleX),
            scale_y: v(Prop::ScaleY),
            translate_x: v(Prop::TranslateX),
            translate_y: v(Prop::TranslateY),
            rotate: v(Prop::Rotate),
            rotate_x: v(Prop::RotateX),
            rotate_y: v(Prop::RotateY),
            rotate_z: v(Prop::RotateZ),
            opacity: v(Prop::Opacity),
            perspective,
            shadow,
            ripple,
        }
    }

    /// In-plane part of the transform, pivoting around `anchor`.
    ///
    /// Out-of-plane rotations (`rotate_x`, `rotate_y`) are left to the host.
    pub fn affine(&self, anchor: Point) -> Affine {
        let pivot = anchor.to_vec2();
        let theta = (self.rotate + self.rotate_z).to_radians();
        Affine::translate(Vec2::new(self.translate_x, self.translate_y))
            * Affine::translate(pivot)
            * Affine::rotate(theta)
            * Affine::scale_non_uniform(self.scale * self.scale_x, self.scale * self.scale_y)
            * Affine::translate(-pivot)
    }

    /// Style attributes that differ from the identity, for outlines and host adapters.
    pub fn attrs(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();
        let mut put = |key: &str, value: f64, rest: f64| {
            if (value - rest).abs() > 1e-9 {
                out.insert(key.to_string(), Value::Number(value));
            }
        };
        put("scale", self.scale, 1.0);
        put("scaleX", self.scale_x, 1.0);
        put("scaleY", self.scale_y, 1.0);
        put("translateX", self.translate_x, 0.0);
        put("translateY", self.translate_y, 0.0);
        put("rotate", self.rotate, 0.0);
        put("rotateX", self.rotate_x, 0.0);
        put("rotateY", self.rotate_y, 0.0);
        put("rotateZ", self.rotate_z, 0.0);
        put("opacity", self.opacity, 1.0);
        if let Some(p) = self.perspective {
            out.insert("perspective".to_string(), Value::Number(p));
        }
        if let Some(s) = &self.shadow {
            out.insert("shadowColor".to_string(), Value::Text(s.color.clone()));
            out.insert("shadowOpacity".to_string(), Value::Number(s.opacity));
            out.insert("shadowRadius".to_string(), Value::Number(s.radius));
        }
        out
    }
}
