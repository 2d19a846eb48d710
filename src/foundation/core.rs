use std::{cell::Cell, fmt, rc::Rc, str::FromStr};

use crate::foundation::error::FxError;

pub use kurbo::{Affine, CubicBez, Point, Rect, Size, Vec2};

/// Smallest width/height a measured box is allowed to have once sanitized.
pub const MIN_SIZE: f64 = 12.0;

/// Scalar payload shared by effect arguments and element attributes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Bare flag (`vibrate`) or an explicit boolean attribute.
    Bool(bool),
    /// Any value matching `-?digits(.digits)?`.
    Number(f64),
    /// Everything else.
    Text(String),
}

impl Value {
    /// Finite numbers only; `NaN` and infinities read as absent.
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` only for [`Value::Bool(true)`](Value::Bool).
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Opaque handle of a measurable on-screen node, as handed out by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TargetHandle(pub u64);

/// Host-side identity of a mounted node. Resolved to a [`TargetHandle`] through
/// [`Host::find_handle`](crate::Host::find_handle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostInstance(pub u64);

/// Shared, reference-like slot that the host fills in once the node is mounted.
///
/// Clones share the same slot. Equality is identity.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<Cell<Option<HostInstance>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<HostInstance> {
        self.0.get()
    }

    pub fn set(&self, instance: HostInstance) {
        self.0.set(Some(instance));
    }

    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.current()).finish()
    }
}

/// On-screen box in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasuredBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MeasuredBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `None` when any component is not finite; hosts sometimes report garbage for
    /// detached nodes and that counts as a failed measurement.
    pub fn checked(self) -> Option<Self> {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            .then_some(self)
    }

    /// Clamp width and height up to `min`.
    pub fn sanitized_with(self, min: f64) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }

    pub fn sanitized(self) -> Self {
        self.sanitized_with(MIN_SIZE)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rect(self) -> Rect {
        Rect::from_origin_size(Point::new(self.x, self.y), self.size())
    }
}

/// Parses `x,y,width,height`; every component must be a finite number.
impl FromStr for MeasuredBox {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FxError::validation(format!("invalid box '{s}': {e}")))?;
        let &[x, y, width, height] = parts.as_slice() else {
            return Err(FxError::validation(format!(
                "invalid box '{s}': expected x,y,width,height"
            )));
        };
        Self::new(x, y, width, height).checked().ok_or_else(|| {
            FxError::validation(format!("invalid box '{s}': components must be finite"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
