use serde::ser::SerializeMap as _;

use crate::foundation::core::Value;

/// Insertion-ordered argument map of one effect token.
///
/// Re-inserting a key overwrites the value but keeps the key's original position, so the
/// order always reflects first appearance in the source string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FxArgs(Vec<(String, Value)>);

impl FxArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// The first of `keys` that is present decides; a present but non-numeric value yields
    /// `default` rather than falling through to the next key.
    pub fn first_number_or(&self, keys: &[&str], default: f64) -> f64 {
        self.first_number(keys).unwrap_or(default)
    }

    /// Same lookup as [`FxArgs::first_number_or`], without a default.
    pub fn first_number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|k| self.get(k))
            .and_then(Value::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// First of `keys` holding text.
    pub fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.text(k))
    }

    /// Bare flags (`name(cart)` -> `cart`), in source order.
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| v.is_flag())
            .map(|(k, _)| k.as_str())
    }

    /// Target name for cross-element effects.
    ///
    /// `to=` or `target=` text wins. Otherwise a single bare flag names the target
    /// (`fly(cart)`); several flags are ambiguous and, like no flag at all, fall back to
    /// `default`. Other text values (`color=red`) are never read as target names.
    pub fn target_or<'a>(&'a self, default: &'a str) -> TargetPick<'a> {
        if let Some(name) = self.first_text(&["to", "target"]) {
            return TargetPick::Explicit(name);
        }
        let mut flags = self.flags();
        match (flags.next(), flags.next()) {
            (Some(only), None) => TargetPick::Flag(only),
            (Some(_), Some(_)) => TargetPick::Ambiguous(default),
            (None, _) => TargetPick::Default(default),
        }
    }
}

/// How [`FxArgs::target_or`] arrived at a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetPick<'a> {
    Explicit(&'a str),
    Flag(&'a str),
    Ambiguous(&'a str),
    Default(&'a str),
}

impl<'a> TargetPick<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Self::Explicit(n) | Self::Flag(n) | Self::Ambiguous(n) | Self::Default(n) => n,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FxArgs
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

impl serde::Serialize for FxArgs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fx/args.rs"]
mod tests;
