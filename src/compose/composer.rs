use std::{collections::HashMap, fmt, rc::Rc};

use crate::{
    effects::kind::{BUILTIN_NAMES, EffectKind},
    element::node::Element,
    fx::{
        args::FxArgs,
        parse::{FxItem, parse_fx_str},
    },
};

/// Wrapper constructor: receives the element built so far and the item's arguments.
pub type WrapFn = Rc<dyn Fn(Element, &FxArgs) -> Element>;

/// Effect name to wrapper table.
///
/// [`Composer::default`] knows every built-in behavior and alias. Composition itself is a pure
/// function of the table, the base element and the effect string.
#[derive(Clone)]
pub struct Composer {
    wrappers: HashMap<String, WrapFn>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Composer {
    /// A composer that knows no effects.
    pub fn empty() -> Self {
        Self {
            wrappers: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut composer = Self::empty();
        for &name in BUILTIN_NAMES {
            composer.register(name, move |node, args| {
                match EffectKind::from_args(name, args) {
                    Some(kind) => Element::effect(kind, node),
                    None => node,
                }
            });
        }
        composer
    }

    /// Register (or replace) the wrapper for `name`. Names are matched lower-cased.
    pub fn register(&mut self, name: &str, wrap: impl Fn(Element, &FxArgs) -> Element + 'static) {
        self.wrappers
            .insert(name.to_ascii_lowercase(), Rc::new(wrap));
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.wrappers.remove(&name.to_ascii_lowercase()).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.wrappers.contains_key(&name.to_ascii_lowercase())
    }

    /// Known names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.wrappers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse `spec` and wrap `base` with each known effect, first item innermost.
    #[tracing::instrument(level = "trace", skip(self, base))]
    pub fn compose(&self, base: Element, spec: &str) -> Element {
        self.compose_items(base, &parse_fx_str(spec))
    }

    pub fn compose_items(&self, base: Element, items: &[FxItem]) -> Element {
        items.iter().fold(base, |node, item| {
            match self.wrappers.get(&item.name) {
                Some(wrap) => wrap(node, &item.args),
                None => {
                    tracing::trace!(effect = %item.name, "unknown effect skipped");
                    node
                }
            }
        })
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("effects", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
