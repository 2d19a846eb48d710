use std::rc::Rc;

use crate::{
    compose::composer::Composer,
    element::node::{Element, ElementKind, Props},
    foundation::{config::FxConfig, core::Value},
};

/// Element construction with the `fx` / `fxTarget` attributes intercepted.
///
/// An element carrying a non-empty effect string comes back wrapped in its behavior chain; one
/// carrying a target name comes back inside a [`TargetBoundary`](crate::TargetBoundary) element.
/// Both attributes are stripped. Everything else passes through untouched.
#[derive(Clone, Debug)]
pub struct ElementFactory {
    composer: Rc<Composer>,
    config: Rc<FxConfig>,
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::new(Composer::default(), FxConfig::default())
    }
}

impl ElementFactory {
    pub fn new(composer: Composer, config: FxConfig) -> Self {
        Self {
            composer: Rc::new(composer),
            config: Rc::new(config),
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    pub fn create_element(&self, kind: ElementKind, props: Props, children: Vec<Element>) -> Element {
        self.intercept(Element::new(kind, props, children))
    }

    /// Shorthand for a host element.
    pub fn create_host(&self, ty: &str, props: Props, children: Vec<Element>) -> Element {
        self.create_element(ElementKind::Host(ty.to_string()), props, children)
    }

    pub fn clone_element(&self, element: &Element, overrides: impl FnOnce(&mut Props)) -> Element {
        self.intercept(element.clone_with(overrides))
    }

    /// Intercept a whole tree built without the factory, innermost nodes first.
    pub fn transform(&self, mut tree: Element) -> Element {
        tree.children = std::mem::take(&mut tree.children)
            .into_iter()
            .map(|c| self.transform(c))
            .collect();
        self.intercept(tree)
    }

    fn intercept(&self, mut element: Element) -> Element {
        let spec = take_text(&mut element.props, &self.config.effect_attr);
        let target = take_text(&mut element.props, &self.config.target_attr);
        if spec.is_none() && target.is_none() {
            return element;
        }

        let key = element.key.take();
        let mut out = match &spec {
            Some(spec) => self.composer.compose(element, spec),
            None => element,
        };
        if let Some(name) = target {
            out = Element::target_boundary(name, out);
        }
        out.key = key;
        out
    }
}

/// Remove `key` when it holds non-empty text; anything else stays where it is.
fn take_text(props: &mut Props, key: &str) -> Option<String> {
    match props.attrs.get(key) {
        Some(Value::Text(s)) if !s.is_empty() => {}
        _ => return None,
    }
    match props.take_attr(key) {
        Some(Value::Text(s)) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/attach/factory.rs"]
mod tests;
