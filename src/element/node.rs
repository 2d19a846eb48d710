use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{
    effects::kind::EffectKind,
    foundation::core::{MeasuredBox, NodeRef, TargetHandle, Value},
};

/// Page-space press location handed to press handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PressEvent {
    pub x: f64,
    pub y: f64,
}

/// Post-layout notification. `target` is the host handle of the node that was laid out, when the
/// host knows it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutEvent {
    pub target: Option<TargetHandle>,
    pub layout: Option<MeasuredBox>,
}

pub type PressHandler = Rc<dyn Fn(&PressEvent)>;
pub type LayoutHandler = Rc<dyn Fn(&LayoutEvent)>;

/// The three press callbacks behaviors listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressSlot {
    PressIn,
    PressOut,
    Press,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
    BoxNone,
}

#[derive(Clone, Default)]
pub struct Props {
    pub attrs: BTreeMap<String, Value>,
    pub on_press: Option<PressHandler>,
    pub on_press_in: Option<PressHandler>,
    pub on_press_out: Option<PressHandler>,
    pub on_layout: Option<LayoutHandler>,
    pub node_ref: Option<NodeRef>,
    pub pointer_events: PointerEvents,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn on_press(mut self, f: impl Fn(&PressEvent) + 'static) -> Self {
        self.on_press = Some(Rc::new(f));
        self
    }

    pub fn on_press_in(mut self, f: impl Fn(&PressEvent) + 'static) -> Self {
        self.on_press_in = Some(Rc::new(f));
        self
    }

    pub fn on_press_out(mut self, f: impl Fn(&PressEvent) + 'static) -> Self {
        self.on_press_out = Some(Rc::new(f));
        self
    }

    pub fn on_layout(mut self, f: impl Fn(&LayoutEvent) + 'static) -> Self {
        self.on_layout = Some(Rc::new(f));
        self
    }

    pub fn node_ref(mut self, node_ref: NodeRef) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn pointer_events(mut self, mode: PointerEvents) -> Self {
        self.pointer_events = mode;
        self
    }

    pub fn handler(&self, slot: PressSlot) -> Option<&PressHandler> {
        match slot {
            PressSlot::PressIn => self.on_press_in.as_ref(),
            PressSlot::PressOut => self.on_press_out.as_ref(),
            PressSlot::Press => self.on_press.as_ref(),
        }
    }

    /// Remove and return the attribute `key`.
    pub fn take_attr(&mut self, key: &str) -> Option<Value> {
        self.attrs.remove(key)
    }

    fn clear_press_handlers(&mut self) {
        self.on_press = None;
        self.on_press_in = None;
        self.on_press_out = None;
    }
}

fn same_handler<T: ?Sized>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        self.attrs == other.attrs
            && self.pointer_events == other.pointer_events
            && self.node_ref == other.node_ref
            && same_handler(&self.on_press, &other.on_press)
            && same_handler(&self.on_press_in, &other.on_press_in)
            && same_handler(&self.on_press_out, &other.on_press_out)
            && same_handler(&self.on_layout, &other.on_layout)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers: Vec<&str> = [
            ("on_press", self.on_press.is_some()),
            ("on_press_in", self.on_press_in.is_some()),
            ("on_press_out", self.on_press_out.is_some()),
            ("on_layout", self.on_layout.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        f.debug_struct("Props")
            .field("attrs", &self.attrs)
            .field("handlers", &handlers)
            .field("node_ref", &self.node_ref)
            .field("pointer_events", &self.pointer_events)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Native host node such as `"view"` or `"button"`.
    Host(String),
    Text(String),
    /// Behavior wrapper produced by the composer.
    Effect(EffectKind),
    /// Registers its child under a target name once laid out.
    TargetBoundary(String),
}

/// Host-agnostic element description.
///
/// This is what the factory intercepts and the composer wraps. Equality is structural, with
/// handlers compared by pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub props: Props,
    pub children: Vec<Element>,
    pub key: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind, props: Props, children: Vec<Element>) -> Self {
        Self {
            kind,
            props,
            children,
            key: None,
        }
    }

    pub fn host(ty: impl Into<String>) -> Self {
        Self::new(ElementKind::Host(ty.into()), Props::default(), Vec::new())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(s.into()), Props::default(), Vec::new())
    }

    pub fn effect(kind: EffectKind, child: Element) -> Self {
        Self::new(ElementKind::Effect(kind), Props::default(), vec![child])
    }

    pub fn target_boundary(name: impl Into<String>, child: Element) -> Self {
        Self::new(
            ElementKind::TargetBoundary(name.into()),
            Props::default(),
            vec![child],
        )
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.props.attrs.get(key)
    }

    pub fn effect_kind(&self) -> Option<&EffectKind> {
        match &self.kind {
            ElementKind::Effect(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    /// Clone with some props replaced.
    pub fn clone_with(&self, overrides: impl FnOnce(&mut Props)) -> Self {
        let mut out = self.clone();
        overrides(&mut out.props);
        out
    }

    pub(crate) fn without_press_handlers(&self) -> Self {
        self.clone_with(Props::clear_press_handlers)
    }

    /// Non-interactive copy used as a flying ghost: no handlers, no ref, no hit testing.
    pub fn ghost(&self) -> Self {
        let mut out = self.clone_with(|p| {
            p.clear_press_handlers();
            p.on_layout = None;
            p.node_ref = None;
            p.pointer_events = PointerEvents::None;
        });
        out.children = self.children.iter().map(Element::ghost).collect();
        out
    }

    /// The single element child wrappers require.
    pub fn only_child(&self) -> Option<&Element> {
        match self.children.as_slice() {
            [child] if !child.is_text() => Some(child),
            _ => None,
        }
    }

    /// Short label used in logs and outlines.
    pub fn label(&self) -> String {
        match &self.kind {
            ElementKind::Host(ty) => format!("<{ty}>"),
            ElementKind::Text(s) => format!("{s:?}"),
            ElementKind::Effect(kind) => kind.describe(),
            ElementKind::TargetBoundary(name) => format!("target({name})"),
        }
    }

    /// Indented one-line-per-node rendering, outermost first.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(0, &mut out);
        out
    }

    fn outline_into(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.label());
        out.push('\n');
        for child in &self.children {
            child.outline_into(depth + 1, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/node.rs"]
mod tests;
