use crate::element::node::{Element, PointerEvents, Props};

/// Bottom-centered message card that expires on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastOverlay {
    text: String,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl ToastOverlay {
    pub fn new(text: impl Into<String>, duration_ms: f64) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            text: text.into(),
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn remaining_ms(&self) -> f64 {
        (self.duration_ms - self.elapsed_ms).max(0.0)
    }

    pub(crate) fn tick(&mut self, dt_ms: f64) -> bool {
        if dt_ms.is_finite() {
            self.elapsed_ms += dt_ms.max(0.0);
        }
        self.elapsed_ms >= self.duration_ms
    }

    pub fn render(&self) -> Element {
        let container = Props::new()
            .attr("position", "absolute")
            .attr("left", 0.0)
            .attr("right", 0.0)
            .attr("bottom", 28.0)
            .attr("alignItems", "center")
            .pointer_events(PointerEvents::None);
        let card = Props::new()
            .attr("backgroundColor", "#0d1117")
            .attr("borderColor", "#222933")
            .attr("borderWidth", 1.0)
            .attr("borderRadius", 12.0)
            .attr("paddingVertical", 10.0)
            .attr("paddingHorizontal", 14.0);
        let label = Props::new()
            .attr("color", "#fff")
            .attr("fontWeight", "700");

        Element::host("fx:toast").with_props(container).with_child(
            Element::host("view").with_props(card).with_child(
                Element::host("text")
                    .with_props(label)
                    .with_child(Element::text(self.text.clone())),
            ),
        )
    }
}
