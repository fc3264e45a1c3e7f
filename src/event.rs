//! Page events delivered to the component controllers.

use crate::dom::ElementId;

/// Name of the key that dismisses dialogs.
pub const ESCAPE_KEY: &str = "Escape";

/// An input event, as the browser would deliver it to page listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The page and all its resources finished loading (`window.onload`).
    Load,
    /// A click whose innermost target is the given element.
    Click(ElementId),
    /// The window scrolled to a new vertical offset.
    Scroll { y: f64 },
    /// The window's visible height changed.
    Resize { height: f64 },
    /// A key was pressed anywhere on the page.
    KeyDown(String),
    /// The pointer moved to client coordinates.
    PointerMove { x: f64, y: f64 },
    /// The pointer entered an element.
    PointerOver(ElementId),
    /// The pointer left an element.
    PointerOut(ElementId),
    /// A form was submitted.
    Submit(ElementId),
}

impl PageEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Load => "load",
            PageEvent::Click(_) => "click",
            PageEvent::Scroll { .. } => "scroll",
            PageEvent::Resize { .. } => "resize",
            PageEvent::KeyDown(_) => "keydown",
            PageEvent::PointerMove { .. } => "pointermove",
            PageEvent::PointerOver(_) => "pointerover",
            PageEvent::PointerOut(_) => "pointerout",
            PageEvent::Submit(_) => "submit",
        }
    }
}
