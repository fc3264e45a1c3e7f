//! Custom cursor dot and trailing follower.

use crate::config::CursorConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

pub struct CursorFollower {
    cursor: ElementId,
    follower: ElementId,
    interactive: Selector,
    hover_class: String,
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

impl CursorFollower {
    /// Needs both the cursor dot and the follower.
    pub fn new(doc: &Document, config: &CursorConfig) -> Result<Option<Self>, SelectorError> {
        let cursor = Selector::parse(&config.cursor_selector)?;
        let follower = Selector::parse(&config.follower_selector)?;
        let interactive = Selector::parse(&config.interactive_selector)?;
        Ok(match (doc.select(&cursor), doc.select(&follower)) {
            (Some(cursor), Some(follower)) => Some(Self {
                cursor,
                follower,
                interactive,
                hover_class: config.hover_class.clone(),
            }),
            _ => None,
        })
    }

    pub fn on_pointer_move(&self, doc: &mut Document, x: f64, y: f64) {
        doc.viewport.pointer = (x, y);
        for el in [self.cursor, self.follower] {
            doc.set_style(el, "left", &px(x));
            doc.set_style(el, "top", &px(y));
        }
    }

    pub fn on_pointer_over(&self, doc: &mut Document, target: ElementId) {
        if doc.closest(target, &self.interactive).is_some() {
            doc.add_class(self.follower, &self.hover_class);
        }
    }

    pub fn on_pointer_out(&self, doc: &mut Document, target: ElementId) {
        if doc.closest(target, &self.interactive).is_some() {
            doc.remove_class(self.follower, &self.hover_class);
        }
    }
}
