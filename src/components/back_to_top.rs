//! Back-to-top button.

use crate::config::BackToTopConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

pub struct BackToTop {
    button: ElementId,
    visible_class: String,
    threshold: f64,
}

impl BackToTop {
    pub fn new(doc: &Document, config: &BackToTopConfig) -> Result<Option<Self>, SelectorError> {
        let selector = Selector::parse(&config.selector)?;
        Ok(doc.select(&selector).map(|button| Self {
            button,
            visible_class: config.visible_class.clone(),
            threshold: config.threshold,
        }))
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.has_class(self.button, &self.visible_class)
    }

    /// Show the button once the page is scrolled past the threshold.
    pub fn on_scroll(&self, doc: &mut Document) {
        let show = doc.viewport.scroll_y > self.threshold;
        doc.element_mut(self.button)
            .set_class(&self.visible_class, show);
    }

    /// Handle a click. Returns true if the button was hit.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> bool {
        if !doc.contains(self.button, target) {
            return false;
        }
        doc.viewport.scroll_to(0.0);
        true
    }
}
