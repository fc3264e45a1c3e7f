//! Mobile hamburger menu.

use crate::config::MenuConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

pub struct HamburgerMenu {
    hamburger: ElementId,
    menu: ElementId,
    active_class: String,
}

impl HamburgerMenu {
    /// Needs both the hamburger button and the nav menu.
    pub fn new(doc: &Document, config: &MenuConfig) -> Result<Option<Self>, SelectorError> {
        let hamburger = Selector::parse(&config.hamburger_selector)?;
        let menu = Selector::parse(&config.menu_selector)?;
        Ok(match (doc.select(&hamburger), doc.select(&menu)) {
            (Some(hamburger), Some(menu)) => Some(Self {
                hamburger,
                menu,
                active_class: config.active_class.clone(),
            }),
            _ => None,
        })
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.menu, &self.active_class)
    }

    /// Handle a click. Returns true if the click hit the hamburger.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> bool {
        if !doc.contains(self.hamburger, target) {
            return false;
        }
        let open = doc.toggle_class(self.menu, &self.active_class);
        doc.element_mut(self.hamburger)
            .set_class(&self.active_class, open);
        true
    }

    pub fn close(&self, doc: &mut Document) {
        doc.remove_class(self.hamburger, &self.active_class);
        doc.remove_class(self.menu, &self.active_class);
    }
}
