//! Project category filter.

use crate::config::FilterConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

pub struct ProjectFilter {
    buttons: Vec<ElementId>,
    cards: Vec<ElementId>,
    button_selector: Selector,
    active_class: String,
    all_value: String,
}

/// Whether a card with the given `data-category` value passes `filter`.
///
/// Categories are a whitespace-separated tag set.
pub fn card_matches(category: Option<&str>, filter: &str, all_value: &str) -> bool {
    filter == all_value
        || category.is_some_and(|tags| tags.split_whitespace().any(|tag| tag == filter))
}

impl ProjectFilter {
    /// Needs at least one filter button.
    pub fn new(doc: &Document, config: &FilterConfig) -> Result<Option<Self>, SelectorError> {
        let button_selector = Selector::parse(&config.button_selector)?;
        let card_selector = Selector::parse(&config.card_selector)?;
        let buttons = doc.select_all(&button_selector);
        if buttons.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            buttons,
            cards: doc.select_all(&card_selector),
            button_selector,
            active_class: config.active_class.clone(),
            all_value: config.all_value.clone(),
        }))
    }

    /// The currently active filter button, if any.
    pub fn active(&self, doc: &Document) -> Option<ElementId> {
        self.buttons
            .iter()
            .copied()
            .find(|b| doc.has_class(*b, &self.active_class))
    }

    /// Cards currently shown.
    pub fn visible_cards(&self, doc: &Document) -> Vec<ElementId> {
        self.cards
            .iter()
            .copied()
            .filter(|card| doc.style(*card, "display") != Some("none"))
            .collect()
    }

    /// Handle a click. Returns the applied filter value if a filter button
    /// was hit.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> Option<String> {
        let button = doc.closest(target, &self.button_selector)?;
        if !self.buttons.contains(&button) {
            return None;
        }
        let filter = doc
            .data(button, "filter")
            .unwrap_or(self.all_value.as_str())
            .to_string();
        self.select(doc, button, &filter);
        Some(filter)
    }

    fn select(&self, doc: &mut Document, button: ElementId, filter: &str) {
        for b in &self.buttons {
            doc.element_mut(*b)
                .set_class(&self.active_class, *b == button);
        }
        let mut shown = 0;
        for card in &self.cards {
            let visible = card_matches(doc.data(*card, "category"), filter, &self.all_value);
            doc.set_style(*card, "display", if visible { "" } else { "none" });
            shown += usize::from(visible);
        }
        log::debug!("Filter '{}' shows {}/{} projects", filter, shown, self.cards.len());
    }
}
