//! In-page anchor navigation.

use crate::config::ScrollConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

pub struct SmoothScroll {
    links: Selector,
    nav_offset: f64,
}

impl SmoothScroll {
    /// Returns `None` when the page has no in-page links.
    pub fn new(doc: &Document, config: &ScrollConfig) -> Result<Option<Self>, SelectorError> {
        let links = Selector::parse(&config.link_selector)?;
        if doc.select(&links).is_none() {
            return Ok(None);
        }
        Ok(Some(Self {
            links,
            nav_offset: config.nav_offset,
        }))
    }

    /// Scroll offset an anchor link points at, if it resolves.
    ///
    /// `#` alone means the top of the page. Targets are placed just below
    /// the fixed navigation bar.
    pub fn destination(&self, doc: &Document, link: ElementId) -> Option<f64> {
        let href = doc.attribute(link, "href")?;
        let fragment = href.strip_prefix('#')?;
        if fragment.is_empty() {
            return Some(0.0);
        }
        let target = doc.get_element_by_id(fragment)?;
        Some((doc.layout(target).top - self.nav_offset).max(0.0))
    }

    /// Handle a click. Returns true if the viewport was scrolled, in which
    /// case the mobile menu should close.
    pub fn on_click(&self, doc: &mut Document, target: ElementId) -> bool {
        let Some(link) = doc.closest(target, &self.links) else {
            return false;
        };
        match self.destination(doc, link) {
            Some(y) => {
                doc.viewport.scroll_to(y);
                log::debug!("Scrolled to {} for {:?}", y, doc.attribute(link, "href"));
                true
            }
            None => false,
        }
    }
}
