//! Reveal-on-scroll observer.
//!
//! Plays the role of an `IntersectionObserver`: each observed element gets
//! the visible class the first time enough of it is inside the viewport, and
//! is then dropped from observation.

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId, Layout, Selector, SelectorError};

pub struct RevealObserver {
    pending: Vec<ElementId>,
    visible_class: String,
    threshold: f64,
}

/// Fraction of `layout` inside the visible range `[top, bottom)`.
pub fn intersection_ratio(layout: Layout, (top, bottom): (f64, f64)) -> f64 {
    let overlap = layout.bottom().min(bottom) - layout.top.max(top);
    if layout.height <= 0.0 {
        // Zero-height boxes count as visible once their edge is on screen.
        return if layout.top >= top && layout.top <= bottom { 1.0 } else { 0.0 };
    }
    (overlap / layout.height).clamp(0.0, 1.0)
}

impl RevealObserver {
    pub fn new(doc: &Document, config: &RevealConfig) -> Result<Option<Self>, SelectorError> {
        let selector = Selector::parse(&config.selector)?;
        let pending = doc.select_all(&selector);
        if pending.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            pending,
            visible_class: config.visible_class.clone(),
            threshold: config.threshold.clamp(0.0, 1.0),
        }))
    }

    /// Elements not revealed yet.
    pub fn pending(&self) -> &[ElementId] {
        &self.pending
    }

    /// Check every pending element against the viewport. Returns the
    /// elements revealed by this pass.
    pub fn observe(&mut self, doc: &mut Document) -> Vec<ElementId> {
        let range = doc.viewport.visible_range();
        let threshold = self.threshold;
        let (revealed, pending): (Vec<_>, Vec<_>) = self.pending.iter().copied().partition(|el| {
            let ratio = intersection_ratio(doc.layout(*el), range);
            ratio > 0.0 && ratio >= threshold
        });
        for el in &revealed {
            doc.add_class(*el, &self.visible_class);
        }
        self.pending = pending;
        revealed
    }
}
