//! Loading overlay that fades out once the page has loaded.

use std::time::Duration;

use crate::config::PreloaderConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

/// Stage of the overlay's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderStage {
    /// Overlay covers the page.
    Showing,
    /// Fade class applied, overlay still in layout.
    Fading,
    /// Overlay removed from layout.
    Hidden,
}

pub struct Preloader {
    overlay: ElementId,
    fade_class: String,
    delay: Duration,
    fade: Duration,
    stage: PreloaderStage,
}

impl Preloader {
    /// Returns `None` when the page has no overlay.
    pub fn new(doc: &Document, config: &PreloaderConfig) -> Result<Option<Self>, SelectorError> {
        let selector = Selector::parse(&config.selector)?;
        Ok(doc.select(&selector).map(|overlay| Self {
            overlay,
            fade_class: config.fade_class.clone(),
            delay: config.delay(),
            fade: config.fade(),
            stage: PreloaderStage::Showing,
        }))
    }

    pub fn stage(&self) -> PreloaderStage {
        self.stage
    }

    /// Delay between `load` and the start of the fade.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start fading. Returns how long until the overlay should be hidden,
    /// or `None` if the fade already happened.
    pub fn begin_fade(&mut self, doc: &mut Document) -> Option<Duration> {
        if self.stage != PreloaderStage::Showing {
            return None;
        }
        doc.add_class(self.overlay, &self.fade_class);
        self.stage = PreloaderStage::Fading;
        Some(self.fade)
    }

    pub fn hide(&mut self, doc: &mut Document) {
        if self.stage == PreloaderStage::Hidden {
            return;
        }
        doc.set_style(self.overlay, "display", "none");
        self.stage = PreloaderStage::Hidden;
        log::debug!("Preloader hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, ElementId) {
        let mut doc = Document::new();
        let overlay = doc.create_element("div", None);
        doc.element_mut(overlay).id = Some("preloader".into());
        (doc, overlay)
    }

    #[test]
    fn test_disabled_without_overlay() {
        let doc = Document::new();
        assert!(Preloader::new(&doc, &PreloaderConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_fade_then_hide() {
        let (mut doc, overlay) = page();
        let mut preloader = Preloader::new(&doc, &PreloaderConfig::default())
            .unwrap()
            .unwrap();

        assert_eq!(preloader.begin_fade(&mut doc), Some(Duration::from_millis(500)));
        assert!(doc.has_class(overlay, "fade-out"));
        assert_eq!(preloader.stage(), PreloaderStage::Fading);
        assert_eq!(preloader.begin_fade(&mut doc), None);

        preloader.hide(&mut doc);
        assert_eq!(doc.style(overlay, "display"), Some("none"));
        assert_eq!(preloader.stage(), PreloaderStage::Hidden);
    }
}
