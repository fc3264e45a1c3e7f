//! Project detail dialog.

use crate::config::ModalConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};
use crate::event::ESCAPE_KEY;

/// Details copied from the trigger that opened the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    pub github: String,
    /// Live demo URL, present only when non-blank.
    pub live: Option<String>,
}

impl ModalContent {
    /// Read `data-title`, `data-desc`, `data-github` and `data-live`.
    pub fn from_trigger(doc: &Document, trigger: ElementId) -> Self {
        let field = |key: &str| doc.data(trigger, key).unwrap_or_default().to_string();
        let live = doc
            .data(trigger, "live")
            .map(str::trim)
            .filter(|live| !live.is_empty())
            .map(str::to_string);
        Self {
            title: field("title"),
            description: field("desc"),
            github: field("github"),
            live,
        }
    }
}

/// Why the dialog closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Escape,
}

pub struct ProjectModal {
    modal: ElementId,
    title: Option<ElementId>,
    desc: Option<ElementId>,
    github: Option<ElementId>,
    live: Option<ElementId>,
    trigger_selector: Selector,
    close_selector: Selector,
    open_display: String,
    content: Option<ModalContent>,
}

impl ProjectModal {
    /// Needs the dialog element; the individual content slots are optional.
    pub fn new(doc: &Document, config: &ModalConfig) -> Result<Option<Self>, SelectorError> {
        let modal_selector = Selector::parse(&config.modal_selector)?;
        let trigger_selector = Selector::parse(&config.trigger_selector)?;
        let close_selector = Selector::parse(&config.close_selector)?;
        let find = |selector: &str| -> Result<Option<ElementId>, SelectorError> {
            Ok(doc.select(&Selector::parse(selector)?))
        };

        let Some(modal) = doc.select(&modal_selector) else {
            return Ok(None);
        };
        Ok(Some(Self {
            modal,
            title: find(&config.title_selector)?,
            desc: find(&config.desc_selector)?,
            github: find(&config.github_selector)?,
            live: find(&config.live_selector)?,
            trigger_selector,
            close_selector,
            open_display: config.open_display.clone(),
            content: None,
        }))
    }

    /// Whether the dialog is shown, judged by its `display` style.
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.style(self.modal, "display") == Some(self.open_display.as_str())
    }

    /// Content of the most recent open, if any.
    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Handle a click: opens from a trigger, closes from the close control
    /// or the backdrop. Returns true if the click was consumed.
    pub fn on_click(&mut self, doc: &mut Document, target: ElementId) -> bool {
        if let Some(trigger) = doc.closest(target, &self.trigger_selector) {
            let content = ModalContent::from_trigger(doc, trigger);
            self.open(doc, content);
            return true;
        }
        if !self.is_open(doc) {
            return false;
        }
        let close_hit = doc
            .closest(target, &self.close_selector)
            .is_some_and(|close| doc.contains(self.modal, close));
        if close_hit {
            self.close(doc, CloseReason::CloseButton);
            return true;
        }
        // Only a click on the dialog element itself, outside its content.
        if target == self.modal {
            self.close(doc, CloseReason::Backdrop);
            return true;
        }
        false
    }

    /// Close on Escape, but only while the dialog is visible.
    pub fn on_key(&mut self, doc: &mut Document, key: &str) -> bool {
        if key != ESCAPE_KEY || !self.is_open(doc) {
            return false;
        }
        self.close(doc, CloseReason::Escape);
        true
    }

    pub fn open(&mut self, doc: &mut Document, content: ModalContent) {
        if let Some(title) = self.title {
            doc.set_text(title, &content.title);
        }
        if let Some(desc) = self.desc {
            doc.set_text(desc, &content.description);
        }
        if let Some(github) = self.github {
            doc.set_attribute(github, "href", &content.github);
        }
        if let Some(live) = self.live {
            match &content.live {
                Some(url) => {
                    doc.set_attribute(live, "href", url);
                    doc.set_style(live, "display", "");
                }
                None => doc.set_style(live, "display", "none"),
            }
        }
        doc.set_style(self.modal, "display", &self.open_display);
        let body = doc.body();
        doc.set_style(body, "overflow", "hidden");
        log::info!("Opened project details: {}", content.title);
        self.content = Some(content);
    }

    pub fn close(&mut self, doc: &mut Document, reason: CloseReason) {
        doc.set_style(self.modal, "display", "none");
        let body = doc.body();
        doc.set_style(body, "overflow", "");
        log::debug!("Closed project details ({:?})", reason);
    }
}
