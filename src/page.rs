//! Page controller: owns the document, the timer queue and every enabled
//! component, and routes events and timers to them.
//!
//! Everything runs on one task. The only suspension point inside
//! [`Page::dispatch`] is the contact form request; timers only fire when the
//! caller moves time forward with [`Page::advance_to`].

use std::time::Duration;

use thiserror::Error;

use crate::components::{
    BackToTop, ContactForm, CursorFollower, HamburgerMenu, Preloader, ProjectFilter, ProjectModal,
    Resolution, RevealObserver, SmoothScroll, ThemeToggle, TypewriterEffect,
};
use crate::config::Config;
use crate::dom::{Document, ElementId, SelectorError};
use crate::event::PageEvent;
use crate::scheduler::Scheduler;
use crate::transport::{FormResponse, FormSubmission, FormTransport, TransportError};

/// Deferred work owned by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimer {
    TypewriterStep,
    PreloaderFade,
    PreloaderHide,
    ClearStatus,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid selector in configuration: {0}")]
    Selector(#[from] SelectorError),
}

pub struct Page<T> {
    document: Document,
    scheduler: Scheduler<PageTimer>,
    transport: T,
    loaded: bool,
    preloader: Option<Preloader>,
    smooth_scroll: Option<SmoothScroll>,
    reveal: Option<RevealObserver>,
    theme: Option<ThemeToggle>,
    menu: Option<HamburgerMenu>,
    typewriter: Option<TypewriterEffect>,
    filter: Option<ProjectFilter>,
    modal: Option<ProjectModal>,
    contact: Option<ContactForm>,
    back_to_top: Option<BackToTop>,
    cursor: Option<CursorFollower>,
}

impl<T: FormTransport> Page<T> {
    /// Run every component initializer against `document`.
    ///
    /// Components whose elements are missing stay disabled. Only a malformed
    /// selector in `config` is an error.
    pub fn init(mut document: Document, config: &Config, transport: T) -> Result<Self, PageError> {
        let typewriter = TypewriterEffect::new(&mut document, &config.typewriter)?;
        let mut page = Self {
            preloader: Preloader::new(&document, &config.preloader)?,
            smooth_scroll: SmoothScroll::new(&document, &config.scroll)?,
            reveal: RevealObserver::new(&document, &config.reveal)?,
            theme: ThemeToggle::new(&document, &config.theme)?,
            menu: HamburgerMenu::new(&document, &config.menu)?,
            typewriter,
            filter: ProjectFilter::new(&document, &config.filter)?,
            modal: ProjectModal::new(&document, &config.modal)?,
            contact: ContactForm::new(&document, &config.contact)?,
            back_to_top: BackToTop::new(&document, &config.back_to_top)?,
            cursor: CursorFollower::new(&document, &config.cursor)?,
            document,
            scheduler: Scheduler::new(),
            transport,
            loaded: false,
        };

        if let Some(typewriter) = &page.typewriter {
            page.scheduler
                .schedule_after(typewriter.start_delay(), PageTimer::TypewriterStep);
        }
        page.on_viewport_change();

        let (enabled, disabled): (Vec<_>, Vec<_>) =
            page.components().into_iter().partition(|(_, on)| *on);
        log::info!("Page ready: {} component(s) enabled", enabled.len());
        for (name, _) in disabled {
            log::debug!("Component '{}' disabled: elements not found", name);
        }
        Ok(page)
    }

    /// Every component with whether it is enabled.
    pub fn components(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("preloader", self.preloader.is_some()),
            ("smooth-scroll", self.smooth_scroll.is_some()),
            ("reveal", self.reveal.is_some()),
            ("theme", self.theme.is_some()),
            ("menu", self.menu.is_some()),
            ("typewriter", self.typewriter.is_some()),
            ("filter", self.filter.is_some()),
            ("modal", self.modal.is_some()),
            ("contact", self.contact.is_some()),
            ("back-to-top", self.back_to_top.is_some()),
            ("cursor", self.cursor.is_some()),
        ]
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next timer is due, if any is pending.
    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn typewriter(&self) -> Option<&TypewriterEffect> {
        self.typewriter.as_ref()
    }

    pub fn filter(&self) -> Option<&ProjectFilter> {
        self.filter.as_ref()
    }

    pub fn modal(&self) -> Option<&ProjectModal> {
        self.modal.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn theme(&self) -> Option<&ThemeToggle> {
        self.theme.as_ref()
    }

    pub fn preloader(&self) -> Option<&Preloader> {
        self.preloader.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealObserver> {
        self.reveal.as_ref()
    }

    pub fn menu(&self) -> Option<&HamburgerMenu> {
        self.menu.as_ref()
    }

    pub fn back_to_top(&self) -> Option<&BackToTop> {
        self.back_to_top.as_ref()
    }

    /// Deliver one event. Submissions are awaited to completion.
    pub async fn dispatch(&mut self, event: PageEvent) {
        log::trace!("{} at {:?}", event.name(), self.now());
        match event {
            PageEvent::Load => self.on_load(),
            PageEvent::Click(target) => self.on_click(target),
            PageEvent::Scroll { y } => {
                self.document.viewport.scroll_to(y);
                self.on_viewport_change();
            }
            PageEvent::Resize { height } => {
                self.document.viewport.inner_height = height.max(0.0);
                self.on_viewport_change();
            }
            PageEvent::KeyDown(key) => {
                if let Some(modal) = &mut self.modal {
                    modal.on_key(&mut self.document, &key);
                }
            }
            PageEvent::PointerMove { x, y } => {
                if let Some(cursor) = &self.cursor {
                    cursor.on_pointer_move(&mut self.document, x, y);
                }
            }
            PageEvent::PointerOver(target) => {
                if let Some(cursor) = &self.cursor {
                    cursor.on_pointer_over(&mut self.document, target);
                }
            }
            PageEvent::PointerOut(target) => {
                if let Some(cursor) = &self.cursor {
                    cursor.on_pointer_out(&mut self.document, target);
                }
            }
            PageEvent::Submit(form) => {
                self.submit(form).await;
            }
        }
    }

    fn on_load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        if let Some(preloader) = &self.preloader {
            self.scheduler
                .schedule_after(preloader.delay(), PageTimer::PreloaderFade);
        }
        self.on_viewport_change();
    }

    fn on_click(&mut self, target: ElementId) {
        let doc = &mut self.document;
        let scroll_before = doc.viewport.scroll_y;

        if let Some(menu) = &self.menu {
            menu.on_click(doc, target);
        }
        if let Some(scroll) = &self.smooth_scroll {
            if scroll.on_click(doc, target) {
                if let Some(menu) = &self.menu {
                    menu.close(doc);
                }
            }
        }
        if let Some(theme) = &self.theme {
            theme.on_click(doc, target);
        }
        if let Some(filter) = &self.filter {
            filter.on_click(doc, target);
        }
        if let Some(modal) = &mut self.modal {
            modal.on_click(doc, target);
        }
        if let Some(back_to_top) = &self.back_to_top {
            back_to_top.on_click(doc, target);
        }

        if self.document.viewport.scroll_y != scroll_before {
            self.on_viewport_change();
        }
    }

    fn on_viewport_change(&mut self) {
        if let Some(reveal) = &mut self.reveal {
            for el in reveal.observe(&mut self.document) {
                log::trace!("Revealed {:?}", el);
            }
        }
        if let Some(back_to_top) = &self.back_to_top {
            back_to_top.on_scroll(&mut self.document);
        }
    }

    /// Submit the contact form and wait for the outcome.
    ///
    /// Returns `None` if `form` is not the contact form or a submission is
    /// already pending. The clock does not move while the request is awaited;
    /// callers that need timers to keep running use
    /// [`Page::begin_submission`] and [`Page::finish_submission`] instead.
    pub async fn submit(&mut self, form: ElementId) -> Option<Resolution> {
        let submission = self.begin_submission(form)?;
        let result = self.transport.send(&submission).await;
        self.finish_submission(result)
    }

    /// Lock the contact form and capture its fields for sending.
    ///
    /// A newer submission cancels the status-clear timer of an older one, so
    /// each status message stays up for the full delay.
    pub fn begin_submission(&mut self, form: ElementId) -> Option<FormSubmission> {
        let contact = self.contact.as_mut()?;
        if contact.form() != form {
            return None;
        }
        let (submission, stale_timer) = contact.begin(&mut self.document)?;
        if let Some(timer) = stale_timer {
            self.scheduler.cancel(timer);
        }
        Some(submission)
    }

    /// Report the outcome of the pending submission at the current time and
    /// schedule the status to clear.
    pub fn finish_submission(
        &mut self,
        result: Result<FormResponse, TransportError>,
    ) -> Option<Resolution> {
        let contact = self.contact.as_mut()?;
        if !contact.is_pending() {
            log::warn!("Submission result arrived with nothing pending");
            return None;
        }
        let resolution = contact.resolve(&mut self.document, result);
        let timer = self
            .scheduler
            .schedule_after(contact.clear_after(), PageTimer::ClearStatus);
        contact.set_clear_timer(timer);
        Some(resolution)
    }

    /// Fire every timer due up to `until`, then move the clock there.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some((_, timer)) = self.scheduler.pop_due(until) {
            self.fire(timer);
        }
        self.scheduler.advance_clock(until);
    }

    pub fn advance(&mut self, by: Duration) {
        self.advance_to(self.now() + by);
    }

    fn fire(&mut self, timer: PageTimer) {
        let doc = &mut self.document;
        match timer {
            PageTimer::TypewriterStep => {
                if let Some(typewriter) = &mut self.typewriter {
                    let delay = typewriter.on_step(doc);
                    self.scheduler
                        .schedule_after(delay, PageTimer::TypewriterStep);
                }
            }
            PageTimer::PreloaderFade => {
                if let Some(fade) = self.preloader.as_mut().and_then(|p| p.begin_fade(doc)) {
                    self.scheduler
                        .schedule_after(fade, PageTimer::PreloaderHide);
                }
            }
            PageTimer::PreloaderHide => {
                if let Some(preloader) = &mut self.preloader {
                    preloader.hide(doc);
                }
            }
            PageTimer::ClearStatus => {
                if let Some(contact) = &mut self.contact {
                    contact.clear_status(doc);
                }
            }
        }
    }

    /// Replay timed events, firing timers in between.
    pub async fn run_script(&mut self, steps: &[(Duration, PageEvent)]) {
        for (at, event) in steps {
            self.advance_to(*at);
            self.dispatch(event.clone()).await;
        }
    }
}
