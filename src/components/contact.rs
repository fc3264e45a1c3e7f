//! Asynchronous contact form submission.
//!
//! A submission moves through `Idle -> Pending -> Idle`. [`ContactForm::begin`]
//! locks the form and captures its fields, the page sends them through a
//! [`crate::transport::FormTransport`], and [`ContactForm::resolve`] reports
//! the outcome and unlocks the form. The status text is cleared later by a
//! timer the page schedules.

use std::time::Duration;

use serde::Deserialize;

use crate::config::ContactConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};
use crate::scheduler::TimerId;
use crate::transport::{FormResponse, FormSubmission, TransportError};

/// Colour family of the status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx response.
    Sent,
    /// Non-2xx response. `errors` holds the server's per-field messages, if
    /// it sent any.
    Rejected { status: u16, errors: Vec<String> },
    /// No response was received.
    Unreachable,
}

/// Status shown after a submission resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: SubmissionOutcome,
    pub message: String,
    pub tone: StatusTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmitState {
    Idle,
    Pending { original_label: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    message: String,
}

/// Per-field messages from a `{"errors": [{"message": ...}]}` body.
///
/// Returns an empty list when the body is not JSON or has no usable list.
pub fn field_errors(body: &str) -> Vec<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors)
        .map(|errors| errors.into_iter().map(|e| e.message).collect())
        .unwrap_or_default()
}

const FIELD_TAGS: [&str; 3] = ["input", "textarea", "select"];

pub struct ContactForm {
    form: ElementId,
    submit: Option<ElementId>,
    status: Option<ElementId>,
    state: SubmitState,
    clear_timer: Option<TimerId>,
    config: ContactConfig,
}

impl ContactForm {
    /// Needs the form; the submit control and status element are optional.
    pub fn new(doc: &Document, config: &ContactConfig) -> Result<Option<Self>, SelectorError> {
        let form_selector = Selector::parse(&config.form_selector)?;
        let status_selector = Selector::parse(&config.status_selector)?;
        let submit_selector = Selector::parse(&config.submit_selector)?;
        let Some(form) = doc.select(&form_selector) else {
            return Ok(None);
        };
        Ok(Some(Self {
            form,
            submit: doc.select_within(form, &submit_selector),
            status: doc.select(&status_selector),
            state: SubmitState::Idle,
            clear_timer: None,
            config: config.clone(),
        }))
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    /// Delay between resolution and clearing the status text.
    pub fn clear_after(&self) -> Duration {
        self.config.clear_after()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SubmitState::Pending { .. })
    }

    /// Current status text.
    pub fn status_text<'a>(&self, doc: &'a Document) -> &'a str {
        self.status.map(|s| doc.text(s)).unwrap_or_default()
    }

    /// Named, submittable controls inside the form, in document order.
    fn fields(&self, doc: &Document) -> Vec<ElementId> {
        doc.descendants(self.form)
            .into_iter()
            .filter(|id| {
                let el = doc.element(*id);
                FIELD_TAGS.contains(&el.tag.as_str())
                    && el.attribute("name").is_some()
                    && !matches!(el.attribute("type"), Some("submit" | "button" | "reset"))
            })
            .collect()
    }

    /// Lock the form and capture its field set.
    ///
    /// Returns `None` while a submission is already pending. Any clear timer
    /// left over from a previous submission is handed back so the caller can
    /// cancel it.
    pub fn begin(&mut self, doc: &mut Document) -> Option<(FormSubmission, Option<TimerId>)> {
        if self.is_pending() {
            log::debug!("Ignoring submit while a submission is pending");
            return None;
        }

        let original_label = match self.submit {
            Some(button) => {
                let label = doc.text(button).to_string();
                let el = doc.element_mut(button);
                el.disabled = true;
                el.text.clone_from(&self.config.sending_label);
                label
            }
            None => String::new(),
        };
        if let Some(status) = self.status {
            doc.set_text(status, "");
        }
        self.state = SubmitState::Pending { original_label };

        let fields = self
            .fields(doc)
            .into_iter()
            .filter_map(|id| {
                let el = doc.element(id);
                el.attribute("name")
                    .map(|name| (name.to_string(), el.value.clone()))
            })
            .collect();
        let submission = FormSubmission {
            action: doc.attribute(self.form, "action").unwrap_or_default().to_string(),
            method: doc
                .attribute(self.form, "method")
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or("get")
                .to_ascii_uppercase(),
            fields,
        };
        Some((submission, self.clear_timer.take()))
    }

    /// Report the outcome and unlock the form.
    pub fn resolve(
        &mut self,
        doc: &mut Document,
        result: Result<FormResponse, TransportError>,
    ) -> Resolution {
        let resolution = match result {
            Ok(response) if response.is_success() => {
                for field in self.fields(doc) {
                    doc.element_mut(field).value.clear();
                }
                log::info!("Contact form sent ({})", response.status);
                Resolution {
                    outcome: SubmissionOutcome::Sent,
                    message: self.config.success_message.clone(),
                    tone: StatusTone::Success,
                }
            }
            Ok(response) => {
                let errors = field_errors(&response.body);
                log::warn!(
                    "Contact form rejected ({}): {} field error(s)",
                    response.status,
                    errors.len()
                );
                let message = if errors.is_empty() {
                    self.config.failure_message.clone()
                } else {
                    errors.join(", ")
                };
                Resolution {
                    outcome: SubmissionOutcome::Rejected {
                        status: response.status,
                        errors,
                    },
                    message,
                    tone: StatusTone::Error,
                }
            }
            Err(e) => {
                log::warn!("Contact form could not be sent: {}", e);
                Resolution {
                    outcome: SubmissionOutcome::Unreachable,
                    message: self.config.network_message.clone(),
                    tone: StatusTone::Error,
                }
            }
        };

        if let Some(status) = self.status {
            let color = match resolution.tone {
                StatusTone::Success => &self.config.success_color,
                StatusTone::Error => &self.config.error_color,
            };
            doc.set_text(status, &resolution.message);
            doc.set_style(status, "color", color);
        }

        let state = std::mem::replace(&mut self.state, SubmitState::Idle);
        if let (Some(button), SubmitState::Pending { original_label }) = (self.submit, state) {
            let el = doc.element_mut(button);
            el.disabled = false;
            el.text = original_label;
        }

        resolution
    }

    /// Remember the timer that will clear the status text.
    pub fn set_clear_timer(&mut self, timer: TimerId) {
        self.clear_timer = Some(timer);
    }

    pub fn clear_status(&mut self, doc: &mut Document) {
        self.clear_timer = None;
        if let Some(status) = self.status {
            doc.set_text(status, "");
        }
    }
}
