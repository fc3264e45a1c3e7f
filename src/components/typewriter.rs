//! Typewriter effect for the hero headline.
//!
//! [`Typewriter`] is the pure state machine; [`TypewriterEffect`] binds it to
//! an element and is stepped by the page scheduler. The cycle never ends:
//!
//! ```text
//! Typing --(index == len)--> PausedFull --> Deleting --(index == 0)--> PausedEmpty --> Typing ...
//! ```

use std::time::Duration;

use crate::config::TypewriterConfig;
use crate::dom::{Document, ElementId, Selector, SelectorError};

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Revealed one more character.
    Typing,
    /// Reached the full text and switched to deleting.
    PausedFull,
    /// Removed one character.
    Deleting,
    /// Reached the empty string and switched to typing.
    PausedEmpty,
}

/// Delays between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTimings {
    pub typing: Duration,
    pub deleting: Duration,
    pub pause: Duration,
}

/// Every delay is at least 1ms so the cycle always makes progress in time.
impl From<&TypewriterConfig> for TypewriterTimings {
    fn from(config: &TypewriterConfig) -> Self {
        let ms = |value: u64| Duration::from_millis(value.max(1));
        Self {
            typing: ms(config.typing_ms),
            deleting: ms(config.deleting_ms),
            pause: ms(config.pause_ms),
        }
    }
}

/// Result of one step: the phase taken and the delay before the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub phase: Phase,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of every character boundary, including 0 and `text.len()`.
    boundaries: Vec<usize>,
    index: usize,
    deleting: bool,
    timings: TypewriterTimings,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, timings: TypewriterTimings) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            index: 0,
            deleting: false,
            timings,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the full text.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Characters currently shown.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// The prefix currently shown.
    pub fn visible(&self) -> &str {
        &self.text[..self.boundaries[self.index]]
    }

    /// Advance one step.
    pub fn step(&mut self) -> Step {
        if !self.deleting && self.index < self.len() {
            self.index += 1;
            Step {
                phase: Phase::Typing,
                delay: self.timings.typing,
            }
        } else if self.deleting && self.index > 0 {
            self.index -= 1;
            Step {
                phase: Phase::Deleting,
                delay: self.timings.deleting,
            }
        } else {
            self.deleting = !self.deleting;
            Step {
                phase: if self.deleting {
                    Phase::PausedFull
                } else {
                    Phase::PausedEmpty
                },
                delay: self.timings.pause,
            }
        }
    }
}

/// Typewriter bound to the hero text element.
pub struct TypewriterEffect {
    target: ElementId,
    typewriter: Typewriter,
    start_delay: Duration,
}

impl TypewriterEffect {
    /// Uses the configured text, or the element's own text when none is
    /// configured. The element is cleared so typing starts from empty.
    pub fn new(doc: &mut Document, config: &TypewriterConfig) -> Result<Option<Self>, SelectorError> {
        let selector = Selector::parse(&config.selector)?;
        let Some(target) = doc.select(&selector) else {
            return Ok(None);
        };
        let text = if config.text.is_empty() {
            doc.text(target).trim().to_string()
        } else {
            config.text.clone()
        };
        doc.set_text(target, "");
        Ok(Some(Self {
            target,
            typewriter: Typewriter::new(text, TypewriterTimings::from(config)),
            start_delay: config.start_delay(),
        }))
    }

    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Run one step and write the visible prefix into the element as plain
    /// text. Returns the delay before the next step.
    pub fn on_step(&mut self, doc: &mut Document) -> Duration {
        let step = self.typewriter.step();
        doc.set_text(self.target, self.typewriter.visible());
        step.delay
    }
}
