//! Timed event scripts.
//!
//! A script is a list of `[[step]]` tables, each with an `at_ms` timestamp
//! and an `event`:
//!
//! ```toml
//! [[step]]
//! at_ms = 0
//! event = "load"
//!
//! [[step]]
//! at_ms = 1200
//! event = "click"
//! selector = "#theme-toggle"
//!
//! [[step]]
//! at_ms = 1500
//! event = "scroll"
//! y = 900
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::dom::{Document, Selector, SelectorError};
use crate::event::PageEvent;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Step {step}: {source}")]
    Selector {
        step: usize,
        source: SelectorError,
    },

    #[error("Step {step}: no element matches '{selector}'")]
    NoMatch { step: usize, selector: String },
}

/// One scripted input.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ScriptAction {
    Load,
    Click { selector: String },
    Scroll { y: f64 },
    Resize { height: f64 },
    Key { key: String },
    PointerMove { x: f64, y: f64 },
    PointerOver { selector: String },
    PointerOut { selector: String },
    Submit { selector: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScriptStep {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScriptError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(content)?)
    }

    /// Time of the last step.
    pub fn end(&self) -> Duration {
        self.steps
            .iter()
            .map(|s| Duration::from_millis(s.at_ms))
            .max()
            .unwrap_or_default()
    }

    /// Resolve selectors against `doc` and order steps by time. Steps with
    /// equal timestamps keep their file order.
    pub fn resolve(&self, doc: &Document) -> Result<Vec<(Duration, PageEvent)>, ScriptError> {
        let mut events = self
            .steps
            .iter()
            .enumerate()
            .map(|(step, s)| {
                let target = |selector: &str| {
                    let parsed = Selector::parse(selector)
                        .map_err(|source| ScriptError::Selector { step, source })?;
                    doc.select(&parsed).ok_or_else(|| ScriptError::NoMatch {
                        step,
                        selector: selector.to_string(),
                    })
                };
                let event = match &s.action {
                    ScriptAction::Load => PageEvent::Load,
                    ScriptAction::Click { selector } => PageEvent::Click(target(selector)?),
                    ScriptAction::Scroll { y } => PageEvent::Scroll { y: *y },
                    ScriptAction::Resize { height } => PageEvent::Resize { height: *height },
                    ScriptAction::Key { key } => PageEvent::KeyDown(key.clone()),
                    ScriptAction::PointerMove { x, y } => PageEvent::PointerMove { x: *x, y: *y },
                    ScriptAction::PointerOver { selector } => {
                        PageEvent::PointerOver(target(selector)?)
                    }
                    ScriptAction::PointerOut { selector } => PageEvent::PointerOut(target(selector)?),
                    ScriptAction::Submit { selector } => PageEvent::Submit(target(selector)?),
                };
                Ok((Duration::from_millis(s.at_ms), event))
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;
        events.sort_by_key(|(at, _)| *at);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new();
        let toggle = doc.create_element("button", None);
        doc.element_mut(toggle).id = Some("theme-toggle".into());
        doc
    }

    #[test]
    fn test_parse_and_resolve_in_time_order() {
        let script = Script::parse(
            r##"
            [[step]]
            at_ms = 500
            event = "click"
            selector = "#theme-toggle"

            [[step]]
            event = "load"

            [[step]]
            at_ms = 500
            event = "pointer-move"
            x = 10
            y = 20.5

            [[step]]
            at_ms = 900
            event = "key"
            key = "Escape"
            "##,
        )
        .unwrap();
        assert_eq!(script.end(), Duration::from_millis(900));

        let doc = doc();
        let toggle = doc.get_element_by_id("theme-toggle").unwrap();
        let events = script.resolve(&doc).unwrap();
        assert_eq!(
            events,
            vec![
                (Duration::ZERO, PageEvent::Load),
                (Duration::from_millis(500), PageEvent::Click(toggle)),
                (
                    Duration::from_millis(500),
                    PageEvent::PointerMove { x: 10.0, y: 20.5 }
                ),
                (Duration::from_millis(900), PageEvent::KeyDown("Escape".into())),
            ]
        );
    }

    #[test]
    fn test_unmatched_selector() {
        let script = Script::parse(
            r##"
            [[step]]
            event = "submit"
            selector = "#contact-form"
            "##,
        )
        .unwrap();
        assert!(matches!(
            script.resolve(&doc()),
            Err(ScriptError::NoMatch { step: 0, .. })
        ));
    }

    #[test]
    fn test_bad_selector() {
        let script = Script::parse(
            r#"
            [[step]]
            event = "click"
            selector = "nav a"
            "#,
        )
        .unwrap();
        assert!(matches!(
            script.resolve(&doc()),
            Err(ScriptError::Selector { step: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_event_is_parse_error() {
        assert!(matches!(
            Script::parse("[[step]]\nevent = \"teleport\""),
            Err(ScriptError::ParseError(_))
        ));
    }
}
