//! CSS selector subset used by the page components.
//!
//! Supports compound selectors made of an optional tag (or `*`), `#id`,
//! `.class` and attribute tests (`[attr]`, `[attr=value]`, `[attr^=value]`),
//! and comma-separated lists of them. Combinators are not supported.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::element::Element;

/// Errors produced while parsing a selector.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected '{ch}' at position {position} in selector '{selector}'")]
    UnexpectedChar {
        selector: String,
        ch: char,
        position: usize,
    },

    #[error("expected a name at position {position} in selector '{selector}'")]
    ExpectedName { selector: String, position: usize },

    #[error("unterminated attribute test in selector '{0}'")]
    UnterminatedAttribute(String),

    #[error("combinators are not supported (selector '{0}')")]
    Combinator(String),
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if el.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|test| match el.attribute(&test.name) {
            None => false,
            Some(value) => match &test.op {
                AttrOp::Exists => true,
                AttrOp::Equals(expected) => value == expected,
                AttrOp::Prefix(prefix) => value.starts_with(prefix.as_str()),
            },
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        for part in source.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(SelectorError::Empty);
            }
            alternatives.push(Parser::new(source, part).compound()?);
        }
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, el: &Element) -> bool {
        self.alternatives.iter().any(|c| c.matches(el))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

struct Parser<'a> {
    full: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(full: &'a str, part: &str) -> Self {
        Self {
            full,
            chars: part.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, ch: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.full.to_string(),
            ch,
            position: self.pos,
        }
    }

    fn name(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(SelectorError::ExpectedName {
                selector: self.full.to_string(),
                position: self.pos,
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn compound(mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(ch) if is_name_char(ch) => {
                compound.tag = Some(self.name()?.to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some(ch) = self.peek() {
            match ch {
                '#' => {
                    self.pos += 1;
                    compound.id = Some(self.name()?);
                }
                '.' => {
                    self.pos += 1;
                    compound.classes.push(self.name()?);
                }
                '[' => {
                    self.pos += 1;
                    compound.attrs.push(self.attribute()?);
                }
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    return Err(SelectorError::Combinator(self.full.to_string()));
                }
                other => return Err(self.unexpected(other)),
            }
        }

        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttrTest, SelectorError> {
        let name = self.name()?;
        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttrTest {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => {
                self.pos += 1;
                AttrOp::Equals(self.attribute_value()?)
            }
            Some('^') => {
                self.pos += 1;
                if self.peek() != Some('=') {
                    return Err(match self.peek() {
                        Some(ch) => self.unexpected(ch),
                        None => SelectorError::UnterminatedAttribute(self.full.to_string()),
                    });
                }
                self.pos += 1;
                AttrOp::Prefix(self.attribute_value()?)
            }
            Some(ch) => return Err(self.unexpected(ch)),
            None => return Err(SelectorError::UnterminatedAttribute(self.full.to_string())),
        };

        if self.peek() != Some(']') {
            return Err(SelectorError::UnterminatedAttribute(self.full.to_string()));
        }
        self.pos += 1;
        Ok(AttrTest { name, op })
    }

    fn attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(SelectorError::UnterminatedAttribute(self.full.to_string()));
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Ok(value)
            }
            _ => self.name(),
        }
    }
}
