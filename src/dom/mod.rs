//! In-memory document model.
//!
//! A small stand-in for the browser DOM: an arena of elements with class
//! lists, attributes, `data-*` fields, inline styles, text content and a
//! simple layout box, plus the viewport the page is scrolled in. Components
//! only ever touch the page through this module.

mod document;
mod element;
mod selector;

pub use document::{Document, Viewport};
pub use element::{Element, ElementId, Layout};
pub use selector::{Selector, SelectorError};
