//! Page component controllers.
//!
//! Each controller is built once from the document and its config section.
//! Construction returns `Ok(None)` when the elements it drives are missing
//! from the page, so an absent section simply disables its component.

mod back_to_top;
mod contact;
mod cursor;
mod filter;
mod menu;
mod modal;
mod preloader;
mod reveal;
mod smooth_scroll;
mod theme;
mod typewriter;

pub use back_to_top::BackToTop;
pub use contact::{field_errors, ContactForm, Resolution, StatusTone, SubmissionOutcome};
pub use cursor::CursorFollower;
pub use filter::{card_matches, ProjectFilter};
pub use menu::HamburgerMenu;
pub use modal::{CloseReason, ModalContent, ProjectModal};
pub use preloader::{Preloader, PreloaderStage};
pub use reveal::{intersection_ratio, RevealObserver};
pub use smooth_scroll::SmoothScroll;
pub use theme::{Theme, ThemeToggle};
pub use typewriter::{Phase, Step, Typewriter, TypewriterEffect, TypewriterTimings};
