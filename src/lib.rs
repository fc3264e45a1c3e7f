//! portfolio-ui library crate.
//!
//! Headless controllers for a single-page portfolio: a small in-memory DOM,
//! a virtual-time timer queue, and one controller per page behavior.

pub mod cli;
pub mod components;
pub mod config;
pub mod dom;
pub mod event;
pub mod fixture;
pub mod page;
pub mod scheduler;
pub mod script;
pub mod transport;
