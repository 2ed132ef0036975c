//! turtle - browse open GitLab merge requests and create a new one from the
//! terminal.
//!
//! The crate is split into a pure wizard state machine ([`wizard`]), the
//! GitLab service it drives ([`platform`]), and the terminal event loop that
//! connects the two ([`app`]).

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod git;
pub mod platform;
pub mod roster;
pub mod submit;
pub mod ticket;
pub mod types;
pub mod wizard;

pub use error::{Error, Result};
