//! # Arena Development Tools
//!
//! Command-line tools for development:
//! - Headless demo battles that write recordings
//! - Recording inspection
//! - Recording and config validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config_loader;
pub mod inspect;
pub mod simulate;
