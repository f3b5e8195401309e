//! Terminal user interface components.
//!
//! - [`display`]: banners, file listings, success and failure lines
//! - [`progress`]: progress bar driven by pipeline progress events
//! - [`prompt`]: interactive wizard prompts

pub mod display;
pub mod progress;
pub mod prompt;
