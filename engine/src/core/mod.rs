//! SubTypo Core Engine
//!
//! Core document engine module.
//! Handles time codes, cues, subtitle formats, editable documents with history,
//! and subtitle collections.

pub mod captions;
pub mod document;
pub mod project;
pub mod settings;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_destructive;
