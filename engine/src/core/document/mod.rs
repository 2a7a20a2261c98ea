//! Subtitle Document Module
//!
//! The editable subtitle document and its snapshot-based undo history.

mod changes;
mod history;
mod subtitle;

pub use changes::{CueChange, EditResult};
pub use history::{CueSnapshot, StateHistory};
pub use subtitle::Subtitle;
