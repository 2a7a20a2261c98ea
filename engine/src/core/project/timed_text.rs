//! Timed Text Collection
//!
//! A named language/track container holding one [`Subtitle`] per entry,
//! plus the index of the entry currently open in the editor.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    captions::FormatKind, document::Subtitle, CoreError, CoreResult, SubtitleId,
};

// =============================================================================
// Collection Metadata
// =============================================================================

/// Describes a timed text collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedTextInfo {
    /// Display name
    pub name: String,
    /// Language tag (e.g. "en-US")
    pub language: String,
    /// Format used for new and imported subtitles
    #[serde(default)]
    pub format: FormatKind,
}

impl TimedTextInfo {
    pub fn new(name: &str, language: &str, format: FormatKind) -> Self {
        Self {
            name: name.to_string(),
            language: language.to_string(),
            format,
        }
    }
}

// =============================================================================
// Timed Text Object
// =============================================================================

/// Persisted fields of a collection, before the selection is checked
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextData {
    info: TimedTextInfo,
    #[serde(default)]
    subtitles: Vec<Subtitle>,
    #[serde(default)]
    selected: Option<usize>,
}

impl From<TimedTextData> for TimedTextObject {
    fn from(data: TimedTextData) -> Self {
        let selected = data.selected.filter(|&index| index < data.subtitles.len());
        Self {
            info: data.info,
            subtitles: data.subtitles,
            selected,
        }
    }
}

/// Ordered set of subtitle documents with an optional selection
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TimedTextData")]
pub struct TimedTextObject {
    pub info: TimedTextInfo,
    subtitles: Vec<Subtitle>,
    selected: Option<usize>,
}

impl TimedTextObject {
    /// Creates an empty collection
    pub fn new(info: TimedTextInfo) -> Self {
        Self {
            info,
            subtitles: Vec::new(),
            selected: None,
        }
    }

    pub fn subtitles(&self) -> &[Subtitle] {
        &self.subtitles
    }

    pub fn len(&self) -> usize {
        self.subtitles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Subtitle> {
        self.subtitles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Subtitle> {
        self.subtitles.get_mut(index)
    }

    /// Finds the position of a subtitle by ID
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.subtitles.iter().position(|s| s.id() == id)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends a subtitle, optionally selecting it; returns its index
    pub fn add_subtitle(&mut self, subtitle: Subtitle, select: bool) -> usize {
        self.subtitles.push(subtitle);
        let index = self.subtitles.len() - 1;
        if select {
            self.selected = Some(index);
        }
        index
    }

    /// Replaces the subtitle at `index`, returning the previous one
    ///
    /// The selection index is kept.
    pub fn replace_subtitle(&mut self, index: usize, subtitle: Subtitle) -> CoreResult<Subtitle> {
        let len = self.subtitles.len();
        let slot = self
            .subtitles
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, subtitle))
    }

    /// Removes the subtitle at `index`
    ///
    /// Removing the selected entry selects the first remaining one, or
    /// clears the selection when the collection becomes empty. Removing an
    /// entry before the selection keeps the same subtitle selected.
    pub fn remove_subtitle_at(&mut self, index: usize) -> CoreResult<Subtitle> {
        if index >= self.subtitles.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.subtitles.len(),
            });
        }
        let removed = self.subtitles.remove(index);

        self.selected = match self.selected {
            Some(selected) if selected == index => {
                if self.subtitles.is_empty() {
                    None
                } else {
                    Some(0)
                }
            }
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };

        Ok(removed)
    }

    /// Removes a subtitle by ID
    pub fn remove_subtitle(&mut self, id: &str) -> CoreResult<Subtitle> {
        let index = self
            .position_of(id)
            .ok_or_else(|| CoreError::SubtitleNotFound(id.to_string()))?;
        self.remove_subtitle_at(index)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selects the subtitle at `index`
    pub fn select(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.subtitles.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.subtitles.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the selected index and subtitle
    pub fn selection(&self) -> Option<(usize, &Subtitle)> {
        let index = self.selected?;
        self.subtitles.get(index).map(|subtitle| (index, subtitle))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Subtitle> {
        let index = self.selected?;
        self.subtitles.get_mut(index)
    }

    // -------------------------------------------------------------------------
    // Naming & Import
    // -------------------------------------------------------------------------

    /// Returns true if no subtitle other than `except` uses `name`
    ///
    /// Comparison is exact and case-sensitive.
    pub fn is_name_available(&self, name: &str, except: Option<&str>) -> bool {
        !self
            .subtitles
            .iter()
            .filter(|s| Some(s.id()) != except)
            .any(|s| s.name() == name)
    }

    /// Parses `text` with the collection's format and appends the result
    ///
    /// The new subtitle is selected. Returns its ID.
    pub fn import(&mut self, name: &str, text: &str, limit: usize) -> CoreResult<SubtitleId> {
        let subtitle = Subtitle::import(name, self.info.format, text, limit)?;
        let id = subtitle.id().to_string();
        let index = self.add_subtitle(subtitle, true);

        info!(
            "Added subtitle '{}' to '{}' at index {}",
            name, self.info.name, index
        );
        Ok(id)
    }
}
