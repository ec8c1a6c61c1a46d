//! Reference documents listed in the generated prompt.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label stored for an additional source saved without one.
pub const DEFAULT_ADDITIONAL_LABEL: &str = "Additional Source";

/// A single `{url, label}` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEntry {
    pub url: String,
    pub label: String,
}

impl SourceEntry {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Entries with a blank URL are never rendered nor persisted.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Session-local handle used to remove an additional source.
///
/// Derived from the creation time (UUIDv7); never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(Uuid);

impl SourceId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-added source with its removal handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalSource {
    pub id: SourceId,
    pub entry: SourceEntry,
}

/// The live, ordered source list owned by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceList {
    pub handbook: SourceEntry,
    pub application_page: SourceEntry,
    pub additional: Vec<AdditionalSource>,
}

impl SourceList {
    pub fn new(handbook: SourceEntry, application_page: SourceEntry) -> Self {
        Self {
            handbook,
            application_page,
            additional: Vec::new(),
        }
    }

    /// Appends an additional source. Empty URLs are accepted here and only
    /// dropped when the list is saved or rendered.
    pub fn add(&mut self, label: impl Into<String>, url: impl Into<String>) -> SourceId {
        let id = SourceId::generate();
        self.additional.push(AdditionalSource {
            id,
            entry: SourceEntry::new(url, label),
        });
        id
    }

    pub fn remove(&mut self, id: SourceId) -> bool {
        let before = self.additional.len();
        self.additional.retain(|source| source.id != id);
        self.additional.len() != before
    }

    pub fn get_mut(&mut self, id: SourceId) -> Option<&mut SourceEntry> {
        self.additional
            .iter_mut()
            .find(|source| source.id == id)
            .map(|source| &mut source.entry)
    }

    pub fn additional_entries(&self) -> impl Iterator<Item = &SourceEntry> {
        self.additional.iter().map(|source| &source.entry)
    }

    /// Copy with URLs and labels trimmed and blank additional entries
    /// removed; blank additional labels fall back to
    /// [`DEFAULT_ADDITIONAL_LABEL`].
    pub fn normalized(&self) -> Self {
        let trim = |entry: &SourceEntry| SourceEntry::new(entry.url.trim(), entry.label.trim());
        let additional = self
            .additional
            .iter()
            .filter(|source| source.entry.has_url())
            .map(|source| {
                let mut entry = trim(&source.entry);
                if entry.label.is_empty() {
                    entry.label = DEFAULT_ADDITIONAL_LABEL.to_string();
                }
                AdditionalSource {
                    id: source.id,
                    entry,
                }
            })
            .collect();
        Self {
            handbook: trim(&self.handbook),
            application_page: trim(&self.application_page),
            additional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SourceList {
        SourceList::new(
            SourceEntry::new("https://example.edu/handbook.pdf", "Handbook"),
            SourceEntry::new("https://example.edu/apply", "Apply"),
        )
    }

    #[test]
    fn add_and_remove_by_id() {
        let mut sources = sample();
        let first = sources.add("FAQ", "https://example.edu/faq");
        let second = sources.add("Fees", "https://example.edu/fees");
        assert_ne!(first, second);
        assert!(sources.remove(first));
        assert!(!sources.remove(first));
        let labels: Vec<_> = sources.additional_entries().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Fees"]);
    }

    #[test]
    fn normalized_drops_blank_urls_and_fills_labels() {
        let mut sources = sample();
        sources.add("Blank", "   ");
        let id = sources.add("  ", " https://example.edu/faq ");
        let normalized = sources.normalized();
        assert_eq!(normalized.additional.len(), 1);
        assert_eq!(normalized.additional[0].id, id);
        assert_eq!(
            normalized.additional[0].entry,
            SourceEntry::new("https://example.edu/faq", DEFAULT_ADDITIONAL_LABEL)
        );
        // input-time list is untouched
        assert_eq!(sources.additional.len(), 2);
    }
}
