//! Persistence adapter mirroring the form snapshot and the source list to a
//! [`KeyValueStore`].
//!
//! The `try_*` methods surface [`StorageError`]; the plain variants log the
//! failure and leave the caller's in-memory state untouched.

use apg_core::apply_visibility;
use apg_domain::{AdditionalSource, FormSnapshot, SourceEntry, SourceList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::StorageError,
    migrate::{migrate_form, FORM_SCHEMA_VERSION},
    store::KeyValueStore,
};

pub const DEFAULT_FORM_KEY: &str = "ritsumei_prompt_generator_data";
pub const DEFAULT_SOURCES_KEY: &str = "ritsumei_prompt_generator_sources";

/// The two fixed logical keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub form: String,
    pub sources: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            form: DEFAULT_FORM_KEY.into(),
            sources: DEFAULT_SOURCES_KEY.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredForm {
    schema_version: u64,
    #[serde(flatten)]
    fields: FormSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredSources {
    handbook: SourceEntry,
    application_page: SourceEntry,
    additional: Vec<SourceEntry>,
}

/// Outcome of restoring the form blob.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Snapshot after migration and visibility re-application.
    pub fields: FormSnapshot,
    pub migrations: Vec<String>,
    /// Version found in storage.
    pub schema_version: u64,
    pub saved_at: Option<DateTime<Utc>>,
}

pub struct PersistenceAdapter<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn try_save_record(&self, fields: &FormSnapshot) -> Result<(), StorageError> {
        let stored = StoredForm {
            schema_version: FORM_SCHEMA_VERSION,
            fields: fields.clone(),
            saved_at: Some(Utc::now()),
        };
        let data = serde_json::to_string(&stored)?;
        self.store.set(&self.keys.form, &data)
    }

    /// Saves the form blob; failures are logged and reported as `false`.
    pub fn save_record(&self, fields: &FormSnapshot) -> bool {
        match self.try_save_record(fields) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.keys.form, error = %err, "could not save form data");
                false
            }
        }
    }

    /// `Ok(None)` when nothing is stored.
    pub fn try_load_record(&self) -> Result<Option<LoadReport>, StorageError> {
        let Some(data) = self.store.get(&self.keys.form)? else {
            return Ok(None);
        };
        let raw: serde_json::Value = serde_json::from_str(&data)?;
        let migrated = migrate_form(raw)?;
        let stored: StoredForm = serde_json::from_value(migrated.value)?;

        let mut fields = stored.fields;
        apply_visibility(&mut fields);

        Ok(Some(LoadReport {
            fields,
            migrations: migrated.notes,
            schema_version: migrated.stored_version,
            saved_at: stored.saved_at,
        }))
    }

    /// Restores the form blob; any failure is logged and treated as "no
    /// saved state".
    pub fn load_record(&self) -> Option<LoadReport> {
        match self.try_load_record() {
            Ok(Some(report)) => {
                for note in &report.migrations {
                    info!(key = %self.keys.form, "{note}");
                }
                if let Some(saved_at) = report.saved_at {
                    info!(saved_at = %saved_at.to_rfc3339(), "form data restored");
                }
                Some(report)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key = %self.keys.form, error = %err, "could not load form data");
                None
            }
        }
    }

    pub fn try_save_sources(&self, sources: &SourceList) -> Result<(), StorageError> {
        let normalized = sources.normalized();
        let stored = StoredSources {
            handbook: normalized.handbook,
            application_page: normalized.application_page,
            additional: normalized
                .additional
                .into_iter()
                .map(|source| source.entry)
                .collect(),
        };
        let data = serde_json::to_string(&stored)?;
        self.store.set(&self.keys.sources, &data)
    }

    pub fn save_sources(&self, sources: &SourceList) -> bool {
        match self.try_save_sources(sources) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.keys.sources, error = %err, "could not save sources");
                false
            }
        }
    }

    /// Merges stored sources into `sources`.
    ///
    /// Handbook and application page replace the current entries only when
    /// their stored URL is non-empty. Additional entries are appended in
    /// stored order and `on_added` is called once per appended entry.
    /// Returns the number of additional entries restored.
    pub fn try_load_sources<F>(
        &self,
        sources: &mut SourceList,
        mut on_added: F,
    ) -> Result<usize, StorageError>
    where
        F: FnMut(&AdditionalSource),
    {
        let Some(data) = self.store.get(&self.keys.sources)? else {
            return Ok(0);
        };
        let stored: StoredSources = serde_json::from_str(&data)?;

        if stored.handbook.has_url() {
            sources.handbook = stored.handbook;
        }
        if stored.application_page.has_url() {
            sources.application_page = stored.application_page;
        }

        let mut restored = 0;
        for entry in stored.additional.into_iter().filter(SourceEntry::has_url) {
            let id = sources.add(entry.label, entry.url);
            if let Some(added) = sources.additional.iter().find(|source| source.id == id) {
                on_added(added);
            }
            restored += 1;
        }
        Ok(restored)
    }

    pub fn load_sources<F>(&self, sources: &mut SourceList, on_added: F) -> usize
    where
        F: FnMut(&AdditionalSource),
    {
        match self.try_load_sources(sources, on_added) {
            Ok(restored) => {
                if restored > 0 {
                    info!(restored, "sources restored");
                }
                restored
            }
            Err(err) => {
                warn!(key = %self.keys.sources, error = %err, "could not load sources");
                0
            }
        }
    }

    pub fn clear_sources(&self) -> bool {
        match self.store.remove(&self.keys.sources) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.keys.sources, error = %err, "could not clear sources");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn defaults() -> SourceList {
        SourceList::new(
            SourceEntry::new("https://example.edu/handbook.pdf", "Handbook"),
            SourceEntry::new("https://example.edu/apply", "Apply"),
        )
    }

    #[test]
    fn saved_blob_carries_schema_version_and_timestamp() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        adapter.try_save_record(&FormSnapshot::default()).expect("save");

        let data = adapter
            .store()
            .get(DEFAULT_FORM_KEY)
            .expect("get")
            .expect("stored");
        let value: serde_json::Value = serde_json::from_str(&data).expect("json");
        assert_eq!(value["schemaVersion"], FORM_SCHEMA_VERSION);
        assert!(value["savedAt"].is_string());
        assert!(value.get("programs").is_some());
    }

    #[test]
    fn blank_stored_handbook_keeps_default() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        adapter
            .store()
            .set(
                DEFAULT_SOURCES_KEY,
                r#"{"handbook":{"url":"","label":"Old"},"applicationPage":{"url":"https://example.edu/new","label":"New"}}"#,
            )
            .expect("seed");

        let mut sources = defaults();
        let restored = adapter.load_sources(&mut sources, |_| {});
        assert_eq!(restored, 0);
        assert_eq!(sources.handbook.label, "Handbook");
        assert_eq!(sources.application_page.url, "https://example.edu/new");
    }

    #[test]
    fn missing_sources_key_leaves_list_untouched() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        let mut sources = defaults();
        assert_eq!(adapter.load_sources(&mut sources, |_| {}), 0);
        assert_eq!(sources, defaults());
    }
}
