use std::fs;

use apg_domain::{FormSnapshot, SourceEntry, SourceList, DEFAULT_ADDITIONAL_LABEL, OTHER};
use apg_storage_json::{
    JsonFileStore, KeyValueStore, MemoryStore, PersistenceAdapter, StorageError, StorageKeys,
    DEFAULT_FORM_KEY, DEFAULT_SOURCES_KEY, FORM_SCHEMA_VERSION,
};
use tempfile::tempdir;

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }
}

fn default_sources() -> SourceList {
    SourceList::new(
        SourceEntry::new("https://example.edu/handbook.pdf", "Admissions Handbook 2026"),
        SourceEntry::new("https://example.edu/howto", "Application Procedures"),
    )
}

fn complete_fields() -> FormSnapshot {
    let mut fields = FormSnapshot {
        programs: vec!["Global Studies".into(), "Law".into()],
        nationality: OTHER.into(),
        nationality_other: "Atlantis".into(),
        country_of_residence: "Japan".into(),
        education_status: "High School Student (Final Year)".into(),
        education_years_choice: "12".into(),
        school_type: OTHER.into(),
        qualifications: vec!["IB Diploma".into()],
        categories: vec!["Housing".into()],
        specific_question: "Is there a dormitory?".into(),
        ..FormSnapshot::default()
    };
    fields.other_school.official_name = "Test HS".into();
    fields.other_school.country = "Japan".into();
    fields.other_school.city = "Kyoto".into();
    fields.other_school.curriculum = "IB".into();
    fields
}

#[test]
fn record_round_trips_through_store() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    let fields = complete_fields();
    assert!(adapter.save_record(&fields));

    let report = adapter.load_record().expect("stored record");
    assert_eq!(report.fields, fields);
    assert_eq!(report.schema_version, FORM_SCHEMA_VERSION);
    assert!(report.migrations.is_empty());
    assert!(report.saved_at.is_some());
}

#[test]
fn legacy_record_migrates_to_current_shape() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    adapter
        .store()
        .set(DEFAULT_FORM_KEY, r#"{"program":"Law","educationYears":"13"}"#)
        .expect("seed");

    let report = adapter.try_load_record().expect("load").expect("stored");
    assert_eq!(report.fields.programs, vec!["Law"]);
    assert_eq!(report.fields.education_years_choice, OTHER);
    assert_eq!(report.fields.education_years_other, "13");
    assert_eq!(report.schema_version, 1);
    assert_eq!(report.migrations.len(), 2);
}

#[test]
fn load_reapplies_visibility_to_stale_values() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    adapter
        .store()
        .set(
            DEFAULT_FORM_KEY,
            r#"{
                "schemaVersion": 3,
                "programs": ["Law"],
                "nationality": "Japan",
                "nationalityOther": "Stale",
                "educationStatus": "University Graduate",
                "schoolType": "Other",
                "otherSchool": {"officialName": "Stale HS"}
            }"#,
        )
        .expect("seed");

    let report = adapter.load_record().expect("stored");
    assert!(report.fields.nationality_other.is_empty());
    assert!(report.fields.school_type.is_empty());
    assert!(report.fields.other_school.is_empty());
    assert_eq!(report.fields.nationality, "Japan");
}

#[test]
fn corrupt_or_future_blobs_are_treated_as_missing() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    adapter.store().set(DEFAULT_FORM_KEY, "{not json").expect("seed");
    assert!(matches!(adapter.try_load_record(), Err(StorageError::Serde(_))));
    assert_eq!(adapter.load_record(), None);

    adapter
        .store()
        .set(DEFAULT_FORM_KEY, r#"{"schemaVersion": 99, "programs": ["Law"]}"#)
        .expect("seed");
    assert!(matches!(
        adapter.try_load_record(),
        Err(StorageError::UnsupportedSchema { found: 99, .. })
    ));
    assert_eq!(adapter.load_record(), None);
}

#[test]
fn failing_store_is_non_fatal() {
    let adapter = PersistenceAdapter::new(FailingStore);
    let mut sources = default_sources();

    assert!(!adapter.save_record(&complete_fields()));
    assert_eq!(adapter.load_record(), None);
    assert!(!adapter.save_sources(&sources));
    assert_eq!(adapter.load_sources(&mut sources, |_| {}), 0);
    assert!(!adapter.clear_sources());
    assert_eq!(sources, default_sources());
}

#[test]
fn sources_are_normalized_on_save_and_restored_in_order() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    let mut sources = default_sources();
    sources.application_page.url = "  https://example.edu/apply  ".into();
    sources.add("FAQ", "https://example.edu/faq");
    sources.add("Blank", "   ");
    sources.add("", "https://example.edu/fees");
    assert!(adapter.save_sources(&sources));

    let mut restored = default_sources();
    let mut notified = Vec::new();
    let count = adapter.load_sources(&mut restored, |source| {
        notified.push(source.entry.label.clone());
    });

    assert_eq!(count, 2);
    assert_eq!(notified, vec!["FAQ", DEFAULT_ADDITIONAL_LABEL]);
    assert_eq!(restored.application_page.url, "https://example.edu/apply");
    let urls: Vec<_> = restored.additional_entries().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["https://example.edu/faq", "https://example.edu/fees"]);
}

#[test]
fn clear_sources_removes_stored_blob() {
    let adapter = PersistenceAdapter::new(MemoryStore::new());
    let mut sources = default_sources();
    sources.add("FAQ", "https://example.edu/faq");
    adapter.save_sources(&sources);
    assert!(adapter.clear_sources());
    assert_eq!(adapter.store().get(DEFAULT_SOURCES_KEY).expect("get"), None);
}

#[test]
fn file_store_persists_both_blobs_across_adapters() {
    let dir = tempdir().expect("tempdir");
    let keys = StorageKeys {
        form: "form_state".into(),
        sources: "source_list".into(),
    };

    {
        let store = JsonFileStore::new(dir.path().join("data")).expect("store");
        let adapter = PersistenceAdapter::with_keys(store, keys.clone());
        let mut sources = default_sources();
        sources.add("FAQ", "https://example.edu/faq");
        assert!(adapter.save_record(&complete_fields()));
        assert!(adapter.save_sources(&sources));
    }

    let store = JsonFileStore::new(dir.path().join("data")).expect("store");
    assert!(store.key_path("form_state").exists());
    let raw = fs::read_to_string(store.key_path("source_list")).expect("read sources");
    assert!(raw.contains("\"applicationPage\""));

    let adapter = PersistenceAdapter::with_keys(store, keys);
    let report = adapter.load_record().expect("stored");
    assert_eq!(report.fields, complete_fields());

    let mut sources = default_sources();
    assert_eq!(adapter.load_sources(&mut sources, |_| {}), 1);
}
