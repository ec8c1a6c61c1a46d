#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use admissions_prompt::{
    config::DefaultSources,
    domain::FieldKey,
    session::Session,
    storage::{JsonFileStore, PersistenceAdapter},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens a session backed by JSON files under `dir/data`, the way the shell does.
pub fn open_session(dir: &Path) -> Session<JsonFileStore> {
    let store = JsonFileStore::new(dir.join("data")).expect("create json store");
    Session::open(PersistenceAdapter::new(store), DefaultSources::default())
}

/// Fills the minimum a prompt needs: one program, years and a category.
pub fn fill_minimal(session: &mut Session<JsonFileStore>) {
    session
        .set_selection(FieldKey::Programs, &["Global Studies"])
        .expect("programs");
    session
        .set_value(FieldKey::EducationYearsChoice, "12")
        .expect("years");
    session
        .toggle(FieldKey::Categories, "Scholarships")
        .expect("category");
}
