//! Explicit session state: the live field values and source list, mirrored
//! to storage after every change.

use apg_config::DefaultSources;
use apg_core::{apply_visibility, generate, Generation, ValidationFailure, VisibilitySet};
use apg_domain::{
    fields_for_step, FieldKey, FieldKind, FormSnapshot, FormStep, SourceId, SourceList,
};
use apg_storage_json::{KeyValueStore, PersistenceAdapter};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    clipboard::Clipboard,
    errors::AppError,
    progress::ProgressTracker,
};

/// The two built-in source slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainSource {
    Handbook,
    ApplicationPage,
}

/// What was restored from storage when the session opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreSummary {
    pub form_restored: bool,
    pub migrations: Vec<String>,
    pub saved_at: Option<DateTime<Utc>>,
    pub restored_sources: Vec<SourceId>,
}

pub struct Session<S: KeyValueStore> {
    fields: FormSnapshot,
    visibility: VisibilitySet,
    sources: SourceList,
    default_sources: DefaultSources,
    adapter: PersistenceAdapter<S>,
    progress: ProgressTracker,
    output: Option<Generation>,
    restore: RestoreSummary,
}

impl<S: KeyValueStore> Session<S> {
    /// Restores saved state, falling back to an empty form and the default
    /// sources when nothing usable is stored.
    pub fn open(adapter: PersistenceAdapter<S>, default_sources: DefaultSources) -> Self {
        let mut restore = RestoreSummary::default();

        let mut fields = match adapter.load_record() {
            Some(report) => {
                restore.form_restored = true;
                restore.migrations = report.migrations;
                restore.saved_at = report.saved_at;
                report.fields
            }
            None => FormSnapshot::default(),
        };
        let visibility = apply_visibility(&mut fields);

        let mut sources = default_sources.to_source_list();
        adapter.load_sources(&mut sources, |source| {
            restore.restored_sources.push(source.id);
        });

        Self {
            fields,
            visibility,
            sources,
            default_sources,
            adapter,
            progress: ProgressTracker::default(),
            output: None,
            restore,
        }
    }

    pub fn fields(&self) -> &FormSnapshot {
        &self.fields
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    pub fn sources(&self) -> &SourceList {
        &self.sources
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn output(&self) -> Option<&Generation> {
        self.output.as_ref()
    }

    pub fn restore_summary(&self) -> &RestoreSummary {
        &self.restore
    }

    pub fn adapter(&self) -> &PersistenceAdapter<S> {
        &self.adapter
    }

    /// Sets a single-value field. Choice fields accept any casing of an
    /// allowed value; an empty value clears the field.
    pub fn set_value(&mut self, key: FieldKey, value: &str) -> Result<(), AppError> {
        self.ensure_visible(key)?;
        let spec = key.spec();
        let value = match spec.kind {
            FieldKind::MultiSelect(_) => {
                return Err(AppError::Input(format!(
                    "`{key}` holds several values; use select or toggle"
                )))
            }
            FieldKind::Select(_) if value.trim().is_empty() => String::new(),
            FieldKind::Select(_) => canonical(key, value)?.to_string(),
            FieldKind::Text | FieldKind::TextArea => value.to_string(),
        };
        self.fields.set_text(key, value)?;
        self.after_field_change(spec.step);
        Ok(())
    }

    /// Replaces every selection of a multi-select field.
    pub fn set_selection(&mut self, key: FieldKey, values: &[&str]) -> Result<(), AppError> {
        self.ensure_visible(key)?;
        let mut selected: Vec<String> = Vec::new();
        for value in values {
            let option = canonical(key, value)?;
            if !selected.iter().any(|existing| existing == option) {
                selected.push(option.to_string());
            }
        }
        self.fields.set_list(key, selected)?;
        self.after_field_change(key.spec().step);
        Ok(())
    }

    /// Checks or unchecks one option. Returns the new checked state.
    pub fn toggle(&mut self, key: FieldKey, value: &str) -> Result<bool, AppError> {
        self.ensure_visible(key)?;
        let option = canonical(key, value)?;
        let checked = self.fields.toggle(key, option)?;
        self.after_field_change(key.spec().step);
        Ok(checked)
    }

    pub fn clear_field(&mut self, key: FieldKey) -> bool {
        let cleared = self.fields.clear(key);
        self.after_field_change(key.spec().step);
        cleared
    }

    /// Records that the user moved to `step` without changing anything.
    pub fn focus(&mut self, step: FormStep) {
        self.progress.set(step);
    }

    pub fn set_main_source_url(&mut self, slot: MainSource, url: &str) {
        let entry = match slot {
            MainSource::Handbook => &mut self.sources.handbook,
            MainSource::ApplicationPage => &mut self.sources.application_page,
        };
        entry.url = url.trim().to_string();
        self.after_sources_change();
    }

    pub fn add_source(&mut self, label: &str, url: &str) -> SourceId {
        let id = self.sources.add(label, url);
        self.after_sources_change();
        id
    }

    /// Rewrites the label and URL of an additional source in place.
    /// Returns false when no source has `id`.
    pub fn update_source(&mut self, id: SourceId, label: &str, url: &str) -> bool {
        let Some(entry) = self.sources.get_mut(id) else {
            return false;
        };
        entry.label = label.to_string();
        entry.url = url.to_string();
        self.after_sources_change();
        true
    }

    pub fn remove_source(&mut self, id: SourceId) -> bool {
        let removed = self.sources.remove(id);
        if removed {
            self.after_sources_change();
        }
        removed
    }

    /// Runs the pipeline over the current fields and normalized sources.
    ///
    /// On failure the progress moves to the step holding the offending
    /// field and any earlier output is kept.
    pub fn generate(&mut self) -> Result<&Generation, AppError> {
        let sources = self.sources.normalized();
        match generate(&self.fields, &sources) {
            Ok(generation) => {
                info!(bytes = generation.prompt.len(), "prompt ready");
                self.progress.set(FormStep::Generated);
                Ok(self.output.insert(generation))
            }
            Err(failure) => {
                debug!(reason = %failure.reason, "generation aborted");
                self.progress.set(failure.focus_target);
                Err(failure.into())
            }
        }
    }

    /// Field the UI should focus for a failed generation.
    pub fn focus_field(&self, failure: &ValidationFailure) -> FieldKey {
        failure.reason.field(&self.visibility, &self.fields)
    }

    /// Leaves the generated output and returns to the first step.
    pub fn edit(&mut self) {
        self.output = None;
        self.progress.set(FormStep::Profile);
    }

    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Result<(), AppError> {
        let generation = self
            .output
            .as_ref()
            .ok_or_else(|| AppError::Input("nothing to copy; run `generate` first".into()))?;
        clipboard.write_text(&generation.prompt).map_err(|err| {
            warn!(error = %err, "copy failed");
            AppError::from(err)
        })
    }

    /// Clears every step-1 field, including free-text siblings and school
    /// details.
    pub fn reset_profile(&mut self) {
        self.reset_step(FormStep::Profile);
    }

    /// Clears categories and the specific question.
    pub fn reset_question(&mut self) {
        self.reset_step(FormStep::Question);
    }

    /// Restores the default sources and forgets the stored list.
    pub fn reset_sources(&mut self) {
        self.sources = self.default_sources.to_source_list();
        self.adapter.clear_sources();
        self.progress.set(FormStep::Sources);
    }

    fn reset_step(&mut self, step: FormStep) {
        for spec in fields_for_step(step) {
            self.fields.clear(spec.key);
        }
        self.after_field_change(step);
    }

    fn ensure_visible(&self, key: FieldKey) -> Result<(), AppError> {
        if self.visibility.is_visible(key) {
            Ok(())
        } else {
            Err(AppError::Input(format!(
                "`{key}` is not shown for the current answers"
            )))
        }
    }

    fn after_field_change(&mut self, step: FormStep) {
        self.visibility = apply_visibility(&mut self.fields);
        self.adapter.save_record(&self.fields);
        self.progress.set(step);
    }

    fn after_sources_change(&mut self) {
        self.adapter.save_sources(&self.sources);
        self.progress.set(FormStep::Sources);
    }
}

fn canonical(key: FieldKey, value: &str) -> Result<&'static str, AppError> {
    key.spec().kind.canonical(value).ok_or_else(|| {
        AppError::Input(format!(
            "`{}` is not an option for `{key}`",
            value.trim()
        ))
    })
}
