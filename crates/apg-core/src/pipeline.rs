use apg_domain::{ApplicantRecord, FormSnapshot, SourceList};
use tracing::debug;

use crate::{
    builder::build_with, error::ValidationFailure, render::render, validate::validate_with,
    visibility::compute_visibility,
};

/// Output of a successful generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub record: ApplicantRecord,
    pub prompt: String,
}

/// Runs visibility -> validate -> build -> render over one snapshot.
///
/// Visibility is computed once and shared by the validator and builder.
/// On failure no record is built.
pub fn generate(fields: &FormSnapshot, sources: &SourceList) -> Result<Generation, ValidationFailure> {
    let visibility = compute_visibility(fields);
    validate_with(fields, &visibility).into_result()?;

    let record = build_with(fields, &visibility);
    let prompt = render(&record, sources);
    debug!(
        programs = record.programs.len(),
        categories = record.categories.len(),
        bytes = prompt.len(),
        "prompt generated"
    );
    Ok(Generation { record, prompt })
}
