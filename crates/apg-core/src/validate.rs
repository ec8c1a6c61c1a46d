//! Validator: required-field and group-completeness checks, run in a fixed
//! order and stopping at the first failure.

use apg_domain::{ContextField, FieldKey, FormSnapshot, FormStep};
use thiserror::Error;

use crate::visibility::{compute_visibility, VisibilitySet};

/// First problem found in a snapshot. The declaration order mirrors the
/// check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("no program selected")]
    NoProgram,
    #[error("no education-years choice")]
    NoEducationYearsChoice,
    #[error("years-other required")]
    EducationYearsOtherRequired,
    #[error("nationality-other required")]
    NationalityOtherRequired,
    #[error("residence-other required")]
    ResidenceOtherRequired,
    #[error("school context incomplete")]
    SchoolContextIncomplete,
    #[error("no category selected")]
    NoCategory,
}

impl ValidationIssue {
    /// Form step the UI should reveal for this issue.
    pub fn step(self) -> FormStep {
        match self {
            ValidationIssue::NoCategory => FormStep::Question,
            _ => FormStep::Profile,
        }
    }

    /// Field the UI should mark as required and focus.
    pub fn field(self, visibility: &VisibilitySet, fields: &FormSnapshot) -> FieldKey {
        match self {
            ValidationIssue::NoProgram => FieldKey::Programs,
            ValidationIssue::NoEducationYearsChoice => FieldKey::EducationYearsChoice,
            ValidationIssue::EducationYearsOtherRequired => FieldKey::EducationYearsOther,
            ValidationIssue::NationalityOtherRequired => FieldKey::NationalityOther,
            ValidationIssue::ResidenceOtherRequired => FieldKey::CountryOfResidenceOther,
            ValidationIssue::SchoolContextIncomplete => first_missing_context(visibility, fields)
                .unwrap_or(FieldKey::SchoolType),
            ValidationIssue::NoCategory => FieldKey::Categories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid {
        reason: ValidationIssue,
        focus_target: FormStep,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Validates a snapshot, computing visibility on the way.
pub fn validate(fields: &FormSnapshot) -> ValidationResult {
    validate_with(fields, &compute_visibility(fields))
}

/// Validates a snapshot against visibility computed by the caller.
pub fn validate_with(fields: &FormSnapshot, visibility: &VisibilitySet) -> ValidationResult {
    match first_issue(fields, visibility) {
        None => ValidationResult::Valid,
        Some(reason) => ValidationResult::Invalid {
            reason,
            focus_target: reason.step(),
        },
    }
}

fn first_issue(fields: &FormSnapshot, visibility: &VisibilitySet) -> Option<ValidationIssue> {
    let missing = |key: FieldKey| visibility.is_required(key) && !fields.is_filled(key);

    if missing(FieldKey::Programs) {
        return Some(ValidationIssue::NoProgram);
    }
    if missing(FieldKey::EducationYearsChoice) {
        return Some(ValidationIssue::NoEducationYearsChoice);
    }
    if missing(FieldKey::EducationYearsOther) {
        return Some(ValidationIssue::EducationYearsOtherRequired);
    }
    if missing(FieldKey::NationalityOther) {
        return Some(ValidationIssue::NationalityOtherRequired);
    }
    if missing(FieldKey::CountryOfResidenceOther) {
        return Some(ValidationIssue::ResidenceOtherRequired);
    }
    if first_missing_context(visibility, fields).is_some() {
        return Some(ValidationIssue::SchoolContextIncomplete);
    }
    if missing(FieldKey::Categories) {
        return Some(ValidationIssue::NoCategory);
    }
    None
}

fn first_missing_context(visibility: &VisibilitySet, fields: &FormSnapshot) -> Option<FieldKey> {
    let group = visibility.active_context()?;
    ContextField::ALL
        .iter()
        .map(|part| FieldKey::SchoolContext(group, *part))
        .find(|key| visibility.is_required(*key) && !fields.is_filled(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apg_domain::{NOT_SURE, OTHER};

    fn complete() -> FormSnapshot {
        FormSnapshot {
            programs: vec!["Law".into()],
            nationality: "Japan".into(),
            country_of_residence: "Japan".into(),
            education_status: "University Graduate".into(),
            education_years_choice: "12".into(),
            categories: vec!["Admissions Requirements".into()],
            ..FormSnapshot::default()
        }
    }

    fn reason(fields: &FormSnapshot) -> Option<ValidationIssue> {
        match validate(fields) {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { reason, .. } => Some(reason),
        }
    }

    #[test]
    fn complete_snapshot_is_valid() {
        assert!(validate(&complete()).is_valid());
    }

    #[test]
    fn program_is_checked_before_everything_else() {
        let fields = FormSnapshot::default();
        assert_eq!(
            validate(&fields),
            ValidationResult::Invalid {
                reason: ValidationIssue::NoProgram,
                focus_target: FormStep::Profile,
            }
        );
    }

    #[test]
    fn missing_years_choice_then_years_other() {
        let mut fields = complete();
        fields.education_years_choice.clear();
        assert_eq!(reason(&fields), Some(ValidationIssue::NoEducationYearsChoice));

        fields.education_years_choice = OTHER.into();
        fields.education_years_other = "  ".into();
        assert_eq!(
            reason(&fields),
            Some(ValidationIssue::EducationYearsOtherRequired)
        );

        fields.education_years_other = "13".into();
        assert_eq!(reason(&fields), None);
    }

    #[test]
    fn other_nationality_requires_free_text() {
        let mut fields = complete();
        fields.nationality = OTHER.into();
        assert_eq!(reason(&fields), Some(ValidationIssue::NationalityOtherRequired));
        fields.nationality_other = "Atlantis".into();
        fields.country_of_residence = OTHER.into();
        assert_eq!(reason(&fields), Some(ValidationIssue::ResidenceOtherRequired));
    }

    #[test]
    fn active_school_context_must_be_complete() {
        let mut fields = complete();
        fields.education_status = "High School Student (Final Year)".into();
        fields.qualifications = vec![NOT_SURE.into()];
        fields.unknown_qualification.official_name = "Kyoto HS".into();
        fields.unknown_qualification.country = "Japan".into();
        fields.unknown_qualification.city = "Kyoto".into();

        let visibility = compute_visibility(&fields);
        let issue = reason(&fields).expect("curriculum missing");
        assert_eq!(issue, ValidationIssue::SchoolContextIncomplete);
        assert_eq!(issue.step(), FormStep::Profile);
        assert_eq!(
            issue.field(&visibility, &fields),
            FieldKey::SchoolContext(
                apg_domain::ContextGroup::UnknownQualification,
                ContextField::Curriculum
            )
        );

        fields.unknown_qualification.curriculum = "National".into();
        assert_eq!(reason(&fields), None);
    }

    #[test]
    fn hidden_context_group_is_not_checked() {
        let mut fields = complete();
        fields.qualifications = vec![NOT_SURE.into()];
        fields.school_type = OTHER.into();
        assert_eq!(reason(&fields), None);
    }

    #[test]
    fn empty_categories_always_fail_on_question_step() {
        let mut fields = complete();
        fields.categories.clear();
        assert_eq!(
            validate(&fields),
            ValidationResult::Invalid {
                reason: ValidationIssue::NoCategory,
                focus_target: FormStep::Question,
            }
        );
    }

    #[test]
    fn blank_list_entries_do_not_count_as_selections() {
        let mut fields = complete();
        fields.categories = vec!["  ".into()];
        assert_eq!(reason(&fields), Some(ValidationIssue::NoCategory));

        fields.programs = vec!["".into()];
        assert_eq!(reason(&fields), Some(ValidationIssue::NoProgram));

        fields.programs = vec!["".into(), "Law".into()];
        fields.categories = vec![" ".into(), "Housing".into()];
        assert_eq!(reason(&fields), None);
    }
}
