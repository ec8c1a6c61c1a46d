//! Form-record builder.

use apg_domain::{ApplicantRecord, FieldKey, FormSnapshot, OTHER};

use crate::visibility::{compute_visibility, VisibilitySet};

/// Builds the applicant record, computing visibility on the way.
///
/// Intended for snapshots that already passed validation; hidden groups are
/// resolved to empty values regardless of what the raw fields still hold.
pub fn build(fields: &FormSnapshot) -> ApplicantRecord {
    build_with(fields, &compute_visibility(fields))
}

/// Builds the applicant record using visibility computed by the caller.
pub fn build_with(fields: &FormSnapshot, visibility: &VisibilitySet) -> ApplicantRecord {
    let school_shown = visibility.school().is_shown();

    let school_context = visibility
        .active_context()
        .map(|group| fields.context(group).trimmed())
        .unwrap_or_default();

    let (school_type, qualifications) = if school_shown {
        (
            fields.school_type.trim().to_string(),
            catalog_order(FieldKey::Qualifications, &fields.qualifications),
        )
    } else {
        (String::new(), Vec::new())
    };

    let years_other = if visibility.is_visible(FieldKey::EducationYearsOther) {
        fields.education_years_other.trim().to_string()
    } else {
        String::new()
    };
    let education_years = resolve_choice(&fields.education_years_choice, &years_other);

    ApplicantRecord {
        programs: catalog_order(FieldKey::Programs, &fields.programs),
        nationality: resolve_choice(&fields.nationality, &fields.nationality_other),
        country_of_residence: resolve_choice(
            &fields.country_of_residence,
            &fields.country_of_residence_other,
        ),
        education_status: fields.education_status.trim().to_string(),
        education_years_choice: fields.education_years_choice.trim().to_string(),
        education_years_other: years_other,
        education_years,
        school_type,
        qualifications,
        school_context,
        categories: catalog_order(FieldKey::Categories, &fields.categories),
        specific_question: fields.specific_question.trim().to_string(),
    }
}

/// The free text when `Other` is chosen, otherwise the choice itself.
fn resolve_choice(choice: &str, other: &str) -> String {
    if choice == OTHER {
        other.trim().to_string()
    } else {
        choice.trim().to_string()
    }
}

/// Orders selections by catalog declaration order. Values the catalog does
/// not know keep their selection order after the known ones; duplicates and
/// blanks are dropped.
fn catalog_order(key: FieldKey, selected: &[String]) -> Vec<String> {
    let options = key.spec().kind.options();
    let mut ordered: Vec<String> = options
        .iter()
        .filter(|option| selected.iter().any(|value| value.trim() == **option))
        .map(|option| option.to_string())
        .collect();
    for value in selected {
        let value = value.trim();
        if value.is_empty() || ordered.iter().any(|known| known == value) {
            continue;
        }
        ordered.push(value.to_string());
    }
    ordered
}
