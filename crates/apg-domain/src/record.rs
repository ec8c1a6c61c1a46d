use serde::Serialize;

use crate::snapshot::SchoolContext;

/// Normalized, validated view of the form used for a single render.
///
/// Choice/free-text pairs are already resolved and hidden groups are empty,
/// so consumers never need to re-check visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub programs: Vec<String>,
    pub nationality: String,
    pub country_of_residence: String,
    pub education_status: String,
    pub education_years_choice: String,
    pub education_years_other: String,
    /// Resolved years of education: the free text when the choice is
    /// `Other`, otherwise the choice token.
    pub education_years: String,
    pub school_type: String,
    pub qualifications: Vec<String>,
    pub school_context: SchoolContext,
    pub categories: Vec<String>,
    pub specific_question: String,
}

impl ApplicantRecord {
    /// "City, Country" with empty parts skipped; `None` when both are empty.
    pub fn school_location(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.school_context.city.as_str(),
            self.school_context.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_location(city: &str, country: &str) -> ApplicantRecord {
        ApplicantRecord {
            school_context: SchoolContext {
                city: city.into(),
                country: country.into(),
                ..SchoolContext::default()
            },
            ..ApplicantRecord::default()
        }
    }

    #[test]
    fn school_location_skips_empty_parts() {
        assert_eq!(
            record_with_location("Kyoto", "Japan").school_location(),
            Some("Kyoto, Japan".to_string())
        );
        assert_eq!(
            record_with_location("", "Japan").school_location(),
            Some("Japan".to_string())
        );
        assert_eq!(
            record_with_location("Kyoto", "").school_location(),
            Some("Kyoto".to_string())
        );
        assert_eq!(record_with_location("", "").school_location(), None);
    }
}
