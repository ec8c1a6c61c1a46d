//! Raw field values exactly as the form currently holds them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ContextField, ContextGroup, FieldKey};

/// Four free-text fields describing the applicant's school.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchoolContext {
    pub official_name: String,
    pub country: String,
    pub city: String,
    pub curriculum: String,
}

impl SchoolContext {
    pub fn get(&self, field: ContextField) -> &str {
        match field {
            ContextField::OfficialName => &self.official_name,
            ContextField::Country => &self.country,
            ContextField::City => &self.city,
            ContextField::Curriculum => &self.curriculum,
        }
    }

    pub fn get_mut(&mut self, field: ContextField) -> &mut String {
        match field {
            ContextField::OfficialName => &mut self.official_name,
            ContextField::Country => &mut self.country,
            ContextField::City => &mut self.city,
            ContextField::Curriculum => &mut self.curriculum,
        }
    }

    pub fn is_empty(&self) -> bool {
        ContextField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            official_name: self.official_name.trim().to_string(),
            country: self.country.trim().to_string(),
            city: self.city.trim().to_string(),
            curriculum: self.curriculum.trim().to_string(),
        }
    }
}

/// Borrowed view of a single field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// Whitespace-only text counts as empty, as does a list holding only
    /// blank entries.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::List(items) => items.iter().any(|item| !item.trim().is_empty()),
        }
    }
}

/// Raised when a value is written through the wrong accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    ExpectedText(FieldKey),
    ExpectedList(FieldKey),
}

impl fmt::Display for FieldAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccessError::ExpectedText(key) => {
                write!(f, "`{}` holds a list of selections, not text", key)
            }
            FieldAccessError::ExpectedList(key) => {
                write!(f, "`{}` holds a single value, not a list", key)
            }
        }
    }
}

impl std::error::Error for FieldAccessError {}

/// Current values of every catalog field.
///
/// Select fields hold the chosen option (or an empty string when unset);
/// multi-selects hold the checked options in the order they were checked.
/// Nothing here is validated; see the visibility engine and validator in
/// `apg-core`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSnapshot {
    pub programs: Vec<String>,
    pub nationality: String,
    pub nationality_other: String,
    pub country_of_residence: String,
    pub country_of_residence_other: String,
    pub education_status: String,
    pub education_years_choice: String,
    pub education_years_other: String,
    pub school_type: String,
    pub qualifications: Vec<String>,
    pub other_school: SchoolContext,
    pub unknown_qualification: SchoolContext,
    pub categories: Vec<String>,
    pub specific_question: String,
}

impl FormSnapshot {
    pub fn context(&self, group: ContextGroup) -> &SchoolContext {
        match group {
            ContextGroup::OtherSchool => &self.other_school,
            ContextGroup::UnknownQualification => &self.unknown_qualification,
        }
    }

    pub fn context_mut(&mut self, group: ContextGroup) -> &mut SchoolContext {
        match group {
            ContextGroup::OtherSchool => &mut self.other_school,
            ContextGroup::UnknownQualification => &mut self.unknown_qualification,
        }
    }

    pub fn value(&self, key: FieldKey) -> FieldValue<'_> {
        match key {
            FieldKey::Programs => FieldValue::List(&self.programs),
            FieldKey::Qualifications => FieldValue::List(&self.qualifications),
            FieldKey::Categories => FieldValue::List(&self.categories),
            FieldKey::Nationality => FieldValue::Text(&self.nationality),
            FieldKey::NationalityOther => FieldValue::Text(&self.nationality_other),
            FieldKey::CountryOfResidence => FieldValue::Text(&self.country_of_residence),
            FieldKey::CountryOfResidenceOther => {
                FieldValue::Text(&self.country_of_residence_other)
            }
            FieldKey::EducationStatus => FieldValue::Text(&self.education_status),
            FieldKey::EducationYearsChoice => FieldValue::Text(&self.education_years_choice),
            FieldKey::EducationYearsOther => FieldValue::Text(&self.education_years_other),
            FieldKey::SchoolType => FieldValue::Text(&self.school_type),
            FieldKey::SchoolContext(group, field) => FieldValue::Text(self.context(group).get(field)),
            FieldKey::SpecificQuestion => FieldValue::Text(&self.specific_question),
        }
    }

    /// Text value of a single-value field; list fields read as empty.
    pub fn text(&self, key: FieldKey) -> &str {
        match self.value(key) {
            FieldValue::Text(text) => text,
            FieldValue::List(_) => "",
        }
    }

    pub fn is_filled(&self, key: FieldKey) -> bool {
        self.value(key).is_filled()
    }

    /// Resets a field to its empty value. Returns true when something was
    /// actually removed.
    pub fn clear(&mut self, key: FieldKey) -> bool {
        match self.list_mut(key) {
            Some(list) => {
                let had_values = !list.is_empty();
                list.clear();
                had_values
            }
            None => match self.text_mut(key) {
                Some(text) => {
                    let had_value = !text.is_empty();
                    text.clear();
                    had_value
                }
                None => false,
            },
        }
    }

    pub fn set_text(
        &mut self,
        key: FieldKey,
        value: impl Into<String>,
    ) -> Result<(), FieldAccessError> {
        let slot = self
            .text_mut(key)
            .ok_or(FieldAccessError::ExpectedText(key))?;
        *slot = value.into();
        Ok(())
    }

    pub fn set_list(&mut self, key: FieldKey, values: Vec<String>) -> Result<(), FieldAccessError> {
        let slot = self
            .list_mut(key)
            .ok_or(FieldAccessError::ExpectedList(key))?;
        *slot = values;
        Ok(())
    }

    /// Checks or unchecks a multi-select option. Returns the new checked state.
    pub fn toggle(&mut self, key: FieldKey, value: &str) -> Result<bool, FieldAccessError> {
        let slot = self
            .list_mut(key)
            .ok_or(FieldAccessError::ExpectedList(key))?;
        if let Some(position) = slot.iter().position(|item| item == value) {
            slot.remove(position);
            Ok(false)
        } else {
            slot.push(value.to_string());
            Ok(true)
        }
    }

    fn text_mut(&mut self, key: FieldKey) -> Option<&mut String> {
        let slot = match key {
            FieldKey::Nationality => &mut self.nationality,
            FieldKey::NationalityOther => &mut self.nationality_other,
            FieldKey::CountryOfResidence => &mut self.country_of_residence,
            FieldKey::CountryOfResidenceOther => &mut self.country_of_residence_other,
            FieldKey::EducationStatus => &mut self.education_status,
            FieldKey::EducationYearsChoice => &mut self.education_years_choice,
            FieldKey::EducationYearsOther => &mut self.education_years_other,
            FieldKey::SchoolType => &mut self.school_type,
            FieldKey::SchoolContext(group, field) => self.context_mut(group).get_mut(field),
            FieldKey::SpecificQuestion => &mut self.specific_question,
            FieldKey::Programs | FieldKey::Qualifications | FieldKey::Categories => return None,
        };
        Some(slot)
    }

    fn list_mut(&mut self, key: FieldKey) -> Option<&mut Vec<String>> {
        match key {
            FieldKey::Programs => Some(&mut self.programs),
            FieldKey::Qualifications => Some(&mut self.qualifications),
            FieldKey::Categories => Some(&mut self.categories),
            _ => None,
        }
    }
}
