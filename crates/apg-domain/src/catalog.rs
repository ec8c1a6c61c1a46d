//! Declarative field catalog.
//!
//! Every input the form collects is described once here: its key, label,
//! kind (with allowed values), the form step it belongs to, and the
//! predicates that gate its visibility and requiredness. The visibility
//! engine, validator and builder all consume this table instead of carrying
//! per-field branching of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel choice that unlocks a free-text sibling field.
pub const OTHER: &str = "Other";

/// Sentinel qualification that unlocks the "qualification unknown" details.
pub const NOT_SURE: &str = "Not sure";

pub const PROGRAMS: &[&str] = &[
    "Global Studies",
    "Community and Regional Policy Studies",
    "Information Systems Science and Engineering",
    "Asia Pacific Studies",
    "International Management",
    "Sustainability Studies",
    "Economics",
    "Law",
];

pub const COUNTRIES: &[&str] = &[
    "Japan",
    "China",
    "South Korea",
    "Taiwan",
    "Hong Kong",
    "Indonesia",
    "Vietnam",
    "Thailand",
    "Malaysia",
    "Philippines",
    "Singapore",
    "India",
    "United States",
    "Canada",
    "United Kingdom",
    "Australia",
    OTHER,
];

pub const EDUCATION_STATUSES: &[&str] = &[
    "High School Student (Final Year)",
    "High School Graduate",
    "Non-traditional Education (Homeschool, GED, etc.)",
    "Currently Enrolled at University",
    "University Graduate",
    OTHER,
];

pub const EDUCATION_YEARS_CHOICES: &[&str] = &["11", "12", OTHER];

pub const SCHOOL_TYPES: &[&str] = &[
    "Local/National School",
    "International School",
    "Japanese School Overseas",
    OTHER,
];

pub const QUALIFICATIONS: &[&str] = &[
    "IB Diploma",
    "GCE A-Levels",
    "Advanced Placement (AP)",
    "SAT/ACT",
    "National Secondary School Diploma",
    NOT_SURE,
];

pub const CATEGORIES: &[&str] = &[
    "Admissions Requirements",
    "Application Documents",
    "Application Schedule",
    "Screening and Interviews",
    "Language Proficiency",
    "Tuition and Fees",
    "Scholarships",
    "Visa and Residence",
    "Housing",
    OTHER,
];

/// True when the education status belongs to the high-school branch of the
/// form (school type, qualifications and school context details).
pub fn is_high_school_related(status: &str) -> bool {
    let lowered = status.to_lowercase();
    lowered.contains("high school") || lowered.contains("non-traditional")
}

/// Steps of the form as surfaced by the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormStep {
    Profile,
    Question,
    Sources,
    Generated,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Profile,
        FormStep::Question,
        FormStep::Sources,
        FormStep::Generated,
    ];

    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            FormStep::Profile => 1,
            FormStep::Question => 2,
            FormStep::Sources => 3,
            FormStep::Generated => 4,
        }
    }

    pub fn from_number(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == value)
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::Profile => "Applicant Profile",
            FormStep::Question => "Question",
            FormStep::Sources => "Sources",
            FormStep::Generated => "Generated Prompt",
        }
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} ({})", self.number(), self.title())
    }
}

/// The two mutually exclusive school-detail sub-groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextGroup {
    /// Shown when the school type is `Other`.
    OtherSchool,
    /// Shown when qualifications contain `Not sure`.
    UnknownQualification,
}

/// One of the four free-text fields inside a school-detail sub-group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextField {
    OfficialName,
    Country,
    City,
    Curriculum,
}

impl ContextField {
    pub const ALL: [ContextField; 4] = [
        ContextField::OfficialName,
        ContextField::Country,
        ContextField::City,
        ContextField::Curriculum,
    ];
}

/// Identifies a single form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Programs,
    Nationality,
    NationalityOther,
    CountryOfResidence,
    CountryOfResidenceOther,
    EducationStatus,
    EducationYearsChoice,
    EducationYearsOther,
    SchoolType,
    Qualifications,
    SchoolContext(ContextGroup, ContextField),
    Categories,
    SpecificQuestion,
}

impl FieldKey {
    /// Stable external name, shared with the persisted JSON layout.
    pub fn name(self) -> &'static str {
        use ContextField as F;
        use ContextGroup as G;
        match self {
            FieldKey::Programs => "programs",
            FieldKey::Nationality => "nationality",
            FieldKey::NationalityOther => "nationalityOther",
            FieldKey::CountryOfResidence => "countryOfResidence",
            FieldKey::CountryOfResidenceOther => "countryOfResidenceOther",
            FieldKey::EducationStatus => "educationStatus",
            FieldKey::EducationYearsChoice => "educationYearsChoice",
            FieldKey::EducationYearsOther => "educationYearsOther",
            FieldKey::SchoolType => "schoolType",
            FieldKey::Qualifications => "qualifications",
            FieldKey::SchoolContext(G::OtherSchool, F::OfficialName) => "schoolOfficialName",
            FieldKey::SchoolContext(G::OtherSchool, F::Country) => "schoolLocationCountry",
            FieldKey::SchoolContext(G::OtherSchool, F::City) => "schoolLocationCity",
            FieldKey::SchoolContext(G::OtherSchool, F::Curriculum) => "curriculumName",
            FieldKey::SchoolContext(G::UnknownQualification, F::OfficialName) => {
                "unknownSchoolOfficialName"
            }
            FieldKey::SchoolContext(G::UnknownQualification, F::Country) => {
                "unknownSchoolLocationCountry"
            }
            FieldKey::SchoolContext(G::UnknownQualification, F::City) => {
                "unknownSchoolLocationCity"
            }
            FieldKey::SchoolContext(G::UnknownQualification, F::Curriculum) => {
                "unknownCurriculumName"
            }
            FieldKey::Categories => "categories",
            FieldKey::SpecificQuestion => "specificQuestion",
        }
    }

    /// Case-insensitive lookup by external name.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        FIELD_CATALOG
            .iter()
            .map(|spec| spec.key)
            .find(|key| key.name().eq_ignore_ascii_case(needle))
    }

    pub fn spec(self) -> &'static FieldSpec {
        // The catalog lists every key; the fallback only guards against a
        // key added without a catalog row.
        FIELD_CATALOG
            .iter()
            .find(|spec| spec.key == self)
            .unwrap_or(&FIELD_CATALOG[0])
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input kinds, with the allowed values for choice fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Select(&'static [&'static str]),
    MultiSelect(&'static [&'static str]),
    Text,
    TextArea,
}

impl FieldKind {
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            FieldKind::Select(options) | FieldKind::MultiSelect(options) => options,
            FieldKind::Text | FieldKind::TextArea => &[],
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, FieldKind::MultiSelect(_))
    }

    /// Resolves user input to the canonical spelling of an allowed value.
    pub fn canonical(&self, input: &str) -> Option<&'static str> {
        let needle = input.trim();
        self.options()
            .iter()
            .copied()
            .find(|option| option.eq_ignore_ascii_case(needle))
    }
}

/// Predicate deciding whether a field is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// Shown when the referenced select holds [`OTHER`].
    OtherSelected(FieldKey),
    /// Shown when the education status is high-school related.
    SchoolDetails,
    /// Shown when the given sub-group is the active school context.
    SchoolContext(ContextGroup),
}

/// Whether a visible field must be filled before generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    RequiredWhenVisible,
}

/// Catalog row for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub kind: FieldKind,
    pub step: FormStep,
    pub visible_when: Condition,
    pub requirement: Requirement,
}

const fn field(
    key: FieldKey,
    label: &'static str,
    kind: FieldKind,
    step: FormStep,
    visible_when: Condition,
    requirement: Requirement,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        step,
        visible_when,
        requirement,
    }
}

const fn context_field(
    group: ContextGroup,
    part: ContextField,
    label: &'static str,
) -> FieldSpec {
    field(
        FieldKey::SchoolContext(group, part),
        label,
        FieldKind::Text,
        FormStep::Profile,
        Condition::SchoolContext(group),
        Requirement::RequiredWhenVisible,
    )
}

use Condition::{Always, OtherSelected, SchoolDetails};
use FormStep::{Profile, Question};
use Requirement::{Optional, RequiredWhenVisible};

/// Every field, in declaration order. Multi-select values and conditional
/// rows follow this order wherever they are rendered.
pub const FIELD_CATALOG: &[FieldSpec] = &[
    field(
        FieldKey::Programs,
        "Desired Program(s)",
        FieldKind::MultiSelect(PROGRAMS),
        Profile,
        Always,
        RequiredWhenVisible,
    ),
    field(
        FieldKey::Nationality,
        "Country/Region of Citizenship",
        FieldKind::Select(COUNTRIES),
        Profile,
        Always,
        Optional,
    ),
    field(
        FieldKey::NationalityOther,
        "Country/Region of Citizenship (Other)",
        FieldKind::Text,
        Profile,
        OtherSelected(FieldKey::Nationality),
        RequiredWhenVisible,
    ),
    field(
        FieldKey::CountryOfResidence,
        "Country/Region of Residence",
        FieldKind::Select(COUNTRIES),
        Profile,
        Always,
        Optional,
    ),
    field(
        FieldKey::CountryOfResidenceOther,
        "Country/Region of Residence (Other)",
        FieldKind::Text,
        Profile,
        OtherSelected(FieldKey::CountryOfResidence),
        RequiredWhenVisible,
    ),
    field(
        FieldKey::EducationStatus,
        "Educational Status",
        FieldKind::Select(EDUCATION_STATUSES),
        Profile,
        Always,
        Optional,
    ),
    field(
        FieldKey::EducationYearsChoice,
        "Years of Education",
        FieldKind::Select(EDUCATION_YEARS_CHOICES),
        Profile,
        Always,
        RequiredWhenVisible,
    ),
    field(
        FieldKey::EducationYearsOther,
        "Years of Education (Other)",
        FieldKind::Text,
        Profile,
        OtherSelected(FieldKey::EducationYearsChoice),
        RequiredWhenVisible,
    ),
    field(
        FieldKey::SchoolType,
        "School Type",
        FieldKind::Select(SCHOOL_TYPES),
        Profile,
        SchoolDetails,
        Optional,
    ),
    field(
        FieldKey::Qualifications,
        "Qualifications",
        FieldKind::MultiSelect(QUALIFICATIONS),
        Profile,
        SchoolDetails,
        Optional,
    ),
    context_field(
        ContextGroup::OtherSchool,
        ContextField::OfficialName,
        "School Official Name",
    ),
    context_field(
        ContextGroup::OtherSchool,
        ContextField::Country,
        "School Location (Country)",
    ),
    context_field(
        ContextGroup::OtherSchool,
        ContextField::City,
        "School Location (City)",
    ),
    context_field(
        ContextGroup::OtherSchool,
        ContextField::Curriculum,
        "Curriculum Name",
    ),
    context_field(
        ContextGroup::UnknownQualification,
        ContextField::OfficialName,
        "School Official Name",
    ),
    context_field(
        ContextGroup::UnknownQualification,
        ContextField::Country,
        "School Location (Country)",
    ),
    context_field(
        ContextGroup::UnknownQualification,
        ContextField::City,
        "School Location (City)",
    ),
    context_field(
        ContextGroup::UnknownQualification,
        ContextField::Curriculum,
        "Curriculum Name",
    ),
    field(
        FieldKey::Categories,
        "Topics of Interest",
        FieldKind::MultiSelect(CATEGORIES),
        Question,
        Always,
        RequiredWhenVisible,
    ),
    field(
        FieldKey::SpecificQuestion,
        "Specific Question",
        FieldKind::TextArea,
        Question,
        Always,
        Optional,
    ),
];

/// Catalog rows belonging to a form step, in declaration order.
pub fn fields_for_step(step: FormStep) -> impl Iterator<Item = &'static FieldSpec> {
    FIELD_CATALOG.iter().filter(move |spec| spec.step == step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn high_school_predicate_matches_status_text() {
        assert!(is_high_school_related("High School Graduate"));
        assert!(is_high_school_related("high school student (final year)"));
        assert!(is_high_school_related(
            "Non-traditional Education (Homeschool, GED, etc.)"
        ));
        assert!(!is_high_school_related("University Graduate"));
        assert!(!is_high_school_related(""));
    }

    #[test]
    fn catalog_keys_are_unique_and_resolvable_by_name() {
        let mut seen = HashSet::new();
        for spec in FIELD_CATALOG {
            assert!(seen.insert(spec.key), "duplicate key {}", spec.key);
            assert_eq!(FieldKey::from_name(spec.key.name()), Some(spec.key));
            assert_eq!(spec.key.spec(), spec);
        }
        assert_eq!(
            FieldKey::from_name("SCHOOLOFFICIALNAME"),
            Some(FieldKey::SchoolContext(
                ContextGroup::OtherSchool,
                ContextField::OfficialName
            ))
        );
        assert_eq!(FieldKey::from_name("program"), None);
    }

    #[test]
    fn canonical_choice_ignores_case_and_padding() {
        let kind = FieldKey::Categories.spec().kind;
        assert_eq!(
            kind.canonical("  admissions requirements "),
            Some("Admissions Requirements")
        );
        assert_eq!(kind.canonical("Cafeteria"), None);
        assert_eq!(FieldKind::Text.canonical("anything"), None);
    }

    #[test]
    fn steps_round_trip_through_numbers() {
        for step in FormStep::ALL {
            assert_eq!(FormStep::from_number(step.number()), Some(step));
        }
        assert_eq!(FormStep::from_number(0), None);
        assert_eq!(FormStep::from_number(5), None);
    }
}
