use apg_domain::{
    is_high_school_related, FieldKey, FormSnapshot, FormStep, SourceEntry, SourceList,
    EDUCATION_STATUSES, NOT_SURE, OTHER,
};

use crate::{
    build, generate, render, render::QUESTION_PLACEHOLDER, validate, ValidationIssue,
    ValidationResult,
};

fn default_sources() -> SourceList {
    SourceList::new(
        SourceEntry::new(
            "https://en.ritsumei.ac.jp/e-ug/apply/aohb26.pdf",
            "Admissions Handbook 2026",
        ),
        SourceEntry::new(
            "https://en.ritsumei.ac.jp/e-ug/apply/howto.html/?version=English",
            "Application Procedures",
        ),
    )
}

fn other_school_scenario() -> FormSnapshot {
    let mut fields = FormSnapshot {
        programs: vec!["Law".into()],
        nationality: "Japan".into(),
        country_of_residence: "Japan".into(),
        education_status: "High School Graduate".into(),
        education_years_choice: "12".into(),
        school_type: OTHER.into(),
        categories: vec!["Admissions Requirements".into()],
        ..FormSnapshot::default()
    };
    fields.other_school.official_name = "Test HS".into();
    fields.other_school.country = "Japan".into();
    fields.other_school.city = "Kyoto".into();
    fields.other_school.curriculum = "IB".into();
    fields
}

#[test]
fn other_school_scenario_renders_context_rows() {
    let fields = other_school_scenario();
    assert!(validate(&fields).is_valid());

    let generation = generate(&fields, &default_sources()).expect("valid scenario");
    let prompt = &generation.prompt;
    assert!(prompt.contains("| School Official Name | Test HS |"));
    assert!(prompt.contains("| School Location | Kyoto, Japan |"));
    assert!(prompt.contains("| Curriculum | IB |"));
    assert!(prompt.contains(&format!("### Specific Question\n{}", QUESTION_PLACEHOLDER)));
    assert_eq!(generation.record.school_type, OTHER);
}

#[test]
fn rendering_is_deterministic() {
    let fields = other_school_scenario();
    let sources = default_sources();
    let first = render(&build(&fields), &sources);
    let second = render(&build(&fields), &sources);
    assert_eq!(first, second);
    assert_eq!(generate(&fields, &sources).expect("valid").prompt, first);
}

#[test]
fn empty_categories_fail_regardless_of_other_fields() {
    let mut fields = other_school_scenario();
    fields.categories.clear();
    for status in EDUCATION_STATUSES {
        fields.education_status = status.to_string();
        let result = validate(&fields);
        assert!(!result.is_valid(), "{status}");
    }

    let failure = generate(&fields, &default_sources()).expect_err("no categories");
    assert_eq!(failure.reason, ValidationIssue::NoCategory);
    assert_eq!(failure.focus_target, FormStep::Question);
    assert_eq!(failure.to_string(), "Validation failed: no category selected");
}

#[test]
fn non_high_school_statuses_never_carry_school_details() {
    let mut fields = other_school_scenario();
    fields.qualifications = vec![NOT_SURE.into()];
    fields.unknown_qualification.city = "Osaka".into();

    for status in EDUCATION_STATUSES
        .iter()
        .copied()
        .chain(["", "Working Professional"])
        .filter(|status| !is_high_school_related(status))
    {
        fields.education_status = status.to_string();
        let record = build(&fields);
        assert!(record.school_type.is_empty(), "{status}");
        assert!(record.qualifications.is_empty(), "{status}");
        assert!(record.school_context.is_empty(), "{status}");
    }
}

#[test]
fn incomplete_context_aborts_before_build() {
    let mut fields = other_school_scenario();
    fields.other_school.curriculum = "  ".into();
    match validate(&fields) {
        ValidationResult::Invalid {
            reason,
            focus_target,
        } => {
            assert_eq!(reason, ValidationIssue::SchoolContextIncomplete);
            assert_eq!(focus_target, FormStep::Profile);
        }
        ValidationResult::Valid => panic!("curriculum is required"),
    }
    assert!(generate(&fields, &default_sources()).is_err());
}

#[test]
fn blank_source_url_removes_block_but_keeps_others() {
    let fields = other_school_scenario();
    let mut sources = default_sources();
    sources.application_page.url.clear();
    let faq = sources.add("FAQ", "https://example.edu/faq");

    let prompt = generate(&fields, &sources).expect("valid").prompt;
    assert!(!prompt.contains("### Application Procedures"));
    assert!(prompt.contains(
        "### Admissions Handbook 2026 (Main Source)\nhttps://en.ritsumei.ac.jp/e-ug/apply/aohb26.pdf"
    ));
    assert!(prompt.contains("### FAQ\nhttps://example.edu/faq"));

    sources.remove(faq);
    let prompt = generate(&fields, &sources).expect("valid").prompt;
    assert!(!prompt.contains("### FAQ"));
}

#[test]
fn hidden_years_other_is_not_required() {
    let mut fields = other_school_scenario();
    fields.education_years_other = String::new();
    assert!(validate(&fields).is_valid());

    fields.education_years_choice = OTHER.into();
    let failure = generate(&fields, &default_sources()).expect_err("years-other");
    assert_eq!(failure.reason, ValidationIssue::EducationYearsOtherRequired);
    assert_eq!(
        failure.reason.field(&crate::compute_visibility(&fields), &fields),
        FieldKey::EducationYearsOther
    );
}
