//! Template renderer: applicant record + source list -> prompt text.
//!
//! Pure and deterministic. Static policy text lives in the constants below
//! and is emitted verbatim.

use std::fmt::Write as _;

use apg_domain::{ApplicantRecord, SourceEntry, SourceList, DEFAULT_ADDITIONAL_LABEL};

pub const SEPARATOR: &str = ", ";

pub const TITLE: &str = "# Question about Ritsumeikan University International Admissions";

pub const PREAMBLE: &str = "## Your Role
You are an expert advisor on Ritsumeikan University's international admissions (English-basis programs).
Please follow the rules below strictly when answering.

### Response Rules
1. Base your answers ONLY on the \"Official Information Sources\" provided below
2. For matters not explicitly stated in the sources, respond with: \"This is not explicitly stated in the official information. Please contact the university directly for confirmation.\"
3. NEVER make assumptions or base answers on general university admission practices
4. Quote specific sections from the sources as evidence, including page numbers or section names
5. Respond in English";

pub const SOURCES_HEADING: &str = "## Official Information Sources";

pub const SOURCES_FOOTER: &str =
    "Please refer to these sources and base your answers on their content.";

pub const INACCESSIBLE_GUIDANCE: &str = "### ⚠️ If You Cannot Access the Sources
If you cannot access the URLs above or cannot read their content:
1. Tell me: \"I cannot access the URL. Please upload the PDF.\"
2. I will upload the Admissions Handbook PDF
3. Then please answer my question based on the uploaded document";

pub const MAIN_SOURCE_SUFFIX: &str = " (Main Source)";

pub const QUESTION_PLACEHOLDER: &str =
    "(No specific question provided - please answer based on the categories above)";

pub const RESPONSE_FORMAT: &str = "## Response Format

Please structure your response as follows:

### 1. Answer
(Direct answer to the question)

### 2. Evidence
(Quote relevant sections from the official information, including page numbers or section names)

### 3. Additional Notes
(Any related information or points to consider)

### 4. Unclear Points
(If anything cannot be determined from official sources, recommend contacting the university)

### 5. Source Access Status
For each source listed under \"Official Information Sources\", report:
1. The source name
2. Whether you could access it: Accessible / Partially accessible / Not accessible
3. If not fully accessible, what could not be read and how that limits your answer";

const RULE: &str = "---";

/// Renders the complete prompt. Does not mutate its inputs.
pub fn render(record: &ApplicantRecord, sources: &SourceList) -> String {
    let sections = [
        TITLE.to_string(),
        PREAMBLE.to_string(),
        RULE.to_string(),
        sources_section(sources),
        INACCESSIBLE_GUIDANCE.to_string(),
        RULE.to_string(),
        applicant_section(record),
        RULE.to_string(),
        question_section(record),
        RULE.to_string(),
        RESPONSE_FORMAT.to_string(),
    ];
    sections.join("\n\n")
}

fn sources_section(sources: &SourceList) -> String {
    let mut blocks: Vec<String> = Vec::new();

    if let Some(block) = source_block(&sources.handbook, &sources.handbook.label, true) {
        blocks.push(block);
    }
    if let Some(block) = source_block(
        &sources.application_page,
        &sources.application_page.label,
        false,
    ) {
        blocks.push(block);
    }
    for (index, entry) in sources.additional_entries().enumerate() {
        let fallback;
        let label = if entry.label.trim().is_empty() {
            fallback = format!("{} {}", DEFAULT_ADDITIONAL_LABEL, index + 1);
            fallback.as_str()
        } else {
            entry.label.as_str()
        };
        if let Some(block) = source_block(entry, label, false) {
            blocks.push(block);
        }
    }

    format!(
        "{}\n\n{}\n\n{}",
        SOURCES_HEADING,
        blocks.join("\n\n"),
        SOURCES_FOOTER
    )
}

/// Heading line followed by the URL line; `None` when the URL is blank.
fn source_block(entry: &SourceEntry, label: &str, main: bool) -> Option<String> {
    if !entry.has_url() {
        return None;
    }
    let suffix = if main { MAIN_SOURCE_SUFFIX } else { "" };
    Some(format!(
        "### {}{}\n{}",
        label.trim(),
        suffix,
        entry.url.trim()
    ))
}

fn applicant_section(record: &ApplicantRecord) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Desired Program(s)", record.programs.join(SEPARATOR)),
        ("Country/Region of Citizenship", record.nationality.clone()),
        (
            "Country/Region of Residence",
            record.country_of_residence.clone(),
        ),
        ("Educational Status", record.education_status.clone()),
    ];

    if !record.school_type.is_empty() {
        rows.push(("School Type", record.school_type.clone()));
    }
    if !record.qualifications.is_empty() {
        rows.push(("Qualifications", record.qualifications.join(SEPARATOR)));
    }
    if !record.school_context.official_name.is_empty() {
        rows.push((
            "School Official Name",
            record.school_context.official_name.clone(),
        ));
    }
    if let Some(location) = record.school_location() {
        rows.push(("School Location", location));
    }
    if !record.school_context.curriculum.is_empty() {
        rows.push(("Curriculum", record.school_context.curriculum.clone()));
    }

    rows.push((
        "Years of Education",
        format!("{} years", record.education_years),
    ));

    let mut out = String::from("## Applicant Information\n\n| Item | Details |\n|------|---------|");
    for (item, details) in rows {
        // writing to a String cannot fail
        let _ = write!(out, "\n| {} | {} |", item, details);
    }
    out
}

fn question_section(record: &ApplicantRecord) -> String {
    let question = if record.specific_question.trim().is_empty() {
        QUESTION_PLACEHOLDER
    } else {
        record.specific_question.as_str()
    };
    format!(
        "## Question\n\n### Topics of Interest\n{}\n\n### Specific Question\n{}",
        record.categories.join(SEPARATOR),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use apg_domain::SchoolContext;

    fn sources() -> SourceList {
        SourceList::new(
            SourceEntry::new("https://example.edu/handbook.pdf", "Admissions Handbook 2026"),
            SourceEntry::new("https://example.edu/howto", "Application Procedures"),
        )
    }

    fn record() -> ApplicantRecord {
        ApplicantRecord {
            programs: vec!["Global Studies".into(), "Law".into()],
            nationality: "Japan".into(),
            country_of_residence: "Japan".into(),
            education_status: "University Graduate".into(),
            education_years_choice: "12".into(),
            education_years: "12".into(),
            categories: vec!["Admissions Requirements".into(), "Housing".into()],
            ..ApplicantRecord::default()
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = render(&record(), &sources());
        let positions: Vec<usize> = [
            TITLE,
            "### Response Rules",
            SOURCES_HEADING,
            "### ⚠️ If You Cannot Access the Sources",
            "## Applicant Information",
            "## Question",
            "## Response Format",
            "### 5. Source Access Status",
        ]
        .iter()
        .map(|marker| text.find(marker).expect(marker))
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn handbook_heading_carries_main_source_suffix() {
        let text = render(&record(), &sources());
        assert!(text.contains(
            "### Admissions Handbook 2026 (Main Source)\nhttps://example.edu/handbook.pdf"
        ));
        assert!(text.contains("### Application Procedures\nhttps://example.edu/howto"));
        assert!(!text.contains("Application Procedures (Main Source)"));
    }

    #[test]
    fn blank_urls_remove_whole_blocks() {
        let mut list = sources();
        list.handbook.url = "   ".into();
        list.add("FAQ", "");
        list.add("", "https://example.edu/fees");
        let text = render(&record(), &list);
        assert!(!text.contains("Admissions Handbook 2026"));
        assert!(!text.contains("### FAQ"));
        assert!(text.contains("### Additional Source 2\nhttps://example.edu/fees"));
    }

    #[test]
    fn fixed_rows_render_without_conditional_rows() {
        let text = render(&record(), &sources());
        assert!(text.contains("| Desired Program(s) | Global Studies, Law |"));
        assert!(text.contains("| Educational Status | University Graduate |\n| Years of Education | 12 years |"));
        assert!(!text.contains("School Type"));
        assert!(!text.contains("School Location"));
    }

    #[test]
    fn conditional_rows_follow_declaration_order() {
        let mut record = record();
        record.education_status = "High School Graduate".into();
        record.school_type = "Other".into();
        record.qualifications = vec!["IB Diploma".into(), "SAT/ACT".into()];
        record.school_context = SchoolContext {
            official_name: "Test HS".into(),
            country: "Japan".into(),
            city: "".into(),
            curriculum: "IB".into(),
        };
        let text = render(&record, &sources());
        let expected = "| Educational Status | High School Graduate |
| School Type | Other |
| Qualifications | IB Diploma, SAT/ACT |
| School Official Name | Test HS |
| School Location | Japan |
| Curriculum | IB |
| Years of Education | 12 years |";
        assert!(text.contains(expected), "{text}");
    }

    #[test]
    fn question_falls_back_to_placeholder() {
        let text = render(&record(), &sources());
        assert!(text.contains(&format!(
            "### Topics of Interest\nAdmissions Requirements, Housing\n\n### Specific Question\n{}",
            QUESTION_PLACEHOLDER
        )));

        let mut asked = record();
        asked.specific_question = "Is an interview required?".into();
        let text = render(&asked, &sources());
        assert!(text.contains("### Specific Question\nIs an interview required?"));
        assert!(!text.contains(QUESTION_PLACEHOLDER));
    }
}
