use admissions_prompt::{
    config::DefaultSources,
    core::generate,
    domain::{FormSnapshot, SourceList, OTHER},
    storage::{MemoryStore, PersistenceAdapter},
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_fields() -> FormSnapshot {
    let mut fields = FormSnapshot {
        programs: vec!["Law".into(), "Economics".into(), "Global Studies".into()],
        nationality: OTHER.into(),
        nationality_other: "Atlantis".into(),
        country_of_residence: "Japan".into(),
        education_status: "High School Student (Final Year)".into(),
        education_years_choice: "12".into(),
        school_type: OTHER.into(),
        qualifications: vec!["IB Diploma".into(), "SAT/ACT".into()],
        categories: vec!["Scholarships".into(), "Housing".into()],
        specific_question: "Which documents must be notarized?".into(),
        ..FormSnapshot::default()
    };
    fields.other_school.official_name = "Bench High".into();
    fields.other_school.country = "Japan".into();
    fields.other_school.city = "Kyoto".into();
    fields.other_school.curriculum = "IB".into();
    fields
}

fn sample_sources(extra: usize) -> SourceList {
    let mut sources = DefaultSources::default().to_source_list();
    for idx in 0..extra {
        sources.add(format!("Source {idx}"), format!("https://example.edu/{idx}"));
    }
    sources
}

fn bench_generate(c: &mut Criterion) {
    let fields = sample_fields();
    let sources = sample_sources(20);

    c.bench_function("generate_prompt_20_sources", |b| {
        b.iter(|| {
            let generation = generate(black_box(&fields), black_box(&sources)).expect("valid");
            black_box(generation);
        })
    });
}

fn bench_persistence(c: &mut Criterion) {
    let fields = sample_fields();
    let adapter = PersistenceAdapter::new(MemoryStore::new());

    c.bench_function("form_save_load_roundtrip", |b| {
        b.iter(|| {
            adapter.try_save_record(&fields).expect("save");
            let report = adapter.try_load_record().expect("load");
            black_box(report);
        })
    });
}

criterion_group!(benches, bench_generate, bench_persistence);
criterion_main!(benches);
