use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use svy_core::{Answer, Generation, Submission};
use svy_report::{
    DirectorySink, MemorySink, ReportError, Reporter, cross_tab, export_csv, group_by, to_table,
};

fn submission(id: &str, usage: &str, age: Option<u32>, gender: &str) -> Submission {
    Submission {
        participant_id: id.into(),
        answers: vec![Answer {
            question_id: "usage".into(),
            values: vec![usage.into()],
        }],
        generation: age.map_or(Generation::Unknown, Generation::from_age),
        gender: gender.into(),
        age,
        completed_at: Some(Utc.with_ymd_and_hms(2025, 9, 29, 14, 0, 0).unwrap()),
    }
}

fn sample() -> Vec<Submission> {
    vec![
        submission("p1", "Daily", Some(24), "F"),
        submission("p2", "Never", Some(50), "M"),
        submission("p3", "Daily", Some(35), "F"),
        submission("p4", "Weekly", None, "F"),
    ]
}

#[test]
fn gender_counts_match_input() {
    let subs = vec![
        submission("p1", "Daily", Some(24), "F"),
        submission("p2", "Daily", Some(24), "M"),
        submission("p3", "Daily", Some(24), "F"),
    ];
    let grouping = group_by(&to_table(&subs), "gender").unwrap();
    assert_eq!(
        grouping.counts,
        BTreeMap::from([("F".to_string(), 2), ("M".to_string(), 1)])
    );
}

#[test]
fn table_has_one_row_per_submission() {
    let subs = sample();
    let table = to_table(&subs);
    assert_eq!(table.len(), subs.len());
    for (row, submission) in table.rows.iter().zip(&subs) {
        assert_eq!(row[0], submission.participant_id);
    }
    let generations = table.column("generation").unwrap();
    let expected: Vec<&str> = subs.iter().map(|s| s.generation.label()).collect();
    assert_eq!(generations, expected);
}

#[rstest]
#[case("generation")]
#[case("gender")]
#[case("usage")]
fn group_counts_sum_to_total(#[case] field: &str) {
    let table = to_table(&sample());
    let grouping = group_by(&table, field).unwrap();
    assert_eq!(grouping.counts.values().sum::<usize>(), table.len());
    let percent: f64 = grouping.entries().iter().map(|e| e.percentage).sum();
    assert!((percent - 100.0).abs() < 1e-9);
}

#[test]
fn cross_tab_total_matches_rows() {
    let table = to_table(&sample());
    let tab = cross_tab(&table, "generation", "usage").unwrap();
    assert_eq!(tab.total(), table.len());
    assert_eq!(tab.row_values.last().map(String::as_str), Some("Unknown"));
}

#[test]
fn report_writes_csv_and_charts() {
    let mut reporter = Reporter::new(MemorySink::new())
        .with_titles(BTreeMap::from([("usage".to_string(), "How often?".to_string())]));
    let output = reporter.write_report(&sample()).unwrap();
    assert_eq!(output.rows, 4);

    let sink = reporter.into_sink();
    let names: Vec<&str> = sink.names().collect();
    assert_eq!(
        names,
        vec![
            "chart-gender.svg",
            "chart-generation.svg",
            "chart-usage-by-gender.svg",
            "chart-usage-by-generation.svg",
            "chart-usage.svg",
            "submissions.csv",
        ]
    );
    assert_eq!(output.artifacts.len(), names.len());

    let csv = sink.text("submissions.csv").unwrap();
    assert!(csv.starts_with("participant_id,usage,generation,gender,age,completed_at\n"));
    assert_eq!(csv.lines().count(), 5);
    assert!(sink.text("chart-usage.svg").unwrap().contains("How often?"));
}

#[test]
fn report_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = Reporter::new(DirectorySink::new(dir.path().join("out")))
        .with_csv_file("answers.csv");
    reporter.write_report(&sample()).unwrap();

    let csv = std::fs::read_to_string(dir.path().join("out").join("answers.csv")).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(dir.path().join("out").join("chart-generation.svg").exists());
}

#[test]
fn export_csv_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.csv");
    export_csv(&to_table(&sample()), &path).unwrap();
    assert!(std::fs::read_to_string(path).unwrap().contains("p3,Daily"));
}

#[test]
fn unknown_field_is_rejected() {
    let table = to_table(&sample());
    assert!(matches!(group_by(&table, "income"), Err(ReportError::UnknownField(f)) if f == "income"));
}
