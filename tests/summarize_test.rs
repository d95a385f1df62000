//! Integration tests for end-to-end report generation.

use std::path::Path;

use summarease::{
    summarize, summarize_csv, AnalysisConfig, Column, Error, ReportConfig, ShowObservations,
    SummarizeBy, SummarizeOptions, Table, TargetType,
};
use tempfile::tempdir;

fn employees() -> Table {
    Table::from_columns(vec![
        Column::integer("Age", [23, 45, 31, 35, 29]),
        Column::text("Gender", ["Male", "Female", "Female", "Male", "Male"]),
        Column::integer("Salary", [50000, 60000, 75000, 80000, 65000]),
    ])
    .unwrap()
}

fn is_pdf(path: &Path) -> bool {
    std::fs::read(path)
        .map(|bytes| bytes.starts_with(b"%PDF-"))
        .unwrap_or(false)
}

#[test]
fn test_summarize_by_table_writes_pdf() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("summarease_summary_test");

    let options = SummarizeOptions::new()
        .with_dataset_name("Test Dataset")
        .with_description("This is a test dataset.")
        .with_target("Gender")
        .with_summarize_by(SummarizeBy::Table)
        .with_auto_cleaning(true)
        .with_output_file("test_summary.pdf")
        .with_output_dir(&output_dir);

    let outcome = summarize(&employees(), &options).unwrap();

    let expected = output_dir.join("test_summary.pdf");
    assert_eq!(outcome.output_path, expected);
    assert!(is_pdf(&expected));
    assert!(outcome.images.is_empty());
    assert!(outcome.page_count >= 1);
}

#[test]
fn test_summarize_by_plot_writes_charts() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("summarease_summary_test");

    let options = SummarizeOptions::new()
        .with_dataset_name("Test Dataset")
        .with_description("This is a test dataset.")
        .with_target("Gender")
        .with_summarize_by(SummarizeBy::Plot)
        .with_auto_cleaning(true)
        .with_output_file("test_summary.pdf")
        .with_output_dir(&output_dir);

    let outcome = summarize(&employees(), &options).unwrap();

    assert!(output_dir.join("img").join("numeric_plot.png").exists());
    assert!(output_dir.join("img").join("corr_plot.png").exists());
    assert!(output_dir.join("img").join("target_plot.png").exists());
    assert!(outcome.images.iter().all(|p| p.exists()));
    assert!(is_pdf(&outcome.output_path));
}

#[test]
fn test_mixed_mode_has_tables_and_charts() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_summarize_by(SummarizeBy::Mixed)
        .with_output_dir(dir.path());

    let outcome = summarize(&employees(), &options).unwrap();
    assert!(outcome.stats.tables > 0);
    assert!(!outcome.images.is_empty());
}

#[test]
fn test_output_directory_creation() {
    let dir = tempdir().unwrap();
    let output_dir = dir.path().join("summarease_summary_test");
    let options = SummarizeOptions::new()
        .with_output_file("test_output.pdf")
        .with_output_dir(&output_dir);

    let outcome = summarize(&employees(), &options).unwrap();
    assert!(output_dir.is_dir());
    assert_eq!(outcome.output_path.file_name().unwrap(), "test_output.pdf");
}

#[test]
fn test_output_file_without_extension() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_output_file("report")
        .with_output_dir(dir.path());

    let outcome = summarize(&employees(), &options).unwrap();
    assert_eq!(outcome.output_path, dir.path().join("report.pdf"));
}

#[test]
fn test_file_extension_validation() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_output_file("invalid_extension.txt")
        .with_output_dir(dir.path().join("never"));

    let err = summarize(&employees(), &options).unwrap_err();
    assert!(err
        .to_string()
        .contains("The 'output_file' should either have a .pdf extension or no extension"));
    // Validation fails before anything touches the disk
    assert!(!dir.path().join("never").exists());
}

#[test]
fn test_unknown_target_variable() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_target("Department")
        .with_output_dir(dir.path());

    let result = summarize(&employees(), &options);
    assert!(matches!(result, Err(Error::ColumnNotFound(_))));
}

#[test]
fn test_invalid_option_strings() {
    let err = "invalid_option".parse::<ShowObservations>().unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Argument 'show_observations' should be one of the following options:"));

    let err = "invalid_option".parse::<SummarizeBy>().unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Argument 'summarize_by' should be one of the following options:"));
}

#[test]
fn test_numerical_target_threshold_warns() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_target("Salary")
        .with_target_type(TargetType::Numerical)
        .with_threshold(0.3)
        .with_output_dir(dir.path());

    let outcome = summarize(&employees(), &options).unwrap();
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.message == "Threshold is not used for numerical targets."));
}

#[test]
fn test_categorical_warning_is_surfaced() {
    let dir = tempdir().unwrap();
    let config = ReportConfig {
        analysis: AnalysisConfig::new().with_max_categories(1),
        ..ReportConfig::default()
    };
    let options = SummarizeOptions::new()
        .with_config(config)
        .with_output_dir(dir.path());

    let outcome = summarize(&employees(), &options).unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].topic, "Gender");
}

#[test]
fn test_show_all_observations() {
    let dir = tempdir().unwrap();
    let options = SummarizeOptions::new()
        .with_show_observations(ShowObservations::All)
        .with_output_dir(dir.path());

    let outcome = summarize(&employees(), &options).unwrap();
    // observations, dtypes, missing, describe, correlation, categorical, outliers
    assert_eq!(outcome.stats.tables, 7);
}

#[test]
fn test_summarize_csv() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("employees.csv");
    std::fs::write(
        &csv,
        "Age,Gender,Salary\n23,Male,50000\n45,Female,60000\n31,Female,?\n",
    )
    .unwrap();

    let options = SummarizeOptions::new()
        .with_auto_cleaning(true)
        .with_output_dir(dir.path().join("out"));
    let outcome = summarize_csv(&csv, &options).unwrap();
    assert!(is_pdf(&outcome.output_path));
}
