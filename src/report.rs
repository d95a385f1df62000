//! End-to-end report generation.
//!
//! [`summarize`] validates its arguments, optionally cleans the dataset,
//! runs every summary and appends the results to a [`ReportBuilder`] in a
//! fixed section order:
//!
//! 1. title and description
//! 2. observations (head, tail or all rows)
//! 3. data types
//! 4. missing values
//! 5. numeric summary and correlation
//! 6. categorical summary
//! 7. outliers
//! 8. target variable (when one is given)

use crate::chart::ChartRenderer;
use crate::clean::{clean_data, CleanOptions};
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::layout::{BuildStats, DocumentInfo, OutputTarget, ReportBuilder};
use crate::model::{Block, Table};
use crate::summary::{
    dtype_counts, summarize_categorical, summarize_dtypes, summarize_missing_values,
    summarize_numeric, summarize_outliers, summarize_target, NumericSummary, TargetType,
    NO_NUMERIC_COLUMNS,
};
use crate::warning::Warning;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default report file name.
pub const DEFAULT_OUTPUT_FILE: &str = "summarease_summary.pdf";

/// Default report directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./summarease_summary/";

const NO_CATEGORICAL_COLUMNS: &str = "No categorical columns found in the dataset.";

/// Which rows the observations section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowObservations {
    /// The first rows
    #[default]
    Head,
    /// The last rows
    Tail,
    /// Every row
    All,
}

impl ShowObservations {
    const OPTIONS: [&'static str; 3] = ["head", "tail", "all"];
}

impl FromStr for ShowObservations {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "head" => Ok(ShowObservations::Head),
            "tail" => Ok(ShowObservations::Tail),
            "all" => Ok(ShowObservations::All),
            _ => Err(invalid_option("show_observations", &Self::OPTIONS)),
        }
    }
}

/// Whether sections are rendered as tables, charts or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizeBy {
    /// Tables only
    #[default]
    Table,
    /// Charts, with tables where no chart exists
    Plot,
    /// Tables followed by charts
    Mixed,
}

impl SummarizeBy {
    const OPTIONS: [&'static str; 3] = ["table", "plot", "mixed"];

    /// Check if tables are drawn.
    pub fn tables(self) -> bool {
        matches!(self, SummarizeBy::Table | SummarizeBy::Mixed)
    }

    /// Check if charts are drawn.
    pub fn plots(self) -> bool {
        matches!(self, SummarizeBy::Plot | SummarizeBy::Mixed)
    }
}

impl FromStr for SummarizeBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(SummarizeBy::Table),
            "plot" => Ok(SummarizeBy::Plot),
            "mixed" => Ok(SummarizeBy::Mixed),
            _ => Err(invalid_option("summarize_by", &Self::OPTIONS)),
        }
    }
}

fn invalid_option(argument: &str, options: &[&str]) -> Error {
    Error::Validation(format!(
        "Argument '{}' should be one of the following options: [{}]",
        argument,
        options.join(", ")
    ))
}

/// Report section, reported to progress callbacks as it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Overview,
    Observations,
    DataTypes,
    MissingValues,
    Numeric,
    Categorical,
    Outliers,
    Target,
    Writing,
}

impl ReportSection {
    /// Sections in report order.
    pub const ALL: [ReportSection; 9] = [
        ReportSection::Overview,
        ReportSection::Observations,
        ReportSection::DataTypes,
        ReportSection::MissingValues,
        ReportSection::Numeric,
        ReportSection::Categorical,
        ReportSection::Outliers,
        ReportSection::Target,
        ReportSection::Writing,
    ];

    /// Section heading as printed in the report.
    pub fn title(self) -> &'static str {
        match self {
            ReportSection::Overview => "Overview",
            ReportSection::Observations => "Observations",
            ReportSection::DataTypes => "Data Types",
            ReportSection::MissingValues => "Missing Values",
            ReportSection::Numeric => "Numeric Summary",
            ReportSection::Categorical => "Categorical Summary",
            ReportSection::Outliers => "Outliers",
            ReportSection::Target => "Target Variable",
            ReportSection::Writing => "Writing report",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Options for [`summarize`].
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Report title; defaults to "Dataset Summary"
    pub dataset_name: Option<String>,

    /// Line printed under the title
    pub description: Option<String>,

    /// Column to summarize as the target variable
    pub target_variable: Option<String>,

    /// Target interpretation; inferred from the column when unset
    pub target_type: Option<TargetType>,

    /// Imbalance threshold for categorical targets
    pub threshold: Option<f64>,

    /// Rows shown in the observations section
    pub show_observations: ShowObservations,

    /// Tables, charts or both
    pub summarize_by: SummarizeBy,

    /// Clean the dataset before summarizing
    pub auto_cleaning: bool,

    /// Cleaning steps used when `auto_cleaning` is set
    pub clean: CleanOptions,

    /// Report file name (`.pdf` or no extension)
    pub output_file: String,

    /// Report directory; charts go to its `img/` subdirectory
    pub output_dir: PathBuf,

    /// Layout and analysis settings
    pub config: ReportConfig,
}

impl SummarizeOptions {
    /// Create summarize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_dataset_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_name = Some(name.into());
        self
    }

    /// Set the description line.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target variable.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_variable = Some(target.into());
        self
    }

    /// Set the target type.
    pub fn with_target_type(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    /// Set the imbalance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the observations mode.
    pub fn with_show_observations(mut self, show: ShowObservations) -> Self {
        self.show_observations = show;
        self
    }

    /// Set the summarize mode.
    pub fn with_summarize_by(mut self, by: SummarizeBy) -> Self {
        self.summarize_by = by;
        self
    }

    /// Enable or disable cleaning.
    pub fn with_auto_cleaning(mut self, enabled: bool) -> Self {
        self.auto_cleaning = enabled;
        self
    }

    /// Set the cleaning steps.
    pub fn with_clean_options(mut self, clean: CleanOptions) -> Self {
        self.clean = clean;
        self
    }

    /// Set the report file name.
    pub fn with_output_file(mut self, file: impl Into<String>) -> Self {
        self.output_file = file.into();
        self
    }

    /// Set the report directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set layout and analysis settings.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Check every argument against `table` and resolve the output target.
    ///
    /// Nothing is created on disk.
    pub fn validate(&self, table: &Table) -> Result<OutputTarget> {
        if table.column_count() == 0 {
            return Err(Error::InvalidType(
                "Argument 'dataset' should be a table with at least one column".to_string(),
            ));
        }

        if let Some(target) = &self.target_variable {
            if target.is_empty() {
                return Err(Error::InvalidType(
                    "Argument 'target_variable' should be a non-empty string".to_string(),
                ));
            }
            table.require_column(target)?;
        }

        if let Some(threshold) = self.threshold {
            let numerical = self.target_type == Some(TargetType::Numerical);
            if !numerical && !(0.0..=1.0).contains(&threshold) {
                return Err(Error::Validation(
                    "Threshold must be between 0 and 1.".to_string(),
                ));
            }
        }

        self.config.validate()?;
        OutputTarget::new(&self.output_dir, &self.output_file)
    }
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            dataset_name: None,
            description: None,
            target_variable: None,
            target_type: None,
            threshold: None,
            show_observations: ShowObservations::default(),
            summarize_by: SummarizeBy::default(),
            auto_cleaning: false,
            clean: CleanOptions::default(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            config: ReportConfig::default(),
        }
    }
}

/// What a finished report produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutcome {
    /// Path of the written PDF
    pub output_path: PathBuf,
    /// Pages in the PDF
    pub page_count: usize,
    /// Chart images written under `img/`
    pub images: Vec<PathBuf>,
    /// Non-fatal findings from the summaries
    pub warnings: Vec<Warning>,
    /// Block counters
    pub stats: BuildStats,
}

/// Build a PDF report for `table`.
///
/// # Example
///
/// ```no_run
/// use summarease::{summarize, SummarizeBy, SummarizeOptions, Table};
///
/// let table = Table::from_csv_path("data.csv")?;
/// let options = SummarizeOptions::new()
///     .with_dataset_name("Employees")
///     .with_target("Gender")
///     .with_summarize_by(SummarizeBy::Mixed)
///     .with_output_dir("./report/");
/// let outcome = summarize(&table, &options)?;
/// println!("{} pages", outcome.page_count);
/// # Ok::<(), summarease::Error>(())
/// ```
pub fn summarize(table: &Table, options: &SummarizeOptions) -> Result<ReportOutcome> {
    summarize_with_progress(table, options, |_| {})
}

/// Like [`summarize`], calling `progress` as each section starts.
pub fn summarize_with_progress<F>(
    table: &Table,
    options: &SummarizeOptions,
    progress: F,
) -> Result<ReportOutcome>
where
    F: FnMut(ReportSection),
{
    let target = options.validate(table)?;

    let data: Cow<'_, Table> = if options.auto_cleaning {
        Cow::Owned(clean_data(table, &options.clean)?)
    } else {
        Cow::Borrowed(table)
    };

    // Cleaning keeps column order, so the target is found by position.
    let target_variable = match &options.target_variable {
        Some(name) => table
            .columns
            .iter()
            .position(|c| &c.name == name)
            .and_then(|i| data.columns.get(i))
            .map(|c| c.name.clone()),
        None => None,
    };

    let title = options
        .dataset_name
        .clone()
        .unwrap_or_else(|| "Dataset Summary".to_string());
    let mut info = DocumentInfo::new(title.clone());
    if let Some(description) = &options.description {
        info = info.with_subject(description.clone());
    }

    let mut builder = ReportBuilder::new(options.config.layout.clone())?.with_info(info);
    builder.start_target(&target)?;

    let mut report = ReportWriter {
        builder,
        charts: ChartRenderer::new(target.image_dir(), options.config.analysis.histogram_bins),
        options,
        images: Vec::new(),
        warnings: Vec::new(),
        progress,
    };

    report.overview(&title)?;
    report.observations(&data)?;
    report.data_types(&data)?;
    report.missing_values(&data)?;
    report.numeric(&data)?;
    report.categorical(&data)?;
    report.outliers(&data)?;
    if let Some(name) = &target_variable {
        report.target(&data, name)?;
    }

    (report.progress)(ReportSection::Writing);
    let finished = report.builder.finish()?;
    log::debug!(
        "Report written to {} ({} pages, {} charts)",
        finished.path.display(),
        finished.page_count,
        report.images.len()
    );

    Ok(ReportOutcome {
        output_path: finished.path,
        page_count: finished.page_count,
        images: report.images,
        warnings: report.warnings,
        stats: finished.stats,
    })
}

struct ReportWriter<'a, F> {
    builder: ReportBuilder,
    charts: ChartRenderer,
    options: &'a SummarizeOptions,
    images: Vec<PathBuf>,
    warnings: Vec<Warning>,
    progress: F,
}

impl<F: FnMut(ReportSection)> ReportWriter<'_, F> {
    fn begin(&mut self, section: ReportSection) -> Result<()> {
        (self.progress)(section);
        self.builder.append_block(&Block::section(section.title()))?;
        Ok(())
    }

    fn table(&mut self, table: Table) -> Result<()> {
        self.builder.append_block(&Block::Table(table))?;
        Ok(())
    }

    fn caption(&mut self, text: &str) -> Result<()> {
        self.builder.append_block(&Block::caption(text))?;
        Ok(())
    }

    fn chart(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = path {
            self.builder.append_block(&Block::image(path.clone()))?;
            self.images.push(path);
        }
        Ok(())
    }

    fn overview(&mut self, title: &str) -> Result<()> {
        (self.progress)(ReportSection::Overview);
        self.builder.append_block(&Block::title(title))?;
        if let Some(description) = &self.options.description {
            self.builder.append_block(&Block::caption(description.as_str()))?;
        }
        Ok(())
    }

    fn observations(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::Observations)?;
        let rows = self.options.config.analysis.observation_rows;
        let (caption, shown) = match self.options.show_observations {
            ShowObservations::Head => (format!("First {} rows", rows), data.head(rows)),
            ShowObservations::Tail => (format!("Last {} rows", rows), data.tail(rows)),
            ShowObservations::All => (format!("All {} rows", data.row_count()), data.clone()),
        };
        self.caption(&caption)?;
        self.table(shown)
    }

    fn data_types(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::DataTypes)?;
        let by = self.options.summarize_by;
        if by.tables() {
            self.table(summarize_dtypes(data))?;
        }
        if by.plots() {
            let path = self.charts.dtypes_plot(&dtype_counts(data))?;
            self.chart(path)?;
        }
        Ok(())
    }

    fn missing_values(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::MissingValues)?;
        let missing = summarize_missing_values(data);
        let by = self.options.summarize_by;
        if by.plots() {
            let path = self.charts.missing_plot(&missing)?;
            self.chart(path)?;
        }
        if by.tables() {
            self.table(missing)?;
        }
        Ok(())
    }

    fn numeric(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::Numeric)?;
        let NumericSummary::Summary {
            describe,
            correlation,
        } = summarize_numeric(data)
        else {
            return self.caption(NO_NUMERIC_COLUMNS);
        };

        let by = self.options.summarize_by;
        if by.tables() {
            self.table(describe)?;
            if let Some(matrix) = &correlation {
                self.caption("Correlation")?;
                self.table(matrix.to_table())?;
            }
        }
        if by.plots() {
            let path = self.charts.numeric_plot(data)?;
            self.chart(path)?;
            if let Some(matrix) = &correlation {
                self.caption("Correlation")?;
                let path = self.charts.corr_plot(matrix)?;
                self.chart(path)?;
            }
        }
        Ok(())
    }

    fn categorical(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::Categorical)?;
        let max_categories = self.options.config.analysis.max_categories;
        let summary = summarize_categorical(data, max_categories)?;
        if summary.is_empty() {
            return self.caption(NO_CATEGORICAL_COLUMNS);
        }

        let by = self.options.summarize_by;
        if by.tables() {
            self.table(summary.table)?;
        }
        if by.plots() {
            let path = self.charts.categorical_plot(&summary.counts, max_categories)?;
            self.chart(path)?;
        }
        for warning in &summary.warnings {
            self.caption(&warning.message)?;
        }
        self.warnings.extend(summary.warnings);
        Ok(())
    }

    fn outliers(&mut self, data: &Table) -> Result<()> {
        self.begin(ReportSection::Outliers)?;
        let cutoff = self.options.config.analysis.z_score_cutoff;
        let summary = summarize_outliers(data, None, cutoff)?;
        if summary.columns.is_empty() {
            return self.caption(NO_NUMERIC_COLUMNS);
        }
        self.caption(&format!("Rows with |z-score| above {}", cutoff))?;
        self.table(summary.to_table())
    }

    fn target(&mut self, data: &Table, name: &str) -> Result<()> {
        self.begin(ReportSection::Target)?;
        let column = data.require_column(name)?;
        let target_type = self
            .options
            .target_type
            .unwrap_or_else(|| TargetType::infer(column.kind()));
        let threshold = match target_type {
            TargetType::Categorical => Some(
                self.options
                    .threshold
                    .unwrap_or(self.options.config.analysis.imbalance_threshold),
            ),
            TargetType::Numerical => self.options.threshold,
        };

        let summary = summarize_target(data, name, target_type, threshold)?;
        self.caption(&format!("'{}' ({})", name, target_type))?;

        let by = self.options.summarize_by;
        if by.tables() {
            self.table(summary.table.clone())?;
        }
        if by.plots() {
            let path = self.charts.target_plot(&summary, data)?;
            self.chart(path)?;
        }
        for warning in &summary.warnings {
            self.caption(&warning.message)?;
        }
        self.warnings.extend(summary.warnings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    fn employees() -> Table {
        Table::from_columns(vec![
            Column::integer("Age", [23, 45, 31, 35, 29]),
            Column::text("Gender", ["Male", "Female", "Female", "Male", "Male"]),
            Column::integer("Salary", [50000, 60000, 75000, 80000, 65000]),
        ])
        .unwrap()
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!("tail".parse::<ShowObservations>().unwrap(), ShowObservations::Tail);
        assert_eq!("mixed".parse::<SummarizeBy>().unwrap(), SummarizeBy::Mixed);

        let err = "invalid_option".parse::<SummarizeBy>().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Argument 'summarize_by' should be one of the following options:"));

        let err = "first".parse::<ShowObservations>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Argument 'show_observations' should be one of the following options: [head, tail, all]"
        );
    }

    #[test]
    fn test_summarize_by_modes() {
        assert!(SummarizeBy::Table.tables() && !SummarizeBy::Table.plots());
        assert!(!SummarizeBy::Plot.tables() && SummarizeBy::Plot.plots());
        assert!(SummarizeBy::Mixed.tables() && SummarizeBy::Mixed.plots());
    }

    #[test]
    fn test_validate_output_file() {
        let options = SummarizeOptions::new().with_output_file("invalid_extension.txt");
        let err = options.validate(&employees()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'output_file' should either have a .pdf extension or no extension"
        );

        let target = SummarizeOptions::new()
            .with_output_dir("out")
            .with_output_file("report")
            .validate(&employees())
            .unwrap();
        assert_eq!(target.path(), PathBuf::from("out/report.pdf"));
    }

    #[test]
    fn test_validate_target() {
        let options = SummarizeOptions::new().with_target("Department");
        assert!(matches!(
            options.validate(&employees()),
            Err(Error::ColumnNotFound(_))
        ));

        let options = SummarizeOptions::new().with_target("");
        assert!(matches!(
            options.validate(&employees()),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn test_validate_threshold() {
        let options = SummarizeOptions::new().with_threshold(1.5);
        assert!(matches!(
            options.validate(&employees()),
            Err(Error::Validation(_))
        ));

        let options = SummarizeOptions::new()
            .with_threshold(1.5)
            .with_target_type(TargetType::Numerical);
        assert!(options.validate(&employees()).is_ok());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = SummarizeOptions::new().validate(&Table::new());
        assert!(matches!(result, Err(Error::InvalidType(_))));
    }

    #[test]
    fn test_progress_visits_sections_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let options = SummarizeOptions::new()
            .with_target("Gender")
            .with_output_dir(dir.path());

        let mut seen = Vec::new();
        summarize_with_progress(&employees(), &options, |s| seen.push(s)).unwrap();
        assert_eq!(seen, ReportSection::ALL.to_vec());
    }

    #[test]
    fn test_cleaned_target_is_renamed() {
        let dir = tempfile::tempdir().unwrap();
        let options = SummarizeOptions::new()
            .with_target("Gender")
            .with_auto_cleaning(true)
            .with_output_dir(dir.path());

        let outcome = summarize(&employees(), &options).unwrap();
        assert!(outcome.output_path.exists());
        assert!(outcome.warnings.is_empty());
    }
}
