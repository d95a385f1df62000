//! # summarease
//!
//! Automated exploratory data analysis reports for Rust.
//!
//! This library reads a tabular dataset, summarizes it (data types, missing
//! values, numeric and categorical distributions, outliers, target balance)
//! and lays the results out as a paginated PDF report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use summarease::{summarize, SummarizeOptions, Table};
//!
//! fn main() -> summarease::Result<()> {
//!     // Load a CSV file
//!     let table = Table::from_csv_path("employees.csv")?;
//!
//!     // Build the report
//!     let options = SummarizeOptions::new()
//!         .with_dataset_name("Employees")
//!         .with_target("Gender");
//!     let outcome = summarize(&table, &options)?;
//!     println!("{} pages written to {}", outcome.page_count, outcome.output_path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Summaries**: dtypes, missing values, describe statistics, correlation,
//!   categories, z-score outliers, target balance
//! - **Layout engine**: headers, tables and images paginated onto A4 pages
//! - **Charts**: histograms, heatmaps and bar charts written as PNG
//! - **Cleaning**: column name standardization, placeholder removal,
//!   de-duplication and type inference
//! - **JSON output**: every summary serializes with serde

pub mod chart;
pub mod clean;
pub mod config;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod report;
pub mod summary;
pub mod warning;

// Re-export commonly used types
pub use clean::{clean_data, CleanOptions};
pub use config::{AnalysisConfig, ReportConfig};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, is_supported_image, ImageKind};
pub use error::{Error, Result};
pub use layout::{LayoutConfig, OutputTarget, ReportBuilder};
pub use model::{Block, CellValue, Column, ColumnData, ColumnKind, HeaderLevel, Table};
pub use parser::{ErrorMode, ParseOptions};
pub use report::{
    summarize, summarize_with_progress, ReportOutcome, ReportSection, ShowObservations,
    SummarizeBy, SummarizeOptions,
};
pub use summary::{JsonFormat, NumericSummary, TargetType};
pub use warning::Warning;

use std::io::Read;
use std::path::Path;

/// Read a CSV file into a table.
///
/// # Example
///
/// ```no_run
/// use summarease::read_csv;
///
/// let table = read_csv("employees.csv").unwrap();
/// println!("{} rows", table.row_count());
/// ```
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    parser::parse_file(path, &ParseOptions::default())
}

/// Read a CSV file with custom options.
///
/// # Example
///
/// ```no_run
/// use summarease::{read_csv_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_delimiter(b';');
/// let table = read_csv_with_options("employees.csv", &options).unwrap();
/// ```
pub fn read_csv_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Table> {
    parser::parse_file(path, options)
}

/// Read CSV data from a reader.
pub fn read_csv_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Table> {
    parser::parse_reader(reader, options)
}

/// Read a CSV file and write its report in one step.
///
/// # Example
///
/// ```no_run
/// use summarease::{summarize_csv, SummarizeOptions};
///
/// let outcome = summarize_csv("employees.csv", &SummarizeOptions::default()).unwrap();
/// assert!(outcome.output_path.exists());
/// ```
pub fn summarize_csv<P: AsRef<Path>>(path: P, options: &SummarizeOptions) -> Result<ReportOutcome> {
    let table = read_csv(path)?;
    summarize(&table, options)
}

/// Builder for loading a dataset and summarizing it.
///
/// # Example
///
/// ```no_run
/// use summarease::Summarease;
///
/// let loaded = Summarease::new()
///     .lenient()
///     .with_cleaning(true)
///     .load("employees.csv")?;
/// println!("{}", loaded.dtypes_json()?);
/// # Ok::<(), summarease::Error>(())
/// ```
pub struct Summarease {
    parse_options: ParseOptions,
    clean_options: Option<CleanOptions>,
}

impl Summarease {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            clean_options: None,
        }
    }

    /// Pad ragged rows instead of failing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.parse_options = self.parse_options.with_delimiter(delimiter);
        self
    }

    /// Clean the dataset with default options after loading.
    pub fn with_cleaning(mut self, enabled: bool) -> Self {
        self.clean_options = enabled.then(CleanOptions::default);
        self
    }

    /// Clean the dataset with the given options after loading.
    pub fn with_clean_options(mut self, options: CleanOptions) -> Self {
        self.clean_options = Some(options);
        self
    }

    /// Load a CSV file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<Loaded> {
        let table = parser::parse_file(path, &self.parse_options)?;
        self.finish(table)
    }

    /// Load CSV data from a reader.
    pub fn load_reader<R: Read>(self, reader: R) -> Result<Loaded> {
        let table = parser::parse_reader(reader, &self.parse_options)?;
        self.finish(table)
    }

    fn finish(self, table: Table) -> Result<Loaded> {
        let table = match &self.clean_options {
            Some(options) => clean_data(&table, options)?,
            None => table,
        };
        Ok(Loaded { table })
    }
}

impl Default for Summarease {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded dataset with shortcuts to its summaries.
pub struct Loaded {
    /// The dataset
    pub table: Table,
}

impl Loaded {
    /// Data type counts as JSON.
    pub fn dtypes_json(&self) -> Result<String> {
        summary::to_json(&summary::summarize_dtypes(&self.table), JsonFormat::Pretty)
    }

    /// Numeric summary.
    pub fn numeric(&self) -> NumericSummary {
        summary::summarize_numeric(&self.table)
    }

    /// Write the PDF report.
    pub fn report(&self, options: &SummarizeOptions) -> Result<ReportOutcome> {
        summarize(&self.table, options)
    }

    /// Get the table.
    pub fn table(&self) -> &Table {
        &self.table
    }
}
