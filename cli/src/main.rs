//! summarease CLI - exploratory data analysis reports from CSV files

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use summarease::summary::{
    summarize_categorical, summarize_dtypes, summarize_missing_values, summarize_numeric,
    summarize_outliers, summarize_target, to_json,
};
use summarease::{
    clean_data, summarize_with_progress, CleanOptions, JsonFormat, ParseOptions, ReportConfig,
    ReportOutcome, ReportSection, ShowObservations, SummarizeBy, SummarizeOptions, Table,
    TargetType,
};

#[derive(Parser)]
#[command(name = "summarease")]
#[command(version)]
#[command(about = "Generate exploratory data analysis PDF reports from CSV files", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(value_name = "DATASET")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a full PDF report
    Report {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Report title
        #[arg(long)]
        name: Option<String>,

        /// Line printed under the title
        #[arg(long)]
        description: Option<String>,

        /// Target variable column
        #[arg(short, long)]
        target: Option<String>,

        /// Target interpretation (inferred when omitted)
        #[arg(long, value_enum)]
        target_type: Option<TargetKind>,

        /// Imbalance threshold for categorical targets (0-1)
        #[arg(long)]
        threshold: Option<f64>,

        /// Rows shown in the observations section
        #[arg(long, value_enum, default_value = "head")]
        show: ShowMode,

        /// Render sections as tables, charts or both
        #[arg(long, value_enum, default_value = "table")]
        summarize_by: SummarizeMode,

        /// Report file name (.pdf or no extension)
        #[arg(long, default_value = summarease::report::DEFAULT_OUTPUT_FILE)]
        output_file: String,

        /// Report directory
        #[arg(short, long, default_value = summarease::report::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// JSON file with layout and analysis settings
        #[arg(long, value_name = "FILE", env = "SUMMAREASE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print column counts per data type as JSON
    Dtypes {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,
    },

    /// Print missing values per column as JSON
    Missing {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,
    },

    /// Print describe statistics and correlations as JSON
    Numeric {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,
    },

    /// Print category counts as JSON
    Categorical {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,

        /// Unique-category count above which a column is flagged
        #[arg(long, default_value = "10")]
        max_categories: usize,
    },

    /// Print z-score outlier rows as JSON
    Outliers {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,

        /// Columns to check (comma-separated; all numeric columns by default)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,

        /// Absolute z-score cutoff
        #[arg(short, long, default_value = "3.0")]
        z: f64,
    },

    /// Print the target variable summary as JSON
    Target {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        output: JsonArgs,

        /// Target variable column
        #[arg(value_name = "COLUMN")]
        target: String,

        /// Target interpretation (inferred when omitted)
        #[arg(long, value_enum)]
        target_type: Option<TargetKind>,

        /// Imbalance threshold for categorical targets (0-1)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Show dataset shape and column kinds
    Info {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DatasetArgs {
    /// Input CSV file
    #[arg(value_name = "DATASET")]
    input: PathBuf,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Pad ragged rows instead of failing
    #[arg(long)]
    lenient: bool,

    /// Clean the dataset first (standardize names, drop duplicates, infer types)
    #[arg(long)]
    clean: bool,
}

impl DatasetArgs {
    /// Read the CSV file as-is.
    fn read(&self) -> Result<Table, Box<dyn std::error::Error>> {
        if !self.delimiter.is_ascii() {
            return Err(format!("Delimiter must be an ASCII character, got '{}'", self.delimiter).into());
        }

        let mut options = ParseOptions::new().with_delimiter(self.delimiter as u8);
        if self.lenient {
            options = options.lenient();
        }
        Ok(summarease::read_csv_with_options(&self.input, &options)?)
    }

    /// Read the CSV file, cleaning it when `--clean` is set.
    fn load(&self) -> Result<Table, Box<dyn std::error::Error>> {
        let table = self.read()?;
        if self.clean {
            Ok(clean_data(&table, &CleanOptions::default())?)
        } else {
            Ok(table)
        }
    }
}

#[derive(Args)]
struct JsonArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

impl JsonArgs {
    fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), Box<dyn std::error::Error>> {
        let format = if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        let json = to_json(value, format)?;

        if let Some(path) = &self.output {
            fs::write(path, &json)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", json);
        }
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TargetKind {
    /// Classes, checked for balance
    Categorical,
    /// Continuous values, described
    Numerical,
}

impl From<TargetKind> for TargetType {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Categorical => TargetType::Categorical,
            TargetKind::Numerical => TargetType::Numerical,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ShowMode {
    /// First rows
    Head,
    /// Last rows
    Tail,
    /// Every row
    All,
}

impl From<ShowMode> for ShowObservations {
    fn from(mode: ShowMode) -> Self {
        match mode {
            ShowMode::Head => ShowObservations::Head,
            ShowMode::Tail => ShowObservations::Tail,
            ShowMode::All => ShowObservations::All,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SummarizeMode {
    /// Tables only
    Table,
    /// Charts only
    Plot,
    /// Tables and charts
    Mixed,
}

impl From<SummarizeMode> for SummarizeBy {
    fn from(mode: SummarizeMode) -> Self {
        match mode {
            SummarizeMode::Table => SummarizeBy::Table,
            SummarizeMode::Plot => SummarizeBy::Plot,
            SummarizeMode::Mixed => SummarizeBy::Mixed,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Report {
            dataset,
            name,
            description,
            target,
            target_type,
            threshold,
            show,
            summarize_by,
            output_file,
            output_dir,
            config,
        }) => {
            let mut options = SummarizeOptions::new()
                .with_show_observations(show.into())
                .with_summarize_by(summarize_by.into())
                .with_auto_cleaning(dataset.clean)
                .with_output_file(output_file)
                .with_output_dir(output_dir);
            options.dataset_name = name;
            options.description = description;
            options.target_variable = target;
            options.target_type = target_type.map(Into::into);
            options.threshold = threshold;
            cmd_report(&dataset, options, config.as_deref())
        }
        Some(Commands::Dtypes { dataset, output }) => {
            cmd_summary(&dataset, &output, |t| Ok(summarize_dtypes(t)))
        }
        Some(Commands::Missing { dataset, output }) => {
            cmd_summary(&dataset, &output, |t| Ok(summarize_missing_values(t)))
        }
        Some(Commands::Numeric { dataset, output }) => {
            cmd_summary(&dataset, &output, |t| Ok(summarize_numeric(t)))
        }
        Some(Commands::Categorical {
            dataset,
            output,
            max_categories,
        }) => cmd_summary(&dataset, &output, |t| summarize_categorical(t, max_categories)),
        Some(Commands::Outliers {
            dataset,
            output,
            columns,
            z,
        }) => cmd_summary(&dataset, &output, |t| {
            summarize_outliers(t, columns.as_deref(), z)
        }),
        Some(Commands::Target {
            dataset,
            output,
            target,
            target_type,
            threshold,
        }) => cmd_summary(&dataset, &output, |t| {
            let target_type = match target_type {
                Some(kind) => kind.into(),
                None => TargetType::infer(t.require_column(&target)?.kind()),
            };
            summarize_target(t, &target, target_type, threshold)
        }),
        Some(Commands::Info { dataset, json }) => cmd_info(&dataset, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: full report if a dataset is provided
            if let Some(input) = cli.input {
                let dataset = DatasetArgs {
                    input,
                    delimiter: ',',
                    lenient: false,
                    clean: false,
                };
                let mut options = SummarizeOptions::new();
                if let Some(dir) = cli.output {
                    options = options.with_output_dir(dir);
                }
                cmd_report(&dataset, options, None)
            } else {
                println!("{}", "Usage: summarease <DATASET> [OUTPUT_DIR]".yellow());
                println!("       summarease --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_report(
    dataset: &DatasetArgs,
    mut options: SummarizeOptions,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = config {
        options = options.with_config(ReportConfig::from_json_path(path)?);
    }

    // Cleaning happens inside the report so the target name is mapped too.
    let table = dataset.read()?;
    log::debug!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        dataset.input.display()
    );

    let pb = ProgressBar::new(ReportSection::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let outcome = summarize_with_progress(&table, &options, |section| {
        pb.set_message(format!("{}...", section));
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &ReportOutcome) {
    println!("\n{}", "Report written:".green().bold());
    println!(
        "  {} {} ({} pages)",
        "├─".dimmed(),
        outcome.output_path.display(),
        outcome.page_count
    );
    println!(
        "  {} {} tables, {} charts",
        "└─".dimmed(),
        outcome.stats.tables,
        outcome.images.len()
    );

    if !outcome.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &outcome.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }
}

fn cmd_summary<T, F>(
    dataset: &DatasetArgs,
    output: &JsonArgs,
    summarize: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: Serialize,
    F: FnOnce(&Table) -> summarease::Result<T>,
{
    let table = dataset.load()?;
    let summary = summarize(&table)?;
    output.emit(&summary)
}

fn cmd_info(dataset: &DatasetArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = dataset.load()?;

    if json {
        let columns: Vec<_> = table
            .columns
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "dtype": c.kind().dtype_name(),
                    "missing": c.null_count(),
                })
            })
            .collect();
        let info = serde_json::json!({
            "file": dataset.input.display().to_string(),
            "rows": table.row_count(),
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Dataset Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), dataset.input.display());
    println!("{}: {}", "Rows".bold(), table.row_count());
    println!("{}: {}", "Columns".bold(), table.column_count());

    println!();
    println!("{}", "Columns".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for column in &table.columns {
        let missing = column.null_count();
        let note = if missing > 0 {
            format!("{} missing", missing).yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{:<24} {:<8} {}",
            column.name.bold(),
            column.kind().dtype_name(),
            note
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "summarease".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Exploratory data analysis report generator");
    println!();
    println!("License: MIT");
}
