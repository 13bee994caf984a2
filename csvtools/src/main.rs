//! csvtools CLI - align, filter and reformat delimited tables
//!
//! # Commands
//!
//! ```bash
//! csvtools print scores.csv --header --ot latex      # Render as a LaTeX tabular body
//! csvtools print a.csv --filter '1-:1-:cmax:**{}**'  # Highlight column maxima
//! csvtools merge run1.csv run2.csv --mode max        # Cell-wise max across runs
//! csvtools operations                                # Show available stage operations
//! ```

use clap::{Args, Parser, Subcommand};
use csvtools::logs::{log_notice, set_verbosity, Verbosity};
use csvtools::{
    merge_files, operations_description, parse_row_suffix, write_csv, MergeMode, OutputType,
    Pipeline, PipelineOptions, ReadOptions,
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csvtools")]
#[command(about = "Align, filter and reformat delimited tables", long_about = None)]
struct Cli {
    /// Log progress and per-file statistics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print rendered output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render files as aligned tables
    Print(PrintArgs),

    /// Merge same-shaped files cell by cell
    Merge {
        /// Input files, the first one is the base
        files: Vec<PathBuf>,

        /// Keep the lexicographically smaller or larger cell
        #[arg(short, long, value_enum, default_value = "min")]
        mode: MergeMode,

        /// Input field delimiter
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Show available column specs, transforms and filters
    Operations,
}

#[derive(Args)]
struct PrintArgs {
    /// Input files
    files: Vec<PathBuf>,

    /// JSON file with pipeline options (flags are applied on top)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw a rule under the first row
    #[arg(short = 'H', long)]
    header: bool,

    /// Input field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Swap rows and columns
    #[arg(short, long)]
    transpose: bool,

    /// Keep whitespace around fields
    #[arg(long)]
    no_trim: bool,

    /// Two-column file of value substitutions
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Output dialect
    #[arg(long = "output-type", visible_alias = "ot", value_enum)]
    output_type: Option<OutputType>,

    /// Column order spec (`id[:m[:o]]` or a column range), repeatable
    #[arg(long = "order")]
    order: Vec<String>,

    /// Custom format `<col>:<template>`, repeatable
    #[arg(long = "format")]
    format: Vec<String>,

    /// Filter `<rows>:<cols>:<condition>:<template>`, repeatable
    #[arg(long = "filter")]
    filter: Vec<String>,

    /// Transform `<rows>:<cols>:<operation>`, repeatable
    #[arg(long = "transform")]
    transform: Vec<String>,

    /// Alternative line suffix `<row>:<suffix>`, repeatable
    #[arg(long = "row-suffix")]
    row_suffix: Vec<String>,
}

impl PrintArgs {
    /// Layer the flags over the (optional) config file.
    fn options(&self) -> Result<PipelineOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => PipelineOptions::from_path(path)?,
            None => PipelineOptions::default(),
        };

        if self.header {
            options.header = true;
        }
        if let Some(delimiter) = self.delimiter {
            options.delimiter = delimiter;
        }
        if self.transpose {
            options.transpose = true;
        }
        if self.no_trim {
            options.trim = false;
        }
        if let Some(mapping) = &self.mapping {
            options.mapping = Some(mapping.clone());
        }
        if let Some(output_type) = self.output_type {
            options.output_type = output_type;
        }
        options.column_order.extend(self.order.iter().cloned());
        options.custom_format.extend(self.format.iter().cloned());
        options.filters.extend(self.filter.iter().cloned());
        options.transforms.extend(self.transform.iter().cloned());
        for spec in &self.row_suffix {
            let (row, suffix) = parse_row_suffix(spec)?;
            options.row_suffixes.insert(row, suffix);
        }

        Ok(options)
    }
}

fn main() {
    let cli = Cli::parse();

    set_verbosity(if cli.verbose {
        Verbosity::Verbose
    } else if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    });

    let result = match cli.command {
        Commands::Print(args) => cmd_print(&args),
        Commands::Merge {
            files,
            mode,
            delimiter,
        } => cmd_merge(&files, mode, delimiter),
        Commands::Operations => cmd_operations(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log_notice(format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when some file failed.
fn cmd_print(args: &PrintArgs) -> Result<bool, Box<dyn std::error::Error>> {
    if args.files.is_empty() {
        log_notice("No files given");
        return Ok(true);
    }

    let options = args.options()?;
    let pipeline = Pipeline::from_options(&options)?;
    let summary = pipeline.run(&args.files, io::stdout().lock())?;
    Ok(summary.failed == 0)
}

fn cmd_merge(
    files: &[PathBuf],
    mode: MergeMode,
    delimiter: char,
) -> Result<bool, Box<dyn std::error::Error>> {
    if files.is_empty() {
        log_notice("No files given");
        return Ok(true);
    }

    let options = ReadOptions {
        delimiter,
        ..ReadOptions::default()
    };
    let merged = merge_files(files, &options, mode)?;
    write_csv(&merged, io::stdout().lock())?;
    Ok(true)
}

fn cmd_operations() -> Result<bool, Box<dyn std::error::Error>> {
    println!("{}", operations_description());
    Ok(true)
}
