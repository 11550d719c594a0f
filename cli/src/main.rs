//! edi834 CLI - spreadsheet enrollment data to X12 834
//!
//! A command-line tool for turning XLSX or CSV enrollment sheets into 834
//! benefit enrollment files.

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use edi834::edi::{
    validate_records, Edi834Generator, GeneratorOptions, SystemStamp, UsageIndicator,
    DEFAULT_CONTROL_NUMBER,
};
use edi834::render::JsonFormat;
use edi834::{InputFormat, Record};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use output::{resolve_output_path, write_output};

/// Spreadsheet enrollment data to X12 834 EDI
#[derive(Parser)]
#[command(
    name = "edi834",
    version,
    about = "Generate X12 834 enrollment files from spreadsheets",
    long_about = "edi834 - Spreadsheet to X12 834 benefit enrollment transcoder.\n\n\
                  Reads the first worksheet of an XLSX workbook (or a CSV file) and\n\
                  writes a 005010X220A1 interchange."
)]
struct Cli {
    /// Enable debug logging (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an 834 interchange
    #[command(visible_alias = "gen")]
    Generate {
        /// Input file path (XLSX or CSV, or JSON with --from-json)
        input: PathBuf,

        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Interchange control number
        #[arg(long, default_value_t = DEFAULT_CONTROL_NUMBER)]
        control_number: u32,

        /// Mark the interchange as test data (ISA15 = T)
        #[arg(long)]
        test_mode: bool,

        /// Text between segments
        #[arg(long, default_value = "newline")]
        line_separator: LineSeparator,

        /// Refuse to generate when input validation finds issues
        #[arg(long)]
        strict: bool,

        /// Read records from a JSON array instead of a spreadsheet
        #[arg(long)]
        from_json: bool,
    },

    /// Convert input rows to JSON records
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show input file information
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// Check input rows for missing columns and values
    Validate {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Separator written after each segment terminator
#[derive(Clone, Copy, ValueEnum)]
enum LineSeparator {
    /// One segment per line
    Newline,
    /// Segments on a single line
    #[value(name = "none")]
    Flat,
    /// Windows line endings
    Crlf,
}

impl LineSeparator {
    fn as_str(self) -> &'static str {
        match self {
            LineSeparator::Newline => "\n",
            LineSeparator::Flat => "",
            LineSeparator::Crlf => "\r\n",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            control_number,
            test_mode,
            line_separator,
            strict,
            from_json,
        } => {
            let pb = create_spinner("Reading input...");

            let records = load_records(&input, from_json)?;

            if strict {
                pb.set_message("Validating...");
                validate_records(&records).into_result()?;
            }

            pb.set_message("Generating 834...");
            let usage = if test_mode {
                UsageIndicator::Test
            } else {
                UsageIndicator::Production
            };
            let options = GeneratorOptions::new()
                .with_usage(usage)
                .with_line_separator(line_separator.as_str());
            let stamp = SystemStamp::with_control_number(control_number);
            let interchange = Edi834Generator::new(options).generate(&records, &stamp);

            pb.finish_and_clear();

            match output {
                Some(requested) => {
                    let path = resolve_output_path(&requested);
                    write_output(Some(path.as_path()), &interchange.render())?;
                    println!(
                        "{} Generated 834: {} ({} members, {} segments, control {})",
                        "✓".green().bold(),
                        path.display(),
                        interchange.member_count(),
                        interchange.segment_count(),
                        interchange.control_number()
                    );
                }
                // byte-for-byte on stdout, no added newline
                None => io::stdout().lock().write_all(interchange.render().as_bytes())?,
            }
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Reading input...");

            let records = edi834::parse_file(&input)?;
            pb.set_message("Rendering to JSON...");

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = edi834::render::records_to_json(&records, format)?;

            pb.finish_and_clear();
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!(
                    "{} Converted to JSON: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing input...");

            let format = edi834::detect_format_from_path(&input)?;
            let sheet = match format {
                InputFormat::Xlsx => {
                    let parser = edi834::xlsx::XlsxParser::open(&input)?;
                    Some((parser.sheet_path().to_string(), parser.shared_strings().len()))
                }
                InputFormat::Csv => None,
            };
            let records = edi834::parse_file(&input)?;

            pb.finish_and_clear();

            println!("{}", "Input Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            if let Some((path, strings)) = sheet {
                println!("{}: {}", "Worksheet".bold(), path);
                println!("{}: {}", "Shared strings".bold(), strings);
            }
            println!("{}: {}", "Records".bold(), records.len());

            if let Some(first) = records.first() {
                println!("\n{}", "Columns".cyan().bold());
                println!("{}", "─".repeat(40));
                for key in first.keys() {
                    println!("  {}", key);
                }
            }
        }

        Commands::Validate { input } => {
            let pb = create_spinner("Validating...");

            let records = edi834::parse_file(&input)?;
            let report = validate_records(&records);

            pb.finish_and_clear();

            if report.is_ok() {
                println!(
                    "{} {} records passed validation",
                    "✓".green().bold(),
                    records.len()
                );
            } else {
                for issue in report.issues() {
                    println!("{} {}", "!".yellow().bold(), issue);
                }
                return Err(format!("{} validation issues", report.len()).into());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn load_records(input: &Path, from_json: bool) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    if from_json {
        let text = fs::read_to_string(input)?;
        Ok(edi834::render::records_from_json(&text)?)
    } else {
        Ok(edi834::parse_file(input)?)
    }
}

fn print_version() {
    println!("{} {}", "edi834".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Spreadsheet enrollment data to X12 834 (005010X220A1)");
    println!();
    println!("Supported inputs: XLSX, CSV, JSON records");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
