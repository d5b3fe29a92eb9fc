use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use sheetform_core::{FormAnalyzer, ScanConfig};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetform")]
#[command(about = "Structural scanner for paper-form spreadsheets (XLSX/XLS)", long_about = None)]
#[command(version)]
struct Cli {
    /// Spreadsheet files to analyze, in order
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Add a row-by-row preview of every sheet (a "previews" field in JSON output)
    #[arg(short, long)]
    detailed: bool,

    /// Analyze files in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output
    Json,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}

fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        ScanConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetform.toml");
        if default_config_path.exists() {
            ScanConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ScanConfig::default()
        }
    };

    if cli.parallel {
        config.parallel = true;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let analyzer = FormAnalyzer::with_config(config).context("Invalid configuration")?;

    let run = analyzer.analyze_files(&cli.files);

    let mut previews = Vec::new();
    if cli.detailed {
        for file in &run.files {
            let sheets = analyzer
                .preview_file(&file.path)
                .with_context(|| format!("Failed to preview {}", file.path.display()))?;
            previews.push(formatter::FilePreview {
                filename: file.filename.clone(),
                sheets,
            });
        }
    }

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&run);
            for preview in &previews {
                formatter::print_preview(preview);
            }
        }
        OutputFormat::Json => formatter::print_json(&run, cli.detailed.then_some(previews.as_slice()))?,
    }

    if let Some(output) = &cli.output {
        run.write_json(output)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;
        log::info!("Report written to {}", output.display());
    }

    std::process::exit(if run.has_failures() { 1 } else { 0 });
}
