//! CLI tool to convert fixed-width record files to XML, JSON, or raw events.
//!
//! Usage:
//!   fixedml-run <input.fixed>
//!   fixedml-run <input.fixed> -f json -o <output.json>
//!   fixedml-run <input.fixed> --compact
//!
//! If no output file is specified, writes to stdout.

use clap::{Parser, ValueEnum};
use fixedml::{ConvertOptions, fixed_to_events, fixed_to_json, fixed_to_xml, format_events};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Xml,
    Json,
    Events,
}

/// Convert fixed-width records into a structured document.
#[derive(Parser)]
#[command(name = "fixedml-run")]
struct Cli {
    /// Input data file (fixed-width records, or /dev/stdin)
    input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Xml)]
    format: Format,

    /// Fail on unknown record types instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Write XML or JSON on a single line, without indentation
    #[arg(long)]
    compact: bool,

    /// Log paths and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let input_text = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input file '{}': {e}", cli.input.display());
            process::exit(1);
        }
    };

    info!("Input:  {}", cli.input.display());
    info!(
        "Output: {}",
        cli.output
            .as_deref()
            .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
    );

    let options = ConvertOptions {
        strict: cli.strict,
        compact: cli.compact,
    };
    let result = match cli.format {
        Format::Xml => fixed_to_xml(&input_text, &options),
        Format::Json => fixed_to_json(&input_text, &options),
        Format::Events => fixed_to_events(&input_text, &options)
            .map(|(events, stats)| (format_events(&events), stats)),
    };

    match result {
        Ok((output, stats)) => {
            if let Some(out_path) = &cli.output {
                if let Some(parent) = out_path.parent()
                    && !parent.as_os_str().is_empty()
                    && fs::create_dir_all(parent).is_err()
                {
                    eprintln!(
                        "Error creating output directory for '{}'",
                        out_path.display()
                    );
                    process::exit(1);
                }
                if let Err(e) = fs::write(out_path, &output) {
                    eprintln!("Error writing output file '{}': {e}", out_path.display());
                    process::exit(1);
                }
            } else {
                if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                    eprintln!("Error writing output: {e}");
                    process::exit(1);
                }
                if !output.is_empty() && !output.ends_with('\n') {
                    println!();
                }
            }
            info!(
                "Records: {} lines -> {} records ({} skipped)",
                stats.lines, stats.records, stats.skipped
            );
        }
        Err(e) => {
            eprintln!("Conversion error: {e}");
            process::exit(1);
        }
    }
}
