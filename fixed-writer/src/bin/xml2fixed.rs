//! CLI tool to write a people XML document as fixed-width records.

use clap::Parser;
use fixed_writer::write_fixed;
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Convert a people XML document into fixed-width records.
///
/// Produces input that fixedml-run reads back into the same document.
#[derive(Parser)]
#[command(name = "xml2fixed")]
struct Cli {
    /// Input XML file (or /dev/stdin)
    input: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log paths and record counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let xml = match fs::read_to_string(&cli.input) {
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

    match write_fixed(&xml) {
        Ok(output) => {
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
            } else if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Conversion error: {e}");
            process::exit(1);
        }
    }
}
