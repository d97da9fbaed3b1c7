use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspector::{analyze, export, parse, png};

/// Analyze node-graph workflows and the generation metadata embedded in PNGs
#[derive(Parser, Debug)]
#[command(name = "inspect")]
#[command(about = "Analyze workflow JSON files and PNG generation metadata", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Emit the export report document instead of the raw result
    #[arg(long, global = true)]
    report: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a workflow JSON file (use "-" for stdin)
    Workflow {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
    /// Extract metadata from a PNG file (use "-" for stdin)
    Image {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
    /// List the prompt and LoRA text inputs of a workflow JSON file
    Prompts {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<(), String> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inspector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let now = chrono::Utc::now();

    match &args.command {
        Command::Workflow { input } => {
            let json = read_text(input)?;
            let analysis = analyze::analyze_json(&json).map_err(|e| e.to_string())?;
            tracing::info!(
                nodes = analysis.stats.total_nodes,
                links = analysis.stats.total_links,
                models = analysis.models.len(),
                "workflow analyzed"
            );
            if args.report {
                print_json(&export::workflow_report(&analysis, now), args.pretty)
            } else {
                print_json(&analysis, args.pretty)
            }
        }
        Command::Image { input } => {
            let bytes = read_bytes(input)?;
            let metadata = png::extract(&bytes).map_err(|e| e.to_string())?;
            tracing::info!(
                chunks = metadata.chunks.len(),
                has_workflow = metadata.workflow.is_some(),
                text_inputs = metadata.all_text_inputs.len(),
                "image metadata extracted"
            );
            if args.report {
                print_json(&export::image_report(&metadata, now), args.pretty)
            } else {
                print_json(&metadata, args.pretty)
            }
        }
        Command::Prompts { input } => {
            let json = read_text(input)?;
            let text_inputs = parse::parse(&json)
                .map_err(|e| e.to_string())?
                .map(|document| analyze::extract_text_inputs(&document))
                .unwrap_or_default();
            print_json(&text_inputs, args.pretty)
        }
    }
}

fn read_bytes(input: &Path) -> Result<Vec<u8>, String> {
    if input.to_str() == Some("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        std::fs::read(input)
            .map_err(|e| format!("Failed to read {}: {}", input.display(), e))
    }
}

fn read_text(input: &Path) -> Result<String, String> {
    String::from_utf8(read_bytes(input)?).map_err(|e| format!("Input is not UTF-8: {}", e))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("Failed to serialize output: {}", e))?;
    println!("{}", out);
    Ok(())
}
