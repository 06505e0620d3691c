//! structext CLI
//!
//! Feeds a schema file and an input dump into the extraction engine and
//! prints the structured result as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use structext::{ExtractConfig, OutputFormat, StructParser};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "structext")]
#[command(about = "Extract structured data from semi-structured text")]
struct Cli {
    /// Schema file (JSON)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Input text file; stdin when omitted
    input: Option<PathBuf>,

    /// Output format (pretty or compact)
    #[arg(long)]
    format: Option<String>,

    /// Config file (structext.toml)
    #[arg(long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ExtractConfig::load_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let schema_path = cli
        .schema
        .or(config.input.schema.clone())
        .context("No schema given; pass --schema or set input.schema in structext.toml")?;
    let schema_text = std::fs::read_to_string(&schema_path)
        .with_context(|| format!("Failed to read schema file {}", schema_path.display()))?;
    let schema: serde_json::Value = serde_json::from_str(&schema_text)
        .with_context(|| format!("Schema file {} is not valid JSON", schema_path.display()))?;

    let input = match cli.input.or(config.input.file.clone()) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let parser = StructParser::new();
    let output = parser.parse_text(&input, &schema)?;

    if config.output.show_warnings {
        for warning in &output.warnings {
            eprintln!("Warning [{}]: {}", warning.key, warning.message);
        }
    }

    let format = match cli.format.as_deref() {
        Some("pretty") => OutputFormat::Pretty,
        Some("compact") => OutputFormat::Compact,
        Some(other) => bail!("Unknown output format '{}'", other),
        None => config.output.format,
    };

    let value = output.value.unwrap_or(serde_json::Value::Null);
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&value)?,
        OutputFormat::Compact => serde_json::to_string(&value)?,
    };
    println!("{}", rendered);

    Ok(())
}
