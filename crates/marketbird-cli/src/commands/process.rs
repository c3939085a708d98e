//! Process command - import one order PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use marketbird_core::models::config::MarketbirdConfig;
use marketbird_core::models::order::ProcessingResult;
use marketbird_core::moneybird::MoneybirdClient;
use marketbird_core::process::{parse_order_pdf, process_order_pdf};

use super::config::default_config_path;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input order PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Parse the PDF and print the extracted data without calling the API
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading PDF...");
    pb.set_position(10);
    let data = fs::read(&args.input)?;

    let output = if args.dry_run {
        pb.set_message("Parsing order...");
        pb.set_position(50);

        let (address, order) = parse_order_pdf(&data, &config)?;
        let total = order.total_amount();
        pb.set_position(100);

        match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "address": address,
                "order": order,
                "total_amount": total,
            }))?,
            OutputFormat::Text => format!(
                "Order:    {}\nDate:     {}\nCustomer: {} ({})\nTotal:    €{}\n",
                order.order_number.as_deref().unwrap_or("-"),
                order.invoice_date.as_deref().unwrap_or("-"),
                address.full_name(),
                address.customer_id(),
                total,
            ),
        }
    } else {
        // The submission path needs every API identifier.
        config.validate()?;

        pb.set_message("Creating invoice...");
        pb.set_position(40);

        let client = MoneybirdClient::new(&config)?;
        let result = process_order_pdf(&data, &config, &client).await;
        pb.set_position(100);

        format_result(&result, args.format)?
    };

    pb.finish_with_message("Done");

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration: explicit path, then the default path, then the
/// environment.
fn load_config(config_path: Option<&str>) -> anyhow::Result<MarketbirdConfig> {
    if let Some(path) = config_path {
        return Ok(MarketbirdConfig::from_file(Path::new(path))?);
    }
    let default_path = default_config_path();
    if default_path.exists() {
        return Ok(MarketbirdConfig::from_file(&default_path)?);
    }
    debug!("No config file found, reading environment");
    Ok(MarketbirdConfig::from_env())
}

fn format_result(result: &ProcessingResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => Ok(match result {
            ProcessingResult::Success {
                contact_name,
                order_number,
                total_amount,
                invoice_id,
                contact_id,
                ..
            } => format!(
                "{} Invoice {} created for {} (contact {})\n  Order: {}\n  Total: €{}\n",
                style("✓").green(),
                invoice_id,
                contact_name,
                contact_id,
                order_number,
                total_amount,
            ),
            ProcessingResult::Failure { error, .. } => {
                format!("{} {}\n", style("✗").red(), error)
            }
        }),
    }
}
