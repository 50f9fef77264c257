use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tourism_extractor::config::Config;
use tourism_extractor::models::ExtractionStatus;
use tourism_extractor::output::OutputPaths;
use tourism_extractor::services::ExtractionService;

#[derive(Parser)]
#[command(name = "tourism-extract")]
#[command(about = "Extract monthly tourism guest counts from yearly Excel reports", long_about = None)]
struct Cli {
    /// Directory holding the yearly reports (<prefix>_<year>.xls / .xlsx)
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory for the output CSV tables
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// File name prefix of the yearly reports (default: ET)
    #[arg(long)]
    file_prefix: Option<String>,

    /// Name prefix of the output tables (default: portugal_tourism)
    #[arg(long)]
    output_prefix: Option<String>,

    /// First year to process
    #[arg(long)]
    start_year: Option<i32>,

    /// Last year to process
    #[arg(long)]
    end_year: Option<i32>,

    /// Minimum average monthly value accepted from the 2022 layout
    #[arg(long)]
    plausibility_threshold: Option<f64>,
}

impl Cli {
    /// Flags take precedence over environment settings
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.source_dir {
            config.source_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(prefix) = self.file_prefix {
            config.file_prefix = prefix;
        }
        if let Some(prefix) = self.output_prefix {
            config.output_prefix = prefix;
        }
        if let Some(year) = self.start_year {
            config.start_year = year;
        }
        if let Some(year) = self.end_year {
            config.end_year = year;
        }
        if let Some(threshold) = self.plausibility_threshold {
            config.plausibility_threshold = threshold;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());
    config.validate()?;
    info!("Starting extraction with config: {:?}", config);

    let start_time = Instant::now();
    let year_count = config.years().count() as u64;
    let pb = ProgressBar::new(year_count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let service = ExtractionService::new(config.clone());
    let outcome = service.run_with_progress(|entry| {
        pb.set_message(entry.to_string());
        pb.inc(1);
    })?;
    pb.finish_with_message("✓ All years processed");

    println!("\n{}", "=".repeat(60));
    println!("Extraction Summary");
    println!("{}", "=".repeat(60));
    if let Some(summary) = outcome.summary() {
        println!("{summary}");
    }

    println!("\nExtraction details:");
    for entry in &outcome.log {
        let marker = match entry.status {
            ExtractionStatus::Success { .. } => "✓",
            ExtractionStatus::Error(_) => "✗",
            _ => "⚠",
        };
        println!("  {marker} {entry}");
    }
    println!("\nCompleted in {:.2}s", start_time.elapsed().as_secs_f64());

    if outcome.is_success() && !outcome.monthly.is_empty() {
        let paths = OutputPaths::from_config(&config);
        println!("\nExtraction completed. Time series ready at:");
        println!("  {}", paths.timeseries.display());
    } else {
        println!("\n✗ Extraction failed: no monthly data extracted");
    }

    Ok(())
}
