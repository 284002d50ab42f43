mod engine;
mod models;
mod pipeline;
mod storage;
mod types;

use std::fs::File;
use std::io::{stderr, stdout, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{read_cardholders, read_transactions, write_enriched, EnrichmentContext, EnrichmentEngine, RecordFormat, TimestampPolicy};
use crate::pipeline::{LocalSubmitter, Pipeline, PipelineConfig, RetryPolicy};
use crate::storage::LocalObjectStore;

#[derive(Parser)]
#[command(name = "transaction-enrichment", version, about = "Enriches card transactions with cardholder risk and reward data")]
struct Cli {
    /// Log level written to stderr: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "error")]
    log_level: String,
    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Enrich one transactions file and write the result as CSV to stdout
    Enrich {
        #[arg(long)]
        transactions: PathBuf,
        #[arg(long)]
        cardholders: PathBuf,
        /// Report rows with malformed timestamps instead of failing the batch
        #[arg(long)]
        isolate_malformed: bool
    },
    /// Wait for transaction files under a local directory, enrich them and archive the inputs
    Pipeline {
        /// Directory used as the object store root
        #[arg(long)]
        root: PathBuf,
        #[arg(long, default_value_t = 600)]
        timeout_secs: u64,
        #[arg(long, default_value_t = 30)]
        poke_interval_secs: u64,
        #[arg(long, default_value_t = 1)]
        retries: u32,
        #[arg(long, default_value_t = 300)]
        retry_delay_secs: u64,
        #[arg(long)]
        isolate_malformed: bool
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    match cli.command {
        Command::Enrich { transactions, cardholders, isolate_malformed } => {
            run_enrich(&transactions, &cardholders, context(isolate_malformed))
        }
        Command::Pipeline { root, timeout_secs, poke_interval_secs, retries, retry_delay_secs, isolate_malformed } => {
            let config = PipelineConfig::default()
                .with_sensor_timeout(Duration::from_secs(timeout_secs))
                .with_poke_interval(Duration::from_secs(poke_interval_secs))
                .with_retry(RetryPolicy::new(retries, Duration::from_secs(retry_delay_secs)))
                .with_context(context(isolate_malformed));

            run_pipeline(root, config).await
        }
    }
}

fn context(isolate_malformed: bool) -> EnrichmentContext {
    let policy = if isolate_malformed { TimestampPolicy::IsolateRow } else { TimestampPolicy::FailBatch };
    EnrichmentContext::default().with_timestamp_policy(policy)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The enrich command writes CSV to stdout, so all logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn run_enrich(transactions_path: &Path, cardholders_path: &Path, context: EnrichmentContext) -> Result<()> {
    let transactions = read_transactions(open(transactions_path)?, format_of(transactions_path)?)?;
    let cardholders = read_cardholders(open(cardholders_path)?, format_of(cardholders_path)?)?;

    let timer = Instant::now();
    let report = EnrichmentEngine::new(context).enrich(&transactions, &cardholders)?;
    let duration = timer.elapsed();

    info!("Enriched transactions in: {duration:?}");

    let mut output = BufWriter::new(stdout().lock());
    write_enriched(&mut output, &report.enriched)?;
    output.flush()?;

    Ok(())
}

async fn run_pipeline(root: PathBuf, config: PipelineConfig) -> Result<()> {
    let store = Arc::new(LocalObjectStore::new(root));
    let pipeline = Pipeline::new(store.clone(), LocalSubmitter::new(store), config);

    let run = pipeline.run().await?;

    println!(
        "batch_id={} inputs={} enriched={} rejected={} archived={} output={}",
        run.batch_id,
        run.inputs.len(),
        run.enriched,
        run.rejected,
        run.archived.len(),
        run.output_key
    );

    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|error| anyhow!("Error opening {}: {error}", path.display()))?;
    Ok(BufReader::new(file))
}

fn format_of(path: &Path) -> Result<RecordFormat> {
    path.to_str()
        .and_then(RecordFormat::from_path)
        .ok_or_else(|| anyhow!("Unsupported record format: {}", path.display()))
}
