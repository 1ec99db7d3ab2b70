mod actors;
mod clock;
mod concept;
mod config;
mod engine;
mod models;
mod session;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::concept::{AppIdea, ConceptCollector, GeminiGenerator};
use crate::config::Config;
use crate::engine::ReplayEngine;
use crate::storage::SessionStorage;

const USAGE: &str = "\
Usage: direct-pay [events].csv [log_level:optional] > [report].csv
       direct-pay concept [title] [description] [audience:optional] [log_level:optional]
Available log levels: error, warn, info, debug, trace (default: error)";

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Two fixed command shapes do not justify a full argument parser yet.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("{USAGE}");
        exit(1);
    }

    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("Could not load .env file: {error}");
        }
    }

    let config = Config::from_env().context("Invalid configuration")?;

    if args[1] == "concept" {
        if args.len() < 4 {
            eprintln!("{USAGE}");
            exit(1);
        }

        let audience = args.get(4).cloned().unwrap_or_default();
        setup_logging(args.get(5).map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR));

        return run_concept(&config, AppIdea::new(&args[2], &args[3], audience)).await;
    }

    let path = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(SessionStorage::new());
    let engine = ReplayEngine::new(storage.clone(), config.session.clone())
        .with_clock_mode(config.clock_mode);

    let timer = Instant::now();
    engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Replayed sessions in: {duration:?}");

    write_results_to_stdout(storage)?;

    Ok(())
}

async fn run_concept(config: &Config, idea: AppIdea) -> Result<()> {
    let generator = GeminiGenerator::new(&config.gemini).context("Set GEMINI_API_KEY to use the concept generator")?;
    let collector = ConceptCollector::new(generator);

    let timer = Instant::now();
    let bundle = collector.submit(&idea).await?;
    info!("Generated concept in: {:?}", timer.elapsed());

    let mut output = BufWriter::new(stdout().lock());
    serde_json::to_writer_pretty(&mut output, &bundle)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
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
    //NOTE: Results go to stdout, so logging has to use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(storage: Arc<SessionStorage>) -> Result<()> {
    let mut output = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    output.write_record(["session", "logged_in", "name", "view", "balance", "transactions", "recent", "alerts"])?;

    for report in storage.sorted() {
        //NOTE: The dashboard slice is joined so the report stays one row per session
        let recent: Vec<&str> = report.recent.iter().map(|id| id.as_str()).collect();

        output.write_record([
            report.session_id.to_string(),
            report.logged_in.to_string(),
            report.profile_name.unwrap_or_default(),
            report.view.map(|view| view.to_string()).unwrap_or_default(),
            report.balance.map(|balance| balance.to_string()).unwrap_or_default(),
            report.transactions.len().to_string(),
            recent.join(";"),
            report.alerts.len().to_string()
        ])?;
    }

    output.flush()?;

    Ok(())
}
