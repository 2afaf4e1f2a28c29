//! coverpool-quote
//!
//! Reads one JSON insurance position per line (stdin, or the file named by
//! the first argument) and writes one JSON quote per line to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coverpool_common::{InsurancePosition, VERSION};
use coverpool_engine::{EngineConfig, PayoutEngine};

fn main() -> Result<()> {
    // Initialize tracing; stdout carries the quotes
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting coverpool-quote v{}", VERSION);

    let config = EngineConfig::load()?;
    info!("Loaded configuration: {:?}", config);
    let engine = PayoutEngine::new(config);

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("failed to open {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut quoted = 0u64;
    let mut failed = 0u64;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let rendered = match serde_json::from_str::<InsurancePosition>(&line) {
            Ok(position) => match engine.quote(&position) {
                Ok(quote) => {
                    quoted += 1;
                    serde_json::to_string(&quote)?
                }
                Err(e) => {
                    failed += 1;
                    warn!(line = index + 1, error = %e, "Position not computable");
                    json!({ "error": e.to_string(), "kind": e.kind() }).to_string()
                }
            },
            Err(e) => {
                failed += 1;
                warn!(line = index + 1, error = %e, "Malformed position");
                json!({ "error": format!("malformed position: {}", e), "kind": "parse" })
                    .to_string()
            }
        };

        writeln!(out, "{}", rendered)?;
    }

    out.flush()?;
    if let Some(stats) = engine.cache_stats() {
        debug!(hits = stats.hits, misses = stats.misses, "Quote cache");
    }
    info!(quoted, failed, "Done");
    Ok(())
}
