use anyhow::Context;
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;

use crate::{
    config::constants::DEFAULT_LOOKBACK_DAYS, total_income, total_spending, CacheConfigBuilder,
    CacheStats, DateBound, FetchOptions, Interval, LoggingSource, LookupKind, MemorySource,
    ThrottledSource, Transaction, TransactionCache,
};

/// Summary of one resolved range, printed as a JSON line.
#[derive(Debug, Serialize)]
struct RangeReport {
    interval: Interval,
    lookup: LookupKind,
    fetched: Vec<Interval>,
    records: usize,
    spending: String,
    income: String,
}

/// Main entry point for the application.
///
/// Resolves each `<start> <end>` argument pair against a fixture-backed
/// source, then prints the cache statistics. Without arguments it resolves
/// the current month and the default lookback window.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let fixture = dotenvy::var("TXRANGE_FIXTURE")
        .context("TXRANGE_FIXTURE must point to a transaction JSON file")?;

    let mut config = CacheConfigBuilder::new();
    if let Ok(value) = dotenvy::var("TXRANGE_MAX_CONCURRENCY") {
        let max = value
            .parse::<usize>()
            .with_context(|| format!("Invalid TXRANGE_MAX_CONCURRENCY {value:?}"))?;
        config = config.max_concurrent_fetches(max);
    }
    let rate_limit = match dotenvy::var("TXRANGE_RATE_LIMIT") {
        Ok(value) => value
            .parse::<u32>()
            .with_context(|| format!("Invalid TXRANGE_RATE_LIMIT {value:?}"))?,
        Err(_) => u32::MAX,
    };

    let source = MemorySource::from_json_file(&fixture).await?;
    info!(fixture = %fixture, records = source.records().len(), "Loaded fixture");

    let source = LoggingSource::new(ThrottledSource::per_second(source, rate_limit));
    let cache: TransactionCache<_, Transaction> =
        TransactionCache::with_config(source, config.build());

    let requests = requested_intervals(std::env::args().skip(1).collect())?;
    let options = FetchOptions::new();

    for interval in requests {
        let resolution = cache.resolve(interval, &options).await?.sorted_by_date();
        let report = RangeReport {
            interval,
            lookup: resolution.lookup,
            fetched: resolution.fetched.clone(),
            records: resolution.records.len(),
            spending: total_spending(&resolution.records).to_string(),
            income: total_income(&resolution.records).to_string(),
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    let stats: CacheStats = cache.cache_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Parse `<start> <end>` pairs, defaulting to this month and the lookback window.
fn requested_intervals(args: Vec<String>) -> anyhow::Result<Vec<Interval>> {
    if args.is_empty() {
        let today = DateBound::today();
        return Ok(vec![
            Interval::current_month(today)?,
            Interval::last_n_days(today, DEFAULT_LOOKBACK_DAYS)?,
        ]);
    }

    anyhow::ensure!(
        args.len() % 2 == 0,
        "Expected <start> <end> pairs, got {} arguments",
        args.len()
    );

    args.chunks(2)
        .map(|pair| Interval::parse(&pair[0], &pair[1]).map_err(anyhow::Error::from))
        .collect()
}
