//! bourse-scan: analyze a board of Tehran exchange / Farabourse / crypto symbols.
//!
//! Loads the exchange's all-symbols JSON (or clearly labeled sample rows),
//! applies the dashboard filters, and runs the technical, fundamental and
//! signal stages for each remaining symbol.
//!
//! Usage:
//!   cargo run -p bourse-scan -- --input all_symbols.json --market tehran --limit 20
//!   cargo run -p bourse-scan -- --sample --sort change --json
//!   cargo run -p bourse-scan -- --sample --market crypto --synthetic-history 60

use analysis_core::{
    format_number, AnalysisConfig, AnalysisResult, HistoricalPoint, Market, SymbolSnapshot,
};
use analysis_orchestrator::AnalysisOrchestrator;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use clap::{ArgGroup, Parser};
use market_data::{
    filter_market_data, market_session, parse_bourse_rows, sample_bourse_board,
    sample_chart_series, sample_crypto_board, ChangeFilter, MarketBoard, MarketFilter, SortKey,
};
use std::path::PathBuf;

/// Cards shown by default, matching the dashboard grid
const DEFAULT_LIMIT: usize = 50;
/// Iran Standard Time, UTC+03:30 (no daylight saving)
const TEHRAN_OFFSET_SECS: i32 = 3 * 3600 + 1800;

#[derive(Debug, Parser)]
#[command(name = "bourse-scan", version, about = "Signal scan over a market board")]
#[command(group(ArgGroup::new("source").required(true).args(["input", "sample"])))]
struct Cli {
    /// Exchange all-symbols JSON file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Use generated sample boards instead of real data
    #[arg(long)]
    sample: bool,

    /// tehran, farabourse or crypto; every bourse row when omitted
    #[arg(long)]
    market: Option<Market>,

    /// Case-insensitive match on symbol or name
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value = "all")]
    change: ChangeFilter,

    #[arg(long, default_value = "volume")]
    sort: SortKey,

    /// Symbol identifier to mark as favorite (repeatable)
    #[arg(long = "favorite")]
    favorites: Vec<String>,

    #[arg(long)]
    favorites_only: bool,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Feed each symbol a random-walk history of this many days (demo only)
    #[arg(long, value_name = "DAYS")]
    synthetic_history: Option<u32>,

    /// Print results as a JSON array
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AnalysisConfig::from_env().context("invalid analysis configuration")?;
    tracing::info!(
        "Market session: {} (short MA {}, long MA {})",
        market_session(tehran_time(Utc::now())?).label(),
        config.short_ma_period,
        config.long_ma_period
    );

    let mut board = MarketBoard::new();
    board.favorites = cli.favorites.iter().cloned().collect();
    load_board(&mut board, &cli)?;

    let filter = MarketFilter {
        market: cli.market,
        search_query: cli.search.clone(),
        change: cli.change,
        favorites_only: cli.favorites_only,
        sort_by: cli.sort,
        limit: Some(cli.limit),
    };
    let rows = filter_market_data(board.rows_for(cli.market), &filter, &board.favorites);
    tracing::info!("{} symbols left after filtering", rows.len());

    let orchestrator = AnalysisOrchestrator::with_config(config);
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    let results: Vec<(&SymbolSnapshot, AnalysisResult)> = rows
        .iter()
        .map(|snapshot| {
            let history: Vec<HistoricalPoint> = match cli.synthetic_history {
                Some(days) => sample_chart_series(snapshot, days, today, &mut rng),
                None => Vec::new(),
            };
            (snapshot, orchestrator.analyze(snapshot, &history))
        })
        .collect();

    if cli.json {
        let analyses: Vec<&AnalysisResult> = results.iter().map(|(_, result)| result).collect();
        println!("{}", serde_json::to_string_pretty(&analyses)?);
        return Ok(());
    }

    for (snapshot, result) in &results {
        let decimals = if snapshot.market == Market::Crypto { 2 } else { 0 };
        let star = if board.favorites.contains(&snapshot.id) { "*" } else { " " };
        println!(
            "{}{:<10} {:>12} {:<12} {:>3}%  {}",
            star,
            result.symbol,
            format_number(Some(snapshot.last_price), decimals),
            result.signal.action.label(),
            result.signal.confidence,
            result.summary
        );
    }

    Ok(())
}

/// Wall-clock time on the Tehran exchange
fn tehran_time(now: DateTime<Utc>) -> anyhow::Result<NaiveTime> {
    let offset = FixedOffset::east_opt(TEHRAN_OFFSET_SECS).context("invalid Tehran offset")?;
    Ok(now.with_timezone(&offset).time())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bourse_scan=info,analysis_orchestrator=warn".into());

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_board(board: &mut MarketBoard, cli: &Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.input {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let bourse = parse_bourse_rows(&raw)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        board.replace(bourse, Vec::new());
    } else {
        tracing::warn!("Using generated sample data, not real market prices");
        let mut rng = rand::thread_rng();
        let bourse = sample_bourse_board(&mut rng);
        let crypto = sample_crypto_board(&mut rng);
        board.replace(bourse, crypto);
    }
    Ok(())
}
