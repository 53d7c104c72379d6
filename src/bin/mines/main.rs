// Mines Outcome Analyzer CLI
// Single-scenario analysis, full-table sweeps and sample-data maintenance
//
// Usage:
//   mines analyze --hazards 3 --revealed 5            # Default 25-cell board, unit bet
//   mines analyze --hazards 3 --revealed 5 --bet 2 --json
//   mines sweep --out sweep-results                   # JSON report for every hazard count
//   mines seal data/payout_samples.json samples.sealed
//   mines inspect [--json]                            # Table coverage
//
// Environment:
//   MINES_CONFIG              path to a JSON config file
//   MINES_TABLE_PASSPHRASE    passphrase for sealed sample files
//   RUST_LOG                  log level (default warn)

mod report;
mod sweep;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::RngCore;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use mines_engine::adapter::{project_stake, to_decimal};
use mines_engine::config::DEFAULT_PASSPHRASE_ENV;
use mines_engine::registry::registry;
use mines_engine::sealed;
use mines_engine::source::{self, parse_samples};
use mines_engine::{AnalyzerConfig, ExtrapolationPolicy, OutcomeAnalyzer, SourceConfig};

use report::{render_analysis, SweepReport};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "mines", version)]
#[command(about = "Success rates, payout multipliers and expected value for mines-style games")]
struct Cli {
    /// Config file (overrides MINES_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load samples from this JSON file instead of the configured source
    #[arg(long, global = true)]
    samples: Option<PathBuf>,

    /// Extrapolation policy for reveal counts outside the sampled range
    #[arg(long, global = true, value_enum)]
    extrapolation: Option<PolicyArg>,

    /// Lower bound for bounded extrapolation
    #[arg(long, global = true, default_value_t = 0.0)]
    min_multiplier: f64,

    /// Upper bound for bounded extrapolation
    #[arg(long, global = true, default_value_t = f64::MAX)]
    max_multiplier: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Extend the nearest segment (reference behaviour)
    Linear,
    /// Hold the edge sample's multiplier
    Clamp,
    /// Extend linearly, then clamp to --min-multiplier/--max-multiplier
    Bounded,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyse a single scenario
    Analyze {
        #[arg(long)]
        hazards: i64,
        #[arg(long)]
        revealed: i64,
        /// Cells on the board (default from config, 25)
        #[arg(long)]
        board: Option<i64>,
        /// Stake in unit currency (default from config, 1)
        #[arg(long)]
        bet: Option<f64>,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyse every reveal depth for every hazard count and write a JSON report
    Sweep {
        #[arg(long)]
        board: Option<u32>,
        #[arg(long)]
        bet: Option<f64>,
        /// Output directory
        #[arg(long, default_value = "sweep-results")]
        out: PathBuf,
    },
    /// Seal a JSON sample file with the passphrase from MINES_TABLE_PASSPHRASE
    Seal { input: PathBuf, output: PathBuf },
    /// Show which hazard counts the sample table covers
    Inspect {
        /// Print the normalized sample document as JSON
        #[arg(long)]
        json: bool,
    },
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::from_env().context("loading config from MINES_CONFIG")?,
    };
    if let Some(path) = &cli.samples {
        config.source = SourceConfig::JsonFile { path: path.clone() };
    }
    if let Some(policy) = cli.extrapolation {
        config.extrapolation = match policy {
            PolicyArg::Linear => ExtrapolationPolicy::Linear,
            PolicyArg::Clamp => ExtrapolationPolicy::ClampToEdge,
            PolicyArg::Bounded => ExtrapolationPolicy::Bounded {
                min: cli.min_multiplier,
                max: cli.max_multiplier,
            },
        };
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn build_analyzer(config: &AnalyzerConfig) -> Result<OutcomeAnalyzer> {
    let provider = source::from_config(&config.source).context("payout data source unavailable")?;
    let table = registry()
        .get_or_load(provider.as_ref())
        .with_context(|| format!("loading payout table from {}", provider.describe()))?;
    Ok(OutcomeAnalyzer::new(table, config))
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn cmd_analyze(
    config: &AnalyzerConfig,
    hazards: i64,
    revealed: i64,
    board: Option<i64>,
    bet: Option<f64>,
    json: bool,
) -> Result<()> {
    let scenario = mines_engine::probability::scenario_from_signed(
        board.unwrap_or(i64::from(config.board_size)),
        hazards,
        revealed,
        bet.unwrap_or(config.bet_amount),
    )
    .map_err(mines_engine::AnalysisError::from)?;

    let analyzer = build_analyzer(config)?;
    let result = analyzer.analyze(&scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let stake = to_decimal(scenario.bet_amount).context("bet amount is not representable")?;
    let projection = project_stake(&result, stake);
    print!("{}", render_analysis(&scenario, &result, &projection));
    Ok(())
}

fn cmd_sweep(config: &AnalyzerConfig, board: Option<u32>, bet: Option<f64>, out: PathBuf) -> Result<()> {
    let mut config = config.clone();
    if let Some(board) = board {
        config.board_size = board;
    }
    if let Some(bet) = bet {
        config.bet_amount = bet;
    }
    config.validate().context("invalid sweep parameters")?;

    let start = Instant::now();
    let analyzer = build_analyzer(&config)?;
    let hazards = sweep::run_all(&analyzer, config.board_size)?;
    if hazards.is_empty() {
        bail!("sample table has no hazard counts below board size {}", config.board_size);
    }

    println!("\n  {:<8} {:>6} {:>12} {:>12} {:>12} {:>6}", "Hazards", "Rows", "EV mean", "EV min", "EV max", "Best");
    println!("  {}", "-".repeat(62));
    for h in &hazards {
        println!(
            "  {:<8} {:>6} {:>11.4}% {:>11.4}% {:>11.4}% {:>6}",
            h.hazard_count,
            h.rows.len(),
            h.expected_value.mean * 100.0,
            h.expected_value.min * 100.0,
            h.expected_value.max * 100.0,
            h.best_revealed_count.map_or_else(|| "-".to_string(), |r| r.to_string()),
        );
    }

    let ts = SystemTime::now().duration_since(UNIX_EPOCH).context("system clock before epoch")?.as_millis();
    let report = SweepReport {
        timestamp: ts.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        board_size: config.board_size,
        bet_amount: config.bet_amount,
        extrapolation: format!("{:?}", config.extrapolation),
        source: format!("{:?}", config.source),
        hazards,
    };

    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    let path = out.join(format!("sweep-{}.json", ts));
    std::fs::write(&path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("\n  Swept {} hazard counts in {:.1}ms", report.hazards.len(), start.elapsed().as_secs_f64() * 1000.0);
    println!("  Results saved to: {}\n", path.display());
    Ok(())
}

fn cmd_seal(input: PathBuf, output: PathBuf) -> Result<()> {
    let passphrase = std::env::var(DEFAULT_PASSPHRASE_ENV)
        .with_context(|| format!("{DEFAULT_PASSPHRASE_ENV} must hold the sealing passphrase"))?;
    let raw = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    if sealed::looks_sealed(&raw) {
        bail!("{} is already sealed", input.display());
    }
    // Refuse to seal data the analyzer would reject on load.
    let table = parse_samples(&raw).with_context(|| format!("validating {}", input.display()))?;

    let mut salt = [0u8; sealed::SALT_LEN];
    let mut nonce = [0u8; sealed::NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut nonce);
    let bytes = sealed::seal(&raw, passphrase.as_bytes(), salt, nonce).context("sealing samples")?;
    std::fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!("sealed {} hazard counts into {}", table.len(), output.display());
    println!("Sealed {} ({} hazard counts) -> {}", input.display(), table.len(), output.display());
    Ok(())
}

fn cmd_inspect(config: &AnalyzerConfig, json: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let table = analyzer.table();
    if json {
        println!("{}", serde_json::to_string_pretty(&table.to_document())?);
        return Ok(());
    }
    println!("Samples collected on a {}-cell board, {} hazard counts:", table.board_size(), table.len());
    for hazards in table.hazard_counts() {
        let points = table.samples_for(hazards)?;
        let xs: Vec<String> = points.iter().map(|p| p.revealed_cells.to_string()).collect();
        println!("  {:>3} hazards: {} samples at revealed [{}]", hazards, points.len(), xs.join(", "));
    }
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Analyze { hazards, revealed, board, bet, json } => {
            cmd_analyze(&config, hazards, revealed, board, bet, json)
        }
        Command::Sweep { board, bet, out } => cmd_sweep(&config, board, bet, out),
        Command::Seal { input, output } => cmd_seal(input, output),
        Command::Inspect { json } => cmd_inspect(&config, json),
    }
}

