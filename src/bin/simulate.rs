use std::cell::Cell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use coin_flip_rewards::config::{load_config, PluginConfig};
use coin_flip_rewards::error::ConfigError;
use coin_flip_rewards::host::{LocalEventBus, SimPlayer};
use coin_flip_rewards::logging::{emit_log, CountingLogSink};
use coin_flip_rewards::plugin::CoinFlipPlugin;
use coin_flip_rewards::rng::clock_seed;
use coin_flip_rewards::types::{CoinFlipOutcome, PolicyKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    policy: Option<String>,
    #[arg(long, default_value_t = 1_000)]
    flips: usize,
    #[arg(long, default_value_t = 4)]
    players: usize,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    /// Mirror every plugin log line to stderr.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Debug, Serialize)]
struct FlipLine {
    flip: usize,
    #[serde(rename = "playerId")]
    player_id: String,
    outcome: CoinFlipOutcome,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    seed: u32,
    policy: PolicyKind,
    flips: usize,
    players: usize,
    #[serde(rename = "outcomeCounts")]
    outcome_counts: BTreeMap<String, usize>,
    #[serde(rename = "itemCounts")]
    item_counts: BTreeMap<String, usize>,
    #[serde(rename = "finalRngState")]
    final_rng_state: u32,
    draws: u64,
    #[serde(rename = "logLines")]
    log_lines: usize,
}

/// Latest outcome and resolver position reported by the plugin.
#[derive(Clone, Copy, Debug)]
struct ResolverProgress {
    last: Option<CoinFlipOutcome>,
    rng_state: u32,
    draws: u64,
}

fn main() {
    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            emit_log("error", "config_invalid", Some(&message), json!({}));
            std::process::exit(2);
        }
    };
    let seed = cli.seed.or(config.seed).unwrap_or_else(clock_seed);

    let log = if cli.verbose {
        CountingLogSink::mirrored()
    } else {
        CountingLogSink::new()
    };
    let mut bus = LocalEventBus::new();
    let progress = match start_plugin(&config, seed, log.clone(), &mut bus) {
        Ok(progress) => progress,
        Err(error) => {
            emit_log("error", "config_invalid", Some(&error.to_string()), json!({}));
            std::process::exit(2);
        }
    };

    let mut players = make_players(cli.players);
    emit_log(
        "info",
        "run_started",
        None,
        json!({
            "seed": seed,
            "policy": config.policy,
            "flips": cli.flips,
            "players": players.len(),
        }),
    );

    let mut arrival = StdRng::seed_from_u64(u64::from(seed));
    let mut outcome_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut item_counts: BTreeMap<String, usize> = BTreeMap::new();

    for flip in 0..cli.flips {
        let index = arrival.random_range(0..players.len());
        let player = &mut players[index];
        let Some(outcome) = flip_once(&mut bus, &progress, player) else {
            continue;
        };
        *outcome_counts.entry(outcome.key().to_string()).or_insert(0) += 1;
        if let CoinFlipOutcome::ItemGranted { item, .. } = outcome {
            *item_counts.entry(item.to_string()).or_insert(0) += 1;
        }
        let line = FlipLine {
            flip: flip + 1,
            player_id: player.id.clone(),
            outcome,
        };
        match serde_json::to_string(&line) {
            Ok(text) => println!("{text}"),
            Err(error) => emit_log(
                "warn",
                "flip_serialize_failed",
                Some(&error.to_string()),
                json!({ "flip": flip + 1 }),
            ),
        }
    }

    let finished = progress.get();
    let summary = RunSummary {
        seed,
        policy: config.policy,
        flips: cli.flips,
        players: players.len(),
        outcome_counts,
        item_counts,
        final_rng_state: finished.rng_state,
        draws: finished.draws,
        log_lines: log.count(),
    };

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                Some(&error.to_string()),
                json!({ "path": path.to_string_lossy() }),
            );
            std::process::exit(2);
        }
    }

    emit_log(
        "info",
        "run_finished",
        None,
        json!({
            "seed": summary.seed,
            "outcomeCounts": summary.outcome_counts,
            "finalRngState": summary.final_rng_state,
            "draws": summary.draws,
            "summaryOut": cli.summary_out.as_ref().map(|path| path.to_string_lossy().to_string()),
        }),
    );
}

/// Enables the plugin on `bus` with `seed` and tracks what it resolves.
fn start_plugin(
    config: &PluginConfig,
    seed: u32,
    log: CountingLogSink,
    bus: &mut LocalEventBus,
) -> Result<Rc<Cell<ResolverProgress>>, ConfigError> {
    let config = PluginConfig {
        seed: Some(seed),
        ..config.clone()
    };
    let progress = Rc::new(Cell::new(ResolverProgress {
        last: None,
        rng_state: seed,
        draws: 0,
    }));
    let observed = Rc::clone(&progress);
    CoinFlipPlugin::enable_with_observer(&config, bus, log, move |outcome, resolver| {
        observed.set(ResolverProgress {
            last: Some(outcome),
            rng_state: resolver.rng_state(),
            draws: resolver.draws(),
        });
    })?;
    Ok(progress)
}

/// Hands `player` a fresh coin and dispatches one flip. Earlier grants are
/// dropped first so a long run keeps a fixed footprint per player.
fn flip_once(
    bus: &mut LocalEventBus,
    progress: &Cell<ResolverProgress>,
    player: &mut SimPlayer,
) -> Option<CoinFlipOutcome> {
    player.reset_hand();
    progress.set(ResolverProgress {
        last: None,
        ..progress.get()
    });
    bus.dispatch_coin_flip(player);
    progress.get().last
}

fn resolve_config(cli: &Cli) -> Result<PluginConfig, String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path).map_err(|error| error.to_string())?,
        None => PluginConfig::default(),
    };
    if let Some(raw) = cli.policy.as_deref() {
        config.policy =
            PolicyKind::parse(raw).ok_or_else(|| format!("unknown policy '{raw}'"))?;
    }
    Ok(config)
}

fn make_players(count: usize) -> Vec<SimPlayer> {
    (1..=count.clamp(1, 100))
        .map(|idx| {
            SimPlayer::holding_coin(&format!("sim_{idx}@local"), &format!("Player-{idx:02}"))
        })
        .collect()
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, text)
}
