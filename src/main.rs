use anyhow::{bail, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use chip_tally::core::config::{ConfigWarnings, TallyConfig};
use chip_tally::interaction::{ConfigReloadSettings, PendingSetup};
use chip_tally::session::{sanitize, SessionReport, SessionRequest, SessionRng, SessionSlot};
use chip_tally::GamePlugin;

/// Lay out poker chips for a table and keep a live count per player and bank.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of players (clamped to the configured limits).
    #[arg(long)]
    players: Option<i64>,
    /// Points per player stack (rounded to the configured step).
    #[arg(long, allow_negative_numbers = true)]
    points: Option<i64>,
    /// RON config layers, later files override earlier ones.
    #[arg(long = "config", value_name = "PATH")]
    configs: Vec<PathBuf>,
    /// Seed for the chip jitter; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Build one session, print it as JSON and exit.
    #[arg(long)]
    headless: bool,
}

const DEFAULT_LAYERS: [&str; 2] = ["assets/config/tally.ron", "assets/config/tally.local.ron"];

/// Loaded config, the layer paths to watch, and problems found while loading.
/// Logging is not up yet at this point, so issues are handed on as strings.
type LoadedConfig = (TallyConfig, Vec<PathBuf>, Vec<String>);

#[cfg(target_arch = "wasm32")]
fn load_config(_cli: &Cli) -> Result<LoadedConfig> {
    const RAW: &str = include_str!("../assets/config/tally.ron");
    match ron::from_str(RAW) {
        Ok(cfg) => Ok((cfg, Vec::new(), Vec::new())),
        Err(e) => Ok((
            TallyConfig::default(),
            Vec::new(),
            vec![format!("embedded config failed to parse: {e}; using defaults")],
        )),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(cli: &Cli) -> Result<LoadedConfig> {
    if cli.configs.is_empty() {
        let layers: Vec<PathBuf> = DEFAULT_LAYERS.iter().map(PathBuf::from).collect();
        let (cfg, used, errors) = TallyConfig::load_layered(&layers);
        // The local override is optional; only report files that exist.
        let mut issues: Vec<String> = errors.into_iter().filter(|e| !e.contains("read error")).collect();
        if used.is_empty() {
            issues.push("no config layers found; using defaults".into());
        }
        return Ok((cfg, layers, issues));
    }
    for path in &cli.configs {
        TallyConfig::load_from_file(path)
            .with_context(|| format!("loading config layer {}", path.display()))?;
    }
    let (cfg, _used, errors) = TallyConfig::load_layered(&cli.configs);
    if !errors.is_empty() {
        bail!("config layers failed to merge: {}", errors.join("; "));
    }
    Ok((cfg, cli.configs.clone(), Vec::new()))
}

fn request_from(cli: &Cli, cfg: &TallyConfig) -> SessionRequest {
    SessionRequest {
        player_count: cli.players.unwrap_or(i64::from(cfg.players.default)),
        total_points: Some(cli.points.unwrap_or(i64::from(cfg.stacks.default_total))),
    }
}

fn run_headless(cli: &Cli, cfg: &TallyConfig, warnings: &ConfigWarnings) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut slot = SessionSlot::default();
    let notices = slot.configure(request_from(cli, cfg), cfg, &mut rng);
    let Some(session) = slot.active() else {
        bail!("session failed to start");
    };
    let report = SessionReport::new(session, &notices).with_config_warnings(&warnings.0);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        // Better panic messages on wasm
        console_error_panic_hook::set_once();
    }

    let cli = Cli::parse();
    let (cfg, layers, issues) = load_config(&cli)?;
    let warnings = ConfigWarnings::collect(&cfg, issues);

    if cli.headless {
        // No log subscriber without an App; stdout carries the JSON.
        for w in &warnings.0 {
            eprintln!("CONFIG WARNING: {w}");
        }
        return run_headless(&cli, &cfg, &warnings);
    }

    let (settings, _) = sanitize(request_from(&cli, &cfg), &cfg);
    let rng = match cli.seed {
        Some(seed) => SessionRng::seeded(seed),
        None => SessionRng::default(),
    };

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(warnings)
        .insert_resource(PendingSetup::from(settings))
        .insert_resource(rng)
        .insert_resource(ConfigReloadSettings {
            paths: layers,
            ..Default::default()
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}
