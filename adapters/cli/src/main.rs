#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Lane Defence session.

mod report;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lane_defence_core::{FiringModel, TICKS_PER_SECOND};
use lane_defence_rendering::{
    Presentation, PlayfieldPresentation, RenderingBackend, Scene, TextBackend, GRID_LINES, LAWN,
};
use lane_defence_simulation::{SessionConfig, Simulation};
use lane_defence_world::query;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::report::{Report, Tally, Verdict};

/// One hour of play at the nominal tick rate.
const DEFAULT_MAX_TICKS: u64 = 216_000;

/// Runs a Lane Defence session without a window and reports how it ended.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", version, about)]
struct Cli {
    /// TOML session config; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the seed driving attacker selection.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the firing model. Ammo defenders only fire on the config's `[[shots]]`.
    #[arg(long, value_enum)]
    firing_model: Option<FiringModelArg>,
    /// Stops the run after this many ticks.
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,
    /// Paces ticks at the nominal rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Prints the playfield every N ticks.
    #[arg(long, value_name = "N")]
    render_every: Option<u64>,
    /// Prints the final report as JSON.
    #[arg(long)]
    json: bool,
    /// Enables debug logging.
    #[arg(long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FiringModelArg {
    Cooldown,
    Ammo,
}

impl From<FiringModelArg> for FiringModel {
    fn from(value: FiringModelArg) -> Self {
        match value {
            FiringModelArg::Cooldown => Self::Cooldown,
            FiringModelArg::Ammo => Self::Ammo,
        }
    }
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => report.verdict.exit_code(),
        Err(err) => {
            error!(error = %format!("{err:#}"), "run_failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(model) = cli.firing_model {
        config.firing_model = model.into();
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<Report> {
    let config = load_config(cli)?;
    let seed = config.seed;
    let mut simulation = Simulation::new(config).context("starting session")?;
    info!("{}", query::welcome_banner(simulation.world()));

    let playfield = query::playfield(simulation.world());
    let presentation_grid = PlayfieldPresentation::new(
        playfield.lanes,
        playfield.columns,
        playfield.cell_width,
        PlayfieldPresentation::DEFAULT_LANE_HEIGHT,
        GRID_LINES,
    )
    .context("describing the playfield")?;
    let mut backend = TextBackend::new(io::stdout());
    let render_every = cli.render_every.filter(|every| *every > 0);

    let tick_duration = Duration::from_secs(1) / TICKS_PER_SECOND;
    let mut deadline = Instant::now();
    let mut tally = Tally::default();

    while simulation.tick_index() < cli.max_ticks && !simulation.outcome().is_terminal() {
        tally.record(simulation.step());

        if let Some(every) = render_every {
            if simulation.tick_index() % every == 0 || simulation.outcome().is_terminal() {
                let scene = Scene::from_views(
                    presentation_grid,
                    &query::defender_view(simulation.world()),
                    &query::attacker_view(simulation.world()),
                    &query::projectile_view(simulation.world()),
                    simulation.wave_snapshot(),
                    simulation.outcome(),
                );
                let title = format!("Lane Defence tick {}", simulation.tick_index());
                backend
                    .present(&Presentation::new(title, LAWN, scene))
                    .context("rendering frame")?;
            }
        }

        if cli.realtime {
            deadline += tick_duration;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                deadline = now;
            }
        }
    }

    let report = Report {
        verdict: Verdict::from_outcome(simulation.outcome()),
        ticks: simulation.tick_index(),
        seed,
        wave: simulation.wave_snapshot(),
        tally,
    };

    let mut stdout = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("encoding report")?;
        writeln!(stdout).context("writing report")?;
    } else {
        writeln!(stdout, "{report}").context("writing report")?;
    }
    Ok(report)
}
