//! Headless driver for the simulation core.
//!
//! Usage:
//!   sumo-host [session.json] [--realtime] [--snapshots]
//!
//! Reads a session (tunables + per-tick script) from the given file or from
//! stdin, plays it through a `Match`, and prints the final snapshot as JSON on
//! stdout. `--snapshots` prints one JSON line per tick instead, for an
//! external renderer to consume. Logs go to stderr; filter with `RUST_LOG`.

use std::io::Read;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sumo_core::{Match, MatchView, Session, SimEvent};
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct Options {
    path: Option<String>,
    realtime: bool,
    snapshots: bool,
}

fn parse_args() -> Options {
    let mut options = Options {
        path: None,
        realtime: false,
        snapshots: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => options.realtime = true,
            "--snapshots" => options.snapshots = true,
            flag if flag.starts_with("--") => warn!(flag, "ignoring unknown flag"),
            path => options.path = Some(path.to_string()),
        }
    }
    options
}

fn load_session(path: Option<&str>) -> Result<Session> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read session from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json).context("failed to parse session JSON")
}

fn log_event(frame: u64, event: &SimEvent) {
    match event {
        SimEvent::RoundEnded { winner } => info!(frame, ?winner, "round ended"),
        SimEvent::MatchEnded { winner } => info!(frame, ?winner, "match ended"),
        SimEvent::RoundStarted { round } => info!(frame, round, "round started"),
        SimEvent::Fell { side } => info!(frame, ?side, "fell"),
        other => debug!(frame, event = ?other, "event"),
    }
}

fn run(session: Session, options: &Options) -> Result<Match> {
    let tick = Duration::from_secs(1) / session.config.tick_rate.max(1);
    let mut game = Match::new(session.config).context("invalid session config")?;
    info!(frames = session.script.len(), "session loaded");

    let started = Instant::now();
    let mut hits = 0usize;
    for (i, frame) in session.script.iter().enumerate() {
        let tick_start = Instant::now();

        if let Some(action) = frame.action {
            if let Err(err) = game.handle_action(action) {
                warn!(script_frame = i, %err, "skipping scripted action");
            }
        }

        for event in game.step(frame.inputs) {
            if matches!(event, SimEvent::Hit { .. }) {
                hits += 1;
            }
            log_event(game.frame, &event);
        }

        if options.snapshots {
            println!("{}", serde_json::to_string(&MatchView::of(&game))?);
        }

        if options.realtime {
            if let Some(rest) = tick.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    let [red, blue] = game.scores();
    info!(
        frames = game.frame,
        hits,
        red,
        blue,
        state = ?game.game_state(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "session finished"
    );
    Ok(game)
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = parse_args();
    let session = load_session(options.path.as_deref())?;
    let game = run(session, &options)?;

    if !options.snapshots {
        println!("{}", serde_json::to_string_pretty(&MatchView::of(&game))?);
    }
    Ok(())
}
