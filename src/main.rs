//! Galaxy Raiders entry point
//!
//! Loads configuration, serves the leaderboard, runs the game loop in the
//! terminal until the player quits and records the finished match.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use galaxy_raiders::persistence::JsonFileStore;
use galaxy_raiders::platform::{KeyboardController, PcgGenerator, TerminalVisualizer};
use galaxy_raiders::settings::DEFAULT_CONFIG_PATH;
use galaxy_raiders::{EngineConfig, GameEngine, web};
use tokio::sync::watch;

/// Terminal space shooter with a leaderboard endpoint
#[derive(Parser, Debug)]
#[command(name = "galaxy-raiders", version)]
struct Args {
    /// Engine configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Port for the leaderboard HTTP endpoint
    #[arg(long, env = "GR__ADAPTERS__WEB__PORT", default_value_t = 8080)]
    port: u16,

    /// Directory holding Scoreboard.json and Leaderboard.json
    #[arg(long, env = "GR__SCORE_DIR", default_value = "./score")]
    score_dir: PathBuf,

    /// Spawn seed; the clock is used when absent
    #[arg(long, env = "GR__SEED")]
    seed: Option<u64>,

    /// Log output; the terminal is taken by the game screen
    #[arg(long, default_value = "galaxy-raiders.log")]
    log_file: PathBuf,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn init_logging(path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(err) => eprintln!("Cannot open log file {}: {}", path.display(), err),
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_file);
    log::info!("Galaxy Raiders starting...");

    let config = match EngineConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            eprintln!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Failed to start async runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Raw mode turns Ctrl-C into a key press; the signal covers the rest
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        runtime.spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::warn!("Ctrl-C handler unavailable: {}", err);
                return;
            }
            log::info!("Shutdown requested");
            shutdown.store(true, Ordering::Relaxed);
        });
    }

    let (feed, snapshots) = watch::channel(None);
    let (stop_server, mut server_stopped) = watch::channel(false);
    let port = args.port;
    let server = runtime.spawn(async move {
        let stop = async move {
            let _ = server_stopped.changed().await;
        };
        if let Err(err) = web::serve(port, snapshots, stop).await {
            log::error!("Leaderboard server error: {}", err);
        }
    });

    let terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(err) => {
            log::error!("Failed to set up the terminal: {}", err);
            eprintln!("Failed to set up the terminal: {}", err);
            stop_server.send_replace(true);
            runtime.shutdown_timeout(Duration::from_secs(1));
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);
    let mut engine = GameEngine::new(
        config,
        PcgGenerator::new(seed),
        KeyboardController::new(Arc::clone(&shutdown)),
        TerminalVisualizer::new(terminal),
        JsonFileStore::new(&args.score_dir),
    )
    .with_leaderboard_feed(feed);

    engine.run(&shutdown);
    ratatui::restore();

    let saved = engine.save_data();
    if let Err(err) = &saved {
        log::error!("Failed to save score records: {}", err);
        eprintln!("Failed to save score records: {}", err);
    }

    stop_server.send_replace(true);
    if let Err(err) = runtime.block_on(server) {
        log::warn!("Leaderboard server task ended abnormally: {}", err);
    }
    runtime.shutdown_timeout(Duration::from_secs(1));

    match saved {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_bundled_path() {
        let args = Args::try_parse_from(["galaxy-raiders"]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let args = Args::try_parse_from([
            "galaxy-raiders",
            "--config=custom.json",
            "--port",
            "9090",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("custom.json"));
        assert_eq!(args.port, 9090);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_config_flag_needs_a_value() {
        assert!(Args::try_parse_from(["galaxy-raiders", "--config"]).is_err());
        assert!(Args::try_parse_from(["galaxy-raiders", "--port", "not-a-port"]).is_err());
    }
}
