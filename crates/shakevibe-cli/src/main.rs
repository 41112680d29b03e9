//! `shakevibe-cli` – ShakeVibe Command Line Interface
//!
//! Runs the shake-to-vibrate app headless in a terminal. It:
//!
//! 1. Loads `~/.shakevibe/config.toml`, writing the defaults on first run.
//! 2. Creates the main screen: restores the saved draft message and registers
//!    the accelerometer.
//! 3. Drops the user into an **interactive REPL** (`/edit`, `/send`,
//!    `/settings`, `/shake`, `/tap`, `/photo`, `/help`).
//! 4. On exit (or Ctrl-C) releases the sensor and persists the draft.

mod config;
mod console;
mod repl;

use colored::Colorize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use shakevibe_core::{App, MessageStore, MotionGate, ShakeMonitor};
use shakevibe_hal::SimAccelerometer;

use crate::console::ConsoleVibrator;

fn main() {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG filters (default "info"); SHAKEVIBE_LOG_FORMAT=json switches
    // to newline-delimited JSON.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("SHAKEVIBE_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    print_banner();

    // ── Shared shutdown flag ──────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – saving and exiting after this line …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; graceful shutdown on Ctrl-C will not be available");
    }

    // ── Configuration ─────────────────────────────────────────────────────
    let cfg = match config::load() {
        Ok(loaded) if loaded.from_file => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            loaded.config
        }
        Ok(loaded) => {
            // Persist the plain defaults; env overrides stay out of the file.
            match config::save(&config::Config::default()) {
                Ok(()) => println!(
                    "  {} Default config written to {}",
                    "✓".green().bold(),
                    config::config_path().display().to_string().bold()
                ),
                Err(e) => println!("{}: {}", "Error saving config".red(), e),
            }
            loaded.config
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            config::Config::default()
        }
    };

    // ── Devices & app ─────────────────────────────────────────────────────
    let accelerometer = SimAccelerometer::new("accelerometer");
    let feed = accelerometer.feed();
    let monitor = ShakeMonitor::new(
        MotionGate::with_config(cfg.gate_config()),
        Box::new(accelerometer),
        Box::new(ConsoleVibrator::new("console-vibrator")),
    )
    .with_vibrate_ms(cfg.vibrate_ms);

    let data_dir = cfg.data_dir();
    info!(data_dir = %data_dir.display(), "starting");
    let mut app = App::new(monitor, MessageStore::new(data_dir));

    if let Err(e) = app.create() {
        println!("{}: {}", "Accelerometer unavailable".red(), e);
    }
    if !app.draft().is_empty() {
        println!("  Saved message: {}", app.draft().bold());
    }
    if let Some(photo) = app.last_photo() {
        println!("  Last photo: {}", photo.display().to_string().dimmed());
    }

    println!();
    println!("  Type {} for a list of commands.\n", "/help".bold().cyan());

    // ── Interactive REPL ──────────────────────────────────────────────────
    repl::run(&mut app, &feed, shutdown);

    if let Err(e) = app.pause() {
        warn!(error = %e, "failed to release accelerometer");
    }
    app.stop();
}

fn print_banner() {
    println!();
    println!("  {} {}",
        "ShakeVibe".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Shake to vibrate");
    println!();
}
