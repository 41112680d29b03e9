//! REPL – Read-Eval-Print Loop standing in for the app's screens.
//!
//! Supported slash-commands:
//!   /help           – show this list
//!   /edit <text>    – replace the draft message
//!   /show           – print the draft message
//!   /send           – open the display screen with the draft
//!   /back           – return to the previous screen
//!   /settings       – edit the checkbox, list and text preferences
//!   /shake <file>   – replay a recorded sample file through the monitor
//!   /tap <x> <y> <z> – feed one reading stamped with the current time
//!   /photo          – create a new image file
//!   /pause, /resume – release / re-register the accelerometer
//!   /quit | /exit   – save the draft and exit

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shakevibe_core::{App, CaptureOutcome, ListChoice};
use shakevibe_hal::SampleFeed;
use shakevibe_hal::sim::load_samples;
use shakevibe_types::{Screen, SensorSample, ShakeError};

/// Entry point for the interactive REPL.
///
/// `shutdown` is polled each iteration; when set the REPL exits cleanly.
pub fn run(app: &mut App, feed: &SampleFeed, shutdown: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        print!("{} ", prompt_for(app.screen()).bold().cyan());
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {}", "Read error".red(), e);
                break;
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd {
            "/help" => cmd_help(),
            "/edit" => {
                app.set_draft(arg);
                println!("{}", "✓ Draft updated.".green());
            }
            "/show" => cmd_show(app),
            "/send" => {
                app.send_message();
                print_screen(app.screen());
            }
            "/back" => {
                if !app.back() {
                    println!("{}", "Already on the main screen.".dimmed());
                }
            }
            "/settings" => cmd_settings(app),
            "/shake" => cmd_shake(app, feed, arg),
            "/tap" => cmd_tap(app, feed, arg),
            "/photo" => cmd_photo(app),
            "/pause" => match app.pause() {
                Ok(()) => println!("{}", "Accelerometer released.".yellow()),
                Err(e) => println!("{}: {}", "Pause failed".red(), e),
            },
            "/resume" => match app.resume() {
                Ok(()) => {
                    println!("{}", "Accelerometer registered.".green());
                    if feed.remaining() > 0 {
                        let shakes = app.pump();
                        println!("  Drained queued samples, {} shake(s).", shakes.to_string().bold());
                    }
                }
                Err(e) => println!("{}: {}", "Resume failed".red(), e),
            },
            "/quit" | "/exit" => {
                println!("{}", "Goodbye.".green());
                shutdown.store(true, Ordering::SeqCst);
                break;
            }
            other => {
                println!(
                    "{} '{}'. Type {} for available commands.",
                    "Unknown command:".red(),
                    other.yellow(),
                    "/help".bold()
                );
            }
        }
    }
}

fn prompt_for(screen: &Screen) -> &'static str {
    match screen {
        Screen::Main => "shakevibe>",
        Screen::DisplayMessage { .. } => "message>",
        Screen::Settings => "settings>",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command handlers
// ─────────────────────────────────────────────────────────────────────────────

fn cmd_help() {
    println!();
    println!("{}", "ShakeVibe Commands".bold().underline());
    println!("  {}  – replace the draft message", "/edit <text>".bold().cyan());
    println!("  {}         – print the draft message", "/show".bold().cyan());
    println!("  {}         – open the message screen", "/send".bold().cyan());
    println!("  {}         – previous screen", "/back".bold().cyan());
    println!("  {}     – edit preferences", "/settings".bold().cyan());
    println!("  {} – replay accelerometer samples", "/shake <file>".bold().cyan());
    println!("  {} – feed one reading now", "/tap <x> <y> <z>".bold().cyan());
    println!("  {}        – take a photo", "/photo".bold().cyan());
    println!("  {} – release / register the sensor", "/pause /resume".bold().cyan());
    println!("  {}  – save and exit", "/quit  /exit".bold().cyan());
    println!();
}

fn cmd_show(app: &App) {
    if app.draft().is_empty() {
        println!("  {}", "(empty)".dimmed());
    } else {
        println!("  {}", app.draft());
    }
}

fn print_screen(screen: &Screen) {
    match screen {
        Screen::DisplayMessage { message } => {
            println!("{}", "Message".bold().underline());
            println!("  {}", message.as_deref().unwrap_or(""));
            println!("  {}", "(/back to return)".dimmed());
        }
        Screen::Settings => println!("{}", "Settings".bold().underline()),
        Screen::Main => {}
    }
}

fn cmd_settings(app: &mut App) {
    app.open_settings();
    print_screen(app.screen());

    let prefs = app.preferences().clone();
    let checkbox = prompt_str(&format!("  Checkbox [{}]: ", prefs.checkbox), &prefs.checkbox.to_string());
    let choices: Vec<String> = ListChoice::ALL.iter().map(ToString::to_string).collect();
    let list = prompt_str(
        &format!("  List ({}) [{}]: ", choices.join(" / "), prefs.list),
        &prefs.list.to_string(),
    );
    let text = prompt_str(&format!("  Text [{}]: ", prefs.text), &prefs.text);

    let mut saved = true;
    for (key, value) in [("checkbox", checkbox), ("list", list), ("text", text)] {
        if let Err(e) = app.set_preference(key, &value) {
            println!("{}: {}", "Setting not saved".red(), e);
            saved = false;
        }
    }
    if saved {
        println!("{}", "✓ Settings saved.".green());
    }
    app.back();
}

fn cmd_shake(app: &mut App, feed: &SampleFeed, arg: &str) {
    if arg.is_empty() {
        println!("{} /shake <file>", "Usage:".yellow());
        return;
    }
    let samples = match load_samples(Path::new(arg)) {
        Ok(samples) => samples,
        Err(e) => {
            println!("{}: {}", "Cannot load samples".red(), e);
            return;
        }
    };

    let count = samples.len();
    feed.extend(samples);
    if !app.monitor().is_active() {
        println!(
            "  {} {} sample(s) queued until /resume.",
            "Monitor paused;".yellow(),
            feed.remaining()
        );
        return;
    }
    let shakes = app.pump();
    println!("  Replayed {} sample(s), {} shake(s).", count, shakes.to_string().bold());
}

fn cmd_tap(app: &mut App, feed: &SampleFeed, arg: &str) {
    let (x, y, z) = match parse_axes(arg) {
        Some(axes) => axes,
        None => {
            println!("{} /tap <x> <y> <z>", "Usage:".yellow());
            return;
        }
    };
    feed.push(SensorSample::now(x, y, z));
    if !app.monitor().is_active() {
        println!("  {} reading queued until /resume.", "Monitor paused;".yellow());
        return;
    }
    if app.pump() == 0 {
        println!("  {}", "No shake.".dimmed());
    }
}

/// Parse exactly three whitespace-separated axis values.
fn parse_axes(arg: &str) -> Option<(f32, f32, f32)> {
    let mut parts = arg.split_whitespace().map(str::parse::<f32>);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Some((x, y, z)),
        _ => None,
    }
}

fn cmd_photo(app: &mut App) {
    println!("{}", photo_message(app.take_photo()));
}

/// The saved notice, or the error alone when no file could be created.
fn photo_message(result: Result<&Path, ShakeError>) -> String {
    match result {
        Ok(path) => {
            let outcome = CaptureOutcome::Saved {
                location: Some(path.display().to_string()),
            };
            format!("  {}", outcome)
        }
        Err(e) => format!("{}: {}", "Photo failed".red(), e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input helpers
// ─────────────────────────────────────────────────────────────────────────────

fn prompt_str(msg: &str, default: &str) -> String {
    print!("{}", msg);
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => {
            let t = line.trim().to_string();
            if t.is_empty() { default.to_string() } else { t }
        }
        Err(_) => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_tracks_screen() {
        assert_eq!(prompt_for(&Screen::Main), "shakevibe>");
        assert_eq!(prompt_for(&Screen::Settings), "settings>");
        assert_eq!(
            prompt_for(&Screen::DisplayMessage { message: None }),
            "message>"
        );
    }

    #[test]
    fn parse_axes_needs_three_numbers() {
        assert_eq!(parse_axes("400 -2.5 0"), Some((400.0, -2.5, 0.0)));
        assert_eq!(parse_axes("  1  2   3 "), Some((1.0, 2.0, 3.0)));
        assert_eq!(parse_axes("1 2"), None);
        assert_eq!(parse_axes("1 2 3 4"), None);
        assert_eq!(parse_axes("1 two 3"), None);
        assert_eq!(parse_axes(""), None);
    }

    #[test]
    fn photo_failure_reports_only_the_error() {
        let err = ShakeError::Storage {
            path: "/ro/pictures".to_string(),
            details: "read-only file system".to_string(),
        };
        let msg = photo_message(Err(err));
        assert!(msg.contains("Photo failed"));
        assert!(msg.contains("read-only file system"));
        assert!(!msg.contains("Cancelled"));
        assert!(!msg.contains("saved"));

        let msg = photo_message(Ok(Path::new("/pics/JPEG_261019_120000_0.jpg")));
        assert!(msg.contains("Image saved successfully in: /pics/JPEG_261019_120000_0.jpg"));
    }
}
