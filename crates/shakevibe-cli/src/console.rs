//! Terminal stand-in for the vibration motor.

use colored::Colorize;
use shakevibe_hal::Vibrator;
use shakevibe_types::ShakeError;
use tracing::info;

/// Prints each pulse instead of driving a motor.
pub struct ConsoleVibrator {
    id: String,
}

impl ConsoleVibrator {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Vibrator for ConsoleVibrator {
    fn id(&self) -> &str {
        &self.id
    }

    fn vibrate(&mut self, duration_ms: u64) -> Result<(), ShakeError> {
        info!(vibrator = %self.id, duration_ms, "vibrate");
        println!("  {} ({} ms)", "~ bzzzzz ~".magenta().bold(), duration_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_vibrator_never_fails() {
        let mut vib = ConsoleVibrator::new("console");
        assert_eq!(vib.id(), "console");
        assert!(vib.vibrate(400).is_ok());
        assert!(vib.vibrate(0).is_ok());
    }
}
