//! Generic `Vibrator` trait for haptic motors.

use shakevibe_types::ShakeError;

/// A vibration motor that can be pulsed for a fixed duration.
pub trait Vibrator: Send {
    /// Stable identifier for this motor, e.g. `"vibrator"`.
    fn id(&self) -> &str;

    /// Vibrate for `duration_ms` milliseconds. Drivers must not block the
    /// caller for the length of the pulse.
    ///
    /// # Errors
    ///
    /// Returns [`ShakeError::HardwareFault`] if the motor cannot be driven.
    fn vibrate(&mut self, duration_ms: u64) -> Result<(), ShakeError>;
}
