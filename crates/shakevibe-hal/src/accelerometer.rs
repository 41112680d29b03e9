//! Generic `Accelerometer` trait for tri-axial motion sensors.
//!
//! A driver only delivers samples while its listener is registered
//! ([`Accelerometer::start`]). Owners register on resume and unregister on
//! pause so the sensor is never held while the screen is inactive.

use shakevibe_types::{SensorSample, ShakeError};

/// A tri-axial acceleration sensor delivering [`SensorSample`]s at its own
/// cadence.
pub trait Accelerometer: Send {
    /// Stable identifier for this sensor, e.g. `"accelerometer"`.
    fn id(&self) -> &str;

    /// Register the listener. Samples become available through
    /// [`poll`][Self::poll] until [`stop`][Self::stop] is called.
    ///
    /// # Errors
    ///
    /// Returns [`ShakeError::HardwareFault`] if the sensor cannot be acquired.
    fn start(&mut self) -> Result<(), ShakeError>;

    /// Unregister the listener and release the sensor.
    fn stop(&mut self) -> Result<(), ShakeError>;

    /// Whether the listener is currently registered.
    fn is_listening(&self) -> bool;

    /// Take the next pending sample, if any. Always `None` while stopped.
    fn poll(&mut self) -> Option<SensorSample>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAccelerometer {
        id: String,
        listening: bool,
        pending: Option<SensorSample>,
    }

    impl Accelerometer for MockAccelerometer {
        fn id(&self) -> &str {
            &self.id
        }

        fn start(&mut self) -> Result<(), ShakeError> {
            self.listening = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), ShakeError> {
            self.listening = false;
            Ok(())
        }

        fn is_listening(&self) -> bool {
            self.listening
        }

        fn poll(&mut self) -> Option<SensorSample> {
            if self.listening { self.pending.take() } else { None }
        }
    }

    #[test]
    fn mock_accelerometer_only_delivers_while_listening() {
        let mut acc = MockAccelerometer {
            id: "accel".to_string(),
            listening: false,
            pending: Some(SensorSample::new(1.0, 2.0, 3.0, 150)),
        };
        assert_eq!(acc.id(), "accel");
        assert!(acc.poll().is_none());

        acc.start().unwrap();
        assert!(acc.is_listening());
        let sample = acc.poll().expect("sample while listening");
        assert_eq!(sample.timestamp, 150);
        assert!(acc.poll().is_none());
    }
}
