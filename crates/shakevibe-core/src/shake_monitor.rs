//! [`ShakeMonitor`] – owns a [`MotionGate`] together with the devices it
//! reads from and drives.
//!
//! The accelerometer and vibrator are injected at construction. The monitor
//! registers the sensor listener on [`resume`][ShakeMonitor::resume] and
//! releases it on [`pause`][ShakeMonitor::pause], so the sensor is only held
//! while the owning screen is visible.

use shakevibe_hal::{Accelerometer, Vibrator};
use shakevibe_types::{DEFAULT_VIBRATE_MS, SensorSample, ShakeError};
use tracing::{info, warn};

use crate::motion_gate::MotionGate;

pub struct ShakeMonitor {
    gate: MotionGate,
    accelerometer: Box<dyn Accelerometer>,
    vibrator: Box<dyn Vibrator>,
    vibrate_ms: u64,
}

impl ShakeMonitor {
    /// Build a monitor with the default 400 ms pulse. The accelerometer is not
    /// registered until [`resume`][Self::resume] is called.
    pub fn new(
        gate: MotionGate,
        accelerometer: Box<dyn Accelerometer>,
        vibrator: Box<dyn Vibrator>,
    ) -> Self {
        Self {
            gate,
            accelerometer,
            vibrator,
            vibrate_ms: DEFAULT_VIBRATE_MS,
        }
    }

    pub fn with_vibrate_ms(mut self, vibrate_ms: u64) -> Self {
        self.vibrate_ms = vibrate_ms;
        self
    }

    pub fn gate(&self) -> &MotionGate {
        &self.gate
    }

    pub fn vibrate_ms(&self) -> u64 {
        self.vibrate_ms
    }

    pub fn is_active(&self) -> bool {
        self.accelerometer.is_listening()
    }

    /// Register the accelerometer listener. No-op when already active.
    pub fn resume(&mut self) -> Result<(), ShakeError> {
        if self.is_active() {
            return Ok(());
        }
        self.accelerometer.start()?;
        info!(sensor = %self.accelerometer.id(), "shake monitor resumed");
        Ok(())
    }

    /// Release the accelerometer listener. No-op when already paused.
    pub fn pause(&mut self) -> Result<(), ShakeError> {
        if !self.is_active() {
            return Ok(());
        }
        self.accelerometer.stop()?;
        info!(sensor = %self.accelerometer.id(), "shake monitor paused");
        Ok(())
    }

    /// Run one sample through the gate and vibrate on a shake.
    ///
    /// Returns the gate decision. A vibrator failure is logged and does not
    /// change the result.
    pub fn handle_sample(&mut self, sample: &SensorSample) -> bool {
        let shaken = self.gate.on(sample);
        if shaken && let Err(e) = self.vibrator.vibrate(self.vibrate_ms) {
            warn!(vibrator = %self.vibrator.id(), error = %e, "vibration failed");
        }
        shaken
    }

    /// Drain every sample currently pending on the accelerometer. Returns the
    /// number of shakes detected. Drains nothing while paused.
    pub fn pump(&mut self) -> usize {
        let mut shakes = 0;
        while let Some(sample) = self.accelerometer.poll() {
            if self.handle_sample(&sample) {
                shakes += 1;
            }
        }
        shakes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakevibe_hal::{PulseLog, SimAccelerometer, SimVibrator};

    fn shake_stream() -> Vec<SensorSample> {
        vec![
            SensorSample::new(400.0, 400.0, 400.0, 200), // shake
            SensorSample::new(0.0, 0.0, 0.0, 250),       // dropped
            SensorSample::new(400.0, 400.0, 400.0, 400), // still
            SensorSample::new(0.0, 0.0, 0.0, 600),       // shake
            SensorSample::new(0.1, 0.1, 0.1, 800),       // still
        ]
    }

    fn monitor(samples: Vec<SensorSample>) -> (ShakeMonitor, PulseLog) {
        let vibrator = SimVibrator::new("vibrator");
        let log = vibrator.log();
        let accel = SimAccelerometer::new("accelerometer").with_samples(samples);
        (
            ShakeMonitor::new(MotionGate::new(), Box::new(accel), Box::new(vibrator)),
            log,
        )
    }

    #[test]
    fn pump_vibrates_once_per_shake() {
        let (mut mon, log) = monitor(shake_stream());
        mon.resume().unwrap();
        assert_eq!(mon.pump(), 2);

        let pulses = log.pulses();
        assert_eq!(pulses.len(), 2);
        assert!(pulses.iter().all(|p| p.duration_ms == DEFAULT_VIBRATE_MS));
    }

    #[test]
    fn paused_monitor_drains_nothing() {
        let (mut mon, log) = monitor(shake_stream());
        assert!(!mon.is_active());
        assert_eq!(mon.pump(), 0);
        assert!(log.is_empty());
        assert_eq!(mon.gate().state().last_update, 0);
    }

    #[test]
    fn pause_and_resume_toggle_listener() {
        let (mut mon, _log) = monitor(Vec::new());
        mon.resume().unwrap();
        assert!(mon.is_active());
        mon.resume().unwrap();
        assert!(mon.is_active());
        mon.pause().unwrap();
        assert!(!mon.is_active());
        mon.pause().unwrap();
        assert!(!mon.is_active());
    }

    #[test]
    fn custom_pulse_length_is_used() {
        let (mon, log) = monitor(Vec::new());
        let mut mon = mon.with_vibrate_ms(150);
        assert!(mon.handle_sample(&SensorSample::new(400.0, 400.0, 400.0, 200)));
        assert_eq!(log.pulses()[0].duration_ms, 150);
        assert_eq!(mon.vibrate_ms(), 150);
    }

    #[test]
    fn vibrator_fault_does_not_propagate() {
        let accel = SimAccelerometer::new("accelerometer");
        let mut mon = ShakeMonitor::new(
            MotionGate::new(),
            Box::new(accel),
            Box::new(SimVibrator::faulty("vibrator")),
        );
        assert!(mon.handle_sample(&SensorSample::new(400.0, 400.0, 400.0, 200)));
        assert_eq!(mon.gate().state().last_update, 200);
    }

    #[test]
    fn quiet_sample_does_not_vibrate() {
        let (mut mon, log) = monitor(Vec::new());
        assert!(!mon.handle_sample(&SensorSample::new(1.0, 1.0, 1.0, 200)));
        assert!(log.is_empty());
    }
}
