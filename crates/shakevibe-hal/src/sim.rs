//! In-process simulated devices for headless runs and tests.
//!
//! [`SimAccelerometer`] replays a recorded stream of [`SensorSample`]s and
//! [`SimVibrator`] records every pulse into a shared [`PulseLog`], so a test
//! can keep a handle on the log after the driver has been boxed and handed
//! to its owner.
//!
//! # Example
//!
//! ```rust
//! use shakevibe_hal::sim::{SimAccelerometer, SimVibrator};
//! use shakevibe_hal::{Accelerometer, Vibrator};
//! use shakevibe_types::SensorSample;
//!
//! let mut accel = SimAccelerometer::new("accelerometer")
//!     .with_samples([SensorSample::new(400.0, 400.0, 400.0, 200)]);
//! accel.start().unwrap();
//! assert!(accel.poll().is_some());
//!
//! let mut vib = SimVibrator::new("vibrator");
//! let log = vib.log();
//! vib.vibrate(400).unwrap();
//! assert_eq!(log.len(), 1);
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use shakevibe_types::{SensorSample, ShakeError, VibrationPulse};
use tracing::debug;

use crate::accelerometer::Accelerometer;
use crate::vibrator::Vibrator;

// ────────────────────────────────────────────────────────────────────────────
// Replay accelerometer
// ────────────────────────────────────────────────────────────────────────────

/// Shared, cloneable handle for queueing samples into a [`SimAccelerometer`]
/// after it has been moved into its owner.
#[derive(Clone, Default)]
pub struct SampleFeed(Arc<Mutex<VecDeque<SensorSample>>>);

impl SampleFeed {
    pub fn push(&self, sample: SensorSample) {
        self.queue().push_back(sample);
    }

    pub fn extend(&self, samples: impl IntoIterator<Item = SensorSample>) {
        self.queue().extend(samples);
    }

    /// Number of samples not yet delivered.
    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    fn pop(&self) -> Option<SensorSample> {
        self.queue().pop_front()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<SensorSample>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A simulated accelerometer that hands out queued samples in order while its
/// listener is registered.
pub struct SimAccelerometer {
    id: String,
    feed: SampleFeed,
    listening: bool,
}

impl SimAccelerometer {
    /// Create an empty simulated accelerometer with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            feed: SampleFeed::default(),
            listening: false,
        }
    }

    /// Append `samples` to the replay queue.
    pub fn with_samples(self, samples: impl IntoIterator<Item = SensorSample>) -> Self {
        self.feed.extend(samples);
        self
    }

    /// Queue a single sample.
    pub fn push(&mut self, sample: SensorSample) {
        self.feed.push(sample);
    }

    /// Number of samples not yet delivered.
    pub fn remaining(&self) -> usize {
        self.feed.remaining()
    }

    /// Handle for queueing more samples later.
    pub fn feed(&self) -> SampleFeed {
        self.feed.clone()
    }
}

impl Accelerometer for SimAccelerometer {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&mut self) -> Result<(), ShakeError> {
        self.listening = true;
        debug!(sensor = %self.id, queued = self.feed.remaining(), "listener registered");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ShakeError> {
        self.listening = false;
        debug!(sensor = %self.id, "listener unregistered");
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn poll(&mut self) -> Option<SensorSample> {
        if !self.listening {
            return None;
        }
        self.feed.pop()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recording vibrator
// ────────────────────────────────────────────────────────────────────────────

/// Shared, cloneable record of the pulses fired by a [`SimVibrator`].
#[derive(Clone, Default)]
pub struct PulseLog(Arc<Mutex<Vec<VibrationPulse>>>);

impl PulseLog {
    /// Snapshot of every pulse recorded so far, oldest first.
    pub fn pulses(&self) -> Vec<VibrationPulse> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, pulse: VibrationPulse) {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).push(pulse);
    }
}

/// A simulated vibration motor. Records every pulse; optionally fails every
/// request to exercise fault handling.
pub struct SimVibrator {
    id: String,
    log: PulseLog,
    faulty: bool,
}

impl SimVibrator {
    /// Create a working simulated vibrator with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            log: PulseLog::default(),
            faulty: false,
        }
    }

    /// Create a simulated vibrator whose every [`vibrate`][Vibrator::vibrate]
    /// call returns [`ShakeError::HardwareFault`].
    pub fn faulty(id: impl Into<String>) -> Self {
        Self {
            faulty: true,
            ..Self::new(id)
        }
    }

    /// Handle to the pulse record, valid after the driver has been moved.
    pub fn log(&self) -> PulseLog {
        self.log.clone()
    }
}

impl Vibrator for SimVibrator {
    fn id(&self) -> &str {
        &self.id
    }

    fn vibrate(&mut self, duration_ms: u64) -> Result<(), ShakeError> {
        if self.faulty {
            return Err(ShakeError::HardwareFault {
                component: self.id.clone(),
                details: "simulated motor fault".to_string(),
            });
        }
        self.log.record(VibrationPulse {
            duration_ms,
            timestamp: Utc::now().timestamp_millis(),
        });
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recorded sample streams
// ────────────────────────────────────────────────────────────────────────────

/// Parse a recorded sample stream.
///
/// Accepts either a JSON array of samples or one JSON sample object per line
/// (blank lines are skipped).
pub fn parse_samples(raw: &str) -> Result<Vec<SensorSample>, ShakeError> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| ShakeError::Serialization(e.to_string()));
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .map_err(|e| ShakeError::Serialization(format!("line {}: {}", n + 1, e)))
        })
        .collect()
}

/// Read and parse a recorded sample stream from `path`.
pub fn load_samples(path: &Path) -> Result<Vec<SensorSample>, ShakeError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ShakeError::Storage {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    parse_samples(&raw)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
