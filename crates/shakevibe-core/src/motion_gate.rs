//! [`MotionGate`] – shake detection with a debounce interval.
//!
//! Each accepted sample is compared against the previously accepted one. The
//! "speed" metric is the absolute change in the axis sum, scaled by the
//! elapsed time:
//!
//! ```text
//! speed = |x + y + z - last_x - last_y - last_z| / elapsed * 10000
//! ```
//!
//! Samples arriving within `update_interval_ms` of the last accepted sample
//! are dropped without touching state. The interval check runs before the
//! division and the interval is never negative, so `elapsed` is always
//! strictly positive when it is divided by. `elapsed` saturates instead of
//! overflowing on extreme timestamps.
//!
//! # Example
//!
//! ```
//! use shakevibe_core::MotionGate;
//!
//! let mut gate = MotionGate::new();
//! assert!(gate.on_sample(400.0, 400.0, 400.0, 200));
//! // Too soon after the last accepted sample: dropped.
//! assert!(!gate.on_sample(-400.0, -400.0, -400.0, 250));
//! ```

use serde::{Deserialize, Serialize};
use shakevibe_types::SensorSample;
use tracing::{debug, trace};

/// Default minimum spacing between accepted samples.
pub const UPDATE_INTERVAL_MS: i64 = 100;

/// Default speed above which a sample counts as a shake.
pub const SHAKE_THRESHOLD: f64 = 1000.0;

const SPEED_SCALE: f64 = 10_000.0;

/// Tunables for a [`MotionGate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub update_interval_ms: i64,
    pub shake_threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: UPDATE_INTERVAL_MS,
            shake_threshold: SHAKE_THRESHOLD,
        }
    }
}

/// The last accepted sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionGateState {
    pub last_x: f32,
    pub last_y: f32,
    pub last_z: f32,
    pub last_update: i64,
}

/// Decides from a stream of accelerometer samples when to signal a shake.
///
/// Single-threaded: takes `&mut self` and performs no locking. Hosts that
/// deliver samples from several threads must serialize calls themselves.
#[derive(Debug, Clone, Default)]
pub struct MotionGate {
    config: GateConfig,
    state: MotionGateState,
}

impl MotionGate {
    /// Create a gate with the default interval and threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// A negative `update_interval_ms` is clamped to zero.
    pub fn with_config(config: GateConfig) -> Self {
        Self {
            config: GateConfig {
                update_interval_ms: config.update_interval_ms.max(0),
                ..config
            },
            state: MotionGateState::default(),
        }
    }

    pub fn config(&self) -> GateConfig {
        self.config
    }

    pub fn state(&self) -> MotionGateState {
        self.state
    }

    /// Forget the last accepted sample.
    pub fn reset(&mut self) {
        self.state = MotionGateState::default();
    }

    /// Feed one sample. Returns `true` when the motion since the last accepted
    /// sample exceeds the shake threshold.
    pub fn on_sample(&mut self, x: f32, y: f32, z: f32, timestamp: i64) -> bool {
        let elapsed = timestamp.saturating_sub(self.state.last_update);
        if elapsed <= self.config.update_interval_ms {
            trace!(elapsed, "sample dropped inside update interval");
            return false;
        }

        let current = f64::from(x) + f64::from(y) + f64::from(z);
        let last = f64::from(self.state.last_x)
            + f64::from(self.state.last_y)
            + f64::from(self.state.last_z);
        let speed = (current - last).abs() / elapsed as f64 * SPEED_SCALE;

        self.state = MotionGateState {
            last_x: x,
            last_y: y,
            last_z: z,
            last_update: timestamp,
        };

        let shaken = speed > self.config.shake_threshold;
        if shaken {
            debug!(speed, threshold = self.config.shake_threshold, "shake detected");
        }
        shaken
    }

    /// [`on_sample`][Self::on_sample] for an owned [`SensorSample`].
    pub fn on(&mut self, sample: &SensorSample) -> bool {
        self.on_sample(sample.x, sample.y, sample.z, sample.timestamp)
    }
}
