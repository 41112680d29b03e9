use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One accelerometer reading: three axis components plus the capture time in
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Capture time in milliseconds on the host clock.
    pub timestamp: i64,
}

impl SensorSample {
    pub fn new(x: f32, y: f32, z: f32, timestamp: i64) -> Self {
        Self { x, y, z, timestamp }
    }

    /// Stamp a reading with the current wall-clock time.
    pub fn now(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, Utc::now().timestamp_millis())
    }
}

/// A single vibration request as recorded by a vibrator driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationPulse {
    pub duration_ms: u64,
    /// Milliseconds since the Unix epoch at which the pulse was requested.
    pub timestamp: i64,
}

/// Default vibration length fired on a detected shake.
pub const DEFAULT_VIBRATE_MS: u64 = 400;

/// The screens a user can navigate between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "payload")]
pub enum Screen {
    /// Message editor and shake monitor.
    Main,
    /// Read-only view of a sent message. `None` when nothing was passed in.
    DisplayMessage { message: Option<String> },
    Settings,
}

/// Global error type spanning device failures, storage and preference errors.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ShakeError {
    #[error("Hardware Fault on {component}: {details}")]
    HardwareFault { component: String, details: String },

    #[error("Storage error at {path}: {details}")]
    Storage { path: String, details: String },

    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_sample_parses_from_json() {
        let json = r#"{"x":1.5,"y":-2.0,"z":9.81,"timestamp":1200}"#;
        let sample: SensorSample = serde_json::from_str(json).unwrap();
        assert!((sample.x - 1.5).abs() < f32::EPSILON);
        assert!((sample.y - (-2.0)).abs() < f32::EPSILON);
        assert_eq!(sample.timestamp, 1200);
    }

    #[test]
    fn sensor_sample_now_uses_current_time() {
        let before = Utc::now().timestamp_millis();
        let sample = SensorSample::now(0.0, 0.0, 0.0);
        let after = Utc::now().timestamp_millis();
        assert!(sample.timestamp >= before && sample.timestamp <= after);
    }

    #[test]
    fn display_screen_carries_message() {
        let screen = Screen::DisplayMessage {
            message: Some("hello".to_string()),
        };
        let json = serde_json::to_string(&screen).unwrap();
        assert!(json.contains("DisplayMessage"));
        let back: Screen = serde_json::from_str(&json).unwrap();
        assert_eq!(back, screen);
    }

    #[test]
    fn shake_error_display() {
        let err = ShakeError::HardwareFault {
            component: "vibrator".to_string(),
            details: "motor stalled".to_string(),
        };
        assert!(err.to_string().contains("vibrator"));

        let err2 = ShakeError::Storage {
            path: "/tmp/messages".to_string(),
            details: "permission denied".to_string(),
        };
        assert!(err2.to_string().contains("/tmp/messages"));

        let err3 = ShakeError::InvalidPreference("unknown key 'volume'".to_string());
        assert!(err3.to_string().starts_with("Invalid preference"));
    }
}
