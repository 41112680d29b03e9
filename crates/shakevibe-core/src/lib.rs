//! `shakevibe-core` – shake detection and the application around it
//!
//! # Modules
//!
//! - [`motion_gate`] – [`MotionGate`]: debounced shake detection over a
//!   stream of accelerometer samples.
//! - [`shake_monitor`] – [`ShakeMonitor`]: owns a gate plus the injected
//!   accelerometer and vibrator; registers the sensor only while active.
//! - [`message_store`] – [`MessageStore`]: single-string files that read as
//!   empty on failure and drop failed writes.
//! - [`preferences`] – [`Preferences`]: checkbox, list and text settings.
//! - [`navigator`] – [`Navigator`]: main, display-message and settings screens.
//! - [`photo`] – unique image file creation and capture notices.
//! - [`app`] – [`App`]: lifecycle host composing all of the above.

pub mod app;
pub mod message_store;
pub mod motion_gate;
pub mod navigator;
pub mod photo;
pub mod preferences;
pub mod shake_monitor;

pub use app::App;
pub use message_store::{MESSAGES_FILE, MessageStore, PHOTO_FILE};
pub use motion_gate::{GateConfig, MotionGate, MotionGateState, SHAKE_THRESHOLD, UPDATE_INTERVAL_MS};
pub use navigator::Navigator;
pub use photo::{CaptureOutcome, create_image_file};
pub use preferences::{ListChoice, Preferences};
pub use shake_monitor::ShakeMonitor;
