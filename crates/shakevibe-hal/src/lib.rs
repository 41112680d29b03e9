//! `shakevibe-hal` – device abstraction layer
//!
//! The rest of the workspace only ever talks to the traits defined here, so
//! platform drivers can be swapped without touching detection logic.
//!
//! # Modules
//!
//! - [`accelerometer`] – [`Accelerometer`]: a tri-axial sensor whose listener
//!   is registered and unregistered explicitly by its owner.
//! - [`vibrator`] – [`Vibrator`]: a haptic motor pulsed for a duration.
//! - [`sim`] – replaying accelerometer, recording vibrator and sample-file
//!   parsing for headless runs and tests.

pub mod accelerometer;
pub mod sim;
pub mod vibrator;

pub use accelerometer::Accelerometer;
pub use sim::{PulseLog, SampleFeed, SimAccelerometer, SimVibrator};
pub use vibrator::Vibrator;
