//! [`App`] – lifecycle host tying the shake monitor, message store,
//! preferences and navigation together.
//!
//! The host drives it with screen lifecycle events:
//!
//! | Event | Effect |
//! |---|---|
//! | [`create`][App::create] | load the persisted draft and preferences, register the sensor |
//! | [`resume`][App::resume] | register the sensor |
//! | [`pause`][App::pause] | release the sensor |
//! | [`stop`][App::stop] | persist the draft |

use std::path::{Path, PathBuf};

use chrono::Local;
use shakevibe_types::{Screen, SensorSample, ShakeError};
use tracing::info;

use crate::message_store::{MESSAGES_FILE, MessageStore, PHOTO_FILE};
use crate::navigator::Navigator;
use crate::photo::create_image_file;
use crate::preferences::Preferences;
use crate::shake_monitor::ShakeMonitor;

pub struct App {
    monitor: ShakeMonitor,
    store: MessageStore,
    navigator: Navigator,
    preferences: Preferences,
    draft: String,
    last_photo: Option<PathBuf>,
    pictures_dir: PathBuf,
}

impl App {
    /// Pictures are written to `<data dir>/pictures` unless overridden with
    /// [`with_pictures_dir`][Self::with_pictures_dir].
    pub fn new(monitor: ShakeMonitor, store: MessageStore) -> Self {
        let pictures_dir = store.dir().join("pictures");
        Self {
            monitor,
            store,
            navigator: Navigator::new(),
            preferences: Preferences::default(),
            draft: String::new(),
            last_photo: None,
            pictures_dir,
        }
    }

    pub fn with_pictures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pictures_dir = dir.into();
        self
    }

    pub fn create(&mut self) -> Result<(), ShakeError> {
        self.draft = self.store.read(MESSAGES_FILE);
        let photo = self.store.read(PHOTO_FILE);
        self.last_photo = (!photo.is_empty()).then(|| PathBuf::from(photo));
        self.preferences = Preferences::load(self.store.dir());
        info!(draft_len = self.draft.len(), "app created");
        self.monitor.resume()
    }

    pub fn resume(&mut self) -> Result<(), ShakeError> {
        self.monitor.resume()
    }

    pub fn pause(&mut self) -> Result<(), ShakeError> {
        self.monitor.pause()
    }

    /// Persist the draft. Write failures are logged by the store and dropped.
    pub fn stop(&mut self) {
        self.store.write(MESSAGES_FILE, &self.draft);
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Open the display screen showing the current draft.
    pub fn send_message(&mut self) -> &Screen {
        self.navigator.send_message(self.draft.clone())
    }

    pub fn open_settings(&mut self) -> &Screen {
        self.navigator.open_settings()
    }

    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.current()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<(), ShakeError> {
        self.preferences.set(key, value)?;
        self.preferences.save(self.store.dir())
    }

    /// Create a new image file and remember its path.
    pub fn take_photo(&mut self) -> Result<&Path, ShakeError> {
        let path = create_image_file(&self.pictures_dir, &Local::now())?;
        self.store.write(PHOTO_FILE, &path.to_string_lossy());
        Ok(self.last_photo.insert(path).as_path())
    }

    pub fn last_photo(&self) -> Option<&Path> {
        self.last_photo.as_deref()
    }

    pub fn monitor(&self) -> &ShakeMonitor {
        &self.monitor
    }

    /// Feed one sample straight to the monitor.
    pub fn on_sample(&mut self, sample: &SensorSample) -> bool {
        self.monitor.handle_sample(sample)
    }

    /// Drain pending sensor samples. Returns the number of shakes.
    pub fn pump(&mut self) -> usize {
        self.monitor.pump()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion_gate::MotionGate;
    use crate::preferences::ListChoice;
    use shakevibe_hal::{PulseLog, SimAccelerometer, SimVibrator};

    fn app_in(dir: &Path, samples: Vec<SensorSample>) -> (App, PulseLog) {
        let vibrator = SimVibrator::new("vibrator");
        let log = vibrator.log();
        let accel = SimAccelerometer::new("accelerometer").with_samples(samples);
        let monitor = ShakeMonitor::new(MotionGate::new(), Box::new(accel), Box::new(vibrator));
        (App::new(monitor, MessageStore::new(dir)), log)
    }

    #[test]
    fn draft_survives_restart() {
        let dir = tempfile::tempdir().expect("tmp dir");

        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.create().unwrap();
        assert_eq!(app.draft(), "");
        app.set_draft("buy bread");
        app.stop();

        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.create().unwrap();
        assert_eq!(app.draft(), "buy bread");
    }

    #[test]
    fn create_registers_sensor_and_pause_releases_it() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let samples = vec![SensorSample::new(400.0, 400.0, 400.0, 200)];
        let (mut app, log) = app_in(dir.path(), samples);

        assert!(!app.monitor().is_active());
        app.create().unwrap();
        assert!(app.monitor().is_active());

        app.pause().unwrap();
        assert_eq!(app.pump(), 0);
        app.resume().unwrap();
        assert_eq!(app.pump(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn send_message_shows_draft() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.set_draft("hi");
        app.send_message();
        assert_eq!(
            app.screen(),
            &Screen::DisplayMessage {
                message: Some("hi".to_string())
            }
        );
        assert!(app.back());
        assert_eq!(app.screen(), &Screen::Main);
    }

    #[test]
    fn preferences_are_persisted_and_reloaded() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.create().unwrap();
        app.open_settings();
        app.set_preference("list", "two").unwrap();
        assert!(app.set_preference("nope", "x").is_err());

        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.create().unwrap();
        assert_eq!(app.preferences().list, ListChoice::Two);
    }

    #[test]
    fn photo_path_is_remembered() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let pictures = dir.path().join("camera");
        let (app, _) = app_in(dir.path(), Vec::new());
        let mut app = app.with_pictures_dir(&pictures);
        app.create().unwrap();
        assert!(app.last_photo().is_none());

        let path = app.take_photo().unwrap().to_path_buf();
        assert!(path.starts_with(&pictures));

        let (mut app, _) = app_in(dir.path(), Vec::new());
        app.create().unwrap();
        assert_eq!(app.last_photo(), Some(path.as_path()));
    }

    #[test]
    fn on_sample_reaches_gate() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let (mut app, log) = app_in(dir.path(), Vec::new());
        assert!(app.on_sample(&SensorSample::new(400.0, 400.0, 400.0, 200)));
        assert!(!app.on_sample(&SensorSample::new(1.0, 1.0, 1.0, 250)));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn failed_photo_keeps_previous_path() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a dir").unwrap();

        let (app, _) = app_in(dir.path(), Vec::new());
        let mut app = app.with_pictures_dir(blocker.join("pictures"));
        app.create().unwrap();

        assert!(matches!(app.take_photo(), Err(ShakeError::Storage { .. })));
        assert!(app.last_photo().is_none());
    }
}
