//! Configuration Vault – reads/writes `~/.shakevibe/config.toml`.

use serde::{Deserialize, Serialize};
use shakevibe_core::GateConfig;
use shakevibe_types::DEFAULT_VIBRATE_MS;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration stored in `~/.shakevibe/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the message, photo and preference files.  Defaults
    /// to `~/.shakevibe/data` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Speed above which a sample counts as a shake.
    #[serde(default = "default_shake_threshold")]
    pub shake_threshold: f64,

    /// Minimum spacing between accepted samples, in milliseconds.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: i64,

    /// Vibration length fired on a shake, in milliseconds.
    #[serde(default = "default_vibrate_ms")]
    pub vibrate_ms: u64,
}

fn default_shake_threshold() -> f64 {
    shakevibe_core::SHAKE_THRESHOLD
}
fn default_update_interval_ms() -> i64 {
    shakevibe_core::UPDATE_INTERVAL_MS
}
fn default_vibrate_ms() -> u64 {
    DEFAULT_VIBRATE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            shake_threshold: default_shake_threshold(),
            update_interval_ms: default_update_interval_ms(),
            vibrate_ms: default_vibrate_ms(),
        }
    }
}

impl Config {
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            update_interval_ms: self.update_interval_ms,
            shake_threshold: self.shake_threshold,
        }
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(home_dir()).join(".shakevibe").join("data"),
        }
    }

    /// Reject values that would make the gate meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.update_interval_ms < 0 {
            return Err("update_interval_ms must not be negative".to_string());
        }
        if !self.shake_threshold.is_finite() || self.shake_threshold < 0.0 {
            return Err("shake_threshold must be a non-negative number".to_string());
        }
        Ok(())
    }
}

fn home_dir() -> String {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string())
}

/// Return the path to `~/.shakevibe/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(&home_dir())
}

/// Build the config path relative to the given home directory.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".shakevibe").join("config.toml")
}

/// The effective configuration and whether it came from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: Config,
    /// `false` on first run, when the defaults were used.
    pub from_file: bool,
}

/// Load `~/.shakevibe/config.toml`, falling back to the defaults when it does
/// not exist. `SHAKEVIBE_*` overrides and validation apply either way.
pub fn load() -> Result<Loaded, String> {
    resolve(&config_path())
}

/// [`load`] against a specific path.
pub(crate) fn resolve(path: &Path) -> Result<Loaded, String> {
    let file = load_from(path)?;
    let from_file = file.is_some();
    let mut config = file.unwrap_or_default();
    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(Loaded { config, from_file })
}

/// Load the config from a specific path, without env overrides.
pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config = toml::from_str(&raw)
        .map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Apply `SHAKEVIBE_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `SHAKEVIBE_DATA_DIR` | `data_dir` |
/// | `SHAKEVIBE_THRESHOLD` | `shake_threshold` |
/// | `SHAKEVIBE_UPDATE_INTERVAL_MS` | `update_interval_ms` |
/// | `SHAKEVIBE_VIBRATE_MS` | `vibrate_ms` |
///
/// Unparsable numbers are ignored.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("SHAKEVIBE_DATA_DIR") {
        cfg.data_dir = Some(v);
    }
    if let Ok(v) = std::env::var("SHAKEVIBE_THRESHOLD")
        && let Ok(threshold) = v.parse::<f64>() {
            cfg.shake_threshold = threshold;
        }
    if let Ok(v) = std::env::var("SHAKEVIBE_UPDATE_INTERVAL_MS")
        && let Ok(ms) = v.parse::<i64>() {
            cfg.update_interval_ms = ms;
        }
    if let Ok(v) = std::env::var("SHAKEVIBE_VIBRATE_MS")
        && let Ok(ms) = v.parse::<u64>() {
            cfg.vibrate_ms = ms;
        }
}

/// Save the config to disk, creating `~/.shakevibe/` if necessary.
pub fn save(cfg: &Config) -> Result<(), String> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
        // Owner-only (rwx------) on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))
                .map_err(|e| format!("Failed to set config directory permissions: {}", e))?;
        }
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .and_then(|mut f| {
                use std::io::Write;
                f.write_all(raw.as_bytes())
            })
            .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    }
    #[cfg(not(unix))]
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    Ok(())
}
