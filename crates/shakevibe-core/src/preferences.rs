//! User preferences shown on the settings screen.
//!
//! Three preference kinds are supported: a checkbox, a single-choice list and
//! a free-text field. They are stored as TOML next to the message files and
//! carry no meaning for shake detection.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakevibe_types::ShakeError;
use tracing::warn;

pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Options of the single-choice list preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListChoice {
    #[default]
    One,
    Two,
    Three,
}

impl ListChoice {
    pub const ALL: [ListChoice; 3] = [ListChoice::One, ListChoice::Two, ListChoice::Three];
}

impl fmt::Display for ListChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListChoice::One => write!(f, "one"),
            ListChoice::Two => write!(f, "two"),
            ListChoice::Three => write!(f, "three"),
        }
    }
}

impl FromStr for ListChoice {
    type Err = ShakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one" | "1" => Ok(ListChoice::One),
            "two" | "2" => Ok(ListChoice::Two),
            "three" | "3" => Ok(ListChoice::Three),
            other => Err(ShakeError::InvalidPreference(format!(
                "'{other}' is not one of one, two, three"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub checkbox: bool,
    #[serde(default)]
    pub list: ListChoice,
    #[serde(default)]
    pub text: String,
}

impl Preferences {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(PREFERENCES_FILE)
    }

    /// Load from `dir`, falling back to defaults when the file is missing or
    /// cannot be parsed.
    pub fn load(dir: &Path) -> Self {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|raw| toml::from_str::<Preferences>(&raw).map_err(|e| e.to_string()))
        {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preferences unreadable; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), ShakeError> {
        let path = Self::path_in(dir);
        let raw = toml::to_string_pretty(self)
            .map_err(|e| ShakeError::Serialization(e.to_string()))?;
        fs::create_dir_all(dir)
            .and_then(|()| fs::write(&path, raw))
            .map_err(|e| ShakeError::Storage {
                path: path.display().to_string(),
                details: e.to_string(),
            })
    }

    /// Set a preference from its textual form.
    ///
    /// Keys are `checkbox` (`true`/`false`/`on`/`off`), `list`
    /// (`one`/`two`/`three`) and `text` (any string).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ShakeError> {
        match key {
            "checkbox" => {
                self.checkbox = match value.trim().to_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(ShakeError::InvalidPreference(format!(
                            "'{other}' is not a boolean"
                        )));
                    }
                };
            }
            "list" => self.list = value.parse()?,
            "text" => self.text = value.to_string(),
            other => {
                return Err(ShakeError::InvalidPreference(format!("unknown key '{other}'")));
            }
        }
        Ok(())
    }
}
