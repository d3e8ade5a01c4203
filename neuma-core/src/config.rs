//! TOML configuration: embedded defaults merged with a user override file,
//! plus the live [`Settings`] service the session components subscribe to.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use serde::Deserialize;

use crate::notify::Subscribers;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const MIN_INTERVAL_MINUTES: u64 = 1;
const MAX_INTERVAL_MINUTES: u64 = 10_080; // one week

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    autosave: AutosaveConfig,
}

#[derive(Deserialize, Default)]
struct AutosaveConfig {
    enabled: Option<bool>,
    interval_minutes: Option<u64>,
}

/// Configuration as loaded at startup.
pub struct Config {
    autosave: AutosaveConfig,
}

impl Default for Config {
    /// The embedded defaults, with no user override applied.
    fn default() -> Self {
        let file: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");
        Config {
            autosave: file.autosave,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge_autosave(&mut base.autosave, user.autosave),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            autosave: base.autosave,
        }
    }

    /// Whether periodic autosave is enabled.
    pub fn autosave_enabled(&self) -> bool {
        self.autosave.enabled.unwrap_or(true)
    }

    /// Autosave interval in minutes (clamped to 1..10080).
    pub fn autosave_interval_minutes(&self) -> u64 {
        self.autosave
            .interval_minutes
            .unwrap_or(2)
            .clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("neuma").join("config.toml"))
}

fn merge_autosave(base: &mut AutosaveConfig, user: AutosaveConfig) {
    if user.enabled.is_some() {
        base.enabled = user.enabled;
    }
    if user.interval_minutes.is_some() {
        base.interval_minutes = user.interval_minutes;
    }
}

/// Live configuration service.
///
/// Holds the current autosave settings and notifies subscribers when a value
/// actually changes. Setting a value equal to the current one is a no-op.
pub struct Settings {
    autosave_enabled: bool,
    autosave_interval_minutes: u64,
    enabled_subs: Subscribers<bool>,
    interval_subs: Subscribers<u64>,
}

impl Settings {
    pub fn new(config: &Config) -> Self {
        Settings {
            autosave_enabled: config.autosave_enabled(),
            autosave_interval_minutes: config.autosave_interval_minutes(),
            enabled_subs: Subscribers::new(),
            interval_subs: Subscribers::new(),
        }
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    pub fn set_autosave_enabled(&mut self, enabled: bool) {
        if enabled == self.autosave_enabled {
            return;
        }
        self.autosave_enabled = enabled;
        self.enabled_subs.notify(enabled);
    }

    /// Subscribe to changes of the autosave enabled flag.
    pub fn autosave_enabled_changed(&mut self) -> Receiver<bool> {
        self.enabled_subs.subscribe()
    }

    pub fn autosave_interval_minutes(&self) -> u64 {
        self.autosave_interval_minutes
    }

    pub fn set_autosave_interval_minutes(&mut self, minutes: u64) {
        let minutes = minutes.clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES);
        if minutes == self.autosave_interval_minutes {
            return;
        }
        self.autosave_interval_minutes = minutes;
        self.interval_subs.notify(minutes);
    }

    /// Subscribe to changes of the autosave interval (minutes).
    pub fn autosave_interval_changed(&mut self) -> Receiver<u64> {
        self.interval_subs.subscribe()
    }
}
