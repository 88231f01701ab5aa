use std::{
    env, fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "worldclock";
const SETTINGS_FILE: &str = "settings.json";

/// Locations of the settings file and the display's log files.
///
/// Settings live under `$XDG_CONFIG_HOME/worldclock`, logs under
/// `$XDG_STATE_HOME/worldclock/logs`. Each falls back to its usual place
/// below `$HOME` when the XDG variable is unset or empty.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Directory holding the settings file.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set
    pub fn config_dir() -> Result<PathBuf, Error> {
        Self::app_dir(env_lookup, "XDG_CONFIG_HOME", ".config")
    }

    /// Path to the persisted settings file.
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined
    pub fn settings_file() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    /// Directory for the rolling log files, created if missing.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_STATE_HOME` nor `HOME` is set, or the
    /// directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::app_dir(env_lookup, "XDG_STATE_HOME", ".local/state")?.join("logs");
        fs::create_dir_all(&log_dir)?;
        Ok(log_dir)
    }

    /// Resolves `<xdg_var or $HOME/home_fallback>/worldclock` through `lookup`.
    pub(crate) fn app_dir(
        lookup: impl Fn(&str) -> Option<String>,
        xdg_var: &str,
        home_fallback: &str,
    ) -> Result<PathBuf, Error> {
        let base = match lookup(xdg_var) {
            Some(dir) => PathBuf::from(dir),
            None => lookup("HOME")
                .map(|home| PathBuf::from(home).join(home_fallback))
                .ok_or_else(|| {
                    Error::new(
                        ErrorKind::NotFound,
                        format!("Neither {xdg_var} nor HOME environment variable found"),
                    )
                })?,
        };

        Ok(base.join(APP_DIR))
    }
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
