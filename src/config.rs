// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plugin configuration supplied by the host at startup.
//!
//! The host hands the adapter a flat string mapping. Three keys matter:
//!
//! | Key | Meaning | Default |
//! |-----|---------|---------|
//! | `SerialPort` | serial device path | `/dev/ttyS0` |
//! | `Mode6` | [`DebugMode`] | `Normal` |
//! | `HomeFolder` | folder that receives `plugin.log` | empty |
//!
//! Every other key is kept so it shows up in the configuration dump.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameter key holding the serial port path.
pub const SERIAL_PORT_KEY: &str = "SerialPort";
/// Parameter key holding the debug mode.
pub const DEBUG_MODE_KEY: &str = "Mode6";
/// Parameter key holding the plugin home folder.
pub const HOME_FOLDER_KEY: &str = "HomeFolder";

/// Verbosity of the plugin log.
///
/// | Mode | Host debugging | `plugin.log` |
/// |------|----------------|--------------|
/// | `Normal` | off | no |
/// | `Debug` | on | yes |
/// | `File` | on | no |
///
/// # Examples
///
/// ```
/// use serial_switch::config::DebugMode;
///
/// let mode: DebugMode = "Debug".parse().unwrap();
/// assert!(mode.enables_debugging());
/// assert!(mode.writes_log_file());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DebugMode {
    /// Debug output suppressed.
    #[default]
    Normal,
    /// Debug output enabled and mirrored to `plugin.log`.
    Debug,
    /// Debug output enabled.
    File,
}

impl DebugMode {
    /// Returns the parameter value for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Debug => "Debug",
            Self::File => "File",
        }
    }

    /// Returns `true` if host debug logging should be switched on.
    #[must_use]
    pub const fn enables_debugging(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    /// Returns `true` if log lines are mirrored to `plugin.log`.
    // The host labels the `Debug` value "True" and `File` "Logging"; only
    // `Debug` has ever written the file.
    #[must_use]
    pub const fn writes_log_file(&self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for DebugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebugMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "Debug" => Ok(Self::Debug),
            "File" => Ok(Self::File),
            other => Err(ConfigError::InvalidDebugMode(other.to_string())),
        }
    }
}

/// Configuration of the adapter.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use serial_switch::config::{DebugMode, PluginConfig};
///
/// let mut params = BTreeMap::new();
/// params.insert("SerialPort".to_string(), "/dev/ttyUSB0".to_string());
/// params.insert("Mode6".to_string(), "Debug".to_string());
///
/// let config = PluginConfig::from_parameters(params).unwrap();
/// assert_eq!(config.serial_port(), "/dev/ttyUSB0");
/// assert_eq!(config.debug_mode(), DebugMode::Debug);
///
/// // Builder style
/// let config = PluginConfig::new()
///     .with_serial_port("/dev/ttyACM0")
///     .with_debug_mode(DebugMode::File);
/// assert_eq!(config.baud_rate(), 57_600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    serial_port: String,
    debug_mode: DebugMode,
    home_folder: PathBuf,
    parameters: BTreeMap<String, String>,
}

impl PluginConfig {
    /// Default serial port path.
    pub const DEFAULT_SERIAL_PORT: &'static str = "/dev/ttyS0";
    /// Baud rate of the serial link.
    pub const BAUD_RATE: u32 = 57_600;
    /// Name of the plugin log file inside the home folder.
    pub const LOG_FILE_NAME: &'static str = "plugin.log";

    /// Creates a configuration with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            SERIAL_PORT_KEY.to_string(),
            Self::DEFAULT_SERIAL_PORT.to_string(),
        );
        parameters.insert(
            DEBUG_MODE_KEY.to_string(),
            DebugMode::Normal.as_str().to_string(),
        );
        Self {
            serial_port: Self::DEFAULT_SERIAL_PORT.to_string(),
            debug_mode: DebugMode::Normal,
            home_folder: PathBuf::new(),
            parameters,
        }
    }

    /// Builds a configuration from the host's parameter mapping.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDebugMode` for an unknown `Mode6` value
    /// and `ConfigError::EmptySerialPort` if `SerialPort` is present but empty.
    pub fn from_parameters(parameters: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let serial_port = match parameters.get(SERIAL_PORT_KEY) {
            Some(port) if port.is_empty() => return Err(ConfigError::EmptySerialPort),
            Some(port) => port.clone(),
            None => Self::DEFAULT_SERIAL_PORT.to_string(),
        };
        let debug_mode = parameters
            .get(DEBUG_MODE_KEY)
            .map(|mode| mode.parse::<DebugMode>())
            .transpose()?
            .unwrap_or_default();
        let home_folder = parameters
            .get(HOME_FOLDER_KEY)
            .map(PathBuf::from)
            .unwrap_or_default();

        Ok(Self {
            serial_port,
            debug_mode,
            home_folder,
            parameters,
        })
    }

    /// Builds a configuration from a JSON object of string parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the input is not a flat object of
    /// strings, plus any error from [`Self::from_parameters`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parameters: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::from_parameters(parameters)
    }

    /// Sets the serial port path.
    #[must_use]
    pub fn with_serial_port(mut self, port: impl Into<String>) -> Self {
        self.serial_port = port.into();
        self.parameters
            .insert(SERIAL_PORT_KEY.to_string(), self.serial_port.clone());
        self
    }

    /// Sets the debug mode.
    #[must_use]
    pub fn with_debug_mode(mut self, mode: DebugMode) -> Self {
        self.debug_mode = mode;
        self.parameters
            .insert(DEBUG_MODE_KEY.to_string(), mode.as_str().to_string());
        self
    }

    /// Sets the folder that receives `plugin.log`.
    #[must_use]
    pub fn with_home_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.home_folder = folder.into();
        self.parameters.insert(
            HOME_FOLDER_KEY.to_string(),
            self.home_folder.to_string_lossy().into_owned(),
        );
        self
    }

    /// Returns the serial port path.
    #[must_use]
    pub fn serial_port(&self) -> &str {
        &self.serial_port
    }

    /// Returns the debug mode.
    #[must_use]
    pub fn debug_mode(&self) -> DebugMode {
        self.debug_mode
    }

    /// Returns the plugin home folder.
    #[must_use]
    pub fn home_folder(&self) -> &std::path::Path {
        &self.home_folder
    }

    /// Returns the serial baud rate.
    #[must_use]
    pub fn baud_rate(&self) -> u32 {
        Self::BAUD_RATE
    }

    /// Returns the full path of the plugin log file.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.home_folder.join(Self::LOG_FILE_NAME)
    }

    /// Returns every parameter the host supplied, in key order.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new()
    }
}
