// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The plugin log sink.
//!
//! Every plugin log line goes to the host's debug log. In
//! [`DebugMode::Debug`](crate::config::DebugMode::Debug) it is also appended
//! to `plugin.log` in the plugin home folder, one CRLF-terminated line per
//! call. The file is recreated whenever the adapter starts.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::PluginConfig;
use crate::error::Result;
use crate::host::Host;

/// Line terminator used in `plugin.log`.
pub const LINE_ENDING: &str = "\r\n";

/// First line of a freshly created `plugin.log`.
pub const START_LINE: &str = "Plugin started.";

/// Destination of plugin log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginLog {
    file: Option<PathBuf>,
}

impl PluginLog {
    /// Creates a sink that only writes to the host.
    #[must_use]
    pub fn host_only() -> Self {
        Self::default()
    }

    /// Creates the sink for `config`, truncating `plugin.log` when the
    /// configuration asks for it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if the log file cannot be created.
    pub fn for_config(config: &PluginConfig) -> Result<Self> {
        if !config.debug_mode().writes_log_file() {
            return Ok(Self::host_only());
        }

        let path = config.log_file_path();
        let mut file = File::create(&path)?;
        write!(file, "{START_LINE}{LINE_ENDING}")?;
        tracing::debug!(path = %path.display(), "Created plugin log file");

        Ok(Self { file: Some(path) })
    }

    /// Returns the log file path, if lines are mirrored to a file.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Writes one line.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if the log file cannot be appended to. The host
    /// has already received the line by then.
    pub fn write<H: Host>(&self, host: &mut H, message: &str) -> Result<()> {
        host.debug(message);
        tracing::trace!(line = message, "Plugin log");

        if let Some(path) = &self.file {
            let mut file = OpenOptions::new().append(true).create(true).open(path)?;
            write!(file, "{message}{LINE_ENDING}")?;
        }
        Ok(())
    }
}
