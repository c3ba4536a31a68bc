// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial connection lifecycle.

use std::fmt;

use serde::Serialize;

/// Lifecycle of the serial connection.
///
/// ```text
/// Disconnected --open--> Connecting --status 0--> Connected
///      ^                      |                       |
///      +------- failure ------+------ disconnect -----+
/// ```
///
/// Every transition is driven by a host event. The adapter never reconnects
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LinkState {
    /// No connection attempt in flight.
    #[default]
    Disconnected,
    /// The host is connecting.
    Connecting,
    /// The host reported a successful connect.
    Connected,
}

impl LinkState {
    /// State after the adapter asked the host to open the connection.
    #[must_use]
    pub const fn on_open(self) -> Self {
        Self::Connecting
    }

    /// State after the host reported a connect result.
    #[must_use]
    pub const fn on_connect_result(self, status: i32) -> Self {
        if status == 0 {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    /// State after the host reported a disconnect.
    #[must_use]
    pub const fn on_disconnect(self) -> Self {
        Self::Disconnected
    }

    /// Returns `true` once the host reported a successful connect.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns a lowercase label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
