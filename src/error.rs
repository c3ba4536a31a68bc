// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the serial switch adapter.
//!
//! The adapter reports almost everything through its log sink. The errors
//! below cover what cannot be logged away: malformed configuration, bytes
//! that are not text, failures of the host capability set, and a plugin log
//! file that cannot be written.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The host parameters could not be turned into a configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Received data could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A host capability call failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The plugin log file could not be written.
    #[error("log file error: {0}")]
    Log(#[from] std::io::Error),

    /// A command arrived before the serial connection was opened.
    #[error("serial connection is not open")]
    NotConnected,

    /// The event pump is no longer accepting events.
    #[error("event pump closed: {0}")]
    PumpClosed(String),
}

/// Errors related to the host-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The debug mode parameter holds an unknown value.
    #[error("invalid debug mode: {0}")]
    InvalidDebugMode(String),

    /// The serial port parameter is present but empty.
    #[error("serial port must not be empty")]
    EmptySerialPort,

    /// The parameter blob is not a JSON object of strings.
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to decoding data received over the serial connection.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The received chunk is not valid UTF-8.
    #[error("received data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors reported by a [`Host`](crate::host::Host) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused to create a device.
    #[error("cannot create device for unit {unit}: {reason}")]
    DeviceCreation {
        /// The unit that was being created.
        unit: u8,
        /// Why the host refused.
        reason: String,
    },

    /// The addressed device does not exist on the host.
    #[error("no device with unit {0}")]
    UnknownDevice(u8),

    /// The host could not open the connection.
    #[error("cannot open connection to {address}: {reason}")]
    ConnectionRefused {
        /// The address that was requested.
        address: String,
        /// Why the host refused.
        reason: String,
    },

    /// The connection handle is not known to the host.
    #[error("unknown connection {0}")]
    UnknownConnection(u32),

    /// The host could not send the payload.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
