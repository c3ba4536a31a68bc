// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The host capability set.
//!
//! The home-automation host owns devices, connections and the debug log. The
//! adapter only talks to it through the [`Host`] trait, so any runtime that
//! can create and update devices, open a connection, send bytes and print a
//! line can drive it.
//!
//! [`MemoryHost`] is an in-memory implementation that records every call.

mod memory;

pub use memory::MemoryHost;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::types::{PowerState, SwitchUnit};

/// Capabilities the adapter needs from its host.
///
/// The host delivers events one at a time, so every method takes `&mut self`
/// and none is expected to block.
pub trait Host {
    /// Switches the host's debug output on or off.
    fn set_debugging(&mut self, enabled: bool);

    /// Writes one line to the host's debug log.
    fn debug(&mut self, message: &str);

    /// Returns a snapshot of the devices the host holds for this plugin,
    /// ordered by unit id.
    fn devices(&self) -> Vec<DeviceRecord>;

    /// Creates a device.
    ///
    /// # Errors
    ///
    /// Returns `HostError::DeviceCreation` if the host refuses.
    fn create_device(&mut self, spec: &DeviceSpec) -> Result<(), HostError>;

    /// Updates the numeric and descriptive value of a device.
    ///
    /// # Errors
    ///
    /// Returns `HostError::UnknownDevice` if no device has that unit.
    fn update_device(&mut self, unit: u8, n_value: i32, s_value: &str) -> Result<(), HostError>;

    /// Creates a connection and starts connecting it.
    ///
    /// The outcome of the connection attempt is delivered later as a
    /// connect event.
    ///
    /// # Errors
    ///
    /// Returns `HostError::ConnectionRefused` if the connection cannot even
    /// be created.
    fn open_connection(&mut self, spec: &ConnectionSpec) -> Result<ConnectionHandle, HostError>;

    /// Sends bytes over a connection.
    ///
    /// # Errors
    ///
    /// Returns `HostError::UnknownConnection` or `HostError::SendFailed`.
    fn send(&mut self, connection: ConnectionHandle, payload: &[u8]) -> Result<(), HostError>;
}

/// Host-side identifier of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionHandle(u32);

impl ConnectionHandle {
    /// Wraps a host connection id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Conn({})", self.0)
    }
}

/// Attributes of a device to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Display name.
    pub name: String,
    /// Unit id within the plugin.
    pub unit: u8,
    /// Host device type.
    pub device_type: u8,
    /// Host device subtype.
    pub subtype: u8,
    /// Host switch type.
    pub switch_type: u8,
    /// Whether the device shows up as used.
    pub used: bool,
    /// Host image index.
    pub image: u8,
}

impl DeviceSpec {
    /// Device type for lights and switches.
    pub const TYPE_LIGHT_SWITCH: u8 = 244;
    /// Subtype for a plain switch.
    pub const SUBTYPE_SWITCH: u8 = 73;
    /// Switch type for on/off.
    pub const SWITCH_TYPE_ON_OFF: u8 = 0;

    /// Returns the spec of a managed on/off switch.
    ///
    /// # Examples
    ///
    /// ```
    /// use serial_switch::host::DeviceSpec;
    /// use serial_switch::types::SwitchUnit;
    ///
    /// let spec = DeviceSpec::switch(SwitchUnit::ExtractorHood);
    /// assert_eq!(spec.name, "Afzuigkap");
    /// assert_eq!(spec.unit, 2);
    /// assert_eq!(spec.device_type, 244);
    /// ```
    #[must_use]
    pub fn switch(unit: SwitchUnit) -> Self {
        Self {
            name: unit.device_name().to_string(),
            unit: unit.value(),
            device_type: Self::TYPE_LIGHT_SWITCH,
            subtype: Self::SUBTYPE_SWITCH,
            switch_type: Self::SWITCH_TYPE_ON_OFF,
            used: true,
            image: 0,
        }
    }
}

/// A device as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Host-wide device id.
    pub id: u32,
    /// Unit id within the plugin.
    pub unit: u8,
    /// Display name.
    pub name: String,
    /// Numeric value.
    pub n_value: i32,
    /// Descriptive value.
    pub s_value: String,
    /// Last-known level.
    pub last_level: i32,
    /// When the host last updated the device.
    pub last_update: Option<DateTime<Utc>>,
}

impl DeviceRecord {
    /// Interprets the numeric value as a switch state.
    ///
    /// Any value other than `0` and `1` yields `None`.
    #[must_use]
    pub fn power_state(&self) -> Option<PowerState> {
        match self.n_value {
            0 => Some(PowerState::Off),
            1 => Some(PowerState::On),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unit: {}, Name: '{}', nValue: {}, sValue: '{}'",
            self.unit, self.name, self.n_value, self.s_value
        )
    }
}

/// Parameters of the outbound serial connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    /// Connection name shown by the host.
    pub name: String,
    /// Serial device path.
    pub address: String,
    /// Baud rate.
    pub baud: u32,
    /// Transport kind requested from the host.
    pub transport: String,
    /// Framing protocol requested from the host.
    pub protocol: String,
}

impl ConnectionSpec {
    /// Name the connection is registered under.
    pub const NAME: &'static str = "RFLink-alt";
    /// Transport kind.
    pub const TRANSPORT: &'static str = "Serial";
    /// Protocol kind; the stream is passed through untouched.
    pub const PROTOCOL: &'static str = "None";

    /// Creates a serial connection spec.
    #[must_use]
    pub fn serial(address: impl Into<String>, baud: u32) -> Self {
        Self {
            name: Self::NAME.to_string(),
            address: address.into(),
            baud,
            transport: Self::TRANSPORT.to_string(),
            protocol: Self::PROTOCOL.to_string(),
        }
    }
}
