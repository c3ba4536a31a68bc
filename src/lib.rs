// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serial Switch - bridges home-automation host events to two on/off
//! switches driven through a serial-attached RF transmitter.
//!
//! The host (the home-automation runtime) owns devices, connections and the
//! debug log, and exposes them through the [`Host`](host::Host) trait. The
//! [`SerialSwitchAdapter`] reacts to host events:
//!
//! - **start**: creates the "Serre" (unit 1) and "Afzuigkap" (unit 2)
//!   switches, resets both to off and opens the serial link at 57600 baud
//! - **connect / disconnect**: tracks the link and logs the outcome
//! - **message**: buffers received text and logs each complete line
//! - **command**: writes the switch command to the serial link and updates
//!   the device
//! - **notification / stop / heartbeat**: logging only
//!
//! The RF pulse sequences for the switches are not known yet. Every command
//! sends the same placeholder payload, see [`command::SwitchCommand`].
//!
//! # Quick Start
//!
//! ```
//! use serial_switch::SerialSwitchAdapter;
//! use serial_switch::config::PluginConfig;
//! use serial_switch::host::{ConnectionHandle, MemoryHost};
//!
//! # fn main() -> serial_switch::Result<()> {
//! let host = MemoryHost::new();
//! let mut adapter = SerialSwitchAdapter::new(host.clone());
//!
//! adapter.on_start(PluginConfig::from_json(r#"{"SerialPort":"/dev/ttyUSB0"}"#)?)?;
//! adapter.on_connect(ConnectionHandle::new(1), 0, "")?;
//!
//! adapter.on_message(b"20;00;Nodo RadioFrequencyLink;")?;
//! adapter.on_message(b"\r\n")?;
//!
//! adapter.on_command(2, "On", 0, 0)?;
//! assert_eq!(host.device(2).unwrap().s_value, "On");
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrent Hosts
//!
//! The adapter assumes events arrive one at a time. Hosts that deliver them
//! from several tasks should use [`event::EventPump`].

mod adapter;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod plugin_log;
pub mod receive;
pub mod state;
pub mod types;

pub use adapter::SerialSwitchAdapter;
pub use command::{SerialCommand, SwitchCommand};
pub use config::{DebugMode, PluginConfig};
pub use error::{ConfigError, Error, HostError, ParseError, Result};
pub use event::{EventPump, EventSender, HostEvent, Notification};
pub use host::{ConnectionHandle, DeviceRecord, Host, MemoryHost};
pub use types::{PowerState, SwitchUnit};
