// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host events and the event pump.
//!
//! [`HostEvent`] names every callback a host can deliver. Hosts that call
//! the adapter from a single thread can use
//! [`SerialSwitchAdapter::handle_event`](crate::SerialSwitchAdapter::handle_event)
//! directly. Hosts that deliver events from several tasks hand the adapter to
//! an [`EventPump`], which queues events on a tokio channel and applies them
//! one at a time.
//!
//! # Examples
//!
//! ```
//! use serial_switch::SerialSwitchAdapter;
//! use serial_switch::config::PluginConfig;
//! use serial_switch::event::{EventPump, HostEvent};
//! use serial_switch::host::MemoryHost;
//!
//! # #[tokio::main]
//! # async fn main() -> serial_switch::Result<()> {
//! let host = MemoryHost::new();
//! let pump = EventPump::spawn(SerialSwitchAdapter::new(host.clone()));
//!
//! let sender = pump.sender();
//! sender.send(HostEvent::Start(PluginConfig::new())).await?;
//!
//! let adapter = pump.shutdown().await?;
//! assert_eq!(host.device_count(), 2);
//! # drop(adapter);
//! # Ok(())
//! # }
//! ```

mod host_event;
mod pump;

pub use host_event::{HostEvent, Notification};
pub use pump::{EventPump, EventSender};
