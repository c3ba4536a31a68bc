// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::{ConnectionHandle, ConnectionSpec, DeviceRecord, DeviceSpec, Host};
use crate::error::HostError;

#[derive(Debug, Default)]
struct MemoryHostState {
    debugging: bool,
    debug_lines: Vec<String>,
    devices: BTreeMap<u8, DeviceRecord>,
    next_device_id: u32,
    connections: Vec<ConnectionSpec>,
    sends: Vec<(ConnectionHandle, Vec<u8>)>,
    refuse_connections: Option<String>,
    fail_sends: Option<String>,
}

/// A [`Host`] that keeps everything in memory and records every call.
///
/// Clones share the same state, so one clone can be handed to the adapter
/// (or moved into an [`EventPump`](crate::event::EventPump)) while another
/// is kept for inspection.
///
/// # Examples
///
/// ```
/// use serial_switch::SerialSwitchAdapter;
/// use serial_switch::config::PluginConfig;
/// use serial_switch::host::MemoryHost;
///
/// let host = MemoryHost::new();
/// let mut adapter = SerialSwitchAdapter::new(host.clone());
/// adapter.on_start(PluginConfig::new()).unwrap();
///
/// assert_eq!(host.device_count(), 2);
/// assert_eq!(host.connections()[0].address, "/dev/ttyS0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    state: Arc<Mutex<MemoryHostState>>,
}

impl MemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a device, as if it survived a previous run.
    #[must_use]
    pub fn with_device(self, record: DeviceRecord) -> Self {
        {
            let mut state = self.state.lock();
            state.next_device_id = state.next_device_id.max(record.id);
            state.devices.insert(record.unit, record);
        }
        self
    }

    /// Makes every subsequent `open_connection` fail with `reason`.
    pub fn refuse_connections(&self, reason: impl Into<String>) {
        self.state.lock().refuse_connections = Some(reason.into());
    }

    /// Makes every subsequent `send` fail with `reason`.
    pub fn fail_sends(&self, reason: impl Into<String>) {
        self.state.lock().fail_sends = Some(reason.into());
    }

    /// Returns whether debug output is switched on.
    #[must_use]
    pub fn debugging(&self) -> bool {
        self.state.lock().debugging
    }

    /// Returns every debug line written so far.
    #[must_use]
    pub fn debug_lines(&self) -> Vec<String> {
        self.state.lock().debug_lines.clone()
    }

    /// Forgets the recorded debug lines.
    pub fn clear_debug_lines(&self) {
        self.state.lock().debug_lines.clear();
    }

    /// Returns the device with the given unit.
    #[must_use]
    pub fn device(&self, unit: u8) -> Option<DeviceRecord> {
        self.state.lock().devices.get(&unit).cloned()
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.state.lock().devices.len()
    }

    /// Returns every connection opened so far, oldest first.
    #[must_use]
    pub fn connections(&self) -> Vec<ConnectionSpec> {
        self.state.lock().connections.clone()
    }

    /// Returns every payload sent so far, oldest first.
    #[must_use]
    pub fn sends(&self) -> Vec<(ConnectionHandle, Vec<u8>)> {
        self.state.lock().sends.clone()
    }
}

impl Host for MemoryHost {
    fn set_debugging(&mut self, enabled: bool) {
        self.state.lock().debugging = enabled;
    }

    fn debug(&mut self, message: &str) {
        self.state.lock().debug_lines.push(message.to_string());
    }

    fn devices(&self) -> Vec<DeviceRecord> {
        self.state.lock().devices.values().cloned().collect()
    }

    fn create_device(&mut self, spec: &DeviceSpec) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if state.devices.contains_key(&spec.unit) {
            return Err(HostError::DeviceCreation {
                unit: spec.unit,
                reason: "unit already in use".to_string(),
            });
        }
        state.next_device_id += 1;
        let record = DeviceRecord {
            id: state.next_device_id,
            unit: spec.unit,
            name: spec.name.clone(),
            n_value: 0,
            s_value: String::new(),
            last_level: 0,
            last_update: Some(Utc::now()),
        };
        state.devices.insert(spec.unit, record);
        Ok(())
    }

    fn update_device(&mut self, unit: u8, n_value: i32, s_value: &str) -> Result<(), HostError> {
        let mut state = self.state.lock();
        let record = state
            .devices
            .get_mut(&unit)
            .ok_or(HostError::UnknownDevice(unit))?;
        record.n_value = n_value;
        record.s_value = s_value.to_string();
        record.last_update = Some(Utc::now());
        Ok(())
    }

    fn open_connection(&mut self, spec: &ConnectionSpec) -> Result<ConnectionHandle, HostError> {
        let mut state = self.state.lock();
        if let Some(reason) = &state.refuse_connections {
            return Err(HostError::ConnectionRefused {
                address: spec.address.clone(),
                reason: reason.clone(),
            });
        }
        state.connections.push(spec.clone());
        let id = u32::try_from(state.connections.len()).unwrap_or(u32::MAX);
        Ok(ConnectionHandle::new(id))
    }

    fn send(&mut self, connection: ConnectionHandle, payload: &[u8]) -> Result<(), HostError> {
        let mut state = self.state.lock();
        let known = usize::try_from(connection.value())
            .is_ok_and(|id| id >= 1 && id <= state.connections.len());
        if !known {
            return Err(HostError::UnknownConnection(connection.value()));
        }
        if let Some(reason) = &state.fail_sends {
            return Err(HostError::SendFailed(reason.clone()));
        }
        state.sends.push((connection, payload.to_vec()));
        Ok(())
    }
}
