// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The serial switch adapter.
//!
//! [`SerialSwitchAdapter`] owns everything that changes while the plugin
//! runs: the connection handle, the mirrored switch states and the receive
//! buffer. The host calls one `on_*` method per event, strictly one at a
//! time; the `&mut self` receivers make that single-writer rule explicit.
//! Hosts that deliver events from several threads go through
//! [`EventPump`](crate::event::EventPump).

use crate::command::{SerialCommand, SwitchCommand};
use crate::config::PluginConfig;
use crate::error::{Error, Result};
use crate::event::{HostEvent, Notification};
use crate::host::{ConnectionHandle, ConnectionSpec, DeviceSpec, Host};
use crate::plugin_log::PluginLog;
use crate::receive::ReceiveBuffer;
use crate::state::{LinkState, SwitchStates};
use crate::types::{PowerState, SwitchUnit};

/// Bridges host events to the serial link and the two switch devices.
///
/// # Examples
///
/// ```
/// use serial_switch::SerialSwitchAdapter;
/// use serial_switch::config::PluginConfig;
/// use serial_switch::host::{ConnectionHandle, MemoryHost};
/// use serial_switch::types::{PowerState, SwitchUnit};
///
/// # fn main() -> serial_switch::Result<()> {
/// let host = MemoryHost::new();
/// let mut adapter = SerialSwitchAdapter::new(host.clone());
///
/// adapter.on_start(PluginConfig::new().with_serial_port("/dev/ttyUSB0"))?;
/// adapter.on_connect(ConnectionHandle::new(1), 0, "")?;
/// adapter.on_command(1, "On", 0, 0)?;
///
/// assert_eq!(adapter.switch_state(SwitchUnit::Greenhouse), Some(PowerState::On));
/// assert_eq!(host.sends().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SerialSwitchAdapter<H> {
    host: H,
    config: PluginConfig,
    log: PluginLog,
    switches: SwitchStates,
    link: LinkState,
    connection: Option<ConnectionHandle>,
    rx_buffer: ReceiveBuffer,
}

impl<H: Host> SerialSwitchAdapter<H> {
    /// Creates an adapter that has not been started yet.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: PluginConfig::new(),
            log: PluginLog::host_only(),
            switches: SwitchStates::new(),
            link: LinkState::Disconnected,
            connection: None,
            rx_buffer: ReceiveBuffer::new(),
        }
    }

    // ========== Host Events ==========

    /// Handles plugin start.
    ///
    /// Sets up logging for the configured debug mode, creates both switches
    /// if the host has no devices yet, resets them to off, dumps the
    /// configuration and opens the serial connection. Whether the connection
    /// succeeds is reported later through [`Self::on_connect`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if `plugin.log` cannot be written and
    /// `Error::Host` if a host capability call fails.
    pub fn on_start(&mut self, config: PluginConfig) -> Result<()> {
        self.host
            .set_debugging(config.debug_mode().enables_debugging());
        self.log = PluginLog::for_config(&config)?;
        self.config = config;

        tracing::info!(
            port = %self.config.serial_port(),
            mode = %self.config.debug_mode(),
            "Starting serial switch adapter"
        );
        self.log_message("onStart called")?;

        if self.host.devices().is_empty() {
            for unit in SwitchUnit::ALL {
                self.host.create_device(&DeviceSpec::switch(unit))?;
                tracing::debug!(unit = %unit, name = unit.device_name(), "Created switch device");
            }
        }
        for unit in SwitchUnit::ALL {
            self.update_switch(unit, PowerState::Off)?;
        }
        self.dump_config()?;

        let spec = ConnectionSpec::serial(self.config.serial_port(), self.config.baud_rate());
        let connection = self.host.open_connection(&spec)?;
        self.connection = Some(connection);
        self.link = self.link.on_open();
        tracing::debug!(%connection, address = %spec.address, baud = spec.baud, "Opening serial connection");
        self.log_message("Connected")
    }

    /// Handles plugin stop.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if `plugin.log` cannot be written.
    pub fn on_stop(&mut self) -> Result<()> {
        tracing::info!("Stopping serial switch adapter");
        self.log_message("onStop called")
    }

    /// Handles the outcome of a connection attempt.
    ///
    /// Status `0` means success; the handle is kept for sending. Any other
    /// status is logged together with `description` and nothing is retried.
    /// The receive buffer is cleared either way.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if `plugin.log` cannot be written.
    pub fn on_connect(
        &mut self,
        connection: ConnectionHandle,
        status: i32,
        description: &str,
    ) -> Result<()> {
        self.log_message("onConnect called")?;

        if status == 0 {
            self.connection = Some(connection);
            tracing::info!(%connection, port = %self.config.serial_port(), "Serial connection established");
            let message = format!("Connected successfully to: {}", self.config.serial_port());
            self.log_message(&message)?;
        } else {
            tracing::warn!(
                %connection,
                status,
                description,
                port = %self.config.serial_port(),
                "Serial connection failed"
            );
            let message = format!(
                "Failed to connect ({status}) to: {} with error: {description}",
                self.config.serial_port()
            );
            self.log_message(&message)?;
        }

        self.link = self.link.on_connect_result(status);
        self.rx_buffer.clear();
        Ok(())
    }

    /// Handles a chunk of bytes received on the serial connection.
    ///
    /// The chunk is appended to the receive buffer. When the chunk ends with
    /// a line feed, the buffered text is logged as one line (without its
    /// trailing line terminator) and the buffer is emptied.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the chunk is not valid UTF-8, leaving the
    /// buffer untouched, and `Error::Log` if `plugin.log` cannot be written.
    pub fn on_message(&mut self, data: &[u8]) -> Result<()> {
        if let Some(line) = self.rx_buffer.push(data)? {
            let line = line.trim_end_matches(['\r', '\n']);
            tracing::debug!(line, "Received line");
            self.log_message(line)?;
        }
        Ok(())
    }

    /// Handles a user command for a switch.
    ///
    /// For unit 1 or 2 the switch command is written to the serial
    /// connection, then the device is set on if `command` is exactly `"On"`
    /// and off otherwise. Other units are ignored. `level` is only logged and
    /// `hue` is not used.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotConnected` if the serial connection was never
    /// opened, `Error::Host` if sending or updating the device fails, and
    /// `Error::Log` if `plugin.log` cannot be written. The device state is
    /// left unchanged when sending fails.
    ///
    /// A failed connect does not forget the handle opened by
    /// [`on_start`](Self::on_start): commands are still sent on it while the
    /// link state is disconnected, and the host decides whether that send
    /// succeeds.
    pub fn on_command(&mut self, unit: i32, command: &str, level: i32, _hue: i32) -> Result<()> {
        let message =
            format!("onCommand called for Unit {unit}: Parameter '{command}', Level: {level}");
        self.log_message(&message)?;

        let Some(switch) = SwitchUnit::from_unit(unit) else {
            tracing::trace!(unit, "Ignoring command for unmanaged unit");
            return Ok(());
        };

        let state = PowerState::from_command(command);
        let connection = self.connection.ok_or(Error::NotConnected)?;
        let cmd = SwitchCommand::new(switch, state);
        self.host.send(connection, &cmd.to_bytes())?;
        tracing::debug!(unit = %switch, state = %state, %connection, "Sent switch command");

        self.update_switch(switch, state)
    }

    /// Handles a host notification by logging it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if `plugin.log` cannot be written.
    pub fn on_notification(&mut self, notification: &Notification) -> Result<()> {
        let message = format!("Notification: {notification}");
        self.log_message(&message)
    }

    /// Handles the loss of a connection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Log` if `plugin.log` cannot be written.
    pub fn on_disconnect(&mut self, connection: ConnectionHandle) -> Result<()> {
        tracing::info!(%connection, "Serial connection closed");
        self.link = self.link.on_disconnect();
        self.log_message("onDisconnect called")
    }

    /// Handles the periodic heartbeat. There is nothing to poll.
    #[allow(clippy::unused_self)]
    pub fn on_heartbeat(&mut self) {}

    /// Dispatches a [`HostEvent`] to the matching `on_*` method.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler returns.
    pub fn handle_event(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::Start(config) => self.on_start(config),
            HostEvent::Stop => self.on_stop(),
            HostEvent::Connect {
                connection,
                status,
                description,
            } => self.on_connect(connection, status, &description),
            HostEvent::Message(data) => self.on_message(&data),
            HostEvent::Command {
                unit,
                command,
                level,
                hue,
            } => self.on_command(unit, &command, level, hue),
            HostEvent::Notification(notification) => self.on_notification(&notification),
            HostEvent::Disconnect { connection } => self.on_disconnect(connection),
            HostEvent::Heartbeat => {
                self.on_heartbeat();
                Ok(())
            }
        }
    }

    // ========== Accessors ==========

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the adapter and returns the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Returns the handle used for sending, if a connection was opened.
    #[must_use]
    pub fn connection(&self) -> Option<ConnectionHandle> {
        self.connection
    }

    /// Returns the connection lifecycle state.
    #[must_use]
    pub fn link_state(&self) -> LinkState {
        self.link
    }

    /// Returns the last state pushed for `unit`.
    #[must_use]
    pub fn switch_state(&self, unit: SwitchUnit) -> Option<PowerState> {
        self.switches.get(unit)
    }

    /// Returns both tracked switch states.
    #[must_use]
    pub fn switches(&self) -> &SwitchStates {
        &self.switches
    }

    /// Returns the text received since the last complete line.
    #[must_use]
    pub fn receive_buffer(&self) -> &ReceiveBuffer {
        &self.rx_buffer
    }

    // ========== Internals ==========

    fn log_message(&mut self, message: &str) -> Result<()> {
        self.log.write(&mut self.host, message)
    }

    fn update_switch(&mut self, unit: SwitchUnit, state: PowerState) -> Result<()> {
        self.host
            .update_device(unit.value(), state.as_num(), state.as_str())?;
        if self.switches.set(unit, state) {
            tracing::debug!(unit = %unit, state = %state, "Switch state changed");
        }
        Ok(())
    }

    fn dump_config(&mut self) -> Result<()> {
        let mut lines: Vec<String> = self
            .config
            .parameters()
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("'{key}':'{value}'"))
            .collect();

        let devices = self.host.devices();
        lines.push(format!("Device count: {}", devices.len()));
        for device in &devices {
            lines.push(format!("Device:           {} - {device}", device.unit));
            lines.push(format!("Device ID:       '{}'", device.id));
            lines.push(format!("Device Name:     '{}'", device.name));
            lines.push(format!("Device nValue:    {}", device.n_value));
            lines.push(format!("Device sValue:   '{}'", device.s_value));
            lines.push(format!("Device LastLevel: {}", device.last_level));
        }

        for line in &lines {
            self.log_message(line)?;
        }
        Ok(())
    }
}
