// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests driving the adapter through an in-memory host.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serial_switch::command::{PULSE_SEQUENCE_PLACEHOLDER, TRANSMIT_PREFIX};
use serial_switch::config::{DebugMode, PluginConfig};
use serial_switch::host::{ConnectionHandle, MemoryHost};
use serial_switch::state::LinkState;
use serial_switch::types::{PowerState, SwitchUnit};
use serial_switch::{Error, SerialSwitchAdapter};

fn start_adapter(config: PluginConfig) -> (MemoryHost, SerialSwitchAdapter<MemoryHost>) {
    let host = MemoryHost::new();
    let mut adapter = SerialSwitchAdapter::new(host.clone());
    adapter.on_start(config).unwrap();
    (host, adapter)
}

fn temp_home(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "serial_switch_it_{name}_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ============================================================================
// Startup
// ============================================================================

mod startup {
    use super::*;

    #[test]
    fn empty_host_gets_two_switches_off() {
        let (host, _adapter) = start_adapter(PluginConfig::new());

        assert_eq!(host.device_count(), 2);
        for (unit, name) in [(1, "Serre"), (2, "Afzuigkap")] {
            let device = host.device(unit).unwrap();
            assert_eq!(device.name, name);
            assert_eq!(device.power_state(), Some(PowerState::Off));
            assert_eq!(device.last_level, 0);
        }
    }

    #[test]
    fn second_start_does_not_duplicate_devices() {
        let host = MemoryHost::new();
        let mut adapter = SerialSwitchAdapter::new(host.clone());
        adapter.on_start(PluginConfig::new()).unwrap();
        adapter.on_command(1, "On", 0, 0).unwrap();

        let mut restarted = SerialSwitchAdapter::new(host.clone());
        restarted.on_start(PluginConfig::new()).unwrap();

        assert_eq!(host.device_count(), 2);
        assert_eq!(host.device(1).unwrap().n_value, 0);
    }

    #[test]
    fn parameters_from_host_mapping() {
        let mut params = BTreeMap::new();
        params.insert("SerialPort".to_string(), "/dev/ttyACM0".to_string());
        params.insert("Mode6".to_string(), "File".to_string());
        params.insert("Address".to_string(), String::new());

        let config = PluginConfig::from_parameters(params).unwrap();
        let (host, adapter) = start_adapter(config);

        assert!(host.debugging());
        assert_eq!(host.connections()[0].address, "/dev/ttyACM0");
        assert_eq!(adapter.config().serial_port(), "/dev/ttyACM0");

        // Empty parameters are left out of the dump.
        let lines = host.debug_lines();
        assert!(lines.contains(&"'Mode6':'File'".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("'Address'")));
    }

    #[test]
    fn debug_mode_writes_plugin_log() {
        let home = temp_home("debug_log");
        let config = PluginConfig::new()
            .with_debug_mode(DebugMode::Debug)
            .with_home_folder(&home);
        let (host, mut adapter) = start_adapter(config);
        adapter.on_stop().unwrap();

        let content = std::fs::read_to_string(home.join("plugin.log")).unwrap();
        let lines: Vec<&str> = content.split_terminator("\r\n").collect();

        assert_eq!(lines[0], "Plugin started.");
        assert_eq!(lines[1], "onStart called");
        assert_eq!(*lines.last().unwrap(), "onStop called");
        assert!(content.ends_with("\r\n"));
        // Every host line is mirrored to the file.
        assert_eq!(lines.len(), host.debug_lines().len() + 1);
    }
}

// ============================================================================
// Connection lifecycle
// ============================================================================

mod connection {
    use super::*;

    #[test]
    fn connect_then_disconnect() {
        let (_host, mut adapter) = start_adapter(PluginConfig::new());
        assert_eq!(adapter.link_state(), LinkState::Connecting);

        let handle = adapter.connection().unwrap();
        adapter.on_connect(handle, 0, "Connected").unwrap();
        assert_eq!(adapter.link_state(), LinkState::Connected);

        adapter.on_disconnect(handle).unwrap();
        assert_eq!(adapter.link_state(), LinkState::Disconnected);
        // The adapter never reconnects by itself.
        assert_eq!(adapter.connection(), Some(handle));
    }

    #[test]
    fn failed_connect_is_logged_not_retried() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());
        host.clear_debug_lines();

        adapter
            .on_connect(ConnectionHandle::new(1), 2, "No such file or directory")
            .unwrap();

        assert_eq!(host.connections().len(), 1);
        assert_eq!(
            host.debug_lines(),
            vec![
                "onConnect called".to_string(),
                "Failed to connect (2) to: /dev/ttyS0 with error: No such file or directory"
                    .to_string(),
            ]
        );
    }
}

// ============================================================================
// Commands
// ============================================================================

mod commands {
    use super::*;

    #[test]
    fn on_command_sends_and_switches_on() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());
        let handle = adapter.connection().unwrap();
        adapter.on_connect(handle, 0, "").unwrap();

        adapter.on_command(1, "On", 0, 0).unwrap();

        assert_eq!(host.device(1).unwrap().n_value, 1);
        assert_eq!(host.device(2).unwrap().n_value, 0);
        let sends = host.sends();
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].0, handle);
        assert_eq!(
            sends[0].1,
            format!("{TRANSMIT_PREFIX}{PULSE_SEQUENCE_PLACEHOLDER}").into_bytes()
        );
    }

    #[test]
    fn any_other_command_switches_off() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());

        for command in ["Off", "Toggle", "Set Level", "on", ""] {
            adapter.on_command(2, "On", 0, 0).unwrap();
            adapter.on_command(2, command, 30, 0).unwrap();
            assert_eq!(host.device(2).unwrap().n_value, 0, "command {command:?}");
            assert_eq!(
                adapter.switch_state(SwitchUnit::ExtractorHood),
                Some(PowerState::Off)
            );
        }
    }

    #[test]
    fn both_units_send_identical_payload() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());

        adapter.on_command(1, "On", 100, 0).unwrap();
        adapter.on_command(2, "Off", 0, 0).unwrap();

        let sends = host.sends();
        assert_eq!(sends.len(), 2);
        assert_eq!(sends[0].1, sends[1].1);
    }

    #[test]
    fn unmanaged_units_change_nothing() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());
        let before: Vec<_> = host.devices_snapshot();

        for unit in [0, 3, 4, 100, -2] {
            adapter.on_command(unit, "On", 0, 0).unwrap();
        }

        assert!(host.sends().is_empty());
        assert_eq!(host.devices_snapshot(), before);
    }

    #[test]
    fn command_without_connection_fails() {
        let host = MemoryHost::new();
        let mut adapter = SerialSwitchAdapter::new(host.clone());

        assert!(matches!(
            adapter.on_command(2, "On", 0, 0),
            Err(Error::NotConnected)
        ));
        assert!(host.sends().is_empty());
    }

    trait Snapshot {
        fn devices_snapshot(&self) -> Vec<(u8, i32, String)>;
    }

    impl Snapshot for MemoryHost {
        fn devices_snapshot(&self) -> Vec<(u8, i32, String)> {
            [1, 2]
                .into_iter()
                .filter_map(|unit| self.device(unit))
                .map(|d| (d.unit, d.n_value, d.s_value))
                .collect()
        }
    }
}

// ============================================================================
// Received data
// ============================================================================

mod received_data {
    use super::*;

    #[test]
    fn hello_world_is_logged_once() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());
        host.clear_debug_lines();

        adapter.on_message(b"hello ").unwrap();
        assert!(host.debug_lines().is_empty());

        adapter.on_message(b"world\n").unwrap();
        assert_eq!(host.debug_lines(), vec!["hello world".to_string()]);
        assert!(adapter.receive_buffer().is_empty());
    }

    #[test]
    fn lines_after_reconnect_start_fresh() {
        let (host, mut adapter) = start_adapter(PluginConfig::new());

        adapter.on_message(b"stale").unwrap();
        adapter
            .on_connect(ConnectionHandle::new(1), 0, "")
            .unwrap();
        host.clear_debug_lines();

        adapter.on_message(b"fresh\n").unwrap();
        assert_eq!(host.debug_lines(), vec!["fresh".to_string()]);
    }

    #[test]
    fn malformed_bytes_surface_as_error() {
        let (_host, mut adapter) = start_adapter(PluginConfig::new());
        assert!(matches!(
            adapter.on_message(&[0x80, 0x0A]),
            Err(Error::Parse(_))
        ));
    }
}
