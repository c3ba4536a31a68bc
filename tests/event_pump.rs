// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tests for delivering host events from several tasks.

use serial_switch::config::PluginConfig;
use serial_switch::event::{EventPump, HostEvent, Notification};
use serial_switch::host::{ConnectionHandle, MemoryHost};
use serial_switch::types::SwitchUnit;
use serial_switch::SerialSwitchAdapter;

async fn started_pump(host: &MemoryHost) -> EventPump<MemoryHost> {
    let pump = EventPump::spawn(SerialSwitchAdapter::new(host.clone()));
    let sender = pump.sender();
    sender
        .send(HostEvent::Start(PluginConfig::new()))
        .await
        .unwrap();
    sender
        .send(HostEvent::Connect {
            connection: ConnectionHandle::new(1),
            status: 0,
            description: String::new(),
        })
        .await
        .unwrap();
    pump
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_commands_are_all_applied() {
    let host = MemoryHost::new();
    let pump = started_pump(&host).await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let sender = pump.sender();
        tasks.push(tokio::spawn(async move {
            let unit = if i % 2 == 0 { 1 } else { 2 };
            sender.send(HostEvent::command(unit, "On")).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let adapter = pump.shutdown().await.unwrap();
    assert_eq!(host.sends().len(), 20);
    assert!(adapter.switches().is_any_on());
    assert_eq!(host.device(1).unwrap().n_value, 1);
    assert_eq!(host.device(2).unwrap().n_value, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn chunks_from_one_sender_keep_their_order() {
    let host = MemoryHost::new();
    let pump = started_pump(&host).await;
    let sender = pump.sender();

    for chunk in ["20;02;", "NewKaku;", "ID=0001;", "SWITCH=1;CMD=ON;\r\n"] {
        sender
            .send(HostEvent::Message(chunk.as_bytes().to_vec()))
            .await
            .unwrap();
    }

    let adapter = pump.shutdown().await.unwrap();
    assert!(adapter.receive_buffer().is_empty());
    assert!(
        host.debug_lines()
            .contains(&"20;02;NewKaku;ID=0001;SWITCH=1;CMD=ON;".to_string())
    );
}

#[tokio::test]
async fn small_queue_applies_backpressure() {
    let host = MemoryHost::new();
    let pump = EventPump::with_capacity(SerialSwitchAdapter::new(host.clone()), 1);
    let sender = pump.sender();

    sender
        .send(HostEvent::Start(PluginConfig::new()))
        .await
        .unwrap();
    for _ in 0..10 {
        sender.send(HostEvent::Heartbeat).await.unwrap();
    }
    sender.send(HostEvent::command(2, "On")).await.unwrap();

    let adapter = pump.shutdown().await.unwrap();
    assert_eq!(
        adapter.switch_state(SwitchUnit::ExtractorHood),
        Some(serial_switch::PowerState::On)
    );
}

#[tokio::test]
async fn notifications_reach_the_log() {
    let host = MemoryHost::new();
    let pump = started_pump(&host).await;

    pump.sender()
        .send(HostEvent::Notification(Notification {
            name: "Afzuigkap".to_string(),
            subject: "Hood".to_string(),
            text: "left on".to_string(),
            status: "0".to_string(),
            priority: 1,
            sound: String::new(),
            image_file: String::new(),
        }))
        .await
        .unwrap();

    let _adapter = pump.shutdown().await.unwrap();
    assert!(
        host.debug_lines()
            .contains(&"Notification: Afzuigkap,Hood,left on,0,1,,".to_string())
    );
}
