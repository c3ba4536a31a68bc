// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event pump serializing host events into the adapter.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::HostEvent;
use crate::adapter::SerialSwitchAdapter;
use crate::error::{Error, Result};
use crate::host::Host;

/// Default number of events that can wait in the queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Cloneable handle for submitting events to an [`EventPump`].
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<HostEvent>,
}

impl EventSender {
    /// Queues an event, waiting if the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `Error::PumpClosed` if the pump has stopped.
    pub async fn send(&self, event: HostEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|e| Error::PumpClosed(format!("{} event dropped", e.0.kind())))
    }

    /// Returns `true` once the pump no longer accepts events.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns a [`SerialSwitchAdapter`] on a tokio task and feeds it events in
/// arrival order.
///
/// Any number of [`EventSender`]s may submit events concurrently; the
/// adapter still sees exactly one event at a time. A failing handler is
/// logged and the pump moves on to the next event. The pump stops after
/// handling [`HostEvent::Stop`]; events still queued at that point are
/// discarded.
#[derive(Debug)]
pub struct EventPump<H> {
    sender: EventSender,
    task: JoinHandle<SerialSwitchAdapter<H>>,
}

impl<H: Host + Send + 'static> EventPump<H> {
    /// Spawns a pump with the default queue capacity.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(adapter: SerialSwitchAdapter<H>) -> Self {
        Self::with_capacity(adapter, DEFAULT_QUEUE_CAPACITY)
    }

    /// Spawns a pump whose queue holds up to `capacity` events.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(adapter: SerialSwitchAdapter<H>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let task = tokio::spawn(run_pump(adapter, rx));
        Self {
            sender: EventSender { tx },
            task,
        }
    }

    /// Returns a new sender for this pump.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Delivers [`HostEvent::Stop`], waits for the pump to finish and returns
    /// the adapter.
    ///
    /// # Errors
    ///
    /// Returns `Error::PumpClosed` if the pump task panicked or was aborted.
    pub async fn shutdown(self) -> Result<SerialSwitchAdapter<H>> {
        let Self { sender, task } = self;
        if sender.send(HostEvent::Stop).await.is_err() {
            tracing::debug!("Event pump already stopped");
        }
        drop(sender);
        task.await.map_err(|e| Error::PumpClosed(e.to_string()))
    }
}

async fn run_pump<H: Host>(
    mut adapter: SerialSwitchAdapter<H>,
    mut rx: mpsc::Receiver<HostEvent>,
) -> SerialSwitchAdapter<H> {
    tracing::debug!("Event pump started");

    while let Some(event) = rx.recv().await {
        let kind = event.kind();
        let stop = matches!(event, HostEvent::Stop);

        if let Err(e) = adapter.handle_event(event) {
            tracing::warn!(event = kind, error = %e, "Host event handler failed");
        }

        if stop {
            rx.close();
            let mut dropped = 0usize;
            while rx.try_recv().is_ok() {
                dropped += 1;
            }
            if dropped > 0 {
                tracing::debug!(dropped, "Discarded events queued after stop");
            }
            break;
        }
    }

    tracing::debug!("Event pump stopped");
    adapter
}
