// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host event types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PluginConfig;
use crate::host::ConnectionHandle;

/// A notification forwarded by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification name.
    pub name: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub text: String,
    /// Status string.
    pub status: String,
    /// Priority.
    pub priority: i32,
    /// Sound to play.
    pub sound: String,
    /// Image file to show.
    pub image_file: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.name,
            self.subject,
            self.text,
            self.status,
            self.priority,
            self.sound,
            self.image_file
        )
    }
}

/// An event delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The plugin is starting with this configuration.
    Start(PluginConfig),
    /// The plugin is stopping.
    Stop,
    /// A connection attempt finished.
    Connect {
        /// The connection the result belongs to.
        connection: ConnectionHandle,
        /// `0` on success, a host error code otherwise.
        status: i32,
        /// Host description of the outcome.
        description: String,
    },
    /// Bytes arrived on the serial connection.
    Message(Vec<u8>),
    /// A user issued a command for a device.
    Command {
        /// Target unit id.
        unit: i32,
        /// Command string, such as `"On"` or `"Off"`.
        command: String,
        /// Requested level.
        level: i32,
        /// Requested hue.
        hue: i32,
    },
    /// The host forwarded a notification.
    Notification(Notification),
    /// A connection was lost.
    Disconnect {
        /// The connection that went away.
        connection: ConnectionHandle,
    },
    /// Periodic heartbeat.
    Heartbeat,
}

impl HostEvent {
    /// Returns the event name, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start(_) => "start",
            Self::Stop => "stop",
            Self::Connect { .. } => "connect",
            Self::Message(_) => "message",
            Self::Command { .. } => "command",
            Self::Notification(_) => "notification",
            Self::Disconnect { .. } => "disconnect",
            Self::Heartbeat => "heartbeat",
        }
    }

    /// Creates a command event.
    #[must_use]
    pub fn command(unit: i32, command: impl Into<String>) -> Self {
        Self::Command {
            unit,
            command: command.into(),
            level: 0,
            hue: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_display() {
        let n = Notification {
            name: "n".to_string(),
            subject: "s".to_string(),
            text: "t".to_string(),
            status: "st".to_string(),
            priority: -1,
            sound: "so".to_string(),
            image_file: "i".to_string(),
        };
        assert_eq!(n.to_string(), "n,s,t,st,-1,so,i");
    }

    #[test]
    fn notification_from_json() {
        let n: Notification = serde_json::from_str(
            r#"{"name":"a","subject":"b","text":"c","status":"d","priority":0,"sound":"e","image_file":"f"}"#,
        )
        .unwrap();
        assert_eq!(n.to_string(), "a,b,c,d,0,e,f");
    }

    #[test]
    fn kinds() {
        assert_eq!(HostEvent::Stop.kind(), "stop");
        assert_eq!(HostEvent::command(1, "On").kind(), "command");
        assert_eq!(HostEvent::Message(vec![]).kind(), "message");
    }

    #[test]
    fn command_helper_defaults() {
        assert_eq!(
            HostEvent::command(2, "Off"),
            HostEvent::Command {
                unit: 2,
                command: "Off".to_string(),
                level: 0,
                hue: 0,
            }
        );
    }
}
