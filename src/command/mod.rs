// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Commands written to the serial-attached transmitter.
//!
//! A serial command is a text line. The transmitter accepts
//! `t:<a>,<b>,<pulse sequence>` to send an RF pulse train; the pulse
//! sequences for the two switches have never been captured, so every
//! [`SwitchCommand`] currently carries the same placeholder.
//!
//! # Examples
//!
//! ```
//! use serial_switch::command::{SerialCommand, SwitchCommand};
//! use serial_switch::types::{PowerState, SwitchUnit};
//!
//! let cmd = SwitchCommand::new(SwitchUnit::Greenhouse, PowerState::On);
//! assert_eq!(cmd.payload(), "t:10,40,THE PULSE SEQUENCE GOES HERE");
//! ```

mod switch;

pub use switch::{PULSE_SEQUENCE_PLACEHOLDER, SwitchCommand, TRANSMIT_PREFIX};

/// A command that can be written to the serial connection.
pub trait SerialCommand {
    /// Returns the command text.
    fn payload(&self) -> String;

    /// Returns the bytes handed to the host's send capability.
    fn to_bytes(&self) -> Vec<u8> {
        self.payload().into_bytes()
    }
}
