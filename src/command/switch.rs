// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch on/off command.

use crate::command::SerialCommand;
use crate::types::{PowerState, SwitchUnit};

/// Transmit instruction prefix understood by the transmitter firmware.
pub const TRANSMIT_PREFIX: &str = "t:10,40,";

/// Stand-in for the RF pulse sequence.
///
/// This is not an encoding. Nothing switches until real sequences exist.
pub const PULSE_SEQUENCE_PLACEHOLDER: &str = "THE PULSE SEQUENCE GOES HERE";

/// Command to switch one unit on or off.
///
/// The target unit and state are recorded, but the payload does not depend
/// on them yet: both switches, on or off, send the same placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    unit: SwitchUnit,
    state: PowerState,
}

impl SwitchCommand {
    /// Creates a command for `unit`.
    #[must_use]
    pub const fn new(unit: SwitchUnit, state: PowerState) -> Self {
        Self { unit, state }
    }

    /// Returns the target unit.
    #[must_use]
    pub const fn unit(&self) -> SwitchUnit {
        self.unit
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }
}

impl SerialCommand for SwitchCommand {
    // TODO: emit per-unit on/off pulse sequences once the remotes for the
    // greenhouse switch and the hood lights have been captured.
    fn payload(&self) -> String {
        format!("{TRANSMIT_PREFIX}{PULSE_SEQUENCE_PLACEHOLDER}")
    }
}
