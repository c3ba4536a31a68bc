// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of an on/off switch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the power state of a switch device.
///
/// The host stores a switch state twice: as a numeric value (`0`/`1`) and as
/// a descriptive string (`"Off"`/`"On"`).
///
/// # Examples
///
/// ```
/// use serial_switch::types::PowerState;
///
/// assert_eq!(PowerState::On.as_num(), 1);
/// assert_eq!(PowerState::Off.as_str(), "Off");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerState {
    /// Switch is off.
    #[default]
    Off,
    /// Switch is on.
    On,
}

impl PowerState {
    /// Returns the descriptive string stored by the host.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
        }
    }

    /// Returns the numeric value stored by the host.
    #[must_use]
    pub const fn as_num(&self) -> i32 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Interprets a command string delivered by the host.
    ///
    /// Only the exact string `"On"` switches on; every other command
    /// (`"Off"`, `"Toggle"`, `"Set Level"`, ...) switches off.
    ///
    /// # Examples
    ///
    /// ```
    /// use serial_switch::types::PowerState;
    ///
    /// assert_eq!(PowerState::from_command("On"), PowerState::On);
    /// assert_eq!(PowerState::from_command("Toggle"), PowerState::Off);
    /// assert_eq!(PowerState::from_command("on"), PowerState::Off);
    /// ```
    #[must_use]
    pub fn from_command(command: &str) -> Self {
        if command == "On" { Self::On } else { Self::Off }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
