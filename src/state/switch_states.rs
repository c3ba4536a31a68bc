// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch state tracking.

use serde::Serialize;

use crate::types::{PowerState, SwitchUnit};

/// Last known state of both switches.
///
/// A state is `None` until the adapter has pushed one to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SwitchStates {
    states: [Option<PowerState>; 2],
}

impl SwitchStates {
    /// Creates a tracker with both states unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of `unit`.
    #[must_use]
    pub fn get(&self, unit: SwitchUnit) -> Option<PowerState> {
        self.states[unit.slot()]
    }

    /// Records the state of `unit` and returns whether it changed.
    pub fn set(&mut self, unit: SwitchUnit, state: PowerState) -> bool {
        let slot = &mut self.states[unit.slot()];
        let changed = *slot != Some(state);
        *slot = Some(state);
        changed
    }

    /// Returns `true` if any switch is on.
    #[must_use]
    pub fn is_any_on(&self) -> bool {
        self.states.iter().any(|s| matches!(s, Some(PowerState::On)))
    }
}
