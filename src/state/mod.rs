// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter-side state tracking.
//!
//! [`SwitchStates`] mirrors the last state pushed to each host device, and
//! [`LinkState`] follows the serial connection through its lifecycle.
//!
//! # Examples
//!
//! ```
//! use serial_switch::state::{LinkState, SwitchStates};
//! use serial_switch::types::{PowerState, SwitchUnit};
//!
//! let mut switches = SwitchStates::new();
//! assert!(switches.set(SwitchUnit::Greenhouse, PowerState::On));
//! assert_eq!(switches.get(SwitchUnit::Greenhouse), Some(PowerState::On));
//!
//! let link = LinkState::Disconnected.on_open();
//! assert_eq!(link, LinkState::Connecting);
//! ```

mod link_state;
mod switch_states;

pub use link_state::LinkState;
pub use switch_states::SwitchStates;
