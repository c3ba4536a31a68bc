// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for switch control.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off state of a switch, in numeric and descriptive form
//! - [`SwitchUnit`] - One of the two switches managed by the adapter

mod power;
mod unit;

pub use power::PowerState;
pub use unit::SwitchUnit;
