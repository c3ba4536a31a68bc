// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch unit identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two switches managed by the adapter.
///
/// The host addresses devices by a small integer unit id. Only units 1 and 2
/// exist; any other id is rejected by [`SwitchUnit::from_unit`].
///
/// # Examples
///
/// ```
/// use serial_switch::types::SwitchUnit;
///
/// let unit = SwitchUnit::from_unit(1).unwrap();
/// assert_eq!(unit, SwitchUnit::Greenhouse);
/// assert_eq!(unit.device_name(), "Serre");
///
/// assert!(SwitchUnit::from_unit(3).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SwitchUnit {
    /// Unit 1, the greenhouse switch.
    Greenhouse,
    /// Unit 2, the kitchen extractor hood lights.
    ExtractorHood,
}

impl SwitchUnit {
    /// Both managed units, in unit id order.
    pub const ALL: [Self; 2] = [Self::Greenhouse, Self::ExtractorHood];

    /// Looks up the switch for a host unit id.
    #[must_use]
    pub const fn from_unit(unit: i32) -> Option<Self> {
        match unit {
            1 => Some(Self::Greenhouse),
            2 => Some(Self::ExtractorHood),
            _ => None,
        }
    }

    /// Returns the host unit id.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self {
            Self::Greenhouse => 1,
            Self::ExtractorHood => 2,
        }
    }

    /// Returns the display name the device is created with.
    #[must_use]
    pub const fn device_name(&self) -> &'static str {
        match self {
            Self::Greenhouse => "Serre",
            Self::ExtractorHood => "Afzuigkap",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::Greenhouse => 0,
            Self::ExtractorHood => 1,
        }
    }
}

impl fmt::Display for SwitchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<SwitchUnit> for u8 {
    fn from(unit: SwitchUnit) -> Self {
        unit.value()
    }
}
