/*
 *  timesource/rtc.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Battery backed clock, read through the host's local time
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use chrono::{Local, NaiveDateTime, TimeDelta};
use log::info;

use super::{SourceKind, TimeSource};

/// Host clock with a correction applied on top.
///
/// The host keeps time across power loss; writing the hardware clock
/// needs privileges we don't assume, so `set_time` stores the difference
/// instead.
#[derive(Debug, Clone, Default)]
pub struct RtcClock {
    correction: TimeDelta,
}

impl RtcClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correction(&self) -> TimeDelta {
        self.correction
    }

    /// From now on `now()` reads `target` advanced by the time elapsed since.
    pub fn set_time(&mut self, target: NaiveDateTime) {
        self.correction = target - Local::now().naive_local();
        info!(
            "RTC set to {} (correction {}s)",
            target.format("%Y-%m-%d %H:%M:%S"),
            self.correction.num_seconds()
        );
    }
}

impl TimeSource for RtcClock {
    fn kind(&self) -> SourceKind {
        SourceKind::Rtc
    }

    fn now(&self) -> Option<NaiveDateTime> {
        Some(Local::now().naive_local() + self.correction)
    }
}
