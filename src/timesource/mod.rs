/*
 *  timesource/mod.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Where the wall clock time comes from: network time or the local RTC
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

use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::phrase::TimeOfDay;

pub mod fallback;
pub mod ntp;
pub mod rtc;

pub use fallback::{FallbackClock, SourceStatus};
pub use ntp::{NtpClock, NtpSettings};
pub use rtc::RtcClock;

#[derive(Debug, Error)]
pub enum TimeSourceError {
    #[error("network time is disabled")]
    Disabled,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not resolve time server {0}")]
    Resolve(String),
    #[error("no reply from time server within {0:?}")]
    Timeout(Duration),
    #[error("short NTP packet: {0} bytes")]
    ShortPacket(usize),
    #[error("unexpected NTP mode {0}")]
    BadMode(u8),
    #[error("time server is not synchronized")]
    Unsynchronized,
    #[error("time server sent kiss-o'-death {0:?}")]
    KissOfDeath(String),
    #[error("reply does not answer our request")]
    OriginMismatch,
    #[error("invalid NTP timestamp")]
    InvalidTimestamp,
    #[error("invalid UTC offset: {0} hours")]
    InvalidOffset(i32),
}

/// Which clock served a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Ntp,
    Rtc,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Ntp => write!(f, "NTP"),
            SourceKind::Rtc => write!(f, "RTC"),
        }
    }
}

/// Local wall clock time plus where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReading {
    pub at: NaiveDateTime,
    pub source: SourceKind,
}

impl TimeReading {
    pub fn new(at: NaiveDateTime, source: SourceKind) -> Self {
        Self { at, source }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_timelike(&self.at)
    }

    pub fn month(&self) -> u32 {
        self.at.month()
    }
}

/// A clock the tick can read. `None` means no valid time right now and
/// the tick is skipped.
pub trait TimeSource: Send {
    fn kind(&self) -> SourceKind;

    /// Current local wall time
    fn now(&self) -> Option<NaiveDateTime>;

    fn read(&self) -> Option<TimeReading> {
        self.now().map(|at| TimeReading::new(at, self.kind()))
    }
}
