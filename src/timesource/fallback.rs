/*
 *  timesource/fallback.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Prefer network time, fall back to the RTC
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

use log::{info, warn};
use std::fmt;
use std::time::{Duration, Instant};

use super::{NtpClock, RtcClock, SourceKind, TimeReading, TimeSource};

/// Snapshot for the startup banner
#[derive(Debug, Clone)]
pub struct SourceStatus {
    pub ntp_enabled: bool,
    pub ntp_server: String,
    pub ntp_synced: bool,
    pub since_last_sync: Option<Duration>,
    /// Server minus host clock at the last good sync
    pub ntp_offset_ms: Option<i64>,
    pub timezone_offset_hours: i32,
    pub rtc_correction_secs: i64,
    pub active: SourceKind,
}

impl SourceStatus {
    pub fn log(&self) {
        let rule = "=".repeat(50);
        info!("{}", rule);
        info!("Time source status");
        info!("{}", rule);
        info!("NTP enabled: {}", if self.ntp_enabled { "yes" } else { "no" });
        if self.ntp_enabled {
            info!("NTP server: {}", self.ntp_server);
            info!("NTP synced: {}", if self.ntp_synced { "yes" } else { "no" });
            info!("Timezone offset: UTC{:+}", self.timezone_offset_hours);
            if let Some(since) = self.since_last_sync {
                info!("Last NTP sync: {}s ago", since.as_secs());
            }
            if let Some(offset) = self.ntp_offset_ms {
                info!("NTP offset: {}ms", offset);
            }
        }
        info!("RTC correction: {}s", self.rtc_correction_secs);
        info!("Time source: {}", self.active);
        info!("{}", rule);
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ntp {} {})",
            self.active,
            self.ntp_server,
            if self.ntp_synced { "synced" } else { "unsynced" })
    }
}

/// NTP while it is enabled and its last sync worked, otherwise the RTC.
#[derive(Debug, Clone)]
pub struct FallbackClock {
    ntp: NtpClock,
    rtc: RtcClock,
    sync_rtc: bool,
}

impl FallbackClock {
    pub fn new(ntp: NtpClock, rtc: RtcClock, sync_rtc: bool) -> Self {
        Self { ntp, rtc, sync_rtc }
    }

    pub fn ntp(&self) -> &NtpClock {
        &self.ntp
    }

    pub fn rtc(&self) -> &RtcClock {
        &self.rtc
    }

    pub fn active_kind(&self) -> SourceKind {
        if self.ntp.is_synced() { SourceKind::Ntp } else { SourceKind::Rtc }
    }

    pub fn read(&self) -> Option<TimeReading> {
        match self.active_kind() {
            SourceKind::Ntp => self.ntp.read().or_else(|| self.rtc.read()),
            SourceKind::Rtc => self.rtc.read(),
        }
    }

    /// Sync NTP if due; on success copy the time into the RTC when
    /// configured. Returns true when a sync happened and worked.
    pub async fn resync(&mut self, now: Instant) -> bool {
        if !self.ntp.should_sync(now) {
            return false;
        }
        match self.ntp.sync().await {
            Ok(_) => {
                self.sync_rtc_from_ntp();
                true
            }
            Err(e) => {
                warn!("Keeping {} time: {}", self.active_kind(), e);
                false
            }
        }
    }

    /// Copy NTP time into the RTC. No-op unless enabled and NTP is synced.
    pub fn sync_rtc_from_ntp(&mut self) -> bool {
        if !self.sync_rtc || !self.ntp.is_synced() {
            return false;
        }
        match self.ntp.now() {
            Some(t) => {
                self.rtc.set_time(t);
                true
            }
            None => false,
        }
    }

    pub fn status(&self) -> SourceStatus {
        let settings = self.ntp.settings();
        SourceStatus {
            ntp_enabled: settings.enabled,
            ntp_server: settings.server.clone(),
            ntp_synced: self.ntp.is_synced(),
            since_last_sync: self.ntp.last_sync().map(|t| t.elapsed()),
            ntp_offset_ms: self.ntp.offset().map(|o| o.num_milliseconds()),
            timezone_offset_hours: settings.timezone_offset_hours + settings.dst_offset_hours,
            rtc_correction_secs: self.rtc.correction().num_seconds(),
            active: self.active_kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timesource::NtpSettings;

    fn offline() -> FallbackClock {
        let ntp = NtpClock::new(NtpSettings { enabled: false, ..NtpSettings::default() }).unwrap();
        FallbackClock::new(ntp, RtcClock::new(), true)
    }

    #[test]
    fn test_unsynced_uses_rtc() {
        let clock = offline();
        assert_eq!(clock.active_kind(), SourceKind::Rtc);
        assert_eq!(clock.read().unwrap().source, SourceKind::Rtc);
    }

    #[test]
    fn test_rtc_sync_needs_ntp() {
        let mut clock = offline();
        assert!(!clock.sync_rtc_from_ntp());
        assert_eq!(clock.rtc().correction().num_seconds(), 0);
    }

    #[tokio::test]
    async fn test_resync_skipped_when_disabled() {
        let mut clock = offline();
        assert!(!clock.resync(Instant::now()).await);
    }

    #[test]
    fn test_status() {
        let status = offline().status();
        assert!(!status.ntp_enabled);
        assert!(!status.ntp_synced);
        assert_eq!(status.ntp_offset_ms, None);
        assert_eq!(status.active, SourceKind::Rtc);
        assert_eq!(status.timezone_offset_hours, 1);
        assert!(status.to_string().starts_with("RTC"));
    }
}
