/*
 *  timesource/ntp.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Minimal SNTP client (RFC 4330) and the network backed clock
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

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::{UdpSocket, lookup_host};

use super::{SourceKind, TimeSource, TimeSourceError};
use crate::constants::{
    NTP_DST_OFFSET, NTP_PORT, NTP_SERVER, NTP_SYNC_INTERVAL_SECS, NTP_TIMEOUT_SECS,
    NTP_TIMEZONE_OFFSET,
};

pub const NTP_PACKET_LEN: usize = 48;

/// Seconds from 1900-01-01 (NTP era 0) to 1970-01-01
const NTP_UNIX_EPOCH_DELTA: i64 = 2_208_988_800;

const MODE_CLIENT: u8 = 3;
const MODE_SERVER: u8 = 4;
const MODE_BROADCAST: u8 = 5;
const VERSION: u8 = 4;
const LEAP_ALARM: u8 = 3;

/// 32.32 fixed point seconds since 1900
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NtpTimestamp {
    pub seconds: u32,
    pub fraction: u32,
}

impl NtpTimestamp {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let seconds = (dt.timestamp() + NTP_UNIX_EPOCH_DELTA) as u32;
        let fraction = (((dt.timestamp_subsec_nanos() as u64) << 32) / 1_000_000_000) as u32;
        Self { seconds, fraction }
    }

    /// Seconds with the top bit clear belong to era 1 (2036 onwards).
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let mut secs = self.seconds as i64;
        if secs & 0x8000_0000 == 0 {
            secs += 1 << 32;
        }
        let nanos = ((self.fraction as u64 * 1_000_000_000) >> 32) as u32;
        DateTime::from_timestamp(secs - NTP_UNIX_EPOCH_DELTA, nanos)
    }

    fn read(buf: &[u8]) -> Self {
        Self {
            seconds: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            fraction: u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]),
        }
    }

    fn write(&self, buf: &mut [u8]) {
        buf[..4].copy_from_slice(&self.seconds.to_be_bytes());
        buf[4..8].copy_from_slice(&self.fraction.to_be_bytes());
    }
}

/// Client request; the transmit field carries our send time so the
/// reply can be matched against it.
pub fn build_request(sent: DateTime<Utc>) -> [u8; NTP_PACKET_LEN] {
    let mut packet = [0u8; NTP_PACKET_LEN];
    packet[0] = (VERSION << 3) | MODE_CLIENT;
    NtpTimestamp::from_datetime(sent).write(&mut packet[40..48]);
    packet
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtpResponse {
    pub leap: u8,
    pub version: u8,
    pub mode: u8,
    pub stratum: u8,
    pub reference_id: [u8; 4],
    pub originate: NtpTimestamp,
    pub receive: NtpTimestamp,
    pub transmit: NtpTimestamp,
}

pub fn parse_response(buf: &[u8]) -> Result<NtpResponse, TimeSourceError> {
    if buf.len() < NTP_PACKET_LEN {
        return Err(TimeSourceError::ShortPacket(buf.len()));
    }

    let response = NtpResponse {
        leap: buf[0] >> 6,
        version: (buf[0] >> 3) & 0x07,
        mode: buf[0] & 0x07,
        stratum: buf[1],
        reference_id: [buf[12], buf[13], buf[14], buf[15]],
        originate: NtpTimestamp::read(&buf[24..32]),
        receive: NtpTimestamp::read(&buf[32..40]),
        transmit: NtpTimestamp::read(&buf[40..48]),
    };

    if response.mode != MODE_SERVER && response.mode != MODE_BROADCAST {
        return Err(TimeSourceError::BadMode(response.mode));
    }
    if response.stratum == 0 {
        let code = String::from_utf8_lossy(&response.reference_id)
            .trim_end_matches('\0')
            .to_string();
        return Err(TimeSourceError::KissOfDeath(code));
    }
    if response.leap == LEAP_ALARM {
        return Err(TimeSourceError::Unsynchronized);
    }
    if response.transmit.seconds == 0 {
        return Err(TimeSourceError::InvalidTimestamp);
    }
    Ok(response)
}

/// One completed exchange
#[derive(Debug, Clone, Copy)]
pub struct NtpSample {
    /// Server clock minus local clock
    pub offset: TimeDelta,
    /// Round trip, less server processing time
    pub delay: TimeDelta,
    pub stratum: u8,
}

/// Single SNTP exchange with `address` ("host:port").
pub async fn query(address: &str, timeout: Duration) -> Result<NtpSample, TimeSourceError> {
    let target = lookup_host(address)
        .await?
        .next()
        .ok_or_else(|| TimeSourceError::Resolve(address.to_string()))?;

    let local: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(local).await?;
    socket.connect(target).await?;

    let t1 = Utc::now();
    let request = build_request(t1);
    socket.send(&request).await?;

    let mut buf = [0u8; 128];
    let n = tokio::time::timeout(timeout, socket.recv(&mut buf))
        .await
        .map_err(|_| TimeSourceError::Timeout(timeout))??;
    let t4 = Utc::now();

    let response = parse_response(&buf[..n])?;
    if response.originate != NtpTimestamp::from_datetime(t1) {
        return Err(TimeSourceError::OriginMismatch);
    }

    let t2 = response.receive.to_datetime().ok_or(TimeSourceError::InvalidTimestamp)?;
    let t3 = response.transmit.to_datetime().ok_or(TimeSourceError::InvalidTimestamp)?;

    let offset = ((t2 - t1) + (t3 - t4)) / 2;
    let delay = (t4 - t1) - (t3 - t2);
    debug!("NTP {}: offset {}ms delay {}ms stratum {}",
        target, offset.num_milliseconds(), delay.num_milliseconds(), response.stratum);

    Ok(NtpSample { offset, delay, stratum: response.stratum })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtpSettings {
    pub enabled: bool,
    /// Host name or address, optionally with ":port"
    pub server: String,
    /// Hours east of UTC
    pub timezone_offset_hours: i32,
    /// Extra hours while daylight saving applies
    pub dst_offset_hours: i32,
    pub sync_interval: Duration,
    pub timeout: Duration,
}

impl Default for NtpSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            server: NTP_SERVER.to_string(),
            timezone_offset_hours: NTP_TIMEZONE_OFFSET,
            dst_offset_hours: NTP_DST_OFFSET,
            sync_interval: Duration::from_secs(NTP_SYNC_INTERVAL_SECS),
            timeout: Duration::from_secs(NTP_TIMEOUT_SECS),
        }
    }
}

impl NtpSettings {
    pub fn zone(&self) -> Result<FixedOffset, TimeSourceError> {
        let hours = self.timezone_offset_hours + self.dst_offset_hours;
        FixedOffset::east_opt(hours * 3600).ok_or(TimeSourceError::InvalidOffset(hours))
    }

    /// `server` with the default NTP port added when none is given.
    /// IPv6 literals take a port only in brackets ("[2001:db8::1]:123").
    pub fn address(&self) -> String {
        let server = self.server.trim();
        if let Ok(ip) = server.parse::<IpAddr>() {
            return SocketAddr::new(ip, NTP_PORT).to_string();
        }
        if server.parse::<SocketAddr>().is_ok() {
            return server.to_string();
        }
        if server.starts_with('[') && server.ends_with(']') {
            return format!("{}:{}", server, NTP_PORT);
        }
        let has_port = server
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.contains(':') && port.parse::<u16>().is_ok());
        if has_port {
            server.to_string()
        } else {
            format!("{}:{}", server, NTP_PORT)
        }
    }
}

/// Host clock corrected by the last measured server offset, shifted into
/// the configured zone.
#[derive(Debug, Clone)]
pub struct NtpClock {
    settings: NtpSettings,
    zone: FixedOffset,
    offset: Option<TimeDelta>,
    last_sync: Option<Instant>,
    healthy: bool,
}

impl NtpClock {
    pub fn new(settings: NtpSettings) -> Result<Self, TimeSourceError> {
        let zone = settings.zone()?;
        Ok(Self { settings, zone, offset: None, last_sync: None, healthy: false })
    }

    pub fn settings(&self) -> &NtpSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Has an offset and the most recent attempt succeeded
    pub fn is_synced(&self) -> bool {
        self.settings.enabled && self.healthy && self.offset.is_some()
    }

    pub fn offset(&self) -> Option<TimeDelta> {
        self.offset
    }

    pub fn last_sync(&self) -> Option<Instant> {
        self.last_sync
    }

    /// Never synced, or the sync interval has elapsed. A failed attempt
    /// leaves the last success in place so the next check retries.
    pub fn should_sync(&self, now: Instant) -> bool {
        if !self.settings.enabled {
            return false;
        }
        match self.last_sync {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.settings.sync_interval,
        }
    }

    pub fn local_at(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.zone).naive_local()
    }

    /// Query the server and adopt its offset. Returns the new local time.
    pub async fn sync(&mut self) -> Result<NaiveDateTime, TimeSourceError> {
        if !self.settings.enabled {
            return Err(TimeSourceError::Disabled);
        }

        let address = self.settings.address();
        info!("Syncing time with NTP server: {}", address);

        match query(&address, self.settings.timeout).await {
            Ok(sample) => {
                self.offset = Some(sample.offset);
                self.last_sync = Some(Instant::now());
                self.healthy = true;
                let local = self.local_at(Utc::now() + sample.offset);
                info!("NTP synchronization successful: {} (offset {}ms)",
                    local.format("%Y-%m-%d %H:%M:%S"), sample.offset.num_milliseconds());
                Ok(local)
            }
            Err(e) => {
                self.healthy = false;
                warn!("NTP synchronization failed: {}", e);
                Err(e)
            }
        }
    }
}

impl TimeSource for NtpClock {
    fn kind(&self) -> SourceKind {
        SourceKind::Ntp
    }

    fn now(&self) -> Option<NaiveDateTime> {
        if !self.settings.enabled {
            return None;
        }
        self.offset.map(|offset| self.local_at(Utc::now() + offset))
    }
}
