/*
 *  pacer.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
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
use std::time::{Duration, Instant};

/// Fires at most once per period. The first check always fires.
#[derive(Debug, Clone)]
pub struct Pacer {
    next_deadline: Option<Instant>,
    period: Duration,
}

// phrase tick runs at 1s, the resync check at 60s
impl Pacer {
    pub fn new(period: Duration) -> Self {
        Self { next_deadline: None, period }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Returns true if the period has elapsed; if true, it also schedules the next deadline.
    #[inline]
    pub fn should_fire(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now < deadline => false,
            _ => {
                self.next_deadline = Some(now + self.period);
                true
            }
        }
    }

    /// Fire on the next check regardless of the deadline.
    pub fn reset(&mut self) {
        self.next_deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_check_fires() {
        let mut pacer = Pacer::from_millis(1000);
        assert!(pacer.should_fire(Instant::now()));
    }

    #[test]
    fn test_waits_for_period() {
        let mut pacer = Pacer::from_millis(1000);
        let t0 = Instant::now();
        assert!(pacer.should_fire(t0));
        assert!(!pacer.should_fire(t0 + Duration::from_millis(999)));
        assert!(pacer.should_fire(t0 + Duration::from_millis(1000)));
        assert!(!pacer.should_fire(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn test_reset() {
        let mut pacer = Pacer::from_millis(60_000);
        let t0 = Instant::now();
        assert!(pacer.should_fire(t0));
        pacer.reset();
        assert!(pacer.should_fire(t0));
    }
}
