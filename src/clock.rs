/*
 *  clock.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  The evaluation tick: read the time, phrase it, redraw on change
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

use log::{debug, error, info};
use std::time::{Duration, Instant};

use crate::background::BackgroundSettings;
use crate::constants::{POLL_INTERVAL_MS, SYNC_CHECK_INTERVAL_MS, TICK_INTERVAL_MS};
use crate::display::{BrightnessPolicy, DisplayError, Frame, RedrawGate, Renderer, Rgb888};
use crate::pacer::Pacer;
use crate::phrase::{DisplayLines, PhraseStyle, compute_viennese_time_with};
use crate::timesource::{FallbackClock, TimeReading};

/// Fixed presentation settings for the tick
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSettings {
    pub brightness: BrightnessPolicy,
    pub color: Rgb888,
    pub style: PhraseStyle,
    /// None when monthly backgrounds are off
    pub backgrounds: Option<BackgroundSettings>,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            brightness: BrightnessPolicy::default(),
            color: Rgb888(crate::constants::TEXT_COLOR),
            style: PhraseStyle::default(),
            backgrounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No valid time this tick, nothing computed
    Skipped,
    /// Same lines as last frame
    Unchanged,
    Redrawn { lines: DisplayLines, brightness: u8 },
}

/// Owns the redraw gate and the renderer. One tick at a time, so the
/// gate needs no locking.
pub struct WienerUhr<R: Renderer> {
    settings: ClockSettings,
    gate: RedrawGate,
    renderer: R,
}

impl<R: Renderer> WienerUhr<R> {
    pub fn new(settings: ClockSettings, renderer: R) -> Self {
        Self { settings, gate: RedrawGate::new(), renderer }
    }

    pub fn gate(&self) -> &RedrawGate {
        &self.gate
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Blank the display; the next tick redraws whatever the time is.
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.gate.reset();
        self.renderer.clear()
    }

    pub fn tick(&mut self, reading: Option<TimeReading>) -> Result<TickOutcome, DisplayError> {
        let Some(reading) = reading else {
            debug!("No valid time this tick, skipping");
            return Ok(TickOutcome::Skipped);
        };

        let time = reading.time_of_day();
        let lines = compute_viennese_time_with(time, self.settings.style).display_lines();
        let brightness = self.settings.brightness.level_for(time.hour());
        if !self.gate.needs_redraw(&lines) {
            return Ok(TickOutcome::Unchanged);
        }

        let background = self.settings
            .backgrounds
            .as_ref()
            .and_then(|b| b.path_for(reading.month()));

        info!("Updating display [{}] {}: {}", reading.source, time, lines);
        self.renderer.render(&Frame {
            lines: &lines,
            brightness,
            color: self.settings.color,
            background: background.as_deref(),
        })?;

        // only after the frame made it out, so a failure retries next tick
        self.gate.commit(lines.clone());
        Ok(TickOutcome::Redrawn { lines, brightness })
    }
}

/// Main loop: resync check every minute, phrase tick every second.
/// Runs until the future is dropped.
pub async fn run<R: Renderer>(uhr: &mut WienerUhr<R>, source: &mut FallbackClock) {
    let mut tick = Pacer::from_millis(TICK_INTERVAL_MS);
    let mut sync_check = Pacer::from_millis(SYNC_CHECK_INTERVAL_MS);

    info!("Starting clock loop with {} renderer", uhr.renderer.name());
    loop {
        let now = Instant::now();

        if sync_check.should_fire(now) && source.resync(now).await {
            debug!("Time source now {}", source.status());
        }

        if tick.should_fire(now) {
            uhr.tick(source.read()).unwrap_or_else(|e| {
                error!("Failed to render display frame: {}", e);
                TickOutcome::Skipped
            });
        }

        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MockRenderer;
    use crate::timesource::SourceKind;
    use chrono::NaiveDate;

    fn reading(month: u32, hour: u32, minute: u32, second: u32) -> Option<TimeReading> {
        let at = NaiveDate::from_ymd_opt(2025, month, 15)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap();
        Some(TimeReading::new(at, SourceKind::Rtc))
    }

    fn canonical() -> ClockSettings {
        ClockSettings { style: PhraseStyle::Canonical, ..ClockSettings::default() }
    }

    #[test]
    fn test_skips_without_time() {
        let renderer = MockRenderer::new();
        let mut uhr = WienerUhr::new(canonical(), renderer.clone());
        assert_eq!(uhr.tick(None).unwrap(), TickOutcome::Skipped);
        assert_eq!(renderer.frame_count(), 0);
    }

    #[test]
    fn test_redraws_once_per_phrase() {
        let renderer = MockRenderer::new();
        let mut uhr = WienerUhr::new(canonical(), renderer.clone());

        assert!(matches!(uhr.tick(reading(11, 14, 15, 0)).unwrap(), TickOutcome::Redrawn { .. }));
        for second in 1..60 {
            assert_eq!(uhr.tick(reading(11, 14, 15, second)).unwrap(), TickOutcome::Unchanged);
        }
        assert!(matches!(uhr.tick(reading(11, 14, 16, 0)).unwrap(), TickOutcome::Redrawn { .. }));
        assert_eq!(renderer.frame_count(), 2);
    }

    #[test]
    fn test_brightness_follows_hour() {
        let renderer = MockRenderer::new();
        let mut uhr = WienerUhr::new(canonical(), renderer.clone());

        match uhr.tick(reading(11, 12, 0, 0)).unwrap() {
            TickOutcome::Redrawn { brightness, .. } => assert_eq!(brightness, 80),
            other => panic!("expected redraw, got {:?}", other),
        }
        match uhr.tick(reading(11, 22, 0, 0)).unwrap() {
            TickOutcome::Redrawn { brightness, .. } => assert_eq!(brightness, 40),
            other => panic!("expected redraw, got {:?}", other),
        }
    }

    #[test]
    fn test_background_for_month() {
        let renderer = MockRenderer::new();
        let settings = ClockSettings {
            backgrounds: Some(BackgroundSettings::default()),
            ..canonical()
        };
        let mut uhr = WienerUhr::new(settings, renderer.clone());
        uhr.tick(reading(3, 9, 30, 0)).unwrap();

        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.background.unwrap().to_str(), Some("/backgrounds/maerz.bmp"));
    }

    #[test]
    fn test_failed_render_retries() {
        let renderer = MockRenderer::new();
        let mut uhr = WienerUhr::new(canonical(), renderer.clone());

        renderer.fail_next_render();
        assert!(uhr.tick(reading(11, 8, 5, 0)).is_err());
        assert!(uhr.gate().last().is_none());

        assert!(matches!(uhr.tick(reading(11, 8, 5, 1)).unwrap(), TickOutcome::Redrawn { .. }));
        assert_eq!(renderer.frame_count(), 1);
    }
}
