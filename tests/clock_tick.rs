// Driving the clock tick against recording and console renderers

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::path::PathBuf;

use wiener_uhr::background::BackgroundSettings;
use wiener_uhr::clock::{ClockSettings, TickOutcome, WienerUhr};
use wiener_uhr::config::{self, Config};
use wiener_uhr::display::{ConsoleRenderer, MockRenderer, TextLayout};
use wiener_uhr::phrase::PhraseStyle;
use wiener_uhr::timesource::{SourceKind, TimeReading};

fn at(month: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, month, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn reading(t: NaiveDateTime) -> Option<TimeReading> {
    Some(TimeReading::new(t, SourceKind::Ntp))
}

#[test]
fn one_frame_per_minute_over_an_hour() {
    let renderer = MockRenderer::new();
    let settings = ClockSettings { style: PhraseStyle::Canonical, ..ClockSettings::default() };
    let mut uhr = WienerUhr::new(settings, renderer.clone());

    let start = at(6, 10, 0);
    let mut redraws = 0;
    for second in 0..3600 {
        if let TickOutcome::Redrawn { .. } = uhr.tick(reading(start + TimeDelta::seconds(second))).unwrap() {
            redraws += 1;
        }
    }

    // every minute of the hour reads differently
    assert_eq!(redraws, 60);
    assert_eq!(renderer.frame_count(), 60);
    let last = renderer.last_frame().unwrap();
    assert_eq!(last.lines.to_string(), "Es ist eins vor Elf");
}

#[test]
fn missing_time_keeps_last_frame() {
    let renderer = MockRenderer::new();
    let mut uhr = WienerUhr::new(ClockSettings::default(), renderer.clone());

    uhr.tick(reading(at(6, 14, 15))).unwrap();
    assert_eq!(uhr.tick(None).unwrap(), TickOutcome::Skipped);
    assert_eq!(uhr.tick(reading(at(6, 14, 15))).unwrap(), TickOutcome::Unchanged);
    assert_eq!(renderer.frame_count(), 1);
}

#[test]
fn night_window_wraps_midnight() {
    let renderer = MockRenderer::new();
    let settings = ClockSettings { style: PhraseStyle::Canonical, ..ClockSettings::default() };
    let mut uhr = WienerUhr::new(settings, renderer.clone());

    let expected = [(7, 40), (8, 80), (15, 80), (16, 40), (23, 40), (0, 40)];
    for (hour, level) in expected {
        match uhr.tick(reading(at(6, hour, 3))).unwrap() {
            TickOutcome::Redrawn { brightness, .. } => assert_eq!(brightness, level, "hour {}", hour),
            other => panic!("hour {}: expected redraw, got {:?}", hour, other),
        }
    }
}

#[test]
fn configured_backgrounds_follow_month() {
    let renderer = MockRenderer::new();
    let settings = ClockSettings {
        backgrounds: Some(BackgroundSettings { dir: PathBuf::from("/srv/uhr"), extension: ".png".into() }),
        ..ClockSettings::default()
    };
    let mut uhr = WienerUhr::new(settings, renderer.clone());

    uhr.tick(reading(at(1, 9, 0))).unwrap();
    assert_eq!(renderer.last_frame().unwrap().background, Some(PathBuf::from("/srv/uhr/januar.png")));
    uhr.tick(reading(at(7, 9, 1))).unwrap();
    assert_eq!(renderer.last_frame().unwrap().background, Some(PathBuf::from("/srv/uhr/juli.png")));
}

#[test]
fn clear_forces_redraw() {
    let renderer = MockRenderer::new();
    let mut uhr = WienerUhr::new(ClockSettings::default(), renderer.clone());

    uhr.tick(reading(at(6, 12, 30))).unwrap();
    uhr.clear().unwrap();
    assert!(matches!(uhr.tick(reading(at(6, 12, 30))).unwrap(), TickOutcome::Redrawn { .. }));
    assert_eq!(renderer.state().lock().unwrap().clear_count, 1);
}

#[test]
fn console_preview_from_config() {
    let yaml = "display:\n  text_color: 16777215\n  brightness_day: 100\ntime:\n  alternative_phrases: false\n";
    let mut cfg = Config::defaults();
    config::merge(&mut cfg, config::parse_yaml(yaml).unwrap());
    config::validate(&cfg).unwrap();

    let layout: TextLayout = cfg.text_layout();
    let mut uhr = WienerUhr::new(cfg.clock_settings(), ConsoleRenderer::new(Vec::new(), layout));
    uhr.tick(reading(at(6, 14, 45))).unwrap();

    let out = String::from_utf8(uhr.into_renderer().into_inner()).unwrap();
    assert!(out.contains("dreiviertel"));
    assert!(out.contains("Drei"));
    assert!(out.contains("brightness 100"));
    assert!(out.contains("#FFFFFF"));
}
