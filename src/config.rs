/*
 *  config.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  YAML configuration with command line overrides
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

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::background::BackgroundSettings;
use crate::clock::ClockSettings;
use crate::constants::*;
use crate::display::{BrightnessPolicy, Rgb888, TextLayout};
use crate::phrase::PhraseStyle;
use crate::timesource::NtpSettings;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Top-level app configuration. Every field is optional so files and
/// flags can be layered; accessors fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub time: Option<TimeConfig>,
    pub ntp: Option<NtpConfig>,
    pub backgrounds: Option<BackgroundConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub text_color: Option<Rgb888>,   // 0xRRGGBB
    pub brightness_day: Option<u8>,
    pub brightness_night: Option<u8>,
    pub line_spacing: Option<i32>,
    pub glyph_width: Option<i32>,
    pub x_offset: Option<i32>,
    pub y_offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeConfig {
    pub night_start_hour: Option<u32>,
    pub night_end_hour: Option<u32>,
    /// false pins the round ten minutes to the canonical wording
    pub alternative_phrases: Option<bool>,
    /// wins over `alternative_phrases` when both are set
    pub phrase_style: Option<PhraseStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NtpConfig {
    pub enabled: Option<bool>,
    pub server: Option<String>,
    pub timezone_offset_hours: Option<i32>,
    pub dst_offset_hours: Option<i32>,
    pub sync_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub sync_rtc: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BackgroundConfig {
    pub enabled: Option<bool>,
    pub dir: Option<PathBuf>,
    pub extension: Option<String>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "wiener-uhr", about = "Wiener Uhr - the time in Viennese words", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub ntp_server: Option<String>,
    /// run from the RTC only
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_ntp: bool,
    #[arg(long, allow_hyphen_values = true)]
    pub timezone_offset: Option<i32>,
    #[arg(long)]
    pub night_start_hour: Option<u32>,
    #[arg(long)]
    pub night_end_hour: Option<u32>,
    #[arg(long)]
    pub brightness_day: Option<u8>,
    #[arg(long)]
    pub brightness_night: Option<u8>,
    #[arg(long, value_enum)]
    pub phrase_style: Option<PhraseStyle>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub backgrounds_dir: Option<PathBuf>,
    /// render the current time once and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub once: bool,
    /// record frames instead of drawing them
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Cli, Config), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;
    Ok((cli, cfg))
}

/// Defaults, then the YAML file, then flags; validated.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults
    let mut cfg = Config::defaults();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/wiener-uhr/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/wiener-uhr/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/wiener-uhr.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["wiener-uhr.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is a valid, empty config
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

macro_rules! take {
    ($dst:expr, $src:expr, $($field:ident),+ $(,)?) => {
        $( if $src.$field.is_some() { $dst.$field = $src.$field; } )+
    };
}

/// Merge a nested section, Option-by-Option.
fn merge_section<T>(dst: &mut Option<T>, src: Option<T>, f: impl FnOnce(&mut T, T)) {
    let Some(s) = src else { return };
    if let Some(d) = dst.as_mut() {
        f(d, s);
    } else {
        *dst = Some(s);
    }
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() { dst.log_level = src.log_level; }
    merge_section(&mut dst.display, src.display, |d, s| {
        take!(d, s, width, height, text_color, brightness_day, brightness_night,
            line_spacing, glyph_width, x_offset, y_offset);
    });
    merge_section(&mut dst.time, src.time, |d, s| {
        take!(d, s, night_start_hour, night_end_hour, alternative_phrases, phrase_style);
    });
    merge_section(&mut dst.ntp, src.ntp, |d, s| {
        take!(d, s, enabled, server, timezone_offset_hours, dst_offset_hours,
            sync_interval_secs, timeout_secs, sync_rtc);
    });
    merge_section(&mut dst.backgrounds, src.backgrounds, |d, s| {
        take!(d, s, enabled, dir, extension);
    });
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug { cfg.log_level = Some("debug".into()); }

    if cli.brightness_day.is_some() || cli.brightness_night.is_some() {
        let display = cfg.display.get_or_insert_with(DisplayConfig::default);
        if cli.brightness_day.is_some()   { display.brightness_day = cli.brightness_day; }
        if cli.brightness_night.is_some() { display.brightness_night = cli.brightness_night; }
    }

    if cli.night_start_hour.is_some() || cli.night_end_hour.is_some() || cli.phrase_style.is_some() {
        let time = cfg.time.get_or_insert_with(TimeConfig::default);
        if cli.night_start_hour.is_some() { time.night_start_hour = cli.night_start_hour; }
        if cli.night_end_hour.is_some()   { time.night_end_hour = cli.night_end_hour; }
        if cli.phrase_style.is_some()     { time.phrase_style = cli.phrase_style; }
    }

    if cli.ntp_server.is_some() || cli.no_ntp || cli.timezone_offset.is_some() {
        let ntp = cfg.ntp.get_or_insert_with(NtpConfig::default);
        if cli.ntp_server.is_some()      { ntp.server = cli.ntp_server.clone(); }
        if cli.no_ntp                    { ntp.enabled = Some(false); }
        if cli.timezone_offset.is_some() { ntp.timezone_offset_hours = cli.timezone_offset; }
    }

    if let Some(dir) = cli.backgrounds_dir.as_ref() {
        let bg = cfg.backgrounds.get_or_insert_with(BackgroundConfig::default);
        bg.enabled = Some(true);
        bg.dir = Some(dir.clone());
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(level) = cfg.log_level.as_deref() {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of {}", LOG_LEVELS.join("|"))));
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if [display.width, display.height].into_iter().flatten().any(|d| d > MATRIX_MAX_DIMENSION) {
            return Err(ConfigError::Validation(format!(
                "display width/height must be <= {}", MATRIX_MAX_DIMENSION)));
        }
        if display.text_color.is_some_and(|c| c.0 > 0xFF_FFFF) {
            return Err(ConfigError::Validation("display text_color must be 0xRRGGBB".into()));
        }
        if display.line_spacing.is_some_and(|s| s <= 0) || display.glyph_width.is_some_and(|g| g <= 0) {
            return Err(ConfigError::Validation("display line_spacing/glyph_width must be > 0".into()));
        }
    }
    if let Some(time) = cfg.time.as_ref() {
        for hour in [time.night_start_hour, time.night_end_hour].into_iter().flatten() {
            if hour > 23 {
                return Err(ConfigError::Validation("night hours must be 0..=23".into()));
            }
        }
    }
    if let Some(ntp) = cfg.ntp.as_ref() {
        if ntp.enabled != Some(false) && ntp.server.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation("ntp server must not be empty".into()));
        }
        let offset = ntp.timezone_offset_hours.unwrap_or(0) + ntp.dst_offset_hours.unwrap_or(0);
        if !(-12..=14).contains(&offset) {
            return Err(ConfigError::Validation(format!(
                "ntp timezone + dst offset must be within -12..=14 hours, got {}", offset)));
        }
        if ntp.sync_interval_secs == Some(0) || ntp.timeout_secs == Some(0) {
            return Err(ConfigError::Validation("ntp sync_interval_secs/timeout_secs must be > 0".into()));
        }
    }
    Ok(())
}

impl Config {
    /// Every field set to the built-in value, so `--dump-config` shows
    /// what is actually in effect.
    pub fn defaults() -> Self {
        Self {
            log_level: Some("info".into()),
            display: Some(DisplayConfig {
                width: Some(MATRIX_WIDTH),
                height: Some(MATRIX_HEIGHT),
                text_color: Some(Rgb888(TEXT_COLOR)),
                brightness_day: Some(BRIGHTNESS_DAY),
                brightness_night: Some(BRIGHTNESS_NIGHT),
                line_spacing: Some(LINE_SPACING),
                glyph_width: Some(GLYPH_WIDTH),
                x_offset: Some(TEXT_X_OFFSET),
                y_offset: Some(TEXT_Y_OFFSET),
            }),
            time: Some(TimeConfig {
                night_start_hour: Some(NIGHT_START_HOUR),
                night_end_hour: Some(NIGHT_END_HOUR),
                alternative_phrases: Some(true),
                phrase_style: None,
            }),
            ntp: Some(NtpConfig {
                enabled: Some(true),
                server: Some(NTP_SERVER.into()),
                timezone_offset_hours: Some(NTP_TIMEZONE_OFFSET),
                dst_offset_hours: Some(NTP_DST_OFFSET),
                sync_interval_secs: Some(NTP_SYNC_INTERVAL_SECS),
                timeout_secs: Some(NTP_TIMEOUT_SECS),
                sync_rtc: Some(true),
            }),
            backgrounds: Some(BackgroundConfig {
                enabled: Some(false),
                dir: Some(PathBuf::from(BG_IMAGE_PATH)),
                extension: Some(BG_IMAGE_EXTENSION.into()),
            }),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn text_layout(&self) -> TextLayout {
        let mut layout = TextLayout::default();
        if let Some(d) = self.display.as_ref() {
            layout.width = d.width.unwrap_or(layout.width);
            layout.height = d.height.unwrap_or(layout.height);
            layout.line_spacing = d.line_spacing.unwrap_or(layout.line_spacing);
            layout.glyph_width = d.glyph_width.unwrap_or(layout.glyph_width);
            layout.x_offset = d.x_offset.unwrap_or(layout.x_offset);
            layout.y_offset = d.y_offset.unwrap_or(layout.y_offset);
        }
        layout
    }

    pub fn text_color(&self) -> Rgb888 {
        self.display
            .as_ref()
            .and_then(|d| d.text_color)
            .unwrap_or(Rgb888(TEXT_COLOR))
    }

    pub fn brightness_policy(&self) -> BrightnessPolicy {
        let mut policy = BrightnessPolicy::default();
        if let Some(d) = self.display.as_ref() {
            policy.day = d.brightness_day.unwrap_or(policy.day);
            policy.night = d.brightness_night.unwrap_or(policy.night);
        }
        if let Some(t) = self.time.as_ref() {
            policy.night_start_hour = t.night_start_hour.unwrap_or(policy.night_start_hour);
            policy.night_end_hour = t.night_end_hour.unwrap_or(policy.night_end_hour);
        }
        policy
    }

    pub fn phrase_style(&self) -> PhraseStyle {
        let Some(t) = self.time.as_ref() else { return PhraseStyle::default() };
        match (t.phrase_style, t.alternative_phrases) {
            (Some(style), _) => style,
            (None, Some(false)) => PhraseStyle::Canonical,
            _ => PhraseStyle::Seeded,
        }
    }

    pub fn ntp_settings(&self) -> NtpSettings {
        let mut settings = NtpSettings::default();
        if let Some(n) = self.ntp.as_ref() {
            settings.enabled = n.enabled.unwrap_or(settings.enabled);
            if let Some(server) = n.server.as_ref() {
                settings.server = server.clone();
            }
            settings.timezone_offset_hours = n.timezone_offset_hours.unwrap_or(settings.timezone_offset_hours);
            settings.dst_offset_hours = n.dst_offset_hours.unwrap_or(settings.dst_offset_hours);
            if let Some(secs) = n.sync_interval_secs {
                settings.sync_interval = Duration::from_secs(secs);
            }
            if let Some(secs) = n.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
        }
        settings
    }

    pub fn sync_rtc(&self) -> bool {
        self.ntp.as_ref().and_then(|n| n.sync_rtc).unwrap_or(true)
    }

    /// None unless backgrounds are switched on
    pub fn background_settings(&self) -> Option<BackgroundSettings> {
        let bg = self.backgrounds.as_ref()?;
        if !bg.enabled.unwrap_or(false) {
            return None;
        }
        let mut settings = BackgroundSettings::default();
        if let Some(dir) = bg.dir.as_ref() {
            settings.dir = dir.clone();
        }
        if let Some(ext) = bg.extension.as_ref() {
            settings.extension = ext.clone();
        }
        Some(settings)
    }

    pub fn clock_settings(&self) -> ClockSettings {
        ClockSettings {
            brightness: self.brightness_policy(),
            color: self.text_color(),
            style: self.phrase_style(),
            backgrounds: self.background_settings(),
        }
    }
}
