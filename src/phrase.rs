/*
 *  phrase.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Viennese time phrasing: 24h clock time to spoken phrase fragments
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

use arrayvec::{ArrayString, ArrayVec};
use chrono::Timelike;
use clap::ValueEnum;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Capacity of a single display line in bytes (UTF-8, so "ü" counts twice).
pub const LINE_CAPACITY: usize = 24;
/// "Es ist", lead, qualifier, hour.
pub const MAX_LINES: usize = 4;

/// Fixed-capacity line buffer, no heap in the tick path.
pub type Line = ArrayString<LINE_CAPACITY>;

/// Opening line of every phrase.
pub const OPENING: &str = "Es ist";

// counts 0..=14, index 0 is never spoken
const MINUTE_WORDS: [&str; 15] = [
    "", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben",
    "acht", "neun", "zehn", "elf", "zwölf", "dreizehn", "vierzehn",
];

// two 12 hour cycles so the mod 24 offset arithmetic always lands in range
const HOUR_NAMES: [&str; 24] = [
    "Eins", "Zwei", "Drei", "Vier", "Fünf", "Sechs", "Sieben",
    "Acht", "Neun", "Zehn", "Elf", "Zwölf",
    "Eins", "Zwei", "Drei", "Vier", "Fünf", "Sechs",
    "Sieben", "Acht", "Neun", "Zehn", "Elf", "Zwölf",
];

const NACH: &str = " nach ";
const VOR: &str = " vor ";
// the "vor" leading into the full hour carries no trailing space
const VOR_FULL: &str = " vor";

const VIERTEL: &str = "viertel";
const HALB: &str = "halb";
const DREIVIERTEL: &str = "dreiviertel";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("hour out of range: {0} (must be 0..=23)")]
    HourOutOfRange(u32),
    #[error("minute out of range: {0} (must be 0..=59)")]
    MinuteOutOfRange(u32),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinesError {
    #[error("too many display lines (max 4)")]
    TooManyLines,
    #[error("display line too long: {0:?} (max 24 bytes)")]
    LineTooLong(String),
}

/// Validated wall clock time, hour 0..=23 and minute 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour: hour as u8, minute: minute as u8 })
    }

    /// Any chrono time value is already in range.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self { hour: t.hour() as u8, minute: t.minute() as u8 }
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// Seed for the alternative phrasing draw, stable for a given time of day.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.hour as u64 * 100 + self.minute as u64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// How the round ten minutes (10, 20, 40, 50) are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PhraseStyle {
    /// Coin flip seeded from the time of day.
    #[default]
    Seeded,
    /// Always the five based form ("fünf vor viertel").
    Canonical,
    /// Always the ten based form ("zehn nach").
    Alternative,
}

/// Phrase fragments for one time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VienneseTime {
    lead_phrase: Line,
    second_phrase: &'static str,
    hour_name: &'static str,
}

impl VienneseTime {
    pub fn lead_phrase(&self) -> &str {
        &self.lead_phrase
    }

    /// Empty when no qualifier is spoken.
    pub fn second_phrase(&self) -> &str {
        self.second_phrase
    }

    pub fn hour_name(&self) -> &str {
        self.hour_name
    }

    fn has_second_phrase(&self) -> bool {
        self.second_phrase.len() > 2
    }

    pub fn line_count(&self) -> usize {
        if self.has_second_phrase() { 4 } else { 3 }
    }

    pub fn display_lines(&self) -> DisplayLines {
        let mut lines = ArrayVec::new();
        lines.push(line(OPENING));
        lines.push(self.lead_phrase);
        if self.has_second_phrase() {
            lines.push(line(self.second_phrase));
        }
        lines.push(line(self.hour_name));
        DisplayLines(lines)
    }
}

impl fmt::Display for VienneseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_lines().fmt(f)
    }
}

/// Ordered lines handed to the renderer, 3 or 4 for a phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLines(ArrayVec<Line, MAX_LINES>);

impl DisplayLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary text, rejecting anything the buffers can't hold.
    pub fn from_strs(texts: &[&str]) -> Result<Self, LinesError> {
        let mut lines = Self::new();
        for text in texts {
            lines.push(text)?;
        }
        Ok(lines)
    }

    pub fn push(&mut self, text: &str) -> Result<(), LinesError> {
        let l = Line::from(text).map_err(|_| LinesError::LineTooLong(text.to_string()))?;
        self.0.try_push(l).map_err(|_| LinesError::TooManyLines)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|l| l.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(|l| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|l| l.as_str())
    }
}

impl fmt::Display for DisplayLines {
    /// Lines joined by single spaces, for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for l in self.iter().map(str::trim).filter(|l| !l.is_empty()) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(l)?;
            first = false;
        }
        Ok(())
    }
}

#[inline]
fn line(text: &str) -> Line {
    // all phrase fragments are compile time constants well under capacity
    let mut l = Line::new();
    l.push_str(text);
    l
}

fn counted(count: u32, relation: &str) -> Line {
    let mut l = line(MINUTE_WORDS[count as usize]);
    l.push_str(relation);
    l
}

/// (lead, qualifier, hour offset)
type Rule = (Line, &'static str, u32);

/// Ten based phrasing, only defined for 10, 20, 40 and 50.
fn alternative_rule(minute: u32) -> Option<Rule> {
    match minute {
        10 => Some((line("zehn nach "), "", 0)),
        20 => Some((line("zehn vor "), HALB, 1)),
        40 => Some((line("zehn nach "), HALB, 1)),
        50 => Some((line("zehn vor"), "", 1)),
        _ => None,
    }
}

/// Quarter anchored phrasing: "nach" for the first half of each quarter,
/// "vor" the next marker for the second half.
fn canonical_rule(minute: u32) -> Rule {
    match minute {
        0 => (line("punkt"), "", 0),
        1..=6 => (counted(minute, NACH), "", 0),
        7..=14 => (counted(15 - minute, VOR), VIERTEL, 1),
        15 => (line(VIERTEL), "", 1),
        16..=22 => (counted(minute - 15, NACH), VIERTEL, 1),
        23..=29 => (counted(30 - minute, VOR), HALB, 1),
        30 => (line(HALB), "", 1),
        31..=37 => (counted(minute - 30, NACH), HALB, 1),
        38..=44 => (counted(45 - minute, VOR), DREIVIERTEL, 1),
        45 => (line(DREIVIERTEL), "", 1),
        46..=52 => (counted(minute - 45, NACH), DREIVIERTEL, 1),
        _ => (counted(60 - minute, VOR_FULL), "", 1),
    }
}

/// Hour name after applying the phrase's hour offset. Display hour 0 is
/// treated as hour 24 and so reads "Zwölf".
pub fn hour_name(hour: u32, offset: u32) -> &'static str {
    let mut display_hour = (hour + offset) % 24;
    if display_hour == 0 {
        display_hour = 24;
    }
    HOUR_NAMES[((display_hour - 1) % 24) as usize]
}

/// Seeded coin flip for the round ten minutes.
pub fn prefers_alternative(time: TimeOfDay) -> bool {
    StdRng::seed_from_u64(time.seed()).random_bool(0.5)
}

pub fn compute_viennese_time(time: TimeOfDay) -> VienneseTime {
    compute_viennese_time_with(time, PhraseStyle::Seeded)
}

pub fn compute_viennese_time_with(time: TimeOfDay, style: PhraseStyle) -> VienneseTime {
    let minute = time.minute();
    let use_alternative = match style {
        PhraseStyle::Seeded => prefers_alternative(time),
        PhraseStyle::Canonical => false,
        PhraseStyle::Alternative => true,
    };

    let (lead_phrase, second_phrase, offset) = if use_alternative {
        alternative_rule(minute).unwrap_or_else(|| canonical_rule(minute))
    } else {
        canonical_rule(minute)
    };

    VienneseTime {
        lead_phrase,
        second_phrase,
        hour_name: hour_name(time.hour(), offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    fn canonical(hour: u32, minute: u32) -> VienneseTime {
        compute_viennese_time_with(at(hour, minute), PhraseStyle::Canonical)
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(TimeOfDay::new(24, 0), Err(TimeError::HourOutOfRange(24)));
        assert_eq!(TimeOfDay::new(0, 60), Err(TimeError::MinuteOutOfRange(60)));
        assert!(TimeOfDay::new(23, 59).is_ok());
    }

    #[test]
    fn test_from_timelike() {
        let t = chrono::NaiveTime::from_hms_opt(7, 42, 13).unwrap();
        assert_eq!(TimeOfDay::from_timelike(&t), at(7, 42));
    }

    #[test]
    fn test_nach_first_half_of_hour() {
        let vt = canonical(9, 6);
        assert_eq!(vt.lead_phrase(), "sechs nach ");
        assert_eq!(vt.second_phrase(), "");
        assert_eq!(vt.hour_name(), "Neun");
    }

    #[test]
    fn test_vor_viertel() {
        let vt = canonical(9, 7);
        assert_eq!(vt.lead_phrase(), "acht vor ");
        assert_eq!(vt.second_phrase(), "viertel");
        assert_eq!(vt.hour_name(), "Zehn");
    }

    #[test]
    fn test_quadrant_boundaries() {
        assert_eq!(canonical(9, 22).lead_phrase(), "sieben nach ");
        assert_eq!(canonical(9, 22).second_phrase(), "viertel");
        assert_eq!(canonical(9, 23).lead_phrase(), "sieben vor ");
        assert_eq!(canonical(9, 23).second_phrase(), "halb");
        assert_eq!(canonical(9, 37).lead_phrase(), "sieben nach ");
        assert_eq!(canonical(9, 37).second_phrase(), "halb");
        assert_eq!(canonical(9, 38).lead_phrase(), "sieben vor ");
        assert_eq!(canonical(9, 38).second_phrase(), "dreiviertel");
        assert_eq!(canonical(9, 52).lead_phrase(), "sieben nach ");
        assert_eq!(canonical(9, 52).second_phrase(), "dreiviertel");
        assert_eq!(canonical(9, 53).lead_phrase(), "sieben vor");
        assert_eq!(canonical(9, 53).second_phrase(), "");
    }

    #[test]
    fn test_last_minute_has_no_trailing_space() {
        let vt = canonical(9, 59);
        assert_eq!(vt.lead_phrase(), "eins vor");
        assert_eq!(vt.hour_name(), "Zehn");
    }

    #[test]
    fn test_hour_name_wraps_at_midnight() {
        assert_eq!(hour_name(0, 0), "Zwölf");
        assert_eq!(hour_name(23, 1), "Zwölf");
        assert_eq!(hour_name(12, 0), "Zwölf");
        assert_eq!(hour_name(11, 1), "Zwölf");
        assert_eq!(hour_name(1, 0), "Eins");
        assert_eq!(hour_name(13, 0), "Eins");
    }

    #[test]
    fn test_alternative_forms() {
        let alt = |m| compute_viennese_time_with(at(8, m), PhraseStyle::Alternative);
        assert_eq!(alt(10).lead_phrase(), "zehn nach ");
        assert_eq!(alt(10).hour_name(), "Acht");
        assert_eq!(alt(20).lead_phrase(), "zehn vor ");
        assert_eq!(alt(20).second_phrase(), "halb");
        assert_eq!(alt(20).hour_name(), "Neun");
        assert_eq!(alt(40).lead_phrase(), "zehn nach ");
        assert_eq!(alt(40).second_phrase(), "halb");
        assert_eq!(alt(50).lead_phrase(), "zehn vor");
        assert_eq!(alt(50).second_phrase(), "");
        assert_eq!(alt(50).hour_name(), "Neun");
    }

    #[test]
    fn test_alternative_style_leaves_other_minutes_alone() {
        for minute in (0..60).filter(|m| ![10, 20, 40, 50].contains(m)) {
            assert_eq!(
                compute_viennese_time_with(at(5, minute), PhraseStyle::Alternative),
                canonical(5, minute),
                "minute {minute}"
            );
        }
    }

    #[test]
    fn test_every_lead_fits_a_line() {
        for hour in 0..24 {
            for minute in 0..60 {
                for style in [PhraseStyle::Canonical, PhraseStyle::Alternative] {
                    let vt = compute_viennese_time_with(at(hour, minute), style);
                    assert!(!vt.lead_phrase().is_empty());
                    assert!(!vt.hour_name().is_empty());
                }
            }
        }
    }

    #[test]
    fn test_display_joins_trimmed_lines() {
        assert_eq!(canonical(14, 20).to_string(), "Es ist fünf nach viertel Drei");
        assert_eq!(canonical(14, 0).to_string(), "Es ist punkt Zwei");
    }

    #[test]
    fn test_lines_reject_overflow() {
        let long = "x".repeat(LINE_CAPACITY + 1);
        assert!(matches!(
            DisplayLines::from_strs(&[long.as_str()]),
            Err(LinesError::LineTooLong(_))
        ));
        assert_eq!(
            DisplayLines::from_strs(&["a", "b", "c", "d", "e"]),
            Err(LinesError::TooManyLines)
        );
    }
}
