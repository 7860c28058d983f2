/*
 *  lib.rs
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

//! Word clock that tells the time the way Vienna says it.
//!
//! `phrase` turns a time of day into up to four lines ("Es ist",
//! "viertel", "Drei"), `display` decides when those lines need redrawing
//! and hands them to a [`display::Renderer`], `timesource` supplies the
//! wall time from NTP with an RTC fallback, and `clock` ties it together
//! in a once-a-second tick.

pub mod background;
pub mod clock;
pub mod config;
pub mod constants;
pub mod display;
pub mod pacer;
pub mod phrase;
pub mod timesource;

pub use clock::{ClockSettings, TickOutcome, WienerUhr};
pub use phrase::{DisplayLines, PhraseStyle, TimeOfDay, VienneseTime, compute_viennese_time};
