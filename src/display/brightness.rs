/*
 *  display/brightness.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Day/night brightness selection
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

use crate::constants::{BRIGHTNESS_DAY, BRIGHTNESS_NIGHT, NIGHT_END_HOUR, NIGHT_START_HOUR};

/// Two level brightness keyed on the hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessPolicy {
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    pub day: u8,
    pub night: u8,
}

impl Default for BrightnessPolicy {
    fn default() -> Self {
        Self {
            night_start_hour: NIGHT_START_HOUR,
            night_end_hour: NIGHT_END_HOUR,
            day: BRIGHTNESS_DAY,
            night: BRIGHTNESS_NIGHT,
        }
    }
}

impl BrightnessPolicy {
    /// Night wraps midnight: from start hour up to (not including) end hour.
    #[inline]
    pub fn is_night(&self, hour: u32) -> bool {
        hour >= self.night_start_hour || hour < self.night_end_hour
    }

    pub fn level_for(&self, hour: u32) -> u8 {
        if self.is_night(hour) { self.night } else { self.day }
    }
}
