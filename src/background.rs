/*
 *  background.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Monthly background image selection
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

use std::path::{Path, PathBuf};

use crate::constants::{BG_IMAGE_EXTENSION, BG_IMAGE_PATH};

// file names, so ASCII only ("maerz")
const MONTH_NAMES: [&str; 12] = [
    "januar", "februar", "maerz", "april", "mai", "juni",
    "juli", "august", "september", "oktober", "november", "dezember",
];

/// German month name for 1..=12
pub fn month_name(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[(month - 1) as usize])
    } else {
        None
    }
}

/// `<dir>/<monthname><extension>`, e.g. `/backgrounds/oktober.bmp`
pub fn background_path(dir: &Path, month: u32, extension: &str) -> Option<PathBuf> {
    month_name(month).map(|name| dir.join(format!("{}{}", name, extension)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundSettings {
    pub dir: PathBuf,
    pub extension: String,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(BG_IMAGE_PATH),
            extension: BG_IMAGE_EXTENSION.to_string(),
        }
    }
}

impl BackgroundSettings {
    pub fn path_for(&self, month: u32) -> Option<PathBuf> {
        background_path(&self.dir, month, &self.extension)
    }
}
