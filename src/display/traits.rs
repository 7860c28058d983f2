/*
 *  display/traits.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Renderer abstraction consumed by the clock tick
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

use std::path::Path;

use crate::display::color::Rgb888;
use crate::display::error::DisplayError;
use crate::phrase::DisplayLines;

/// Everything a renderer needs to paint one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Lines top to bottom, each painted centered
    pub lines: &'a DisplayLines,

    /// Panel brightness (0-255)
    pub brightness: u8,

    /// Undimmed text colour
    pub color: Rgb888,

    /// Background image for the current month, if enabled
    pub background: Option<&'a Path>,
}

impl Frame<'_> {
    /// Text colour as it appears at the frame's brightness
    pub fn effective_color(&self) -> Rgb888 {
        self.color.with_brightness(self.brightness)
    }
}

/// Output side of the clock
///
/// Implementations own the panel (or whatever stands in for it). The
/// clock only calls `render` when the phrase lines changed.
pub trait Renderer: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Paint a complete frame, replacing whatever was shown
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}
