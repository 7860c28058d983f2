/*
 *  display/gate.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Redraw gate - only repaint when the phrase lines actually change
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

use crate::phrase::DisplayLines;

/// True when the line count or any line at the same position differs.
pub fn lines_differ(prev: &DisplayLines, next: &DisplayLines) -> bool {
    prev.len() != next.len() || prev.iter().zip(next.iter()).any(|(a, b)| a != b)
}

/// Holds the last rendered line set. Single writer: the tick that renders.
#[derive(Debug, Clone, Default)]
pub struct RedrawGate {
    last: Option<DisplayLines>,
}

impl RedrawGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing rendered yet counts as changed.
    pub fn needs_redraw(&self, next: &DisplayLines) -> bool {
        match &self.last {
            Some(prev) => lines_differ(prev, next),
            None => true,
        }
    }

    /// Record lines as rendered. Call after the renderer succeeded so a
    /// failed frame is retried on the next tick.
    pub fn commit(&mut self, lines: DisplayLines) {
        self.last = Some(lines);
    }

    /// Check and record in one step.
    pub fn update(&mut self, next: &DisplayLines) -> bool {
        if self.needs_redraw(next) {
            self.commit(next.clone());
            true
        } else {
            false
        }
    }

    /// Force a repaint on the next tick (e.g. after a brightness change).
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&DisplayLines> {
        self.last.as_ref()
    }
}
