/*
 *  display/layout.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Centered text placement on the matrix
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

use arrayvec::ArrayVec;

use crate::constants::{
    GLYPH_WIDTH, LINE_SPACING, MATRIX_HEIGHT, MATRIX_WIDTH, TEXT_X_OFFSET, TEXT_Y_OFFSET,
};
use crate::phrase::{DisplayLines, MAX_LINES};

/// Matrix geometry and text metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    /// Matrix width in pixels
    pub width: u32,

    /// Matrix height in pixels
    pub height: u32,

    /// Baseline to baseline distance
    pub line_spacing: i32,

    /// Advance per character of the text font
    pub glyph_width: i32,

    /// Left edge used when a line is wider than the matrix
    pub x_offset: i32,

    /// Added to the vertically centered start row
    pub y_offset: i32,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            width: MATRIX_WIDTH,
            height: MATRIX_HEIGHT,
            line_spacing: LINE_SPACING,
            glyph_width: GLYPH_WIDTH,
            x_offset: TEXT_X_OFFSET,
            y_offset: TEXT_Y_OFFSET,
        }
    }
}

/// Top-left of one line of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
}

impl TextLayout {
    /// Rough text width, fixed advance per character.
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * self.glyph_width
    }

    pub fn start_y(&self, line_count: usize) -> i32 {
        let total = line_count as i32 * self.line_spacing;
        (self.height as i32 - total) / 2 + self.y_offset
    }

    pub fn center_x(&self, text: &str) -> i32 {
        let x = (self.width as i32 - self.text_width(text)) / 2;
        if x < 0 { self.x_offset } else { x }
    }

    /// Block of lines centered vertically, each line centered horizontally.
    pub fn place(&self, lines: &DisplayLines) -> ArrayVec<Placement, MAX_LINES> {
        let start_y = self.start_y(lines.len());
        lines
            .iter()
            .enumerate()
            .map(|(i, text)| Placement {
                x: self.center_x(text),
                y: start_y + i as i32 * self.line_spacing,
            })
            .collect()
    }

    /// Whole character columns across the matrix
    pub fn columns(&self) -> usize {
        if self.glyph_width <= 0 {
            return 0;
        }
        (self.width as i32 / self.glyph_width) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_line_block() {
        let layout = TextLayout::default();
        let lines = DisplayLines::from_strs(&["Es ist", "fünf nach ", "viertel", "Drei"]).unwrap();
        let placed = layout.place(&lines);
        assert_eq!(placed.len(), 4);
        // (64 - 4*13) / 2 + 8
        assert_eq!(placed[0].y, 14);
        assert_eq!(placed[3].y, 14 + 3 * 13);
        // "Es ist" is 6 chars * 6px = 36px -> (64 - 36) / 2
        assert_eq!(placed[0].x, 14);
    }

    #[test]
    fn test_three_line_block_sits_lower() {
        let layout = TextLayout::default();
        let lines = DisplayLines::from_strs(&["Es ist", "halb", "Drei"]).unwrap();
        // (64 - 39) / 2 + 8
        assert_eq!(layout.place(&lines)[0].y, 20);
    }

    #[test]
    fn test_umlaut_counts_once() {
        let layout = TextLayout::default();
        assert_eq!(layout.text_width("Zwölf"), 30);
    }

    #[test]
    fn test_wide_line_falls_back_to_offset() {
        let layout = TextLayout::default();
        // 11 chars * 6 = 66px > 64px
        assert_eq!(layout.center_x("dreiviertel"), layout.x_offset);
        assert_eq!(layout.columns(), 10);
    }
}
