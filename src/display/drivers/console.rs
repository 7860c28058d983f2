/*
 *  display/drivers/console.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Terminal preview of the matrix text
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

use std::io::{self, Write};

use crate::display::error::DisplayError;
use crate::display::layout::TextLayout;
use crate::display::traits::{Frame, Renderer};

/// Draws each frame as a boxed block of text, one character cell per
/// glyph advance, using the same centering as the panel.
pub struct ConsoleRenderer<W: Write + Send> {
    out: W,
    layout: TextLayout,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(layout: TextLayout) -> Self {
        Self::new(io::stdout(), layout)
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W, layout: TextLayout) -> Self {
        Self { out, layout }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn border(&self) -> String {
        format!("+{}+", "-".repeat(self.layout.columns()))
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn name(&self) -> &str {
        "console"
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError> {
        let columns = self.layout.columns();
        let glyph = self.layout.glyph_width.max(1);
        let border = self.border();

        writeln!(self.out, "{}", border)?;
        for (text, at) in frame.lines.iter().zip(self.layout.place(frame.lines)) {
            let indent = (at.x / glyph).max(0) as usize;
            let cell = format!("{}{}", " ".repeat(indent), text);
            let pad = columns.saturating_sub(cell.chars().count());
            writeln!(self.out, "|{}{}|", cell, " ".repeat(pad))?;
        }
        writeln!(self.out, "{}", border)?;

        // the HUB75 panel is driven in 16-bit colour
        let shown = frame.effective_color();
        write!(
            self.out,
            " brightness {:>3}  colour {} -> {} (rgb565 0x{:04X})",
            frame.brightness,
            frame.color,
            shown,
            shown.to_rgb565()
        )?;
        if let Some(bg) = frame.background {
            write!(self.out, "  background {}", bg.display())?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        writeln!(self.out, "{}", self.border())?;
        self.out.flush()?;
        Ok(())
    }
}
