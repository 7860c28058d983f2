/*
 *  display/error.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the display side of the clock
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

use std::fmt;
use std::error::Error;

use crate::phrase::LinesError;

/// Error type for all display operations
#[derive(Debug)]
pub enum DisplayError {
    /// Line set could not be assembled
    Lines(LinesError),

    /// Writing the frame out failed
    Io(std::io::Error),

    /// Renderer specific failure
    RenderFailed(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Lines(err) =>
                write!(f, "Display lines error: {}", err),
            DisplayError::Io(err) =>
                write!(f, "Display I/O error: {}", err),
            DisplayError::RenderFailed(msg) =>
                write!(f, "Render failed: {}", msg),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Lines(err) => Some(err),
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LinesError> for DisplayError {
    fn from(err: LinesError) -> Self {
        DisplayError::Lines(err)
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}
