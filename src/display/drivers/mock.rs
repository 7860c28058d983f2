/*
 *  display/drivers/mock.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock renderer for tests and dry runs
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

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::display::color::Rgb888;
use crate::display::error::DisplayError;
use crate::display::traits::{Frame, Renderer};
use crate::phrase::DisplayLines;

/// Owned copy of a rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub lines: DisplayLines,
    pub brightness: u8,
    pub color: Rgb888,
    pub background: Option<PathBuf>,
}

/// Shared state for inspection in tests
#[derive(Debug, Default)]
pub struct MockRendererState {
    /// Every frame rendered, oldest first
    pub frames: Vec<RecordedFrame>,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Fail the next render call (for error testing)
    pub simulate_render_failure: bool,
}

/// Renderer that records frames instead of painting them
///
/// Clones share state, so a test can hand one to the clock and keep
/// another to look at what was drawn.
#[derive(Debug, Clone, Default)]
pub struct MockRenderer {
    state: Arc<Mutex<MockRendererState>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Arc<Mutex<MockRendererState>> {
        Arc::clone(&self.state)
    }

    pub fn frame_count(&self) -> usize {
        self.state.lock().map(|s| s.frames.len()).unwrap_or(0)
    }

    pub fn last_frame(&self) -> Option<RecordedFrame> {
        self.state.lock().ok().and_then(|s| s.frames.last().cloned())
    }

    pub fn fail_next_render(&self) {
        if let Ok(mut s) = self.state.lock() {
            s.simulate_render_failure = true;
        }
    }
}

impl Renderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), DisplayError> {
        let mut state = self.state
            .lock()
            .map_err(|_| DisplayError::RenderFailed("mock state poisoned".to_string()))?;

        if state.simulate_render_failure {
            state.simulate_render_failure = false;
            return Err(DisplayError::RenderFailed("simulated failure".to_string()));
        }

        state.frames.push(RecordedFrame {
            lines: frame.lines.clone(),
            brightness: frame.brightness,
            color: frame.color,
            background: frame.background.map(PathBuf::from),
        });
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state
            .lock()
            .map_err(|_| DisplayError::RenderFailed("mock state poisoned".to_string()))?;
        state.clear_count += 1;
        Ok(())
    }
}
