/*
 *  display/mod.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display side of the clock: redraw gate, brightness, layout, renderers
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

pub mod brightness;
pub mod color;
pub mod drivers;
pub mod error;
pub mod gate;
pub mod layout;
pub mod traits;

pub use brightness::BrightnessPolicy;
pub use color::Rgb888;
pub use drivers::console::ConsoleRenderer;
pub use drivers::mock::MockRenderer;
pub use error::DisplayError;
pub use gate::{RedrawGate, lines_differ};
pub use layout::{Placement, TextLayout};
pub use traits::{Frame, Renderer};
