/*
 *  display/color.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  Text colour handling for the RGB matrix
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

use serde::{Deserialize, Serialize};
use std::fmt;

/// 24-bit colour as 0xRRGGBB
///
/// Configuration carries colours in this form; panels driven in 16-bit
/// mode take the RGB565 conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb888(pub u32);

impl Rgb888 {
    pub const BLACK: Rgb888 = Rgb888(0x000000);
    pub const WHITE: Rgb888 = Rgb888(0xFFFFFF);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb888(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn r(&self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Scale every channel by `factor`, clamped to 0.0..=1.0
    pub fn dim(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f) as u8;
        Rgb888::new(scale(self.r()), scale(self.g()), scale(self.b()))
    }

    /// Dim by an 8-bit brightness level (255 = unchanged)
    pub fn with_brightness(&self, level: u8) -> Self {
        self.dim(level as f32 / 255.0)
    }

    pub fn to_rgb565(&self) -> u16 {
        let r = (self.r() as u16 >> 3) & 0x1F;
        let g = (self.g() as u16 >> 2) & 0x3F;
        let b = (self.b() as u16 >> 3) & 0x1F;
        (r << 11) | (g << 5) | b
    }
}

impl fmt::Display for Rgb888 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFFFFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Rgb888(0x12AB34);
        assert_eq!((c.r(), c.g(), c.b()), (0x12, 0xAB, 0x34));
        assert_eq!(Rgb888::new(0x12, 0xAB, 0x34), c);
    }

    #[test]
    fn test_dim() {
        assert_eq!(Rgb888::WHITE.dim(1.0), Rgb888::WHITE);
        assert_eq!(Rgb888::WHITE.dim(0.0), Rgb888::BLACK);
        assert_eq!(Rgb888(0x646464).dim(0.5), Rgb888(0x323232));
        // out of range factors clamp
        assert_eq!(Rgb888::WHITE.dim(3.0), Rgb888::WHITE);
        assert_eq!(Rgb888::BLACK.with_brightness(80), Rgb888::BLACK);
    }

    #[test]
    fn test_rgb565() {
        assert_eq!(Rgb888::WHITE.to_rgb565(), 0xFFFF);
        assert_eq!(Rgb888::BLACK.to_rgb565(), 0x0000);
        assert_eq!(Rgb888(0xFF0000).to_rgb565(), 0xF800);
        assert_eq!(Rgb888(0x00FF00).to_rgb565(), 0x07E0);
        assert_eq!(Rgb888(0x0000FF).to_rgb565(), 0x001F);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb888(0xABCDEF).to_string(), "#ABCDEF");
    }
}
