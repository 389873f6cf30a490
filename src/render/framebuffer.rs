use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::hal::{Color, Display};

/// In-memory monochrome panel with a back buffer for drawing and a front
/// buffer holding the last presented frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    back: Vec<bool>,
    front: Vec<bool>,
    presents: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            back: vec![false; width * height],
            front: vec![false; width * height],
            presents: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Pixel in the back buffer (not yet presented)
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.back[i])
    }

    /// Pixel as of the last `present()`
    pub fn shown(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.front[i])
    }

    /// Number of lit pixels in the presented frame
    pub fn shown_count(&self) -> usize {
        self.front.iter().filter(|lit| **lit).count()
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }
}

impl Display for FrameBuffer {
    fn clear(&mut self) {
        self.back.fill(false);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = color == Color::Foreground;
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str) {
        let font = if size >= 2 { &FONT_10X20 } else { &FONT_6X10 };
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.presents += 1;
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let color = match color {
                BinaryColor::On => Color::Foreground,
                BinaryColor::Off => Color::Background,
            };
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_need_present() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.set_pixel(3, 2, Color::Foreground);

        assert!(fb.pixel(3, 2));
        assert!(!fb.shown(3, 2));

        fb.present();
        assert!(fb.shown(3, 2));
        assert_eq!(fb.shown_count(), 1);
        assert_eq!(fb.present_count(), 1);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.set_pixel(-1, 0, Color::Foreground);
        fb.set_pixel(8, 0, Color::Foreground);
        fb.set_pixel(0, 4, Color::Foreground);
        fb.present();
        assert_eq!(fb.shown_count(), 0);
        assert!(!fb.pixel(-1, 0));
    }

    #[test]
    fn test_clear_and_erase() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.set_pixel(1, 1, Color::Foreground);
        fb.set_pixel(2, 1, Color::Foreground);
        fb.set_pixel(1, 1, Color::Background);
        assert!(!fb.pixel(1, 1));

        Display::clear(&mut fb);
        assert!(!fb.pixel(2, 1));
    }

    #[test]
    fn test_draw_text_lights_pixels() {
        let mut fb = FrameBuffer::new(128, 32);
        fb.draw_text(0, 0, 1, "GAME OVER");
        fb.present();

        let lit = fb.shown_count();
        assert!(lit > 0);
        // 6x10 glyphs starting at the top-left corner stay in the top rows
        for y in 10..32 {
            for x in 0..128 {
                assert!(!fb.shown(x, y));
            }
        }
    }

    #[test]
    fn test_large_text_is_bigger() {
        let mut small = FrameBuffer::new(128, 32);
        small.draw_text(0, 0, 1, "A");
        small.present();

        let mut large = FrameBuffer::new(128, 32);
        large.draw_text(0, 0, 2, "A");
        large.present();

        assert!(large.shown_count() > small.shown_count());
    }
}
