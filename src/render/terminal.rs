use crate::hal::{Color, Display, DisplayError};

use super::framebuffer::FrameBuffer;

/// The panel as shown inside a terminal window.
///
/// Drawing goes to a [`FrameBuffer`]; `begin()` plays the role of the bus
/// probe and fails when the terminal cannot show the whole panel.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    buffer: FrameBuffer,
    viewport: (u16, u16),
}

impl TerminalDisplay {
    pub fn new(width: usize, height: usize, viewport: (u16, u16)) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            viewport,
        }
    }

    /// Terminal columns and rows needed for a panel of the given size:
    /// two pixel rows per cell, a border, and one footer line.
    pub fn required_viewport(width: usize, height: usize) -> (u16, u16) {
        let cols = width + 2;
        let rows = height.div_ceil(2) + 2 + 1;
        (
            u16::try_from(cols).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
}

impl Display for TerminalDisplay {
    fn begin(&mut self) -> Result<(), DisplayError> {
        let (cols, rows) = Self::required_viewport(self.buffer.width(), self.buffer.height());
        let (have_cols, have_rows) = self.viewport;
        if have_cols < cols || have_rows < rows {
            return Err(DisplayError::NotDetected(format!(
                "terminal is {have_cols}x{have_rows}, panel needs {cols}x{rows}"
            )));
        }
        Ok(())
    }

    fn clear(&mut self) {
        Display::clear(&mut self.buffer);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.buffer.set_pixel(x, y, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str) {
        self.buffer.draw_text(x, y, size, text);
    }

    fn present(&mut self) {
        self.buffer.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_viewport() {
        assert_eq!(TerminalDisplay::required_viewport(128, 32), (130, 19));
        assert_eq!(TerminalDisplay::required_viewport(10, 9), (12, 8));
    }

    #[test]
    fn test_begin_checks_terminal_size() {
        let mut display = TerminalDisplay::new(128, 32, (200, 50));
        assert!(display.begin().is_ok());

        let mut display = TerminalDisplay::new(128, 32, (80, 24));
        assert!(matches!(
            display.begin(),
            Err(DisplayError::NotDetected(_))
        ));
    }

    #[test]
    fn test_draws_through_to_buffer() {
        let mut display = TerminalDisplay::new(8, 4, (20, 10));
        display.set_pixel(1, 2, Color::Foreground);
        display.present();
        assert!(display.buffer().shown(1, 2));

        display.clear();
        display.present();
        assert_eq!(display.buffer().shown_count(), 0);
    }
}
