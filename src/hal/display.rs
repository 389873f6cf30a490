use thiserror::Error;

/// The two colors of a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    Foreground,
    #[default]
    Background,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    /// The panel did not answer during bring-up
    #[error("display not detected: {0}")]
    NotDetected(String),
}

/// Buffered monochrome pixel display.
///
/// Drawing calls only touch the back buffer; nothing becomes visible until
/// [`Display::present`].
pub trait Display {
    /// Bring up the panel. Failure is fatal to the caller.
    fn begin(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Fill the back buffer with the background color
    fn clear(&mut self);

    /// Set one pixel. Coordinates outside the panel are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Draw `text` in the foreground color with its top-left corner at (x, y)
    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str);

    /// Flush the back buffer to the panel as one frame
    fn present(&mut self);
}
