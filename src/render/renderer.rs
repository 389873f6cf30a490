use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::framebuffer::FrameBuffer;
use super::terminal::TerminalDisplay;

/// Draws the presented frame of a [`FrameBuffer`], two pixel rows per
/// terminal cell.
pub struct PanelWidget<'a> {
    frame: &'a FrameBuffer,
    inverted: bool,
}

impl<'a> PanelWidget<'a> {
    pub fn new(frame: &'a FrameBuffer, inverted: bool) -> Self {
        Self { frame, inverted }
    }

    fn lit(&self, x: usize, y: usize) -> bool {
        if y >= self.frame.height() {
            return false;
        }
        self.frame.shown(x as i32, y as i32) != self.inverted
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.frame.height().div_ceil(2);

        for row in 0..rows.min(area.height as usize) {
            for col in 0..self.frame.width().min(area.width as usize) {
                let glyph = match (self.lit(col, row * 2), self.lit(col, row * 2 + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                let pos = (area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char(glyph);
                }
            }
        }
    }
}

pub struct Renderer {
    inverted: bool,
}

impl Renderer {
    pub fn new(inverted: bool) -> Self {
        Self { inverted }
    }

    pub fn render(&self, frame: &mut Frame, display: &TerminalDisplay) {
        let panel = display.buffer();
        let (cols, rows) = TerminalDisplay::required_viewport(panel.width(), panel.height());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(rows - 1), // Panel
                Constraint::Length(1),        // Footer
                Constraint::Min(0),
            ])
            .split(frame.area());

        // Center the panel horizontally
        let panel_area = Layout::horizontal([Constraint::Length(cols)])
            .flex(Flex::Center)
            .split(chunks[0])[0];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Snake ");
        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);
        frame.render_widget(PanelWidget::new(panel, self.inverted), inner);

        frame.render_widget(self.render_controls(), chunks[1]);
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←/A/Z", Style::default().fg(Color::Cyan)),
            Span::raw(" left button | "),
            Span::styled("→/D/X", Style::default().fg(Color::Cyan)),
            Span::raw(" right button | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true)
    }
}
