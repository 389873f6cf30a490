//! Host-side panel emulation: an in-memory frame buffer and its ratatui view

pub mod framebuffer;
pub mod renderer;
pub mod terminal;

pub use framebuffer::FrameBuffer;
pub use renderer::{PanelWidget, Renderer};
pub use terminal::TerminalDisplay;
