//! Keyboard input for the terminal port

pub mod buttons;
pub mod handler;

pub use buttons::KeyboardButtons;
pub use handler::{InputHandler, KeyAction};
