//! Button Snake - two-button Snake for a small monochrome panel
//!
//! This library provides:
//! - Core game logic and the tick engine (game module)
//! - Display, button and entropy traits the engine is written against (hal module)
//! - A terminal emulation of the panel (render, input and modes modules)

pub mod game;
pub mod hal;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
