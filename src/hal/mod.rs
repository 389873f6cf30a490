//! Boundary to the hardware collaborators.
//!
//! The engine only talks to a pixel display, two buttons and an entropy
//! source through these traits. The terminal port in `render` / `input`
//! implements them on the host.

pub mod display;
pub mod entropy;
pub mod input;

pub use display::{Color, Display, DisplayError};
pub use entropy::{EntropySource, FixedEntropy, SystemEntropy};
pub use input::ButtonInput;
