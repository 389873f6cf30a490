use crate::game::Button;

/// Source of instantaneous button levels.
///
/// Implementations report the raw level only; the engine does its own edge
/// detection.
pub trait ButtonInput {
    fn read_button(&mut self, button: Button) -> bool;
}
