use super::heading::Turns;
use crate::hal::ButtonInput;

/// The two pushbuttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
}

/// Instantaneous button levels sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub left: bool,
    pub right: bool,
}

impl ButtonLevels {
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Poll both buttons from an input source
    pub fn read(input: &mut impl ButtonInput) -> Self {
        Self {
            left: input.read_button(Button::Left),
            right: input.read_button(Button::Right),
        }
    }
}

/// Rising-edge detector over successive [`ButtonLevels`] samples.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: ButtonLevels,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Which buttons went from released to pressed since the last recorded sample
    pub fn edges(&self, levels: ButtonLevels) -> Turns {
        Turns {
            left: levels.left && !self.previous.left,
            right: levels.right && !self.previous.right,
        }
    }

    /// Remember `levels` as the sample the next edges are measured against
    pub fn record(&mut self, levels: ButtonLevels) {
        self.previous = levels;
    }
}
