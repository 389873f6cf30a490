use crate::game::{Button, ButtonLevels};
use crate::hal::ButtonInput;

/// Keyboard standing in for the two pushbuttons.
///
/// A press is latched until the next tick samples it, so a tap shorter than
/// a tick still registers. When the terminal reports key releases the level
/// also stays up while the key is held; otherwise every press is a one-tick
/// pulse.
///
/// Without release reporting a held key cannot be told apart from repeated
/// taps: the OS auto-repeat delivers fresh presses, each of which becomes a
/// new rising edge once an idle tick has been sampled in between. "Holding a
/// button turns once" therefore only holds on terminals that report releases.
#[derive(Debug, Clone, Default)]
pub struct KeyboardButtons {
    reports_release: bool,
    held: ButtonLevels,
    latched: ButtonLevels,
}

fn slot(levels: &mut ButtonLevels, button: Button) -> &mut bool {
    match button {
        Button::Left => &mut levels.left,
        Button::Right => &mut levels.right,
    }
}

impl KeyboardButtons {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            ..Default::default()
        }
    }

    pub fn press(&mut self, button: Button) {
        *slot(&mut self.latched, button) = true;
        if self.reports_release {
            *slot(&mut self.held, button) = true;
        }
    }

    pub fn release(&mut self, button: Button) {
        *slot(&mut self.held, button) = false;
    }
}

impl ButtonInput for KeyboardButtons {
    fn read_button(&mut self, button: Button) -> bool {
        let latched = std::mem::take(slot(&mut self.latched, button));
        latched || *slot(&mut self.held, button)
    }
}
