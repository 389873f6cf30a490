/// Unit movement vector of the snake's head.
///
/// Exactly one of `dx`, `dy` is nonzero. Values are only produced by the
/// constructors below and by [`Heading::turned_left`] / [`Heading::turned_right`],
/// which only ever swap the active axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    dx: i32,
    dy: i32,
}

impl Heading {
    pub const RIGHT: Heading = Heading { dx: 1, dy: 0 };
    pub const LEFT: Heading = Heading { dx: -1, dy: 0 };
    pub const DOWN: Heading = Heading { dx: 0, dy: 1 };
    pub const UP: Heading = Heading { dx: 0, dy: -1 };

    pub const ALL: [Heading; 4] = [Heading::RIGHT, Heading::LEFT, Heading::DOWN, Heading::UP];

    /// Returns the delta (dx, dy) for one step in this heading
    pub fn delta(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Rotate 90 degrees counterclockwise (left button)
    pub fn turned_left(self) -> Self {
        if self.dy == 0 {
            Heading { dx: 0, dy: self.dx }
        } else {
            Heading {
                dx: -self.dy,
                dy: 0,
            }
        }
    }

    /// Rotate 90 degrees clockwise (right button)
    pub fn turned_right(self) -> Self {
        if self.dy == 0 {
            Heading {
                dx: 0,
                dy: -self.dx,
            }
        } else {
            Heading { dx: self.dy, dy: 0 }
        }
    }

    /// Apply the turns triggered this tick. Left is evaluated before right, so
    /// both edges together cancel out.
    pub fn apply(self, turns: Turns) -> Self {
        let mut heading = self;
        if turns.left {
            heading = heading.turned_left();
        }
        if turns.right {
            heading = heading.turned_right();
        }
        heading
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::RIGHT
    }
}

/// Turns requested during a single tick (rising edges only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Turns {
    pub left: bool,
    pub right: bool,
}

impl Turns {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_opposite(a: Heading, b: Heading) -> bool {
        a.dx == -b.dx && a.dy == -b.dy
    }

    #[test]
    fn test_left_turn_from_right() {
        assert_eq!(Heading::RIGHT.turned_left(), Heading::DOWN);
    }

    #[test]
    fn test_right_turn_from_right() {
        assert_eq!(Heading::RIGHT.turned_right(), Heading::UP);
    }

    #[test]
    fn test_turn_cycles() {
        let mut heading = Heading::RIGHT;
        for _ in 0..4 {
            heading = heading.turned_left();
        }
        assert_eq!(heading, Heading::RIGHT);

        assert_eq!(Heading::RIGHT.turned_left().turned_left(), Heading::LEFT);
        assert_eq!(Heading::UP.turned_right().turned_right(), Heading::DOWN);
    }

    #[test]
    fn test_rotations_are_inverses() {
        for heading in Heading::ALL {
            assert_eq!(heading.turned_left().turned_right(), heading);
            assert_eq!(heading.turned_right().turned_left(), heading);
        }
    }

    #[test]
    fn test_single_turn_never_reverses() {
        for heading in Heading::ALL {
            assert!(!is_opposite(heading.turned_left(), heading));
            assert!(!is_opposite(heading.turned_right(), heading));
            assert_ne!(heading.turned_left(), heading);
            assert_ne!(heading.turned_right(), heading);
        }
    }

    #[test]
    fn test_exactly_one_axis_active() {
        for heading in Heading::ALL {
            for turned in [heading.turned_left(), heading.turned_right()] {
                let (dx, dy) = turned.delta();
                assert!((dx == 0) ^ (dy == 0));
                assert_eq!(dx.abs() + dy.abs(), 1);
            }
        }
    }

    #[test]
    fn test_both_turns_in_one_tick() {
        let both = Turns {
            left: true,
            right: true,
        };
        for heading in Heading::ALL {
            assert_eq!(heading.apply(both), heading);
        }
        assert_eq!(Heading::RIGHT.apply(Turns::default()), Heading::RIGHT);
    }

    #[test]
    fn test_opposite_headings() {
        assert!(is_opposite(Heading::UP, Heading::DOWN));
        assert!(is_opposite(Heading::LEFT, Heading::RIGHT));
        assert!(!is_opposite(Heading::UP, Heading::LEFT));
    }
}
