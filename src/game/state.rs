use serde::{Deserialize, Serialize};

use super::heading::Heading;

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one step along a heading
    pub fn stepped(&self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        self.moved_by(dx, dy)
    }
}

/// Fixed board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// The snake body, head first.
///
/// Storage for `capacity` segments is reserved up front and never grows past
/// it; [`Snake::grow`] refuses instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    capacity: usize,
}

impl Snake {
    /// Create a snake whose body extends from `head` opposite to `heading`
    pub fn new(head: Position, heading: Heading, length: usize, capacity: usize) -> Self {
        let mut body = Vec::with_capacity(capacity);
        body.push(head);

        let (dx, dy) = heading.delta();
        for i in 1..length.min(capacity) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, capacity }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.body.len() >= self.capacity
    }

    /// Check if any segment occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Extend the body by one slot holding a copy of the tail. The copy is
    /// overwritten by the following [`Snake::advance`].
    pub fn grow(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = self.tail();
        self.body.push(tail);
        true
    }

    /// Shift every segment one place toward the tail and put the head at
    /// `new_head`.
    ///
    /// Segments are walked from the tail up to the second one so each reads
    /// its leader before the leader moves. If a segment sits on `new_head`
    /// the walk stops and the collision is reported; the body is then left
    /// partially shifted.
    pub fn advance(&mut self, new_head: Position) -> Result<(), Position> {
        for i in (1..self.body.len()).rev() {
            if self.body[i] == new_head {
                return Err(new_head);
            }
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = new_head;
        Ok(())
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
}

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Running,
    GameOver(CollisionType),
}

impl GameState {
    pub fn is_running(&self) -> bool {
        matches!(self, GameState::Running)
    }
}
