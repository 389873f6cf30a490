//! Core game logic for two-button Snake
//!
//! Everything here is independent of the terminal: the engine talks to the
//! display, buttons and entropy source only through the `hal` traits.

pub mod buttons;
pub mod config;
pub mod engine;
pub mod heading;
pub mod state;

// Re-export commonly used types
pub use buttons::{Button, ButtonLevels, EdgeDetector};
pub use config::{CapacityPolicy, ConfigError, GameConfig};
pub use engine::{
    EngineError, GAME_OVER_LINES, GameEngine, RenderDelta, TickOutcome, TickReport,
};
pub use heading::{Heading, Turns};
pub use state::{Board, CollisionType, GameState, Position, Snake};
