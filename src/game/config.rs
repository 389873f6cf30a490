use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// What happens when the snake eats while already at full capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Stop growing; the move becomes a plain shift
    #[default]
    Clamp,
    /// Report `EngineError::CapacityExceeded` from `tick`
    Fail,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("board {width}x{height} is too large")]
    BoardTooLarge { width: usize, height: usize },
    #[error("start length must be at least 2, got {0}")]
    StartTooShort(usize),
    #[error("start snake of length {length} at ({x}, {y}) does not fit the board")]
    StartOutOfBounds { x: i32, y: i32, length: usize },
    #[error("start length {start} exceeds max snake length {max}")]
    StartExceedsCapacity { start: usize, max: usize },
    #[error("max snake length {max} must be smaller than the board area {area}")]
    CapacityTooLarge { max: usize, area: usize },
    #[error("tick interval must be nonzero")]
    ZeroTick,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub board_width: usize,
    /// Height of the board in pixels
    pub board_height: usize,
    /// Initial length of the snake
    pub start_length: usize,
    /// Head cell of a fresh snake; the body trails off to the left
    pub start_head: Position,
    /// Storage reserved for the snake body
    pub max_snake_length: usize,
    /// Fixed interval between ticks
    pub tick_interval_ms: u64,
    pub capacity_policy: CapacityPolicy,
    /// Fixed seed instead of system entropy
    pub seed: Option<u64>,
    /// Show the background lit and the snake dark
    pub inverted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 128,
            board_height: 32,
            start_length: 3,
            start_head: Position::new(2, 0),
            max_snake_length: 512,
            tick_interval_ms: 50,
            capacity_policy: CapacityPolicy::Clamp,
            seed: None,
            inverted: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self {
            max_snake_length: 32,
            ..Self::new(10, 10)
        }
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.start_length < 2 {
            return Err(ConfigError::StartTooShort(self.start_length));
        }

        let (Ok(width), Ok(height)) = (
            i32::try_from(self.board_width),
            i32::try_from(self.board_height),
        ) else {
            return Err(ConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
            });
        };

        let head = self.start_head;
        let out_of_bounds = ConfigError::StartOutOfBounds {
            x: head.x,
            y: head.y,
            length: self.start_length,
        };
        let tail_x = i32::try_from(self.start_length - 1)
            .ok()
            .and_then(|body| head.x.checked_sub(body));
        match tail_x {
            Some(tail_x) if tail_x >= 0 && head.x < width && head.y >= 0 && head.y < height => {}
            _ => return Err(out_of_bounds),
        }

        if self.start_length > self.max_snake_length {
            return Err(ConfigError::StartExceedsCapacity {
                start: self.start_length,
                max: self.max_snake_length,
            });
        }

        let area = self
            .board_width
            .checked_mul(self.board_height)
            .ok_or(ConfigError::BoardTooLarge {
                width: self.board_width,
                height: self.board_height,
            })?;
        if self.max_snake_length >= area {
            return Err(ConfigError::CapacityTooLarge {
                max: self.max_snake_length,
                area,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 128);
        assert_eq!(config.board_height, 32);
        assert_eq!(config.start_length, 3);
        assert_eq!(config.start_head, Position::new(2, 0));
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(64, 16);
        assert_eq!(config.board_width, 64);
        assert_eq!(config.board_height, 16);
        assert!(config.validate().is_ok());
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_start_must_fit() {
        let config = GameConfig {
            start_head: Position::new(1, 0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { .. })
        ));

        let config = GameConfig {
            start_head: Position::new(2, 32),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extreme_start_head_rejected() {
        for head in [
            Position::new(i32::MIN, 0),
            Position::new(i32::MAX, 0),
            Position::new(2, i32::MIN),
        ] {
            let config = GameConfig {
                start_head: head,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::StartOutOfBounds { .. })
            ));
        }

        let config = GameConfig {
            start_length: usize::MAX,
            max_snake_length: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_oversized_board_rejected() {
        let wide = i32::MAX as usize + 1;
        assert!(matches!(
            GameConfig::new(wide, 32).validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));

        // Truncates to 128 under an `as i32` cast
        let wrapped = (1usize << 32) + 128;
        assert!(matches!(
            GameConfig::new(wrapped, 32).validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));
        assert!(matches!(
            GameConfig::new(1 << 33, 1 << 33).validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_capacity_must_leave_room_for_apple() {
        let config = GameConfig {
            max_snake_length: 100,
            ..GameConfig::new(10, 10)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityTooLarge { max: 100, area: 100 })
        ));

        let config = GameConfig {
            max_snake_length: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartExceedsCapacity { .. })
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "board_width": 64, "seed": 7, "capacity_policy": "fail" }}"#
        )
        .unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.board_width, 64);
        assert_eq!(config.board_height, 32);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.capacity_policy, CapacityPolicy::Fail);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));

        assert!(matches!(
            GameConfig::from_json_file("/nonexistent/snake.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
