use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    buttons::{ButtonLevels, EdgeDetector},
    config::{CapacityPolicy, ConfigError, GameConfig},
    heading::{Heading, Turns},
    state::{Board, CollisionType, GameState, Position, Snake},
};
use crate::hal::{Color, Display, DisplayError, EntropySource};

/// Message shown while the game is over, one entry per line
pub const GAME_OVER_LINES: [&str; 3] = ["GAME OVER", "press either button", "to restart"];
const GAME_OVER_LINE_HEIGHT: i32 = 11;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("snake cannot grow past its capacity of {capacity} segments")]
    CapacityExceeded { capacity: usize },
}

/// Pixels changed by one tick, in the order they were issued
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderDelta {
    /// Cells drawn in the foreground color
    pub drawn: Vec<Position>,
    /// Cells reset to the background color
    pub erased: Vec<Position>,
    /// The whole panel was cleared and redrawn
    pub redrawn: bool,
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    AteApple,
    Collided(CollisionType),
    /// Game over, no restart requested yet
    Waiting,
    Restarted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub delta: RenderDelta,
}

impl TickReport {
    fn redrawn(outcome: TickOutcome) -> Self {
        Self {
            outcome,
            delta: RenderDelta {
                redrawn: true,
                ..Default::default()
            },
        }
    }
}

/// Owns the game state and the display, and advances both once per tick
pub struct GameEngine<D: Display, E: EntropySource> {
    config: GameConfig,
    board: Board,
    display: D,
    entropy: E,
    rng: StdRng,
    snake: Snake,
    heading: Heading,
    apple: Position,
    state: GameState,
    buttons: EdgeDetector,
    apples_eaten: u32,
}

impl<D: Display, E: EntropySource> GameEngine<D, E> {
    /// Validate the configuration, bring up the display and start the first game
    pub fn new(config: GameConfig, mut display: D, entropy: E) -> Result<Self, EngineError> {
        config.validate()?;
        display.begin()?;

        let board = Board::new(config.board_width, config.board_height);
        let snake = Snake::new(
            config.start_head,
            Heading::RIGHT,
            config.start_length,
            config.max_snake_length,
        );

        let mut engine = Self {
            config,
            board,
            display,
            entropy,
            rng: StdRng::seed_from_u64(0),
            snake,
            heading: Heading::RIGHT,
            apple: Position::new(0, 0),
            state: GameState::Running,
            buttons: EdgeDetector::new(),
            apples_eaten: 0,
        };
        engine.initialize();
        Ok(engine)
    }

    /// Start a fresh game and redraw the whole panel.
    ///
    /// Button history is kept so a button still held from the restart press
    /// does not turn the new snake.
    pub fn initialize(&mut self) {
        self.state = GameState::Running;
        self.heading = Heading::RIGHT;
        self.snake = Snake::new(
            self.config.start_head,
            self.heading,
            self.config.start_length,
            self.config.max_snake_length,
        );
        self.apples_eaten = 0;

        let seed = self.entropy.read_noise();
        self.rng = StdRng::seed_from_u64(seed);
        self.apple = self.place_apple();

        self.display.clear();
        for segment in self.snake.segments() {
            self.display.set_pixel(segment.x, segment.y, Color::Foreground);
        }
        self.plot(self.apple, Color::Foreground);
        self.display.present();

        info!(seed, apple = ?self.apple, "game initialized");
    }

    /// Advance one tick with the current button levels.
    ///
    /// The levels only become the edge-detection history when the tick
    /// succeeds, so a press rejected with `CapacityExceeded` still counts as
    /// a rising edge on the next tick.
    pub fn tick(&mut self, levels: ButtonLevels) -> Result<TickReport, EngineError> {
        let turns = self.buttons.edges(levels);

        let report = match self.state {
            GameState::Running => self.step(turns)?,
            GameState::GameOver(_) => {
                if turns.any() {
                    info!("restart requested");
                    self.initialize();
                    TickReport::redrawn(TickOutcome::Restarted)
                } else {
                    TickReport {
                        outcome: TickOutcome::Waiting,
                        delta: RenderDelta::default(),
                    }
                }
            }
        };

        self.buttons.record(levels);
        Ok(report)
    }

    fn step(&mut self, turns: Turns) -> Result<TickReport, EngineError> {
        let heading = self.heading.apply(turns);
        if heading != self.heading {
            debug!(from = ?self.heading, to = ?heading, "turn");
        }

        let new_head = self.snake.head().stepped(heading);
        let ate_apple = new_head == self.apple;

        if !self.board.contains(new_head) {
            self.heading = heading;
            self.enter_game_over(CollisionType::Wall);
            return Ok(TickReport::redrawn(TickOutcome::Collided(CollisionType::Wall)));
        }

        let grown = if ate_apple {
            if self.snake.grow() {
                true
            } else {
                match self.config.capacity_policy {
                    CapacityPolicy::Clamp => {
                        warn!(
                            capacity = self.snake.capacity(),
                            "snake at capacity, not growing"
                        );
                        false
                    }
                    CapacityPolicy::Fail => {
                        return Err(EngineError::CapacityExceeded {
                            capacity: self.snake.capacity(),
                        });
                    }
                }
            }
        } else {
            false
        };
        self.heading = heading;

        let mut delta = RenderDelta::default();
        if !grown {
            let tail = self.snake.tail();
            self.plot(tail, Color::Background);
            delta.erased.push(tail);
        }

        if self.snake.advance(new_head).is_err() {
            self.enter_game_over(CollisionType::SelfCollision);
            return Ok(TickReport::redrawn(TickOutcome::Collided(
                CollisionType::SelfCollision,
            )));
        }

        self.plot(new_head, Color::Foreground);
        delta.drawn.push(new_head);

        if ate_apple {
            self.apples_eaten += 1;
            self.apple = self.place_apple();
            self.plot(self.apple, Color::Foreground);
            delta.drawn.push(self.apple);
            debug!(apple = ?self.apple, length = self.snake.len(), "apple eaten");
        }

        self.display.present();

        Ok(TickReport {
            outcome: if ate_apple {
                TickOutcome::AteApple
            } else {
                TickOutcome::Moved
            },
            delta,
        })
    }

    fn enter_game_over(&mut self, collision: CollisionType) {
        self.state = GameState::GameOver(collision);

        self.display.clear();
        for (line, text) in GAME_OVER_LINES.iter().enumerate() {
            self.display
                .draw_text(0, line as i32 * GAME_OVER_LINE_HEIGHT, 1, text);
        }
        self.display.present();

        info!(
            ?collision,
            length = self.snake.len(),
            apples = self.apples_eaten,
            "game over"
        );
    }

    /// Uniform integer in `[0, bound)`
    fn random_int(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Draw random cells until one is free of the snake
    fn place_apple(&mut self) -> Position {
        loop {
            let x = self.random_int(self.board.width) as i32;
            let y = self.random_int(self.board.height) as i32;
            let pos = Position::new(x, y);

            if !self.snake.occupies(pos) {
                return pos;
            }
        }
    }

    fn plot(&mut self, pos: Position, color: Color) {
        self.display.set_pixel(pos.x, pos.y, color);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    pub fn apples_eaten(&self) -> u32 {
        self.apples_eaten
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
