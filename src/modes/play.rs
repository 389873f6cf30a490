use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{ButtonLevels, GameConfig, GameEngine, TickOutcome};
use crate::hal::{EntropySource, FixedEntropy, SystemEntropy};
use crate::input::{InputHandler, KeyAction, KeyboardButtons};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, TerminalDisplay};

pub type PanelEngine = GameEngine<TerminalDisplay, Box<dyn EntropySource>>;

/// Plays the game in a terminal that emulates the panel and the two buttons
pub struct PlayMode {
    config: GameConfig,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    buttons: KeyboardButtons,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.inverted);

        Self {
            config,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            buttons: KeyboardButtons::new(false),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        // Key releases let a held key act like a held button
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release events")?;
        }
        self.buttons = KeyboardButtons::new(enhanced);

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal, enhanced)?;

        info!(
            games = self.metrics.games_played,
            apples = self.metrics.apples_eaten,
            longest = self.metrics.longest_snake,
            ticks = self.metrics.ticks,
            "session finished"
        );

        result
    }

    fn entropy(&self) -> Box<dyn EntropySource> {
        match self.config.seed {
            Some(seed) => Box::new(FixedEntropy(seed)),
            None => Box::new(SystemEntropy),
        }
    }

    fn build_engine(&self, viewport: (u16, u16)) -> Result<PanelEngine> {
        let display = TerminalDisplay::new(
            self.config.board_width,
            self.config.board_height,
            viewport,
        );
        GameEngine::new(self.config.clone(), display, self.entropy())
            .context("Failed to start the game")
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let size = terminal.size().context("Failed to read terminal size")?;
        let mut engine = self.build_engine((size.width, size.height))?;

        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.config.tick_interval());

        self.draw(terminal, &engine)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if matches!(event, Event::Resize(..)) {
                            terminal.autoresize().context("Failed to resize terminal")?;
                            self.draw(terminal, &engine)?;
                        }
                        self.handle_event(event);
                    }
                }

                // Game logic tick; the panel only changes here
                _ = tick_timer.tick() => {
                    self.update_game(&mut engine)?;
                    self.draw(terminal, &engine)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        engine: &PanelEngine,
    ) -> Result<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, engine.display()))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(button) => self.buttons.press(button),
                KeyAction::Release(button) => self.buttons.release(button),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self, engine: &mut PanelEngine) -> Result<()> {
        let levels = ButtonLevels::read(&mut self.buttons);
        let report = engine.tick(levels).context("Game tick failed")?;
        self.metrics.update();

        match report.outcome {
            TickOutcome::Collided(collision) => {
                self.metrics
                    .on_game_over(engine.apples_eaten(), engine.snake().len());
                info!(
                    ?collision,
                    time = %self.metrics.format_time(),
                    games = self.metrics.games_played,
                    "round over"
                );
            }
            TickOutcome::Restarted => {
                self.metrics.on_game_start();
            }
            TickOutcome::AteApple => {
                debug!(apples = engine.apples_eaten(), "apple eaten");
            }
            TickOutcome::Moved | TickOutcome::Waiting => {}
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        enhanced: bool,
    ) -> Result<()> {
        if enhanced {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to restore keyboard mode")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Heading};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn seeded() -> PlayMode {
        PlayMode::new(GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_engine_needs_room() {
        let mode = seeded();
        assert!(mode.build_engine((80, 24)).is_err());
        assert!(mode.build_engine((130, 19)).is_ok());
    }

    #[test]
    fn test_key_press_turns_snake() {
        let mut mode = seeded();
        let mut engine = mode.build_engine((200, 50)).unwrap();

        mode.handle_event(key(KeyCode::Left));
        mode.update_game(&mut engine).unwrap();
        assert_eq!(engine.heading(), Heading::DOWN);

        // The tap was consumed; the next tick goes straight
        mode.update_game(&mut engine).unwrap();
        assert_eq!(engine.heading(), Heading::DOWN);
        assert_eq!(mode.metrics.ticks, 2);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut mode = seeded();
        let mut engine = mode.build_engine((200, 50)).unwrap();

        // Turning up from row 0 hits the wall
        mode.handle_event(key(KeyCode::Right));
        mode.update_game(&mut engine).unwrap();
        assert!(!engine.state().is_running());
        assert_eq!(mode.metrics.games_played, 1);

        mode.update_game(&mut engine).unwrap();
        mode.handle_event(key(KeyCode::Char('a')));
        mode.update_game(&mut engine).unwrap();
        assert_eq!(engine.state(), GameState::Running);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = seeded();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
