use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::{config::GameConfig, direction::Direction, state::GameState};

/// Where a round currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh state, waiting for the start command
    Idle,
    /// Ticks move the snake
    Running,
    /// The round ended; the final state is kept for display
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing moved
    Skipped,
    /// The snake moved and is still alive
    Moved { ate_food: bool },
    /// The snake moved into itself and the round ended
    Died { final_score: u32 },
    /// The snake covers the whole grid; the round ends as won
    Cleared { final_score: u32 },
}

/// Drives the round state machine around a single [`GameState`]
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    state: GameState<R>,
    phase: Phase,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let state = GameState::with_rng(config.grid_size, rng);
        Self {
            config,
            state,
            phase: Phase::Idle,
        }
    }

    /// Begin a round. Coming from `GameOver` the state is replaced first.
    /// Returns false if a round is already running.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Running => return false,
            Phase::Idle => {}
            Phase::GameOver => self.state.reset(),
        }
        self.phase = Phase::Running;
        info!(
            "Round started on a {0}x{0} grid, food at ({1}, {2})",
            self.config.grid_size,
            self.state.food().x,
            self.state.food().y
        );
        true
    }

    /// Steer the snake. Ignored unless a round is running.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase == Phase::Running {
            self.state.set_direction(direction);
        }
    }

    /// Execute one step of the game
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Skipped;
        }

        let ate_food = self.state.advance();
        if ate_food {
            debug!(
                "Food eaten, score {} length {}",
                self.state.score(),
                self.state.len()
            );
        }

        if self.state.is_collided() {
            self.phase = Phase::GameOver;
            let final_score = self.state.score();
            info!(
                "Game over: score {} length {}",
                final_score,
                self.state.len()
            );
            return TickOutcome::Died { final_score };
        }

        if self.state.is_board_full() {
            self.phase = Phase::GameOver;
            let final_score = self.state.score();
            info!("Grid filled: score {}", final_score);
            return TickOutcome::Cleared { final_score };
        }

        TickOutcome::Moved { ate_food }
    }

    /// Back to `Idle` with a fresh state
    pub fn reset(&mut self) {
        self.state.reset();
        self.phase = Phase::Idle;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap in a prepared state, keeping the current phase
    #[cfg(test)]
    pub(crate) fn replace_state(&mut self, state: GameState<R>) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine() -> GameEngine<StdRng> {
        GameEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(3))
    }

    /// A snake curled so that turning Up from the head bites the body
    fn doomed_state() -> GameState<StdRng> {
        let body = [(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)]
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();
        GameState::from_parts(
            Snake::from_segments(body).unwrap(),
            Direction::Left,
            Position::new(0, 0),
            10,
            StdRng::seed_from_u64(4),
        )
    }

    #[test]
    fn test_starts_idle() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.state().len(), 1);
        assert_eq!(engine.state().score(), 0);
    }

    #[test]
    fn test_idle_ignores_ticks_and_steering() {
        let mut engine = engine();
        let body_before = engine.state().body().to_vec();

        engine.set_direction(Direction::Down);
        assert_eq!(engine.tick(), TickOutcome::Skipped);

        assert_eq!(engine.state().body(), body_before.as_slice());
        assert_eq!(engine.state().heading(), Direction::Right);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        assert!(engine.start());
        let initial_head = engine.state().snake().head();

        let outcome = engine.tick();

        assert!(matches!(outcome, TickOutcome::Moved { .. }));
        assert_eq!(engine.phase(), Phase::Running);
        assert_ne!(engine.state().snake().head(), initial_head);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut engine = engine();
        assert!(engine.start());
        engine.tick();
        let head = engine.state().snake().head();

        assert!(!engine.start());
        assert_eq!(engine.state().snake().head(), head);
    }

    #[test]
    fn test_collision_ends_round() {
        let mut engine = engine();
        engine.replace_state(doomed_state());
        engine.start();

        engine.set_direction(Direction::Up);
        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Died { final_score: 0 });
        assert_eq!(engine.phase(), Phase::GameOver);
        assert!(engine.state().is_collided());

        // The dead snake stays put until restart
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert_eq!(engine.state().snake().head(), Position::new(5, 4));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = engine();
        engine.replace_state(doomed_state());
        engine.start();
        engine.set_direction(Direction::Up);
        engine.tick();
        assert_eq!(engine.phase(), Phase::GameOver);

        assert!(engine.start());

        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.state().len(), 1);
        assert_eq!(engine.state().score(), 0);
        assert!(!engine.state().snake().occupies(engine.state().food()));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut engine = engine();
        engine.start();
        engine.tick();
        engine.tick();

        engine.reset();

        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.state().len(), 1);
        assert_eq!(engine.state().heading(), Direction::Right);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(5, 5));
        engine.replace_state(GameState::from_parts(
            snake,
            Direction::Right,
            Position::new(6, 5),
            10,
            StdRng::seed_from_u64(5),
        ));
        engine.start();

        let outcome = engine.tick();

        assert_eq!(outcome, TickOutcome::Moved { ate_food: true });
        assert_eq!(engine.state().score(), 1);
        assert_eq!(engine.state().len(), 2);
    }

    #[test]
    fn test_full_grid_ends_round() {
        let mut engine = GameEngine::with_rng(GameConfig::new(6), StdRng::seed_from_u64(6));
        let body = (0..6)
            .flat_map(|y| (0..6).map(move |x| Position::new(x, y)))
            .filter(|&pos| pos != Position::new(1, 0))
            .collect();
        engine.replace_state(GameState::from_parts(
            Snake::from_segments(body).unwrap(),
            Direction::Right,
            Position::new(1, 0),
            6,
            StdRng::seed_from_u64(7),
        ));
        engine.start();

        assert_eq!(engine.tick(), TickOutcome::Cleared { final_score: 1 });
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.tick(), TickOutcome::Skipped);
    }
}
