use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;

use super::direction::Direction;

/// Cell where every round starts
pub const ORIGIN: Position = Position { x: 5, y: 5 };

/// Heading of a freshly started snake
pub const START_HEADING: Direction = Direction::Right;

/// Random draws attempted per grid cell before food placement falls back to
/// picking among the free cells directly
const FOOD_DRAWS_PER_CELL: usize = 4;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one cell in a direction, re-entering from the opposite edge when
    /// leaving a grid of `grid_size` cells per side
    pub fn stepped(&self, direction: Direction, grid_size: usize) -> Self {
        let size = grid_size as i32;
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }

    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from its segments, head first. Returns `None` when empty.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    fn push_head(&mut self, head: Position, grow: bool) {
        self.body.insert(0, head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// One round of snake: body, heading, food and score on a square wrap-around
/// grid.
///
/// The state performs no I/O. It changes only through [`GameState::advance`]
/// and [`GameState::set_direction`], or all at once through
/// [`GameState::reset`].
#[derive(Debug, Clone)]
pub struct GameState<R = ThreadRng> {
    snake: Snake,
    /// Heading of the next move; holds the last accepted request
    direction: Direction,
    food: Position,
    score: u32,
    grid_size: usize,
    rng: R,
}

impl<R: Rng> GameState<R> {
    /// Fresh round at the origin, drawing food positions from `rng`
    pub fn with_rng(grid_size: usize, rng: R) -> Self {
        debug_assert!(ORIGIN.is_within(grid_size));
        let mut state = Self::from_parts(Snake::new(ORIGIN), START_HEADING, ORIGIN, grid_size, rng);
        state.reset();
        state
    }

    /// Round with an arbitrary layout, for replays and tests
    pub fn from_parts(
        snake: Snake,
        direction: Direction,
        food: Position,
        grid_size: usize,
        rng: R,
    ) -> Self {
        debug_assert!(snake.segments().iter().all(|p| p.is_within(grid_size)));
        debug_assert!(food.is_within(grid_size));
        Self {
            snake,
            direction,
            food,
            score: 0,
            grid_size,
            rng,
        }
    }

    /// Request a new heading for the next move.
    ///
    /// A request for the reverse of the current heading is ignored. Every
    /// other request overwrites the heading, so between two moves the last
    /// accepted one wins.
    pub fn set_direction(&mut self, requested: Direction) {
        if requested.is_opposite(self.direction) {
            return;
        }
        self.direction = requested;
    }

    /// Move the snake one cell. Returns true when food was eaten.
    ///
    /// Self-collision is not checked here; call [`GameState::is_collided`]
    /// afterwards.
    pub fn advance(&mut self) -> bool {
        let new_head = self.snake.head().stepped(self.direction, self.grid_size);
        let ate_food = new_head == self.food;

        self.snake.push_head(new_head, ate_food);

        if ate_food {
            self.score += 1;
            self.place_food();
        }

        ate_food
    }

    /// True when the head shares a cell with another segment
    pub fn is_collided(&self) -> bool {
        self.snake.body_segments().contains(&self.snake.head())
    }

    /// True when the snake covers every cell and no food can be placed
    pub fn is_board_full(&self) -> bool {
        self.snake.len() >= self.grid_size * self.grid_size
    }

    /// Start over: one-cell snake at the origin, score 0, new food.
    ///
    /// Every round field is replaced in one assignment; only the random source
    /// carries over.
    pub fn reset(&mut self) {
        let fresh = Snake::new(ORIGIN);
        (self.snake, self.direction, self.food, self.score) = (fresh, START_HEADING, ORIGIN, 0);
        self.place_food();
    }

    /// Segments head first
    pub fn body(&self) -> &[Position] {
        self.snake.segments()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn heading(&self) -> Direction {
        self.direction
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    /// Put the food on a uniformly random cell not covered by the snake.
    ///
    /// Rejection sampling first; once the draw budget runs out the free cells
    /// are enumerated and one is chosen from them. On a full grid there is no
    /// free cell and the food stays on the cell just eaten, under the head;
    /// [`GameState::is_board_full`] reports that case so the round can end.
    fn place_food(&mut self) {
        let size = self.grid_size as i32;
        let budget = self.grid_size * self.grid_size * FOOD_DRAWS_PER_CELL;

        for _ in 0..budget {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !self.snake.occupies(pos) {
                self.food = pos;
                return;
            }
        }

        let snake = &self.snake;
        let free = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos));

        if let Some(pos) = free.choose(&mut self.rng) {
            self.food = pos;
        }
    }
}
