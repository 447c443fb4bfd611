//! Tilt-steered snake game
//!
//! The game is a plain state machine. The caller feeds it the latest
//! acceleration with [`SnakeGame::steer`], steps it with
//! [`SnakeGame::advance`], draws it with [`SnakeGame::render`] and sleeps
//! for [`SnakeGame::frame_ms`] between frames. Leaving the game early is the
//! caller's decision (the mode changed); the game only ends by itself when
//! the snake bites itself or fills the board.

pub mod grid;

use heapless::Vec;

use crate::config::SnakeConfig;
use crate::gfx::Screen;
use crate::rng::XorShift32;
use crate::sensor::Vector3;

pub use grid::{Cell, Heading, AREA_TOP, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH, MAX_LEN};

/// Starting length
pub const START_LEN: usize = 3;

/// Random probes before falling back to a scan of free cells
const FOOD_PROBES: usize = 4 * MAX_LEN;

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameEvent {
    /// Snake moved one cell
    Moved,
    /// Snake ate the food and grew, unless already at the length cap
    Ate,
    /// Snake ran into itself or no free cell is left
    GameOver,
}

/// How a game ended, for the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameOutcome {
    GameOver,
    Exited,
}

/// Snake game state
#[derive(Debug, Clone)]
pub struct SnakeGame {
    /// Head first
    body: Vec<Cell, MAX_LEN>,
    heading: Heading,
    food: Option<Cell>,
    score: u32,
    over: bool,
    config: SnakeConfig,
    rng: XorShift32,
}

impl SnakeGame {
    /// New game with a length-3 snake in the middle, heading right
    pub fn new(config: SnakeConfig, rng: XorShift32) -> Self {
        let mut game = Self {
            body: Vec::new(),
            heading: Heading::Right,
            food: None,
            score: 0,
            over: false,
            config,
            rng,
        };
        game.reset();
        game
    }

    /// Start over, keeping the generator state
    pub fn reset(&mut self) {
        let (cx, cy) = (GRID_WIDTH / 2, GRID_HEIGHT / 2);
        self.body.clear();
        for i in 0..START_LEN as u8 {
            let _ = self.body.push(Cell::new(cx - i, cy));
        }
        self.heading = Heading::Right;
        self.score = 0;
        self.over = false;
        self.food = None;
        self.place_food();
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Consume the game and hand back the generator for the next one
    pub fn into_rng(self) -> XorShift32 {
        self.rng
    }

    /// Turn according to the board tilt
    ///
    /// X tilt wins over Y tilt. A request to reverse onto the body is
    /// skipped and the next axis is considered instead.
    pub fn steer(&mut self, accel: Vector3) {
        let t = self.config.steer_threshold;
        let h = self.heading;
        self.heading = if accel.x > t && h != Heading::Left {
            Heading::Right
        } else if accel.x < -t && h != Heading::Right {
            Heading::Left
        } else if accel.y > t && h != Heading::Down {
            Heading::Up
        } else if accel.y < -t && h != Heading::Up {
            Heading::Down
        } else {
            h
        };
    }

    /// Move one cell, then resolve collisions and food
    pub fn advance(&mut self) -> FrameEvent {
        if self.over {
            return FrameEvent::GameOver;
        }

        let new_head = self.heading.step(self.head());
        let len = self.body.len();
        self.body.copy_within(0..len - 1, 1);
        self.body[0] = new_head;

        if self.body[1..].contains(&new_head) {
            self.over = true;
            return FrameEvent::GameOver;
        }

        if self.food != Some(new_head) {
            return FrameEvent::Moved;
        }

        // At the length cap the snake keeps its length; the score still counts
        if !self.body.is_full() {
            let tail = self.body[len - 1];
            // room checked above
            let _ = self.body.push(tail);
        }
        self.score += 1;
        if self.place_food() {
            FrameEvent::Ate
        } else {
            self.over = true;
            FrameEvent::GameOver
        }
    }

    /// Frame period for the current score
    pub fn frame_ms(&self) -> u32 {
        self.config.frame_ms(self.score)
    }

    /// Play field, snake, food and score line
    pub fn render(&self, screen: &mut Screen) {
        let fb = screen.fb();
        fb.rectangle(
            0,
            AREA_TOP,
            GRID_WIDTH as i32 * CELL_SIZE,
            GRID_HEIGHT as i32 * CELL_SIZE,
        );
        for cell in &self.body {
            let (x, y) = cell.origin();
            fb.filled_rectangle(x, y, CELL_SIZE, CELL_SIZE);
        }
        if let Some(food) = self.food {
            let (x, y) = food.origin();
            fb.rectangle(x, y, CELL_SIZE, CELL_SIZE);
        }
        screen.text_fmt(0, 0, format_args!("Snake: {}", self.score));
    }

    /// End-of-game card
    pub fn render_summary(&self, screen: &mut Screen, outcome: GameOutcome) {
        screen.text(0, 0, "Snake");
        screen.text(
            0,
            2,
            match outcome {
                GameOutcome::GameOver => "Game Over",
                GameOutcome::Exited => "Exit game",
            },
        );
        screen.text_fmt(0, 3, format_args!("Score: {}", self.score));
    }

    /// Put the food on a random free cell; false if the board is full
    fn place_food(&mut self) -> bool {
        if self.distinct_cells() >= MAX_LEN {
            self.food = None;
            return false;
        }

        for _ in 0..FOOD_PROBES {
            let cell = Cell::new(
                self.rng.below(GRID_WIDTH as u32) as u8,
                self.rng.below(GRID_HEIGHT as u32) as u8,
            );
            if !self.body.contains(&cell) {
                self.food = Some(cell);
                return true;
            }
        }

        // Crowded board: pick uniformly among the free cells
        let free = MAX_LEN - self.distinct_cells();
        let mut pick = self.rng.below(free as u32) as usize;
        for index in 0..MAX_LEN {
            let cell = Cell::from_index(index);
            if self.body.contains(&cell) {
                continue;
            }
            if pick == 0 {
                self.food = Some(cell);
                return true;
            }
            pick -= 1;
        }
        self.food = None;
        false
    }

    /// Number of cells covered by the body; a fresh tail duplicate counts once
    fn distinct_cells(&self) -> usize {
        self.body
            .iter()
            .enumerate()
            .filter(|&(i, cell)| !self.body[..i].contains(cell))
            .count()
    }
}
