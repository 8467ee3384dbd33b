use rand::Rng;

use crate::config::{CatcherConfig, OutputType};
use crate::core::{EnvError, Environment, RenderFrame, Result, Reward, Step};
use crate::observation::{Observation, Pixels};
use crate::spaces::Discrete;
use crate::utils::render2d::{Canvas, BLUE, GRAY, RED, WHITE};
use crate::utils::rng::{rng_from_seed, RngStream};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 2024;

/// Largest cell edge, in pixels, accepted by `Catcher::render_pixels`.
pub const MAX_RENDER_CELL: u32 = 256;

/// Basket moves. Integer codes: 0 = left, 1 = stay, 2 = right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Left = 0,
    Stay = 1,
    Right = 2,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Left, Action::Stay, Action::Right];

    /// Column offset applied to the basket.
    pub fn delta(self) -> isize {
        match self {
            Action::Left => -1,
            Action::Stay => 0,
            Action::Right => 1,
        }
    }

    pub fn code(self) -> u32 { self as u32 }

    /// Map any integer to an action, treating every code other than 0 and 1 as `Right`.
    pub fn from_code_lenient(code: i64) -> Self {
        match code {
            0 => Action::Left,
            1 => Action::Stay,
            _ => Action::Right,
        }
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Action::Left),
            1 => Ok(Action::Stay),
            2 => Ok(Action::Right),
            other => Err(EnvError::InvalidAction(format!("expected 0, 1 or 2, got {other}"))),
        }
    }
}

impl TryFrom<u32> for Action {
    type Error = EnvError;

    fn try_from(code: u32) -> Result<Self> { Action::try_from(i64::from(code)) }
}

/// Fruit and basket coordinates on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub fruit_row: usize,
    pub fruit_col: usize,
    pub basket_col: usize,
}

impl Position {
    pub fn new(fruit_row: usize, fruit_col: usize, basket_col: usize) -> Self {
        Self { fruit_row, fruit_col, basket_col }
    }

    pub fn to_array(self) -> [usize; 3] { [self.fruit_row, self.fruit_col, self.basket_col] }
}

/// Internal state: a batch holding exactly one position.
pub type CatcherState = [Position; 1];

/// Where an episode stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Terminal,
}

/// Catcher: a 3-cell basket on the bottom row of a square grid catches a
/// single fruit falling one row per step from the top.
///
/// Observation: rendered pixels or the `[fruit_row, fruit_col, basket_col]` triple
/// Action space: Discrete(3) {0: left, 1: stay, 2: right}
/// Reward: +1 on a catch, -1 on a miss, 0 while the fruit falls
pub struct Catcher<R = RngStream> {
    config: CatcherConfig,
    output_shape: Vec<usize>,
    state: CatcherState,
    rng: R,
}

impl Default for Catcher {
    fn default() -> Self {
        Self::from_parts(CatcherConfig::default(), rng_from_seed(DEFAULT_SEED))
    }
}

impl Catcher {
    /// Build from a configuration, seeding from `config.seed` or `DEFAULT_SEED`.
    pub fn new(config: CatcherConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self::with_rng(config, rng_from_seed(seed))
    }

    /// Replace the RNG; takes effect at the next `reset`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = rng_from_seed(seed);
    }
}

impl<R: Rng> Catcher<R> {
    /// Build with a caller-supplied random source.
    pub fn with_rng(config: CatcherConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, rng))
    }

    fn from_parts(config: CatcherConfig, rng: R) -> Self {
        let output_shape = config.resolved_output_shape();
        let mut env = Self {
            config,
            output_shape,
            state: [Position::new(0, 0, 1)],
            rng,
        };
        env.start_episode();
        env
    }

    fn start_episode(&mut self) {
        let g = self.config.grid_size;
        let fruit_col = self.rng.gen_range(0..=g - 2);
        let basket_col = self.rng.gen_range(1..=g - 3);
        self.state = [Position::new(0, fruit_col, basket_col)];
        tracing::debug!(grid_size = g, fruit_col, basket_col, "catcher episode started");
    }

    pub fn config(&self) -> &CatcherConfig { &self.config }
    pub fn grid_size(&self) -> usize { self.config.grid_size }
    pub fn output_type(&self) -> OutputType { self.config.output_type }
    pub fn output_shape(&self) -> &[usize] { &self.output_shape }

    /// The single position in the state batch.
    pub fn position(&self) -> Position { self.state[0] }

    pub fn phase(&self) -> Phase {
        if self.position().fruit_row == self.grid_size() - 1 {
            Phase::Terminal
        } else {
            Phase::Falling
        }
    }

    /// Overwrite the current position, e.g. to replay a recorded episode.
    pub fn set_position(&mut self, position: Position) -> Result<()> {
        let g = self.grid_size();
        if position.fruit_row >= g || position.fruit_col >= g {
            return Err(EnvError::InvalidState(format!(
                "fruit ({}, {}) lies outside a {g}x{g} grid",
                position.fruit_row, position.fruit_col
            )));
        }
        if !(1..g).contains(&position.basket_col) {
            return Err(EnvError::InvalidState(format!(
                "basket column {} outside [1, {}]",
                position.basket_col,
                g - 1
            )));
        }
        self.state = [position];
        Ok(())
    }

    pub fn action_space(&self) -> Discrete { Discrete::new(Action::ALL.len() as u32) }

    /// Row-major `grid_size * grid_size` canvas: fruit cell and basket strip set to 1.
    fn draw(&self) -> Vec<f32> {
        let g = self.grid_size();
        let p = self.position();
        let mut canvas = vec![0.0; g * g];
        canvas[p.fruit_row * g + p.fruit_col] = 1.0;
        let bottom = (g - 1) * g;
        for col in (p.basket_col - 1)..=(p.basket_col + 1) {
            // a basket at the right wall sticks out of the grid
            if col < g {
                canvas[bottom + col] = 1.0;
            }
        }
        canvas
    }

    /// Pixel rendering in `[1, 1, grid_size, grid_size]` layout, whatever the output type.
    pub fn observe_image(&self) -> Pixels {
        let g = self.grid_size();
        Pixels::new(vec![1, 1, g, g], self.draw())
    }

    fn observation(&self) -> Observation {
        match self.config.output_type {
            OutputType::Position => Observation::Position(self.position().to_array()),
            OutputType::Pixels => {
                let mut shape = Vec::with_capacity(self.output_shape.len() + 1);
                shape.push(1);
                shape.extend_from_slice(&self.output_shape);
                Observation::Pixels(Pixels::new(shape, self.draw()))
            }
        }
    }

    fn current_reward(&self) -> Reward {
        let p = self.position();
        match self.phase() {
            Phase::Falling => 0.0,
            Phase::Terminal if p.fruit_col.abs_diff(p.basket_col) <= 1 => 1.0,
            Phase::Terminal => -1.0,
        }
    }

    fn advance(&mut self, action: Action) -> Result<Step<Observation>> {
        if self.phase() == Phase::Terminal {
            return Err(EnvError::NotReady("episode is over; call reset() first".into()));
        }
        let g = self.grid_size();
        let p = self.position();
        let basket_col = p
            .basket_col
            .saturating_add_signed(action.delta())
            .clamp(1, g - 1);
        self.state = [Position::new(p.fruit_row + 1, p.fruit_col, basket_col)];
        tracing::trace!(?action, fruit_row = p.fruit_row + 1, basket_col, "catcher step");

        let reward = self.current_reward();
        let is_over = self.phase() == Phase::Terminal;
        if is_over {
            tracing::debug!(reward, caught = reward > 0.0, "catcher episode over");
        }
        Ok(Step::new(self.observation(), reward, is_over))
    }

    /// Validate an integer action code and advance one step.
    pub fn update_code(&mut self, code: i64) -> Result<Step<Observation>> {
        let action = Action::try_from(code)?;
        self.advance(action)
    }

    /// ASCII frame: `.` empty, `o` fruit, `=` basket.
    pub fn render_text(&self) -> String {
        let g = self.grid_size();
        let p = self.position();
        let mut out = String::with_capacity(g * (g + 1));
        for row in 0..g {
            for col in 0..g {
                let ch = if row == p.fruit_row && col == p.fruit_col {
                    'o'
                } else if row == g - 1 && col + 1 >= p.basket_col && col <= p.basket_col + 1 {
                    '='
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    /// RGBA rendering with each grid cell drawn as a `cell x cell` block.
    /// `cell` is clamped to `[1, MAX_RENDER_CELL]`.
    pub fn render_pixels(&self, cell: u32) -> RenderFrame {
        let cell = cell.clamp(1, MAX_RENDER_CELL);
        let g = self.grid_size() as u32;
        let mut canvas = Canvas::new(g * cell, g * cell);
        canvas.clear(WHITE);

        let c = cell as i32;
        let p = self.position();
        // faint floor under the basket row
        canvas.fill_rect(0, (g as i32 - 1) * c, (g * cell) as i32, c, GRAY);
        canvas.fill_rect((p.basket_col as i32 - 1) * c, (g as i32 - 1) * c, 3 * c, c, BLUE);
        canvas.fill_rect(p.fruit_col as i32 * c, p.fruit_row as i32 * c, c, c, RED);

        canvas.into_render_frame()
    }
}

impl<R: Rng> Environment for Catcher<R> {
    type Obs = Observation;
    type Act = Action;
    type State = CatcherState;

    fn observe(&self) -> Result<Observation> { Ok(self.observation()) }

    fn update(&mut self, action: Action) -> Result<Step<Observation>> { self.advance(action) }

    fn reset(&mut self) -> Result<()> {
        self.start_episode();
        Ok(())
    }

    fn reward(&self) -> Result<Reward> { Ok(self.current_reward()) }

    fn is_over(&self) -> Result<bool> { Ok(self.phase() == Phase::Terminal) }

    fn state(&self) -> Result<CatcherState> { Ok(self.state) }

    fn description(&self) -> Result<String> {
        Ok(format!("Catch game with grid size {}", self.grid_size()))
    }
}
