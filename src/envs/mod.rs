pub mod catcher;

pub use catcher::{Action, Catcher, CatcherState, Phase, Position, DEFAULT_SEED, MAX_RENDER_CELL};
