//! The Catcher grid-world: a 3-cell basket on the bottom row of a square grid
//! tries to catch a single fruit falling from the top.
//!
//! ```
//! use catcher_gym::{Action, Catcher, CatcherConfig, Environment, OutputType};
//!
//! let mut env = Catcher::new(CatcherConfig::new(5, OutputType::Position).with_seed(1))?;
//! while !env.is_over()? {
//!     let step = env.update(Action::Stay)?;
//!     if step.is_over {
//!         assert!(step.reward == 1.0 || step.reward == -1.0);
//!     }
//! }
//! env.reset()?;
//! # Ok::<(), catcher_gym::EnvError>(())
//! ```

pub mod core;
pub mod config;
pub mod observation;
pub mod spaces;
pub mod utils;
pub mod envs;
pub mod vector;
pub mod registry;

pub use crate::core::{EnvError, Environment, RenderFrame, Result, Reward, Step};
pub use crate::config::{CatcherConfig, KwArgs, OutputType};
pub use crate::observation::{Observation, Pixels};
pub use crate::spaces::{Discrete, Space};
pub use crate::envs::{Action, Catcher, CatcherState, Phase, Position};
pub use crate::registry::{make, EnvSpec};
pub use crate::utils::{encode_png, save_png};
pub use crate::vector::SyncVectorEnv;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catcher_runs_an_episode() {
        let mut env = Catcher::default();
        assert_eq!(env.grid_size(), 10);
        let mut steps = 0;
        while !env.is_over().unwrap() {
            let s = env.update(Action::Stay).unwrap();
            steps += 1;
            assert!(s.observation.as_pixels().is_some());
        }
        assert_eq!(steps, 9);
    }

    #[test]
    fn catcher_behind_dyn_environment() {
        let mut env: Box<dyn Environment<Obs = Observation, Act = Action, State = CatcherState>> =
            Box::new(Catcher::new(CatcherConfig::new(4, OutputType::Position)).unwrap());
        env.reset().unwrap();
        let s = env.update(Action::Left).unwrap();
        assert!(!s.is_over);
        assert_eq!(env.state().unwrap()[0].fruit_row, 1);
    }

    #[test]
    fn render_text_frame_has_grid_rows() {
        let env = Catcher::default();
        let frame = RenderFrame::Text(env.render_text());
        match frame {
            RenderFrame::Text(t) => assert_eq!(t.lines().count(), 10),
            other => panic!("expected text, got {:?}", other),
        }
    }
}
