//! Environment lookup by id.
//! Static table of known environment ids with their `EnvSpec` metadata.
//! Construction goes through `make`, which parses kwargs into a `CatcherConfig`.

use crate::config::{CatcherConfig, KwArgs};
use crate::core::{EnvError, Result};
use crate::envs::Catcher;

pub const CATCHER_V0: &str = "Catcher-v0";

/// Environment specification metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvSpec {
    /// Unique identifier like "Catcher-v0".
    pub id: String,
    /// Episodes end on their own after this many steps for the default grid.
    pub max_episode_steps: Option<u32>,
    /// Mean return at which the task counts as solved.
    pub reward_threshold: Option<f32>,
    /// Whether the environment has randomness beyond its RNG seed.
    pub nondeterministic: bool,
}

impl EnvSpec {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            max_episode_steps: None,
            reward_threshold: None,
            nondeterministic: false,
        }
    }
}

/// Ids accepted by `make`.
pub fn ids() -> &'static [&'static str] { &[CATCHER_V0] }

/// Fetch the spec for a known id.
pub fn get_spec(id: &str) -> Option<EnvSpec> {
    match id {
        CATCHER_V0 => Some(EnvSpec {
            max_episode_steps: Some(CatcherConfig::default().grid_size as u32 - 1),
            reward_threshold: Some(0.9),
            ..EnvSpec::new(CATCHER_V0)
        }),
        _ => None,
    }
}

/// Construct an environment by id from string kwargs.
pub fn make<S: AsRef<str>>(id: S, kwargs: &KwArgs) -> Result<Catcher> {
    match id.as_ref() {
        CATCHER_V0 => Catcher::new(CatcherConfig::from_kwargs(kwargs)?),
        other => Err(EnvError::Other(format!("Unknown environment id: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputType;
    use crate::core::Environment;

    #[test]
    fn make_catcher_with_kwargs() {
        let mut kwargs = KwArgs::new();
        kwargs.insert("grid_size".into(), "6".into());
        kwargs.insert("output_type".into(), "position".into());
        let env = make(CATCHER_V0, &kwargs).expect("make ok");
        assert_eq!(env.grid_size(), 6);
        assert_eq!(env.output_type(), OutputType::Position);
        assert_eq!(env.description().unwrap(), "Catch game with grid size 6");
    }

    #[test]
    fn make_default_matches_default_config() {
        let env = make(CATCHER_V0, &KwArgs::new()).unwrap();
        assert_eq!(env.config(), &CatcherConfig::default());
    }

    #[test]
    fn unknown_id_fails() {
        assert!(matches!(make("CartPole-v1", &KwArgs::new()), Err(EnvError::Other(_))));
        assert!(get_spec("CartPole-v1").is_none());
    }

    #[test]
    fn spec_lists_catcher() {
        assert_eq!(ids(), &[CATCHER_V0]);
        let spec = get_spec(CATCHER_V0).unwrap();
        assert_eq!(spec.id, CATCHER_V0);
        assert_eq!(spec.max_episode_steps, Some(9));
    }
}
