// Core traits and types shared by every environment in the crate.

/// Recoverable errors across the environment APIs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// The operation has no implementation on this environment.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A position or state that cannot occur on this environment's grid.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Environment not ready: {0}")]
    NotReady(String),
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error("Other error: {0}")]
    Other(String),
}

/// Convenience alias for results using EnvError.
pub type Result<T> = std::result::Result<T, EnvError>;

/// Scalar feedback returned by an environment.
pub type Reward = f32;

/// A frame returned by the render helpers.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderFrame {
    /// Textual representation of a frame (ASCII art).
    Text(String),
    /// Raw pixel buffer in row-major RGBA format.
    Pixels {
        width: u32,
        height: u32,
        /// Pixel data, 4 bytes per pixel.
        data: Vec<u8>,
    },
}

/// The result of advancing an environment by one timestep.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<Obs> {
    pub observation: Obs,
    pub reward: Reward,
    pub is_over: bool,
}

impl<Obs> Step<Obs> {
    pub fn new(observation: Obs, reward: Reward, is_over: bool) -> Self {
        Self { observation, reward, is_over }
    }
}

fn not_implemented<T>(op: &str) -> Result<T> {
    Err(EnvError::NotImplemented(format!("`{op}` must be provided by the environment")))
}

/// The agent-facing environment contract.
///
/// Every operation has a body that fails with [`EnvError::NotImplemented`];
/// a concrete environment overrides all of them. Observations and state are
/// produced by value so the trait stays usable behind `dyn`.
pub trait Environment {
    type Obs;
    type Act;
    type State;

    /// Current perceptual state.
    fn observe(&self) -> Result<Self::Obs> { not_implemented("observe") }

    /// Apply an action and advance the environment by one timestep.
    fn update(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let _ = action;
        not_implemented("update")
    }

    /// Reinitialise to the start of a fresh episode.
    fn reset(&mut self) -> Result<()> { not_implemented("reset") }

    /// Scalar feedback for the current state.
    fn reward(&self) -> Result<Reward> { not_implemented("reward") }

    /// Whether the current state is terminal.
    fn is_over(&self) -> Result<bool> { not_implemented("is_over") }

    /// Raw internal state representation.
    fn state(&self) -> Result<Self::State> { not_implemented("state") }

    /// Human-readable identification for display and logging.
    fn description(&self) -> Result<String> { not_implemented("description") }
}
