// Vectorized environments.
// A synchronous batch of N independent environments stepped in one thread.

use crate::core::{EnvError, Environment, Result, Step};
use crate::utils::rng::split_n;

/// Runs N environments side by side in the current thread.
///
/// - Construct with `SyncVectorEnv::new(n, |i| make_env(i))`
///   or `SyncVectorEnv::from_seed(n, seed, |s| make_env_seeded(s))`
/// - Step with one action per environment: `update_all(actions)`
pub struct SyncVectorEnv<E: Environment> {
    envs: Vec<E>,
}

impl<E: Environment> SyncVectorEnv<E> {
    /// Create N environments; the factory receives the slot index.
    pub fn new<F>(n: usize, factory: F) -> Result<Self>
    where
        F: FnMut(usize) -> Result<E>,
    {
        let envs = (0..n).map(factory).collect::<Result<Vec<_>>>()?;
        Ok(Self { envs })
    }

    /// Create N environments seeded from sub-seeds of `seed`.
    pub fn from_seed<F>(n: usize, seed: u64, mut factory: F) -> Result<Self>
    where
        F: FnMut(u64) -> Result<E>,
    {
        let envs = split_n(seed, n)
            .into_iter()
            .map(&mut factory)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { envs })
    }

    pub fn len(&self) -> usize { self.envs.len() }
    pub fn is_empty(&self) -> bool { self.envs.is_empty() }

    pub fn reset_all(&mut self) -> Result<()> {
        self.envs.iter_mut().try_for_each(|e| e.reset())
    }

    /// Step every environment with its own action.
    /// The length of `actions` must equal `self.len()`.
    pub fn update_all(&mut self, actions: Vec<E::Act>) -> Result<Vec<Step<E::Obs>>> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::InvalidAction(format!(
                "got {} actions for {} environments",
                actions.len(),
                self.envs.len()
            )));
        }
        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(e, a)| e.update(a))
            .collect()
    }

    pub fn observe_all(&self) -> Result<Vec<E::Obs>> {
        self.envs.iter().map(|e| e.observe()).collect()
    }

    pub fn is_over_all(&self) -> Result<Vec<bool>> {
        self.envs.iter().map(|e| e.is_over()).collect()
    }

    /// Reset only the environments whose episode has ended. Returns how many were reset.
    pub fn reset_finished(&mut self) -> Result<usize> {
        let mut count = 0;
        for e in &mut self.envs {
            if e.is_over()? {
                e.reset()?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn envs(&self) -> &[E] { &self.envs }
    pub fn envs_mut(&mut self) -> &mut [E] { &mut self.envs }
}
