use std::collections::{btree_map::Entry, BTreeMap};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait mirrors the episode contract expected by training harnesses:
/// an episode starts with [`reset`](Environment::reset) and advances one action at a time
/// through [`step`](Environment::step). Truncation (e.g. a step cap) is left to the harness.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Auxiliary information returned alongside every state
    type Info;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    fn step(&mut self, action: Self::Action) -> Step<Self::State, Self::Info>;

    /// Reset the environment to an initial state, optionally reseeding its random source first
    ///
    /// **Returns** `(state, info)`
    fn reset(&mut self, seed: Option<u64>) -> (Self::State, Self::Info);
}

/// An environment with a finite, enumerable action space
pub trait DiscreteActionSpace: Environment {
    /// Number of distinct actions
    fn num_actions(&self) -> usize;

    /// Get every action of the action space
    fn actions(&self) -> Vec<Self::Action>;

    /// Sample an action uniformly from the action space
    fn random_action(&mut self) -> Self::Action;
}

/// An environment with a finite, enumerable state space
pub trait DiscreteStateSpace: Environment {
    /// Number of distinct states
    fn num_states(&self) -> usize;
}

/// The result of a single [`Environment::step`]
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S, I> {
    pub state: S,
    pub reward: i32,
    /// The episode reached a terminal state
    pub terminated: bool,
    /// The episode was cut short by the environment. The environments in this crate never truncate.
    pub truncated: bool,
    pub info: I,
}

/// Named per-episode statistics accumulated by an environment
#[derive(Clone, Debug, Default)]
pub struct Report {
    data: BTreeMap<&'static str, f32>,
}

impl Report {
    /// Create a report tracking the provided keys, all starting at zero
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            data: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Get the entry for a key to update it in place
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f32> {
        self.data.entry(key)
    }

    /// Current value for a key
    pub fn get(&self, key: &str) -> Option<f32> {
        self.data.get(key).copied()
    }

    /// Tracked keys in sorted order
    pub fn keys(&self) -> Vec<&'static str> {
        self.data.keys().copied().collect()
    }

    /// Take the accumulated values, resetting every key to zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f32> {
        let zeroed = self.data.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.data, zeroed)
    }
}
