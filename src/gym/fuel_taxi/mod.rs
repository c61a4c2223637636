mod action;
mod codec;
mod grid;
mod model;
mod render;
mod stations;
mod table;

use std::sync::Arc;

use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strum::VariantArray;

pub use action::{Action, NUM_ACTIONS};
pub use codec::{StateCodec, TaxiState, FUEL_CAPACITY, IN_TAXI};
pub use grid::{Color, Grid, Pos, LANDMARKS, MAP, NUM_CELLS, NUM_COLS, NUM_ROWS};
pub use model::{ActionMask, TaxiModel};
pub use stations::{choose_base_stations, enumerate_configurations, StationConfig, StationSet};
pub use table::{
    transition, Outcome, TransitionTable, DELIVERY_REWARD, ILLEGAL_DROPOFF_PENALTY,
    ILLEGAL_PICKUP_PENALTY, ILLEGAL_REFUEL_PENALTY, OUT_OF_FUEL_PENALTY, STEP_REWARD,
    WALL_PENALTY,
};

use crate::{
    env::{DiscreteActionSpace, DiscreteStateSpace, Environment, Report, Step},
    error::Result,
};

/// Configuration for the [`FuelTaxi`] environment
#[derive(Clone, Debug)]
pub struct FuelTaxiConfig {
    /// Number of fuel stations active in every episode, including the one next to the start
    pub num_fuel_stations: usize,
    /// Explicit base stations, `num_fuel_stations - 1` cells. Chosen at random when `None` or too short.
    pub base_stations: Option<Vec<Pos>>,
    /// Seed for the environment's random source, drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for FuelTaxiConfig {
    fn default() -> Self {
        Self {
            num_fuel_stations: 5,
            base_stations: None,
            seed: None,
        }
    }
}

/// Auxiliary information returned with every state
#[derive(Clone, Debug, PartialEq)]
pub struct Info {
    /// Probability of the transition that produced the state
    pub prob: f32,
    pub action_mask: ActionMask,
}

/// The fuel-constrained taxi environment
///
/// The full MDP is precomputed into a [`TaxiModel`] when the environment is created.
/// Several environments can share one model through [`FuelTaxi::from_model`].
///
/// ### Generics
/// - `R` - The random source used for station selection, reset sampling and random actions
pub struct FuelTaxi<R = ChaCha8Rng> {
    model: Arc<TaxiModel>,
    rng: R,
    state: usize,
    last_action: Option<Action>,
    pub report: Report,
}

impl<R: Rng + SeedableRng> FuelTaxi<R> {
    /// Build a new environment, precomputing its transition table
    ///
    /// Call [`reset`](Environment::reset) before the first step.
    pub fn new(config: FuelTaxiConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => R::seed_from_u64(seed),
            None => R::from_entropy(),
        };
        let stations =
            StationSet::from_parts(config.num_fuel_stations, config.base_stations, &mut rng)?;
        let model = TaxiModel::new(stations)?;
        Ok(Self::from_model(Arc::new(model), rng))
    }

    /// Run a new episode over an existing model
    pub fn from_model(model: Arc<TaxiModel>, rng: R) -> Self {
        Self {
            model,
            rng,
            state: 0,
            last_action: None,
            report: Report::new(vec!["steps", "reward", "refuels", "deliveries"]),
        }
    }

    pub fn model(&self) -> &Arc<TaxiModel> {
        &self.model
    }

    /// Encoded current state
    pub fn state(&self) -> usize {
        self.state
    }

    /// Decoded current state
    pub fn taxi_state(&self) -> TaxiState {
        self.model.codec().decode(self.state)
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Action mask of the current state
    pub fn action_mask(&self) -> ActionMask {
        self.model.action_mask(self.state)
    }

    /// Step with a raw action index as sent by a training harness
    ///
    /// **Errors** if `action` is outside `[0, 6]`, before the environment is touched
    pub fn step_index(&mut self, action: usize) -> Result<Step<usize, Info>> {
        let action = Action::from_index(action)?;
        Ok(self.step(action))
    }

    /// Text rendering of the current state
    pub fn render(&self) -> String {
        let state = self.taxi_state();
        let config = self.model.stations().config(state.station);
        render::render(&state, config, self.last_action)
    }

    fn info(&self, prob: f32) -> Info {
        Info {
            prob,
            action_mask: self.action_mask(),
        }
    }
}

impl<R: Rng + SeedableRng> Environment for FuelTaxi<R> {
    type State = usize;
    type Action = Action;
    type Info = Info;

    fn step(&mut self, action: Self::Action) -> Step<Self::State, Self::Info> {
        let outcome = *self.model.table().get(self.state, action);
        trace!(
            "{} --{}--> {} (reward {}, terminated {})",
            self.state,
            action,
            outcome.next_state,
            outcome.reward,
            outcome.terminated
        );

        self.state = outcome.next_state;
        self.last_action = Some(action);

        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report
            .entry("reward")
            .and_modify(|x| *x += outcome.reward as f32);
        match (action, outcome.reward) {
            (Action::Refuel, STEP_REWARD) => {
                self.report.entry("refuels").and_modify(|x| *x += 1.0);
            }
            (Action::Dropoff, DELIVERY_REWARD) => {
                self.report.entry("deliveries").and_modify(|x| *x += 1.0);
            }
            _ => {}
        }

        Step {
            state: self.state,
            reward: outcome.reward,
            terminated: outcome.terminated,
            truncated: false,
            info: self.info(outcome.prob),
        }
    }

    fn reset(&mut self, seed: Option<u64>) -> (Self::State, Self::Info) {
        if let Some(seed) = seed {
            self.rng = R::seed_from_u64(seed);
        }

        let sampled = self.model.sample_initial(&mut self.rng);
        self.state = self.model.place_start(sampled, &mut self.rng);
        self.last_action = None;

        (self.state, self.info(1.0))
    }
}

impl<R: Rng + SeedableRng> DiscreteActionSpace for FuelTaxi<R> {
    fn num_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn actions(&self) -> Vec<Self::Action> {
        Action::VARIANTS.to_vec()
    }

    fn random_action(&mut self) -> Self::Action {
        Action::VARIANTS[self.rng.gen_range(0..NUM_ACTIONS)]
    }
}

impl<R: Rng + SeedableRng> DiscreteStateSpace for FuelTaxi<R> {
    fn num_states(&self) -> usize {
        self.model.num_states()
    }
}
