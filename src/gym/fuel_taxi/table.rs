use log::info;
use strum::VariantArray;

use super::{
    action::{Action, NUM_ACTIONS},
    codec::{StateCodec, TaxiState, FUEL_CAPACITY, IN_TAXI},
    grid::{Grid, LANDMARKS, NUM_ROWS},
    stations::{StationConfig, StationSet},
};

/// Reward for any action no other rule applies to
pub const STEP_REWARD: i32 = -1;
pub const WALL_PENALTY: i32 = -5;
pub const ILLEGAL_PICKUP_PENALTY: i32 = -10;
pub const ILLEGAL_DROPOFF_PENALTY: i32 = -20;
pub const ILLEGAL_REFUEL_PENALTY: i32 = -10;
pub const DELIVERY_REWARD: i32 = 20;
/// Overrides every other reward when the tank runs dry
pub const OUT_OF_FUEL_PENALTY: i32 = -20;

/// The single outcome of taking an action in a state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub prob: f32,
    pub next_state: usize,
    pub reward: i32,
    pub terminated: bool,
}

/// Apply the taxi dynamics to a decoded state
///
/// **Returns** `(next_state, reward, terminated)`
pub fn transition(
    grid: &Grid,
    stations: &StationConfig,
    state: &TaxiState,
    action: Action,
) -> (TaxiState, i32, bool) {
    let mut next = *state;
    let mut reward = STEP_REWARD;
    let mut terminated = false;
    let mut fuel = state.fuel as i32;
    let taxi = state.taxi();

    match action {
        Action::South => {
            next.row = (state.row + 1).min(NUM_ROWS - 1);
            fuel -= 1;
        }
        Action::North => {
            next.row = state.row.saturating_sub(1);
            fuel -= 1;
        }
        Action::East => {
            if grid.can_move_east(taxi) {
                next.col += 1;
                fuel -= 1;
            } else {
                reward = WALL_PENALTY;
            }
        }
        Action::West => {
            if grid.can_move_west(taxi) {
                next.col -= 1;
                fuel -= 1;
            } else {
                reward = WALL_PENALTY;
            }
        }
        Action::Pickup => {
            if state.passenger < IN_TAXI && LANDMARKS[state.passenger] == taxi {
                next.passenger = IN_TAXI;
            } else {
                reward = ILLEGAL_PICKUP_PENALTY;
            }
        }
        Action::Dropoff => match grid.landmark_at(taxi) {
            Some(landmark) if state.carrying() && landmark == state.destination => {
                next.passenger = landmark;
                terminated = true;
                reward = DELIVERY_REWARD;
            }
            // The passenger gets out at whichever landmark the taxi stops at
            Some(landmark) if state.carrying() => next.passenger = landmark,
            _ => reward = ILLEGAL_DROPOFF_PENALTY,
        },
        Action::Refuel => {
            if stations.contains(taxi) && state.fuel < FUEL_CAPACITY {
                fuel = FUEL_CAPACITY as i32;
            } else {
                reward = ILLEGAL_REFUEL_PENALTY;
            }
        }
    }

    if fuel <= 0 {
        next.fuel = 0;
        terminated = true;
        reward = OUT_OF_FUEL_PENALTY;
    } else {
        next.fuel = fuel as usize;
    }

    (next, reward, terminated)
}

/// Precomputed dynamics of every `(state, action)` pair
///
/// Outcomes are stored flat at `state * NUM_ACTIONS + action` and never change after [`build`](TransitionTable::build).
#[derive(Clone, Debug)]
pub struct TransitionTable {
    outcomes: Vec<Outcome>,
    initial_distribution: Vec<f64>,
}

impl TransitionTable {
    /// Enumerate the whole state space once, recording the outcome of every action
    ///
    /// Also derives the initial state distribution: uniform over the states where the passenger
    /// waits at a landmark other than its destination.
    pub fn build(grid: &Grid, stations: &StationSet, codec: &StateCodec) -> Self {
        let num_states = codec.num_states();
        let mut outcomes = Vec::with_capacity(num_states * NUM_ACTIONS);
        let mut initial_distribution = vec![0.0; num_states];
        let mut num_starts = 0usize;

        for (i, state) in codec.states().enumerate() {
            if state.passenger < IN_TAXI && state.passenger != state.destination {
                initial_distribution[i] += 1.0;
                num_starts += 1;
            }

            let config = stations.config(state.station);
            for &action in Action::VARIANTS {
                let (next, reward, terminated) = transition(grid, config, &state, action);
                outcomes.push(Outcome {
                    prob: 1.0,
                    next_state: codec.encode(&next),
                    reward,
                    terminated,
                });
            }
        }

        let total = num_starts as f64;
        initial_distribution.iter_mut().for_each(|p| *p /= total);

        info!(
            "Built transition table: {} states x {} actions over {} station configurations, {} valid starts",
            num_states,
            NUM_ACTIONS,
            stations.len(),
            num_starts
        );

        Self {
            outcomes,
            initial_distribution,
        }
    }

    pub fn num_states(&self) -> usize {
        self.outcomes.len() / NUM_ACTIONS
    }

    /// Outcome of taking `action` in `state`
    ///
    /// **Panics** if `state` is outside the state space
    pub fn get(&self, state: usize, action: Action) -> &Outcome {
        &self.outcomes[state * NUM_ACTIONS + action.index()]
    }

    /// Outcomes of every action in `state`, indexed by action
    pub fn outcomes(&self, state: usize) -> &[Outcome] {
        &self.outcomes[state * NUM_ACTIONS..(state + 1) * NUM_ACTIONS]
    }

    /// Probability of each state being drawn at reset
    pub fn initial_distribution(&self) -> &[f64] {
        &self.initial_distribution
    }
}
