use log::debug;
use rand::{seq::SliceRandom, Rng};
use rand_distr::{Distribution, WeightedIndex};

use super::{
    action::{Action, NUM_ACTIONS},
    codec::{StateCodec, TaxiState, FUEL_CAPACITY, IN_TAXI},
    grid::{Grid, Pos, LANDMARKS, NUM_ROWS},
    stations::StationSet,
    table::TransitionTable,
};
use crate::error::Result;

/// One bit per action, `1` where the action is not a wasted move
pub type ActionMask = [u8; NUM_ACTIONS];

/// Everything about the taxi MDP that is fixed once built
///
/// A model is immutable and can be shared between any number of episode engines.
#[derive(Clone, Debug)]
pub struct TaxiModel {
    grid: Grid,
    stations: StationSet,
    codec: StateCodec,
    table: TransitionTable,
    initial: WeightedIndex<f64>,
}

impl TaxiModel {
    /// Size the state space for `stations` and precompute the full transition table
    pub fn new(stations: StationSet) -> Result<Self> {
        let grid = Grid::new();
        let codec = StateCodec::new(stations.len());
        let table = TransitionTable::build(&grid, &stations, &codec);
        let initial = WeightedIndex::new(table.initial_distribution())?;

        Ok(Self {
            grid,
            stations,
            codec,
            table,
            initial,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stations(&self) -> &StationSet {
        &self.stations
    }

    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn num_states(&self) -> usize {
        self.codec.num_states()
    }

    /// Compute which actions are worth taking in `state`
    ///
    /// Advisory only: masked-out actions are still legal and resolve through the transition table.
    pub fn action_mask(&self, state: usize) -> ActionMask {
        let s = self.codec.decode(state);
        let taxi = s.taxi();
        let config = self.stations.config(s.station);

        let mut mask = [0; NUM_ACTIONS];
        mask[Action::South.index()] = u8::from(s.row < NUM_ROWS - 1);
        mask[Action::North.index()] = u8::from(s.row > 0);
        mask[Action::East.index()] = u8::from(self.grid.can_move_east(taxi));
        mask[Action::West.index()] = u8::from(self.grid.can_move_west(taxi));
        mask[Action::Pickup.index()] =
            u8::from(s.passenger < IN_TAXI && LANDMARKS[s.passenger] == taxi);
        // The destination is itself a landmark
        mask[Action::Dropoff.index()] =
            u8::from(s.carrying() && self.grid.landmark_at(taxi).is_some());
        mask[Action::Refuel.index()] = u8::from(config.contains(taxi) && s.fuel < FUEL_CAPACITY);
        mask
    }

    /// Draw a state from the initial state distribution
    pub fn sample_initial<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.initial.sample(rng)
    }

    /// Move the taxi of `state` onto a neighbouring cell that hosts a fuel station
    ///
    /// The neighbour is drawn uniformly among the cells reachable by one movement action that
    /// are not base stations, and the station configuration switches to the one whose extra
    /// station is that cell. Passenger, destination and fuel are kept.
    ///
    /// When every reachable neighbour is a base station the taxi stays where it was sampled,
    /// or, if that cell is a base station too, moves to one of the closest non-base cells.
    pub fn place_start<R: Rng + ?Sized>(&self, state: usize, rng: &mut R) -> usize {
        let s = self.codec.decode(state);
        let mask = self.action_mask(state);

        let mut candidates = [Action::South, Action::North, Action::East, Action::West]
            .into_iter()
            .filter(|a| mask[a.index()] == 1)
            .map(|a| neighbour(s.taxi(), a))
            .filter(|&pos| !self.stations.is_base(pos))
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            candidates = self.nearest_free_cells(s.taxi());
        }

        let pos = *candidates
            .choose(rng)
            .expect("At least one cell is not a base station");
        let station = self
            .stations
            .index_of_extra(pos)
            .expect("Every non-base cell is the extra station of a configuration");
        debug!(
            "Placed taxi at {:?} (sampled at {:?}), station configuration {}",
            pos,
            s.taxi(),
            station
        );

        self.codec.encode(&TaxiState {
            row: pos.0,
            col: pos.1,
            station,
            ..s
        })
    }

    /// Non-base cells at the smallest Manhattan distance from `pos`, `pos` itself included
    fn nearest_free_cells(&self, pos: Pos) -> Vec<Pos> {
        let distance = |cell: Pos| cell.0.abs_diff(pos.0) + cell.1.abs_diff(pos.1);
        let free = Grid::cells()
            .filter(|&cell| !self.stations.is_base(cell))
            .collect::<Vec<_>>();
        let closest = free.iter().map(|&cell| distance(cell)).min().unwrap_or_default();
        free.into_iter()
            .filter(|&cell| distance(cell) == closest)
            .collect()
    }
}

fn neighbour(pos: Pos, action: Action) -> Pos {
    let (row, col) = pos;
    match action {
        Action::South => (row + 1, col),
        Action::North => (row - 1, col),
        Action::East => (row, col + 1),
        Action::West => (row, col - 1),
        _ => pos,
    }
}
