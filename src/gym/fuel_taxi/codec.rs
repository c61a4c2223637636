use super::grid::{Pos, LANDMARKS, NUM_COLS, NUM_ROWS};
use crate::assert_domain;

pub const FUEL_CAPACITY: usize = 10;
/// Passenger location value meaning the passenger rides in the taxi
pub const IN_TAXI: usize = LANDMARKS.len();

const NUM_PASSENGER_LOCS: usize = LANDMARKS.len() + 1;
const NUM_DESTINATIONS: usize = LANDMARKS.len();
const NUM_FUEL_LEVELS: usize = FUEL_CAPACITY + 1;

/// Decoded form of a discrete state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaxiState {
    pub row: usize,
    pub col: usize,
    /// Landmark index of the waiting passenger, or [`IN_TAXI`]
    pub passenger: usize,
    /// Landmark index of the destination
    pub destination: usize,
    pub fuel: usize,
    /// Index of the active station configuration
    pub station: usize,
}

impl TaxiState {
    pub fn taxi(&self) -> Pos {
        (self.row, self.col)
    }

    pub fn carrying(&self) -> bool {
        self.passenger == IN_TAXI
    }
}

/// Bijection between [`TaxiState`] and a compact integer
///
/// Fields are packed in mixed radix, outermost first:
/// `row (5), col (5), passenger (5), destination (4), fuel (11), station (S)`
/// where `S` is the number of station configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateCodec {
    num_configs: usize,
}

impl StateCodec {
    /// **Panics** if `num_configs` is zero
    pub fn new(num_configs: usize) -> Self {
        assert!(num_configs > 0, "At least one station configuration is required");
        Self { num_configs }
    }

    pub fn num_configs(&self) -> usize {
        self.num_configs
    }

    pub fn num_states(&self) -> usize {
        NUM_ROWS * NUM_COLS * NUM_PASSENGER_LOCS * NUM_DESTINATIONS * NUM_FUEL_LEVELS * self.num_configs
    }

    /// **Panics** if any field is outside its domain
    pub fn encode(&self, state: &TaxiState) -> usize {
        assert_domain!(state.row, 0, NUM_ROWS);
        assert_domain!(state.col, 0, NUM_COLS);
        assert_domain!(state.passenger, 0, NUM_PASSENGER_LOCS);
        assert_domain!(state.destination, 0, NUM_DESTINATIONS);
        assert_domain!(state.fuel, 0, NUM_FUEL_LEVELS);
        assert_domain!(state.station, 0, self.num_configs);

        let mut i = state.row;
        i = i * NUM_COLS + state.col;
        i = i * NUM_PASSENGER_LOCS + state.passenger;
        i = i * NUM_DESTINATIONS + state.destination;
        i = i * NUM_FUEL_LEVELS + state.fuel;
        i * self.num_configs + state.station
    }

    /// **Panics** if `i` lies outside the state space
    pub fn decode(&self, i: usize) -> TaxiState {
        let mut rest = i;
        let station = rest % self.num_configs;
        rest /= self.num_configs;
        let fuel = rest % NUM_FUEL_LEVELS;
        rest /= NUM_FUEL_LEVELS;
        let destination = rest % NUM_DESTINATIONS;
        rest /= NUM_DESTINATIONS;
        let passenger = rest % NUM_PASSENGER_LOCS;
        rest /= NUM_PASSENGER_LOCS;
        let col = rest % NUM_COLS;
        let row = rest / NUM_COLS;
        assert_domain!(row, 0, NUM_ROWS);

        TaxiState {
            row,
            col,
            passenger,
            destination,
            fuel,
            station,
        }
    }

    /// Every state in encoding order
    pub fn states(&self) -> impl Iterator<Item = TaxiState> {
        let num_configs = self.num_configs;
        (0..NUM_ROWS).flat_map(move |row| {
            (0..NUM_COLS).flat_map(move |col| {
                (0..NUM_PASSENGER_LOCS).flat_map(move |passenger| {
                    (0..NUM_DESTINATIONS).flat_map(move |destination| {
                        (0..NUM_FUEL_LEVELS).flat_map(move |fuel| {
                            (0..num_configs).map(move |station| TaxiState {
                                row,
                                col,
                                passenger,
                                destination,
                                fuel,
                                station,
                            })
                        })
                    })
                })
            })
        })
    }
}
