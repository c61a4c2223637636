use rand_distr::WeightedError;

/// Errors raised while constructing or driving a [`FuelTaxi`](crate::gym::FuelTaxi)
#[derive(thiserror::Error, Debug)]
pub enum TaxiError {
    #[error("invalid number of fuel stations: {count} (must be in [1, 25])")]
    InvalidStationCount { count: usize },
    #[error("too many base stations: expected at most {expected}, got {got}")]
    TooManyBaseStations { expected: usize, got: usize },
    #[error("fuel station ({row}, {col}) lies outside the grid")]
    StationOutOfBounds { row: usize, col: usize },
    #[error("fuel station ({row}, {col}) is listed more than once")]
    DuplicateStation { row: usize, col: usize },
    #[error("invalid action index: {0} (must be in [0, 6])")]
    InvalidAction(usize),
    #[error("cannot build initial state distribution: {0}")]
    InitialDistribution(#[from] WeightedError),
}

pub type Result<T> = std::result::Result<T, TaxiError>;
