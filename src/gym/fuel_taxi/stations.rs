use std::collections::HashSet;

use log::{debug, warn};
use rand::{seq::index, Rng};

use super::grid::{Grid, Pos, NUM_CELLS, NUM_COLS};
use crate::error::{Result, TaxiError};

/// One set of fuel station cells, referenced by a station index in the encoded state
///
/// The last cell is the configuration's "extra" station, every other cell is a base station.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationConfig {
    cells: Vec<Pos>,
}

impl StationConfig {
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// The cell added on top of the base stations
    pub fn extra(&self) -> Pos {
        *self.cells.last().expect("configuration holds at least the extra cell")
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

/// The base fuel stations and every configuration derived from them
#[derive(Clone, Debug)]
pub struct StationSet {
    base: Vec<Pos>,
    configs: Vec<StationConfig>,
}

impl StationSet {
    /// Build the set from an explicit list of base stations
    ///
    /// **Errors** if a cell is outside the grid, listed twice, or if no cell is left for the extra station
    pub fn new(base: Vec<Pos>) -> Result<Self> {
        if base.len() >= NUM_CELLS {
            return Err(TaxiError::InvalidStationCount {
                count: base.len() + 1,
            });
        }

        let mut seen = HashSet::with_capacity(base.len());
        for &(row, col) in &base {
            if !Grid::contains((row, col)) {
                return Err(TaxiError::StationOutOfBounds { row, col });
            }
            if !seen.insert((row, col)) {
                return Err(TaxiError::DuplicateStation { row, col });
            }
        }

        let configs = enumerate_configurations(&base);
        Ok(Self { base, configs })
    }

    /// Build the set from `count - 1` randomly chosen base stations
    pub fn random<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Self> {
        let base = choose_base_stations(count, rng)?;
        debug!("Chose base fuel stations {:?}", base);
        Self::new(base)
    }

    /// Resolve the construction parameters into a station set
    ///
    /// An explicit list shorter than `count - 1` is replaced by a random draw.
    pub fn from_parts<R: Rng + ?Sized>(
        count: usize,
        base: Option<Vec<Pos>>,
        rng: &mut R,
    ) -> Result<Self> {
        validate_count(count)?;
        let expected = count - 1;
        match base {
            Some(base) if base.len() > expected => Err(TaxiError::TooManyBaseStations {
                expected,
                got: base.len(),
            }),
            Some(base) if base.len() == expected => Self::new(base),
            Some(base) => {
                warn!(
                    "Got {} base fuel stations but {} are required, choosing them at random",
                    base.len(),
                    expected
                );
                Self::random(count, rng)
            }
            None => Self::random(count, rng),
        }
    }

    pub fn base(&self) -> &[Pos] {
        &self.base
    }

    pub fn is_base(&self, pos: Pos) -> bool {
        self.base.contains(&pos)
    }

    /// Number of stations in every configuration
    pub fn num_stations(&self) -> usize {
        self.base.len() + 1
    }

    /// Number of configurations, i.e. the cardinality of the station index
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn config(&self, index: usize) -> &StationConfig {
        &self.configs[index]
    }

    pub fn configs(&self) -> &[StationConfig] {
        &self.configs
    }

    /// Index of the configuration whose extra station is `pos`
    pub fn index_of_extra(&self, pos: Pos) -> Option<usize> {
        self.configs.iter().position(|c| c.extra() == pos)
    }
}

fn validate_count(count: usize) -> Result<()> {
    (1..=NUM_CELLS)
        .contains(&count)
        .then_some(())
        .ok_or(TaxiError::InvalidStationCount { count })
}

/// Choose `count - 1` distinct base station cells uniformly from the whole grid
///
/// Landmarks are valid station cells.
pub fn choose_base_stations<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<Pos>> {
    validate_count(count)?;
    Ok(index::sample(rng, NUM_CELLS, count - 1)
        .into_iter()
        .map(|i| (i / NUM_COLS, i % NUM_COLS))
        .collect())
}

/// Every configuration formed by adding one non-base cell to `base`, in row-major order of the extra cell
pub fn enumerate_configurations(base: &[Pos]) -> Vec<StationConfig> {
    Grid::cells()
        .filter(|pos| !base.contains(pos))
        .map(|extra| {
            let mut cells = Vec::with_capacity(base.len() + 1);
            cells.extend_from_slice(base);
            cells.push(extra);
            StationConfig { cells }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn base_stations_are_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for count in [1, 5, 25] {
            let base = choose_base_stations(count, &mut rng).unwrap();
            assert_eq!(base.len(), count - 1, "count - 1 base stations chosen");
            let uniq = base.iter().collect::<HashSet<_>>();
            assert_eq!(uniq.len(), base.len(), "No duplicates");
            assert!(base.iter().all(|&p| Grid::contains(p)), "All in bounds");
        }
    }

    #[test]
    fn base_stations_reproducible() {
        let a = choose_base_stations(5, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = choose_base_stations(5, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b, "Same seed gives same stations");
    }

    #[test]
    fn invalid_counts() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(
            matches!(
                choose_base_stations(0, &mut rng),
                Err(TaxiError::InvalidStationCount { count: 0 })
            ),
            "Zero stations rejected"
        );
        assert!(
            matches!(
                choose_base_stations(26, &mut rng),
                Err(TaxiError::InvalidStationCount { count: 26 })
            ),
            "More stations than cells rejected"
        );
    }

    #[test]
    fn configurations() {
        let base = vec![(1, 1), (2, 3), (4, 4), (0, 0)];
        let configs = enumerate_configurations(&base);
        assert_eq!(configs.len(), NUM_CELLS - base.len(), "One config per free cell");
        assert!(
            configs.iter().all(|c| c.cells().len() == 5),
            "Every config has all stations"
        );
        assert!(
            configs.iter().all(|c| c.cells()[..4] == base[..]),
            "Base stations come first"
        );
        assert_eq!(configs[0].extra(), (0, 1), "Extras in row-major order");

        let extras = configs.iter().map(|c| c.extra()).collect::<HashSet<_>>();
        assert_eq!(extras.len(), configs.len(), "Configurations are unique");
        assert!(extras.iter().all(|p| !base.contains(p)), "Extras avoid base");
    }

    #[test]
    fn station_set_validation() {
        assert!(
            matches!(
                StationSet::new(vec![(0, 0), (5, 1)]),
                Err(TaxiError::StationOutOfBounds { row: 5, col: 1 })
            ),
            "Out of bounds rejected"
        );
        assert!(
            matches!(
                StationSet::new(vec![(2, 2), (2, 2)]),
                Err(TaxiError::DuplicateStation { row: 2, col: 2 })
            ),
            "Duplicates rejected"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(
            matches!(
                StationSet::from_parts(2, Some(vec![(0, 0), (0, 1)]), &mut rng),
                Err(TaxiError::TooManyBaseStations { expected: 1, got: 2 })
            ),
            "Too many base stations rejected"
        );

        let set = StationSet::from_parts(5, Some(vec![(0, 1)]), &mut rng).unwrap();
        assert_eq!(set.base().len(), 4, "Short list replaced with a random draw");

        let set = StationSet::from_parts(3, Some(vec![(3, 3), (1, 2)]), &mut rng).unwrap();
        assert_eq!(set.base(), &[(3, 3), (1, 2)], "Explicit list kept in order");
        assert_eq!(set.num_stations(), 3, "Station count");
        assert_eq!(set.len(), 23, "Configuration count");
        assert_eq!(set.configs().len(), set.len(), "One configuration per index");
        assert!(
            set.configs().iter().all(|c| c.cells().len() == set.num_stations()),
            "Every configuration holds all stations"
        );
        assert_eq!(set.index_of_extra((3, 3)), None, "Base cells are never extras");
        let i = set.index_of_extra((2, 2)).unwrap();
        assert!(set.config(i).contains((2, 2)), "Config contains its extra");
    }
}
