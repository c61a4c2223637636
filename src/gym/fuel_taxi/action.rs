use strum::{Display, EnumIter, FromRepr, VariantArray};

use crate::error::{Result, TaxiError};

pub const NUM_ACTIONS: usize = 7;

/// Actions available to the taxi
///
/// Discriminants match the integer encoding used by training harnesses.
#[derive(EnumIter, VariantArray, FromRepr, Display, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    South = 0,
    North = 1,
    East = 2,
    West = 3,
    Pickup = 4,
    Dropoff = 5,
    Refuel = 6,
}

impl Action {
    /// Convert a raw action index, rejecting anything outside `[0, 6]`
    pub fn from_index(index: usize) -> Result<Self> {
        Self::from_repr(index).ok_or(TaxiError::InvalidAction(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = TaxiError;

    fn try_from(value: usize) -> Result<Self> {
        Self::from_index(value)
    }
}
