/// A taxi on a 5x5 grid that must carry a passenger to its destination before running out of fuel
pub mod fuel_taxi;

pub use fuel_taxi::{FuelTaxi, FuelTaxiConfig};
