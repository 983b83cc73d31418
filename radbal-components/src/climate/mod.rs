//! Climate response
//!
//! - `Simulation`: forward Euler integration of the global energy balance

mod engine;

pub use engine::{next_temperature, Simulation, SimulationRun};
