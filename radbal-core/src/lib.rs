//! Core types for the radbal energy balance model.
//!
//! Physical constants, calibration parameters, scenario configuration, unit-safe densities and
//! the output series shared by the radiative components.

pub mod config;
pub mod constants;
pub mod errors;
pub mod parameters;
pub mod timeseries;
pub mod units;
