//! Components of the radbal energy balance model
//!
//! # Module Organisation
//!
//! - `radiation`: blackbody emission, absorbed stellar power and the outgoing flux integral
//! - `vapour`: saturation vapour pressure and water vapour density
//! - `climate`: the time-stepping simulation engine
//! - `scenarios`: standard experiments built on the engine
//!
//! # Parameters
//!
//! Calibration values are held in [`radbal_core::parameters::CalibrationParameters`], whose
//! defaults reproduce the reference scenarios.

pub mod climate;
pub mod radiation;
pub mod scenarios;
pub mod vapour;
