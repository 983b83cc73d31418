//! Zero-dimensional radiative energy balance model.
//!
//! Earth is treated as a single surface temperature that relaxes towards the balance between
//! absorbed sunlight and spectrally integrated outgoing infrared radiation. Greenhouse
//! absorption by water vapour and CO2 is applied in a fixed set of spectral windows.
//!
//! ```no_run
//! use radbal::prelude::*;
//!
//! let config = SimulationConfig::new(30, 0.1, 270.0, 9.6e15 / 6.02e23, 0.0, true)?;
//! let run = Simulation::new(config)?.run()?;
//! println!("{:.2} K", run.final_temperature());
//! # Ok::<(), RadbalError>(())
//! ```

pub use radbal_components as components;
pub use radbal_core as core;

pub mod prelude {
    pub use radbal_components::climate::{Simulation, SimulationRun};
    pub use radbal_components::radiation::{
        incoming_flux, outgoing_flux, BlackbodyModel, OutgoingFluxIntegrator,
    };
    pub use radbal_components::scenarios::{co2_sweep, equilibrium_comparison, reference_spectra};
    pub use radbal_components::vapour::water_vapour_density;
    pub use radbal_core::config::{ScenarioFile, SimulationConfig};
    pub use radbal_core::errors::{RadbalError, RadbalResult};
    pub use radbal_core::parameters::{CalibrationParameters, SpectralGrid};
    pub use radbal_core::timeseries::SimulationSeries;
    pub use radbal_core::units::MolarDensity;
}
