//! Standard experiments
//!
//! Producers for the three studies the model is usually run for. Each returns plain data for a
//! plotting layer; nothing here renders or writes files.
//!
//! - [`equilibrium_comparison`]: the same start with and without greenhouse absorption
//! - [`co2_sweep`]: final temperature as a function of a constant CO2 density
//! - [`reference_spectra`]: surface, atmosphere-edge and greenhouse emission spectra

use log::debug;
use radbal_core::config::SimulationConfig;
use radbal_core::errors::{RadbalError, RadbalResult};
use radbal_core::parameters::CalibrationParameters;
use radbal_core::timeseries::{FloatValue, Time};
use radbal_core::units::MolarDensity;
use serde::{Deserialize, Serialize};

use crate::climate::{Simulation, SimulationRun};
use crate::radiation::{OutgoingFluxIntegrator, SpectralSample};

/// Present-day CO2 density: $9.6 \times 10^{15}$ molecules per $\text{cm}^3$ ($\text{mol/cm}^3$).
pub const PRESENT_DAY_CO2_DENSITY: FloatValue = 9.6e15 / 6.02e23;

/// Upper end of the default CO2 sweep ($\text{mol/cm}^3$).
pub const SWEEP_MAX_CO2_DENSITY: FloatValue = 15e14 / 6.02e23;

/// Greenhouse and bare-planet runs from the same initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumComparison {
    pub greenhouse: SimulationRun,
    pub no_greenhouse: SimulationRun,
}

impl EquilibriumComparison {
    /// Shared time axis of both runs (years).
    pub fn time(&self) -> &[Time] {
        self.greenhouse.series().time()
    }

    /// Final greenhouse temperature minus final bare-planet temperature (K).
    pub fn greenhouse_warming(&self) -> FloatValue {
        self.greenhouse.final_temperature() - self.no_greenhouse.final_temperature()
    }
}

/// Run the same scenario with and without greenhouse absorption.
pub fn equilibrium_comparison(
    end_year: i64,
    time_step: Time,
    initial_temperature: FloatValue,
    co2_density: FloatValue,
    parameters: &CalibrationParameters,
) -> RadbalResult<EquilibriumComparison> {
    let run = |use_greenhouse: bool| -> RadbalResult<SimulationRun> {
        let config = SimulationConfig::new(
            end_year,
            time_step,
            initial_temperature,
            co2_density,
            0.0,
            use_greenhouse,
        )?;
        Simulation::with_parameters(config, parameters.clone())?.run()
    };

    Ok(EquilibriumComparison {
        greenhouse: run(true)?,
        no_greenhouse: run(false)?,
    })
}

/// One point of a CO2 sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    /// Constant CO2 density of the run ($\text{mol/cm}^3$).
    pub co2_density: FloatValue,
    /// Final temperature of the run (K).
    pub temperature: FloatValue,
}

/// Final greenhouse temperature for `divisions` CO2 densities
/// $c_k = c_{max} k / \text{divisions}$, $k = 0, \dots, \text{divisions} - 1$.
pub fn co2_sweep(
    max_co2_density: FloatValue,
    divisions: usize,
    end_year: i64,
    time_step: Time,
    initial_temperature: FloatValue,
    parameters: &CalibrationParameters,
) -> RadbalResult<Vec<EquilibriumPoint>> {
    if divisions == 0 {
        return Err(RadbalError::InvalidConfig(
            "a CO2 sweep needs at least one division".to_string(),
        ));
    }

    (0..divisions)
        .map(|k| -> RadbalResult<EquilibriumPoint> {
            let co2_density = max_co2_density / divisions as FloatValue * k as FloatValue;
            let config = SimulationConfig::new(
                end_year,
                time_step,
                initial_temperature,
                co2_density,
                0.0,
                true,
            )?;
            let run = Simulation::with_parameters(config, parameters.clone())?.run()?;
            debug!(
                "CO2 sweep {}/{divisions}: {co2_density:.3e} mol/cm^3 -> {:.3} K",
                k + 1,
                run.final_temperature()
            );
            Ok(EquilibriumPoint {
                co2_density,
                temperature: run.final_temperature(),
            })
        })
        .collect()
}

/// Emission spectra of a planet at a single temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSpectra {
    /// Blackbody emission of the surface.
    pub surface: SpectralSample,
    /// Blackbody emission at the atmosphere temperature.
    pub atmosphere: SpectralSample,
    /// Emission with greenhouse absorption applied.
    pub greenhouse: SpectralSample,
}

/// Sample the surface, atmosphere-edge and greenhouse spectra at `temperature`.
///
/// # Arguments
///
/// * `temperature` - Surface temperature (K)
/// * `density_h2o` - Water vapour density used for the greenhouse spectrum
/// * `density_co2` - CO2 density used for the greenhouse spectrum
/// * `range_um` - Optional `(lower, upper)` wavelength range (µm) to keep
/// * `parameters` - Calibration, including the wavelength grid
pub fn reference_spectra(
    temperature: FloatValue,
    density_h2o: MolarDensity,
    density_co2: MolarDensity,
    range_um: Option<(FloatValue, FloatValue)>,
    parameters: &CalibrationParameters,
) -> RadbalResult<ReferenceSpectra> {
    let integrator = OutgoingFluxIntegrator::from_parameters(parameters.clone())?;
    let grid = &parameters.spectral_grid;
    let blackbody = integrator.blackbody();

    let surface = blackbody.spectrum(temperature, grid)?;
    let atmosphere = blackbody.spectrum(parameters.atmosphere_temperature(temperature), grid)?;
    let greenhouse = integrator
        .outgoing_flux(temperature, density_h2o, density_co2, true, true)?
        .spectrum
        .unwrap_or_default();

    let spectra = ReferenceSpectra {
        surface,
        atmosphere,
        greenhouse,
    };
    Ok(match range_um {
        Some((lower, upper)) => ReferenceSpectra {
            surface: spectra.surface.truncated(lower, upper),
            atmosphere: spectra.atmosphere.truncated(lower, upper),
            greenhouse: spectra.greenhouse.truncated(lower, upper),
        },
        None => spectra,
    })
}
