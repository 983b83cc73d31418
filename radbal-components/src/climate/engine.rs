//! Forward Euler energy balance integrator.
//!
//! # What This Component Does
//!
//! 1. Computes the absorbed solar power once per run
//! 2. At each step evaluates the water vapour density and the outgoing thermal power from the
//!    previous surface temperature and the current CO2 density
//! 3. Advances the surface temperature with
//!
//! $$ T_{i} = T_{i-1} + \frac{(H_{in} - H_{out}) \, \Delta t}{C \, A_{earth}} $$
//!
//! where $C$ is the effective heat capacity per unit area and $A_{earth}$ the Earth's surface
//! area.
//!
//! The scheme is explicit and only stable while $\Delta t$ is short compared with the thermal
//! relaxation time $C / (4 \epsilon' \sigma T^3)$ (about a year with the default calibration).
//! No stability control is applied; a step that produces a non-physical temperature aborts the
//! run.

use log::{debug, trace};
use radbal_core::config::SimulationConfig;
use radbal_core::constants::{earth_surface_area, SECONDS_PER_YEAR};
use radbal_core::errors::{RadbalError, RadbalResult};
use radbal_core::parameters::CalibrationParameters;
use radbal_core::timeseries::{FloatValue, SeriesSample, SimulationSeries, Time};
use serde::{Deserialize, Serialize};

use crate::radiation::{incoming_flux, OutgoingFluxIntegrator};
use crate::vapour::water_vapour_density;

/// One forward Euler update of the surface temperature.
///
/// # Arguments
///
/// * `temperature` - Surface temperature at the start of the step (K)
/// * `heat_in` - Absorbed power (W)
/// * `heat_out` - Emitted power (W)
/// * `time_step` - Step length (years)
/// * `heat_capacity` - Effective heat capacity ($\text{J m}^{-2} \text{K}^{-1}$)
pub fn next_temperature(
    temperature: FloatValue,
    heat_in: FloatValue,
    heat_out: FloatValue,
    time_step: Time,
    heat_capacity: FloatValue,
) -> FloatValue {
    let net_energy = (heat_in - heat_out) * time_step * SECONDS_PER_YEAR;
    temperature + net_energy / (heat_capacity * earth_surface_area())
}

/// A configured simulation that has not been run yet.
///
/// [`Simulation::run`] consumes the simulation, so each one produces exactly one series.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    integrator: OutgoingFluxIntegrator,
    heat_in: FloatValue,
}

impl Simulation {
    /// Create a simulation with the default calibration.
    pub fn new(config: SimulationConfig) -> RadbalResult<Self> {
        Self::with_parameters(config, CalibrationParameters::default())
    }

    /// Create a simulation with a custom calibration.
    ///
    /// Fails if the initial temperature cannot be evaluated under `parameters`: below the range
    /// of the vapour pressure fit, or with greenhouse absorption enabled, at or below the
    /// atmosphere temperature offset.
    pub fn with_parameters(
        config: SimulationConfig,
        parameters: CalibrationParameters,
    ) -> RadbalResult<Self> {
        let initial_temperature = config.initial_temperature();
        water_vapour_density(initial_temperature)?;
        let atmosphere_temperature = parameters.atmosphere_temperature(initial_temperature);
        if config.use_greenhouse() && atmosphere_temperature <= 0.0 {
            return Err(RadbalError::InvalidConfig(format!(
                "initial_temperature {initial_temperature} K leaves no positive atmosphere \
                 temperature with an offset of {} K",
                parameters.atmosphere_temperature_offset
            )));
        }

        let integrator = OutgoingFluxIntegrator::from_parameters(parameters)?;
        Ok(Self {
            config,
            integrator,
            heat_in: incoming_flux(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn parameters(&self) -> &CalibrationParameters {
        self.integrator.parameters()
    }

    /// Absorbed solar power (W).
    pub fn heat_in(&self) -> FloatValue {
        self.heat_in
    }

    /// Outgoing power (W) for a surface temperature at elapsed time `t`.
    fn heat_out(&self, temperature: FloatValue, t: Time) -> RadbalResult<FloatValue> {
        let density_h2o = water_vapour_density(temperature)?;
        self.integrator.total(
            temperature,
            density_h2o,
            self.config.co2_at(t),
            self.config.use_greenhouse(),
        )
    }

    fn advance(
        &self,
        temperature: FloatValue,
        heat_out: FloatValue,
        step: usize,
    ) -> RadbalResult<FloatValue> {
        let next = next_temperature(
            temperature,
            self.heat_in,
            heat_out,
            self.config.time_step(),
            self.parameters().heat_capacity,
        );
        if !next.is_finite() || next <= 0.0 {
            return Err(RadbalError::NumericDegeneracy {
                quantity: "surface temperature",
                detail: format!(
                    "step {step} moved {temperature} K to {next} K; \
                     time_step {} is too long for the forward Euler scheme",
                    self.config.time_step()
                ),
            });
        }
        Ok(next)
    }

    /// Run the time loop to completion.
    ///
    /// The first sample holds the initial state; every following sample is one Euler update of
    /// its predecessor, driven by the CO2 density at its own time. A failure part-way through
    /// returns the error and discards the partial series.
    pub fn run(self) -> RadbalResult<SimulationRun> {
        let n_steps = self.config.step_count();
        debug!(
            "Running {n_steps} steps of {} yr from {} K (greenhouse: {})",
            self.config.time_step(),
            self.config.initial_temperature(),
            self.config.use_greenhouse()
        );

        let mut series = SimulationSeries::with_capacity(n_steps);
        let mut previous: Option<FloatValue> = None;

        for step in 0..n_steps {
            let t = self.config.time_at(step);
            let earth_temperature = previous.unwrap_or(self.config.initial_temperature());
            let heat_out = self.heat_out(earth_temperature, t)?;

            let temperature = match previous {
                None => earth_temperature,
                Some(_) => self.advance(earth_temperature, heat_out, step)?,
            };
            trace!("t={t:.3} yr: T={temperature:.4} K, H_out={heat_out:.6e} W");

            series.push(SeriesSample {
                time: t,
                temperature,
                co2_density: self.config.co2_density_at(t),
                heat_out,
            })?;
            previous = Some(temperature);
        }

        let run = SimulationRun {
            config: self.config,
            parameters: self.integrator.parameters().clone(),
            heat_in: self.heat_in,
            series,
        };
        debug!(
            "Finished at {:.4} K, net imbalance {:.3} W/m^2",
            run.final_temperature(),
            run.net_flux_at_end() / earth_surface_area()
        );
        Ok(run)
    }
}

/// The immutable outcome of a completed simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    config: SimulationConfig,
    parameters: CalibrationParameters,
    heat_in: FloatValue,
    series: SimulationSeries,
}

impl SimulationRun {
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn parameters(&self) -> &CalibrationParameters {
        &self.parameters
    }

    pub fn series(&self) -> &SimulationSeries {
        &self.series
    }

    pub fn into_series(self) -> SimulationSeries {
        self.series
    }

    /// Absorbed solar power used by the run (W).
    pub fn heat_in(&self) -> FloatValue {
        self.heat_in
    }

    /// Temperature of the last sample (K).
    pub fn final_temperature(&self) -> FloatValue {
        self.series
            .equilibrium_temperature()
            .unwrap_or(self.config.initial_temperature())
    }

    /// Absorbed minus emitted power at the last sample (W).
    ///
    /// Close to zero once the run has reached equilibrium.
    pub fn net_flux_at_end(&self) -> FloatValue {
        self.series
            .latest()
            .map(|sample| self.heat_in - sample.heat_out)
            .unwrap_or(0.0)
    }
}
