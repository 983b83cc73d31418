//! Outgoing thermal flux.
//!
//! Integrates Planck's law over the wavelength grid with a rectangle rule and multiplies by the
//! Earth's surface area. With greenhouse absorption each wavelength bin falls into one of three
//! regions (see [`SpectralRegion`]):
//!
//! - [`SpectralRegion::Window`]: the surface radiates directly to space.
//! - [`SpectralRegion::Absorption`]: surface radiation is transmitted with
//!   $t = e^{-n_{H_2O} N_A \sigma_{H_2O} H} \cdot e^{-n_{CO_2} N_A \sigma_{CO_2}(\lambda) H}$
//!   and the atmosphere fills in the rest: $I = I_{surf} t + I_{atm} (1 - t)$.
//! - [`SpectralRegion::Opaque`]: the planet radiates at the atmosphere temperature.
//!
//! Without greenhouse absorption every bin radiates at the surface temperature.

use log::trace;
use radbal_core::constants::{earth_surface_area, UM_PER_M};
use radbal_core::errors::RadbalResult;
use radbal_core::parameters::CalibrationParameters;
use radbal_core::timeseries::FloatValue;
use radbal_core::units::MolarDensity;
use serde::{Deserialize, Serialize};

use super::blackbody::BlackbodyModel;
use super::spectrum::SpectralSample;

/// How a wavelength bin exchanges radiation with the atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralRegion {
    /// Atmospheric window, no absorption.
    Window,
    /// Water vapour and CO2 absorption band.
    Absorption,
    /// Everything else; emission comes from the atmosphere.
    Opaque,
}

/// Result of an outgoing flux evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingFlux {
    /// Total outgoing power over the whole planetary surface (W).
    pub total: FloatValue,
    /// Per-wavelength intensities, present only when requested.
    pub spectrum: Option<SpectralSample>,
}

/// Spectral integrator for the outgoing thermal flux.
///
/// Holds no state between calls: identical inputs always give identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingFluxIntegrator {
    parameters: CalibrationParameters,
    blackbody: BlackbodyModel,
}

impl Default for OutgoingFluxIntegrator {
    fn default() -> Self {
        Self {
            parameters: CalibrationParameters::default(),
            blackbody: BlackbodyModel::default(),
        }
    }
}

impl OutgoingFluxIntegrator {
    pub fn from_parameters(parameters: CalibrationParameters) -> RadbalResult<Self> {
        parameters.validate()?;
        let blackbody = BlackbodyModel::new(parameters.planck_efficiency)?;
        Ok(Self {
            parameters,
            blackbody,
        })
    }

    pub fn parameters(&self) -> &CalibrationParameters {
        &self.parameters
    }

    pub fn blackbody(&self) -> &BlackbodyModel {
        &self.blackbody
    }

    /// Region of a wavelength (µm).
    ///
    /// The absorption band takes precedence where it touches the window, so with the default
    /// bands 14 µm belongs to the absorption band.
    pub fn region(&self, wavelength_um: FloatValue) -> SpectralRegion {
        let tolerance = self.parameters.spectral_grid.edge_tolerance_um();
        if self.parameters.absorption_band.contains(wavelength_um, tolerance) {
            SpectralRegion::Absorption
        } else if self
            .parameters
            .atmospheric_window
            .contains(wavelength_um, tolerance)
        {
            SpectralRegion::Window
        } else {
            SpectralRegion::Opaque
        }
    }

    /// Fraction of surface radiation transmitted at `wavelength_um` inside the absorption band.
    pub fn transmittance(
        &self,
        wavelength_um: FloatValue,
        density_h2o: MolarDensity,
        density_co2: MolarDensity,
    ) -> FloatValue {
        let h = self.parameters.scale_height;
        let tau_h2o = density_h2o.number_density() * self.parameters.h2o_cross_section * h;
        let tolerance = self.parameters.spectral_grid.edge_tolerance_um();
        let tau_co2 = if self.parameters.co2_band.contains(wavelength_um, tolerance) {
            density_co2.number_density() * self.parameters.co2_cross_section * h
        } else {
            0.0
        };
        (-tau_h2o).exp() * (-tau_co2).exp()
    }

    /// Total outgoing power (W) and, if `emit_spectrum` is set, the spectrum it integrates.
    ///
    /// # Arguments
    ///
    /// * `temperature` - Surface temperature (K)
    /// * `density_h2o` - Water vapour density
    /// * `density_co2` - CO2 density
    /// * `use_greenhouse` - Apply the spectral window policy
    /// * `emit_spectrum` - Also return the per-bin intensities
    pub fn outgoing_flux(
        &self,
        temperature: FloatValue,
        density_h2o: MolarDensity,
        density_co2: MolarDensity,
        use_greenhouse: bool,
        emit_spectrum: bool,
    ) -> RadbalResult<OutgoingFlux> {
        let grid = &self.parameters.spectral_grid;
        let atmosphere_temperature = self.parameters.atmosphere_temperature(temperature);

        let mut spectrum = emit_spectrum.then(|| SpectralSample::with_capacity(grid.bin_count()));
        let mut sum = 0.0;
        let mut saturated = 0usize;

        for wavelength_um in grid.wavelengths_um() {
            let wavelength_m = wavelength_um / UM_PER_M;
            let region = if use_greenhouse {
                self.region(wavelength_um)
            } else {
                SpectralRegion::Window
            };

            let intensity = match region {
                SpectralRegion::Window => self.blackbody.intensity(temperature, wavelength_m)?,
                SpectralRegion::Opaque => self
                    .blackbody
                    .intensity(atmosphere_temperature, wavelength_m)?,
                SpectralRegion::Absorption => {
                    let surface = self.blackbody.intensity(temperature, wavelength_m)?;
                    let atmosphere = self
                        .blackbody
                        .intensity(atmosphere_temperature, wavelength_m)?;
                    let t = self.transmittance(wavelength_um, density_h2o, density_co2);
                    surface * t + atmosphere * (1.0 - t)
                }
            };
            if intensity == 0.0 {
                saturated += 1;
            }

            sum += intensity;
            if let Some(spectrum) = spectrum.as_mut() {
                spectrum.push(wavelength_um, intensity);
            }
        }

        trace!(
            "outgoing flux at T={temperature} K: {saturated} of {} bins saturated",
            grid.bin_count()
        );

        Ok(OutgoingFlux {
            total: sum * grid.step_m() * earth_surface_area(),
            spectrum,
        })
    }

    /// Total outgoing power (W) without the spectrum.
    pub fn total(
        &self,
        temperature: FloatValue,
        density_h2o: MolarDensity,
        density_co2: MolarDensity,
        use_greenhouse: bool,
    ) -> RadbalResult<FloatValue> {
        self.outgoing_flux(temperature, density_h2o, density_co2, use_greenhouse, false)
            .map(|flux| flux.total)
    }
}

/// Outgoing flux using the default calibration.
///
/// Standalone entry point for sampling a spectrum at an arbitrary temperature without a
/// simulation.
pub fn outgoing_flux(
    temperature: FloatValue,
    density_h2o: MolarDensity,
    density_co2: MolarDensity,
    use_greenhouse: bool,
    emit_spectrum: bool,
) -> RadbalResult<OutgoingFlux> {
    OutgoingFluxIntegrator::default().outgoing_flux(
        temperature,
        density_h2o,
        density_co2,
        use_greenhouse,
        emit_spectrum,
    )
}
