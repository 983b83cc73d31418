//! Calibration parameters
//!
//! Tunable values of the radiative model. None of these has a first-principles derivation in
//! this model; they are chosen so that a 270 K start relaxes to a plausible present-day surface
//! temperature when greenhouse absorption is enabled.

use crate::constants::UM_PER_M;
use crate::errors::{ensure_positive, RadbalError, RadbalResult};
use crate::timeseries::FloatValue;
use approx::relative_eq;
use serde::{Deserialize, Serialize};

/// A closed wavelength interval in micrometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralBand {
    pub lower_um: FloatValue,
    pub upper_um: FloatValue,
}

impl SpectralBand {
    pub const fn new(lower_um: FloatValue, upper_um: FloatValue) -> Self {
        Self { lower_um, upper_um }
    }

    /// True if `wavelength_um` lies in the band, with both edges widened by `tolerance_um`.
    pub fn contains(&self, wavelength_um: FloatValue, tolerance_um: FloatValue) -> bool {
        wavelength_um >= self.lower_um - tolerance_um
            && wavelength_um <= self.upper_um + tolerance_um
    }

    /// True if `other` lies entirely inside this band.
    pub fn encloses(&self, other: &SpectralBand) -> bool {
        other.lower_um >= self.lower_um && other.upper_um <= self.upper_um
    }

    fn validate(&self, name: &str) -> RadbalResult<()> {
        ensure_positive("band lower bound (um)", self.lower_um)?;
        ensure_positive("band upper bound (um)", self.upper_um)?;
        if self.lower_um >= self.upper_um {
            return Err(RadbalError::InvalidConfig(format!(
                "{name}: lower bound {} um must be below upper bound {} um",
                self.lower_um, self.upper_um
            )));
        }
        Ok(())
    }
}

/// Uniform wavelength grid used for the outgoing flux integral.
///
/// The grid starts at `start_um` and holds
/// $\lfloor (\lambda_{end} - \lambda_{start}) / \Delta\lambda \rfloor + 1$ bins, so `end_um` is
/// sampled only when the step divides the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralGrid {
    /// First sampled wavelength (µm).
    /// Default: 0.01
    pub start_um: FloatValue,
    /// Upper limit of the sampled wavelengths (µm).
    /// Default: 1000.0
    pub end_um: FloatValue,
    /// Bin width (µm).
    /// Default: 0.01
    pub step_um: FloatValue,
}

impl Default for SpectralGrid {
    fn default() -> Self {
        Self {
            start_um: 0.01,
            end_um: 1000.0,
            step_um: 0.01,
        }
    }
}

impl SpectralGrid {
    pub fn new(
        start_um: FloatValue,
        end_um: FloatValue,
        step_um: FloatValue,
    ) -> RadbalResult<Self> {
        let grid = Self {
            start_um,
            end_um,
            step_um,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> RadbalResult<()> {
        ensure_positive("spectral grid start (um)", self.start_um)?;
        ensure_positive("spectral grid step (um)", self.step_um)?;
        if !self.end_um.is_finite() || self.end_um <= self.start_um {
            return Err(RadbalError::InvalidConfig(format!(
                "spectral grid end {} um must be finite and above start {} um",
                self.end_um, self.start_um
            )));
        }
        Ok(())
    }

    /// Number of wavelength bins.
    ///
    /// A range within floating point noise of a whole number of steps counts as that number.
    pub fn bin_count(&self) -> usize {
        let ratio = (self.end_um - self.start_um) / self.step_um;
        let nearest = ratio.round();
        let steps = if relative_eq!(ratio, nearest, max_relative = 1e-9) {
            nearest
        } else {
            ratio.floor()
        };
        steps as usize + 1
    }

    /// Rounding slack for comparing sampled wavelengths with band edges (µm).
    ///
    /// `start + i * step` drifts from the exact decimal wavelength by far less than this.
    pub fn edge_tolerance_um(&self) -> FloatValue {
        self.step_um * 1e-6
    }

    /// Wavelength of bin `index` (µm).
    pub fn wavelength_um(&self, index: usize) -> FloatValue {
        self.start_um + index as FloatValue * self.step_um
    }

    /// Bin width in metres.
    pub fn step_m(&self) -> FloatValue {
        self.step_um / UM_PER_M
    }

    /// Iterate over the sampled wavelengths (µm).
    pub fn wavelengths_um(&self) -> impl Iterator<Item = FloatValue> + '_ {
        (0..self.bin_count()).map(move |i| self.wavelength_um(i))
    }
}

/// Parameters of the radiative balance.
///
/// # Spectral windows
///
/// With greenhouse absorption enabled the outgoing spectrum is split into three regions:
/// - inside `atmospheric_window` the surface radiates directly to space,
/// - inside `absorption_band` surface radiation is attenuated by water vapour (whole band)
///   and CO2 (only inside `co2_band`),
/// - everywhere else the planet radiates at the atmosphere temperature.
///
/// # Default Values
///
/// The CO2 sub-band has been quoted as both 14.3–15.6 µm and 14.0–16.0 µm; the default is the
/// narrower 14.3–15.6 µm band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParameters {
    /// Empirical multiplier in front of $\pi h c^2 / \lambda^5$ in Planck's law.
    /// A value of 2.0 reproduces the Stefan-Boltzmann law.
    /// Default: 2.78
    pub planck_efficiency: FloatValue,

    /// Temperature difference between the surface and the radiating atmosphere (K).
    /// Default: 66.0
    pub atmosphere_temperature_offset: FloatValue,

    /// Effective heat capacity of the surface per unit area ($\text{J m}^{-2} \text{K}^{-1}$).
    /// Roughly a 50 m ocean mixed layer.
    /// Default: 2.1e8
    pub heat_capacity: FloatValue,

    /// Atmospheric scale height (m).
    /// Default: 8500.0
    pub scale_height: FloatValue,

    /// Absorption cross section of a water molecule in the absorption band ($\text{m}^2$).
    /// Default: 3.0e-28
    pub h2o_cross_section: FloatValue,

    /// Absorption cross section of a CO2 molecule inside `co2_band` ($\text{m}^2$).
    /// Default: 2.5e-26
    pub co2_cross_section: FloatValue,

    /// Region where the surface radiates to space unattenuated.
    /// Default: 8–14 µm
    pub atmospheric_window: SpectralBand,

    /// Region where water vapour and CO2 absorb.
    /// Default: 14–19 µm
    pub absorption_band: SpectralBand,

    /// Sub-band of `absorption_band` where CO2 absorbs.
    /// Default: 14.3–15.6 µm
    pub co2_band: SpectralBand,

    /// Wavelength grid of the outgoing flux integral.
    pub spectral_grid: SpectralGrid,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            planck_efficiency: 2.78,
            atmosphere_temperature_offset: 66.0,
            heat_capacity: 2.1e8,
            scale_height: 8500.0,
            h2o_cross_section: 3.0e-28,
            co2_cross_section: 2.5e-26,
            atmospheric_window: SpectralBand::new(8.0, 14.0),
            absorption_band: SpectralBand::new(14.0, 19.0),
            co2_band: SpectralBand::new(14.3, 15.6),
            spectral_grid: SpectralGrid::default(),
        }
    }
}

impl CalibrationParameters {
    /// Check every parameter is usable.
    pub fn validate(&self) -> RadbalResult<()> {
        ensure_positive("planck_efficiency", self.planck_efficiency)?;
        ensure_positive("heat_capacity", self.heat_capacity)?;
        ensure_positive("scale_height", self.scale_height)?;
        if !self.atmosphere_temperature_offset.is_finite() {
            return Err(RadbalError::invalid_argument(
                "atmosphere_temperature_offset",
                self.atmosphere_temperature_offset,
                "must be finite",
            ));
        }
        for (name, value) in [
            ("h2o_cross_section", self.h2o_cross_section),
            ("co2_cross_section", self.co2_cross_section),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RadbalError::invalid_argument(
                    name,
                    value,
                    "must be finite and non-negative",
                ));
            }
        }

        self.atmospheric_window.validate("atmospheric_window")?;
        self.absorption_band.validate("absorption_band")?;
        self.co2_band.validate("co2_band")?;
        if !self.absorption_band.encloses(&self.co2_band) {
            return Err(RadbalError::InvalidConfig(format!(
                "co2_band {:?} must lie inside absorption_band {:?}",
                self.co2_band, self.absorption_band
            )));
        }
        if self.atmospheric_window.upper_um > self.absorption_band.lower_um {
            return Err(RadbalError::InvalidConfig(
                "atmospheric_window must end before absorption_band starts".to_string(),
            ));
        }
        self.spectral_grid.validate()
    }

    /// Use a different wavelength grid, e.g. a coarser one for quick exploratory runs.
    pub fn with_spectral_grid(mut self, grid: SpectralGrid) -> Self {
        self.spectral_grid = grid;
        self
    }

    /// Temperature of the radiating atmosphere for a given surface temperature (K).
    pub fn atmosphere_temperature(&self, surface_temperature: FloatValue) -> FloatValue {
        surface_temperature - self.atmosphere_temperature_offset
    }
}
