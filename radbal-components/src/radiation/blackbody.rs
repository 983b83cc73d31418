//! Planck's law.
//!
//! Spectral exitance of a blackbody scaled by an empirical efficiency factor $\epsilon$:
//!
//! $$ B(T, \lambda) = \frac{\epsilon \pi h c^2}{\lambda^5} \frac{1}{e^{hc / \lambda k_B T} - 1} $$
//!
//! With $\epsilon = 2$ this integrates to $\sigma T^4$.

use radbal_core::constants::{BOLTZMANN, PLANCK, SPEED_OF_LIGHT, UM_PER_M};
use radbal_core::errors::{ensure_positive, RadbalError, RadbalResult};
use radbal_core::parameters::SpectralGrid;
use radbal_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

use super::spectrum::SpectralSample;

/// Largest exponent $hc / \lambda k_B T$ that is evaluated.
///
/// Beyond this `exp` overflows; the intensity there is below $e^{-700}$ of the prefactor and is
/// reported as the saturation value `0.0`.
pub const MAX_PLANCK_EXPONENT: FloatValue = 700.0;

/// Default empirical efficiency multiplier.
pub const DEFAULT_PLANCK_EFFICIENCY: FloatValue = 2.78;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackbodyModel {
    efficiency: FloatValue,
}

impl Default for BlackbodyModel {
    fn default() -> Self {
        Self {
            efficiency: DEFAULT_PLANCK_EFFICIENCY,
        }
    }
}

impl BlackbodyModel {
    pub fn new(efficiency: FloatValue) -> RadbalResult<Self> {
        ensure_positive("planck_efficiency", efficiency)?;
        Ok(Self { efficiency })
    }

    pub fn efficiency(&self) -> FloatValue {
        self.efficiency
    }

    /// The exponent $hc / \lambda k_B T$.
    fn exponent(temperature: FloatValue, wavelength_m: FloatValue) -> FloatValue {
        PLANCK * SPEED_OF_LIGHT / (wavelength_m * BOLTZMANN * temperature)
    }

    /// True when the intensity at this point is clamped to the saturation value.
    pub fn is_saturated(temperature: FloatValue, wavelength_m: FloatValue) -> bool {
        Self::exponent(temperature, wavelength_m) > MAX_PLANCK_EXPONENT
    }

    /// Spectral intensity ($\text{W m}^{-2} \text{m}^{-1}$).
    ///
    /// # Arguments
    ///
    /// * `temperature` - Emitter temperature (K)
    /// * `wavelength_m` - Wavelength (m)
    ///
    /// # Errors
    ///
    /// * [`RadbalError::InvalidArgument`] for non-positive or non-finite inputs
    /// * [`RadbalError::NumericDegeneracy`] if the result is not finite
    pub fn intensity(
        &self,
        temperature: FloatValue,
        wavelength_m: FloatValue,
    ) -> RadbalResult<FloatValue> {
        ensure_positive("temperature", temperature)?;
        ensure_positive("wavelength", wavelength_m)?;

        let exponent = Self::exponent(temperature, wavelength_m);
        if exponent > MAX_PLANCK_EXPONENT {
            return Ok(0.0);
        }

        let prefactor = self.efficiency * std::f64::consts::PI * PLANCK * SPEED_OF_LIGHT.powi(2)
            / wavelength_m.powi(5);
        let intensity = prefactor / exponent.exp_m1();
        if !intensity.is_finite() {
            return Err(RadbalError::NumericDegeneracy {
                quantity: "blackbody intensity",
                detail: format!("T={temperature} K, wavelength={wavelength_m} m gave {intensity}"),
            });
        }
        Ok(intensity)
    }

    /// Sample the spectrum of a body at `temperature` on `grid`.
    pub fn spectrum(
        &self,
        temperature: FloatValue,
        grid: &SpectralGrid,
    ) -> RadbalResult<SpectralSample> {
        let mut spectrum = SpectralSample::with_capacity(grid.bin_count());
        for wavelength_um in grid.wavelengths_um() {
            spectrum.push(
                wavelength_um,
                self.intensity(temperature, wavelength_um / UM_PER_M)?,
            );
        }
        Ok(spectrum)
    }
}

/// Spectral intensity using the default efficiency factor.
pub fn blackbody_intensity(
    temperature: FloatValue,
    wavelength_m: FloatValue,
) -> RadbalResult<FloatValue> {
    BlackbodyModel::default().intensity(temperature, wavelength_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use radbal_core::constants::STEFAN_BOLTZMANN;

    #[test]
    fn test_stefan_boltzmann_limit() {
        // epsilon = 2 integrates to sigma T^4
        let model = BlackbodyModel::new(2.0).unwrap();
        let grid = SpectralGrid::default();
        let total = model.spectrum(288.0, &grid).unwrap().integrate(grid.step_um);

        assert_relative_eq!(
            total,
            STEFAN_BOLTZMANN * 288.0_f64.powi(4),
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_efficiency_scales_linearly() {
        let reference = BlackbodyModel::new(2.0).unwrap().intensity(288.0, 10e-6).unwrap();
        let scaled = BlackbodyModel::default().intensity(288.0, 10e-6).unwrap();
        assert_relative_eq!(scaled / reference, 1.39, max_relative = 1e-12);
    }

    #[test]
    fn test_wien_peak() {
        // Wien's displacement: lambda_max T = 2898 um K
        let grid = SpectralGrid::new(1.0, 50.0, 0.01).unwrap();
        let peak = BlackbodyModel::default()
            .spectrum(288.0, &grid)
            .unwrap()
            .peak_wavelength_um()
            .unwrap();
        assert!((peak - 2898.0 / 288.0).abs() < 0.02, "peak at {peak} um");
    }

    #[test]
    fn test_hotter_is_brighter() {
        let cold = blackbody_intensity(250.0, 10e-6).unwrap();
        let warm = blackbody_intensity(300.0, 10e-6).unwrap();
        assert!(warm > cold);
    }

    #[test]
    fn test_saturates_at_short_wavelength() {
        assert!(BlackbodyModel::is_saturated(220.0, 0.01e-6));
        assert_eq!(blackbody_intensity(220.0, 0.01e-6).unwrap(), 0.0);
        assert!(!BlackbodyModel::is_saturated(220.0, 10e-6));
    }

    #[test]
    fn test_long_wavelength_tends_to_zero() {
        let far = blackbody_intensity(288.0, 1.0).unwrap();
        assert!(far.is_finite());
        assert!(far >= 0.0);
        assert!(far < blackbody_intensity(288.0, 1e-3).unwrap());
    }

    #[test]
    fn test_invalid_arguments() {
        let cases = [
            (0.0, 1e-5),
            (-10.0, 1e-5),
            (288.0, 0.0),
            (288.0, -1e-5),
            (f64::NAN, 1e-5),
        ];
        for (t, w) in cases {
            assert!(
                matches!(
                    blackbody_intensity(t, w),
                    Err(RadbalError::InvalidArgument { .. })
                ),
                "T={t}, wavelength={w} should be rejected"
            );
        }
        assert!(BlackbodyModel::new(0.0).is_err());
    }

    #[test]
    fn test_degenerate_result() {
        // Tiny wavelength at an absurd temperature overflows the prefactor
        let result = blackbody_intensity(1e300, 1e-70);
        assert!(matches!(result, Err(RadbalError::NumericDegeneracy { .. })));
    }
}
