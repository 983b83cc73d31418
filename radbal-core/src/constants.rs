//! Physical constants.
//!
//! Fixed values shared by every component. Values with no physical derivation (the Planck
//! efficiency factor, the atmosphere temperature offset, cross sections) are calibration
//! parameters and live in [`crate::parameters::CalibrationParameters`] instead.

use crate::timeseries::FloatValue;

// -- Fundamental constants (SI) --

/// Stefan-Boltzmann constant ($\text{W m}^{-2} \text{K}^{-4}$).
pub const STEFAN_BOLTZMANN: FloatValue = 5.670_374_419e-8;

/// Molar gas constant ($\text{J mol}^{-1} \text{K}^{-1}$).
pub const GAS_CONSTANT: FloatValue = 8.314_462_618;

/// Planck constant (J s).
pub const PLANCK: FloatValue = 6.626_070_15e-34;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: FloatValue = 2.997_924_58e8;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: FloatValue = 1.380_649e-23;

/// Avogadro constant ($\text{mol}^{-1}$).
pub const AVOGADRO: FloatValue = 6.022_140_76e23;

// -- Sun-Earth geometry --

/// Effective temperature of the Sun's photosphere (K).
pub const SUN_TEMPERATURE: FloatValue = 5778.0;

/// Solar radius (m).
pub const SUN_RADIUS: FloatValue = 6.957e8;

/// Mean Sun-Earth distance (m).
pub const EARTH_SUN_DISTANCE: FloatValue = 1.496e11;

/// Mean Earth radius (m).
pub const EARTH_RADIUS: FloatValue = 6.371e6;

// -- Conversions --

/// Julian year in seconds.
pub const SECONDS_PER_YEAR: FloatValue = 31_557_600.0;

/// Cubic centimetres per cubic metre.
pub const CM3_PER_M3: FloatValue = 1.0e6;

/// Micrometres per metre.
pub const UM_PER_M: FloatValue = 1.0e6;

/// Offset between Celsius and Kelvin used by the saturation vapour pressure fit.
///
/// The empirical fit is parameterised on $T - 273$, not $T - 273.15$.
pub const VAPOUR_FIT_FREEZING_POINT: FloatValue = 273.0;

/// Surface area of the Earth ($\text{m}^2$).
pub fn earth_surface_area() -> FloatValue {
    4.0 * std::f64::consts::PI * EARTH_RADIUS * EARTH_RADIUS
}

/// Cross-sectional (disk) area of the Earth ($\text{m}^2$).
pub fn earth_cross_section() -> FloatValue {
    std::f64::consts::PI * EARTH_RADIUS * EARTH_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stefan_boltzmann_consistent_with_planck() {
        // sigma = 2 pi^5 k^4 / (15 h^3 c^2)
        let pi = std::f64::consts::PI;
        let derived = 2.0 * pi.powi(5) * BOLTZMANN.powi(4)
            / (15.0 * PLANCK.powi(3) * SPEED_OF_LIGHT.powi(2));
        assert_relative_eq!(derived, STEFAN_BOLTZMANN, max_relative = 1e-8);
    }

    #[test]
    fn test_gas_constant_consistent_with_boltzmann() {
        assert_relative_eq!(BOLTZMANN * AVOGADRO, GAS_CONSTANT, max_relative = 1e-9);
    }

    #[test]
    fn test_surface_is_four_cross_sections() {
        assert_relative_eq!(earth_surface_area(), 4.0 * earth_cross_section());
        // ~5.1e14 m^2
        assert!((earth_surface_area() - 5.1e14).abs() < 0.01e14);
    }
}
