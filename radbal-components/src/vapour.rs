//! Water vapour feedback
//!
//! Saturation vapour pressure from the Magnus-type fit
//!
//! $$ P_{sat} = 1000 \cdot 0.61094 \cdot \exp\left(\frac{17.625 (T - 273)}{(T - 273) + 243.04}\right) $$
//!
//! converted to a molar density with the ideal gas law, $n = P / RT$.
//!
//! Densities are returned as [`MolarDensity`]; use [`MolarDensity::mol_per_cm3`] where a
//! $\text{mol/cm}^3$ value is needed.

use radbal_core::constants::{GAS_CONSTANT, VAPOUR_FIT_FREEZING_POINT};
use radbal_core::errors::{ensure_positive, RadbalError, RadbalResult};
use radbal_core::timeseries::FloatValue;
use radbal_core::units::MolarDensity;

const MAGNUS_A: FloatValue = 17.625;
const MAGNUS_B: FloatValue = 243.04;
/// Saturation pressure at the reference point (Pa).
const MAGNUS_P0: FloatValue = 1000.0 * 0.61094;

/// Saturation vapour pressure of water (Pa).
///
/// The fit is intended for terrestrial temperatures and has a pole at
/// $T = 273 - 243.04 \approx 30$ K; temperatures at or below the pole are rejected.
pub fn saturation_vapour_pressure(temperature: FloatValue) -> RadbalResult<FloatValue> {
    ensure_positive("temperature", temperature)?;
    let celsius = temperature - VAPOUR_FIT_FREEZING_POINT;
    if celsius + MAGNUS_B <= 0.0 {
        return Err(RadbalError::invalid_argument(
            "temperature",
            temperature,
            "below the validity range of the vapour pressure fit",
        ));
    }

    let pressure = MAGNUS_P0 * (MAGNUS_A * celsius / (celsius + MAGNUS_B)).exp();
    if !pressure.is_finite() {
        return Err(RadbalError::NumericDegeneracy {
            quantity: "saturation vapour pressure",
            detail: format!("T={temperature} K gave {pressure} Pa"),
        });
    }
    Ok(pressure)
}

/// Molar density of an ideal gas at `pressure` (Pa) and `temperature` (K).
pub fn ideal_gas_density(
    pressure: FloatValue,
    temperature: FloatValue,
) -> RadbalResult<MolarDensity> {
    ensure_positive("temperature", temperature)?;
    Ok(MolarDensity::from_mol_per_m3(
        pressure / (GAS_CONSTANT * temperature),
    ))
}

/// Pressure of an ideal gas (Pa), the inverse of [`ideal_gas_density`].
pub fn ideal_gas_pressure(density: MolarDensity, temperature: FloatValue) -> FloatValue {
    density.mol_per_m3() * GAS_CONSTANT * temperature
}

/// Water vapour molar density of a saturated atmosphere at `temperature`.
pub fn water_vapour_density(temperature: FloatValue) -> RadbalResult<MolarDensity> {
    ideal_gas_density(saturation_vapour_pressure(temperature)?, temperature)
}
