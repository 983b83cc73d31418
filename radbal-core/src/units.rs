//! Strongly typed molar density.
//!
//! Gas amounts enter the model in two unit systems: scenario CO2 densities are quoted in
//! $\text{mol/cm}^3$ while the ideal gas law yields $\text{mol/m}^3$. Mixing the two silently
//! changes optical depths by a factor of $10^6$, so densities are carried as [`MolarDensity`]
//! (SI internally) and converted only at the edges.

use crate::constants::{AVOGADRO, CM3_PER_M3};
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Amount of substance per unit volume. Base unit: $\text{mol/m}^3$.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct MolarDensity(FloatValue);

impl MolarDensity {
    pub const ZERO: MolarDensity = MolarDensity(0.0);

    pub fn from_mol_per_m3(value: FloatValue) -> Self {
        Self(value)
    }

    pub fn from_mol_per_cm3(value: FloatValue) -> Self {
        Self(value * CM3_PER_M3)
    }

    pub fn mol_per_m3(&self) -> FloatValue {
        self.0
    }

    pub fn mol_per_cm3(&self) -> FloatValue {
        self.0 / CM3_PER_M3
    }

    /// Molecules per cubic metre.
    pub fn number_density(&self) -> FloatValue {
        self.0 * AVOGADRO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cm3_conversion() {
        // 9.6e15 molecules/cm^3 of CO2
        let co2 = MolarDensity::from_mol_per_cm3(9.6e15 / 6.02e23);
        assert_relative_eq!(co2.mol_per_m3(), 9.6e21 / 6.02e23, max_relative = 1e-12);
        assert_relative_eq!(co2.mol_per_cm3(), 9.6e15 / 6.02e23, max_relative = 1e-12);
    }

    #[test]
    fn test_number_density() {
        let one = MolarDensity::from_mol_per_m3(1.0);
        assert_relative_eq!(one.number_density(), AVOGADRO);
    }

    #[test]
    fn test_ordering() {
        let a = MolarDensity::from_mol_per_m3(1.5);
        let b = MolarDensity::from_mol_per_m3(0.5);
        assert!(b < a);
        assert_eq!(MolarDensity::default(), MolarDensity::ZERO);
    }
}
