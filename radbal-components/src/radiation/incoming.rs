//! Absorbed stellar power.

use radbal_core::constants::{
    EARTH_RADIUS, EARTH_SUN_DISTANCE, STEFAN_BOLTZMANN, SUN_RADIUS, SUN_TEMPERATURE,
};
use radbal_core::errors::{ensure_positive, RadbalResult};
use radbal_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Geometry of a star-planet pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarGeometry {
    /// Effective stellar temperature (K).
    pub star_temperature: FloatValue,
    /// Stellar radius (m).
    pub star_radius: FloatValue,
    /// Star-planet distance (m).
    pub orbital_distance: FloatValue,
    /// Planetary radius (m).
    pub planet_radius: FloatValue,
}

impl Default for StellarGeometry {
    fn default() -> Self {
        Self::earth_sun()
    }
}

impl StellarGeometry {
    pub fn earth_sun() -> Self {
        Self {
            star_temperature: SUN_TEMPERATURE,
            star_radius: SUN_RADIUS,
            orbital_distance: EARTH_SUN_DISTANCE,
            planet_radius: EARTH_RADIUS,
        }
    }

    pub fn validate(&self) -> RadbalResult<()> {
        ensure_positive("star_temperature", self.star_temperature)?;
        ensure_positive("star_radius", self.star_radius)?;
        ensure_positive("orbital_distance", self.orbital_distance)?;
        ensure_positive("planet_radius", self.planet_radius)?;
        Ok(())
    }

    /// Total stellar luminosity (W), $L = 4 \pi R_*^2 \sigma T_*^4$.
    pub fn luminosity(&self) -> FloatValue {
        STEFAN_BOLTZMANN * self.star_temperature.powi(4) * 4.0 * PI * self.star_radius.powi(2)
    }

    /// Stellar flux at the planet's orbit ($\text{W/m}^2$).
    pub fn flux_at_orbit(&self) -> FloatValue {
        self.luminosity() / (4.0 * PI * self.orbital_distance.powi(2))
    }

    /// Power intercepted by the planet's disk (W).
    ///
    /// $$ H_{in} = \sigma T_*^4 \cdot \pi R_p^2 \cdot \frac{4 \pi R_*^2}{4 \pi D^2} $$
    ///
    /// The model treats all intercepted power as absorbed.
    pub fn intercepted_power(&self) -> FloatValue {
        self.flux_at_orbit() * PI * self.planet_radius.powi(2)
    }

    /// Intercepted power averaged over the whole planetary surface ($\text{W/m}^2$).
    pub fn intercepted_flux_per_area(&self) -> FloatValue {
        self.intercepted_power() / (4.0 * PI * self.planet_radius.powi(2))
    }
}

/// Solar power absorbed by the Earth (W).
///
/// Constant for a run: the model has no orbital eccentricity or seasons.
pub fn incoming_flux() -> FloatValue {
    StellarGeometry::earth_sun().intercepted_power()
}

/// Solar power absorbed per square metre of the Earth's surface ($\text{W/m}^2$).
pub fn incoming_flux_per_area() -> FloatValue {
    StellarGeometry::earth_sun().intercepted_flux_per_area()
}
