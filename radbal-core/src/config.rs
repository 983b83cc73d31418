//! Scenario configuration.

use crate::errors::{ensure_positive, RadbalError, RadbalResult};
use crate::parameters::CalibrationParameters;
use crate::timeseries::{FloatValue, Time};
use crate::units::MolarDensity;
use approx::relative_eq;
use log::debug;
use serde::{Deserialize, Serialize};

/// Scenario inputs of a single simulation run.
///
/// Construct through [`SimulationConfig::new`] (or deserialise, which applies the same checks);
/// an existing config is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationConfig")]
pub struct SimulationConfig {
    end_year: i64,
    time_step: Time,
    initial_temperature: FloatValue,
    initial_co2_density: FloatValue,
    co2_slope: FloatValue,
    use_greenhouse: bool,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSimulationConfig {
    end_year: i64,
    time_step: Time,
    initial_temperature: FloatValue,
    initial_co2_density: FloatValue,
    co2_slope: FloatValue,
    use_greenhouse: bool,
}

impl TryFrom<RawSimulationConfig> for SimulationConfig {
    type Error = RadbalError;

    fn try_from(raw: RawSimulationConfig) -> RadbalResult<Self> {
        SimulationConfig::new(
            raw.end_year,
            raw.time_step,
            raw.initial_temperature,
            raw.initial_co2_density,
            raw.co2_slope,
            raw.use_greenhouse,
        )
    }
}

impl SimulationConfig {
    /// Create a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `end_year` - Simulation horizon in years from t=0
    /// * `time_step` - Years per iteration
    /// * `initial_temperature` - Surface temperature at t=0 (K)
    /// * `initial_co2_density` - CO2 molar density at t=0 ($\text{mol/cm}^3$)
    /// * `co2_slope` - Linear CO2 trend ($\text{mol/cm}^3$ per year)
    /// * `use_greenhouse` - Apply spectral-window absorption to the outgoing flux
    pub fn new(
        end_year: i64,
        time_step: Time,
        initial_temperature: FloatValue,
        initial_co2_density: FloatValue,
        co2_slope: FloatValue,
        use_greenhouse: bool,
    ) -> RadbalResult<Self> {
        if end_year <= 0 {
            return Err(RadbalError::invalid_argument(
                "end_year",
                end_year as FloatValue,
                "must be strictly positive",
            ));
        }
        ensure_positive("time_step", time_step)?;
        if time_step > end_year as Time {
            return Err(RadbalError::InvalidConfig(format!(
                "time_step {time_step} exceeds end_year {end_year}"
            )));
        }
        ensure_positive("initial_temperature", initial_temperature)?;
        for (name, value) in [
            ("initial_co2_density", initial_co2_density),
            ("co2_slope", co2_slope),
        ] {
            if !value.is_finite() {
                return Err(RadbalError::invalid_argument(name, value, "must be finite"));
            }
        }
        if initial_co2_density < 0.0 {
            return Err(RadbalError::invalid_argument(
                "initial_co2_density",
                initial_co2_density,
                "must be non-negative",
            ));
        }
        let final_co2_density = initial_co2_density + co2_slope * end_year as FloatValue;
        if final_co2_density < 0.0 {
            return Err(RadbalError::InvalidConfig(format!(
                "co2_slope {co2_slope} makes the CO2 density negative \
                 ({final_co2_density}) before end_year {end_year}"
            )));
        }

        Ok(Self {
            end_year,
            time_step,
            initial_temperature,
            initial_co2_density,
            co2_slope,
            use_greenhouse,
        })
    }

    pub fn end_year(&self) -> i64 {
        self.end_year
    }

    pub fn time_step(&self) -> Time {
        self.time_step
    }

    pub fn initial_temperature(&self) -> FloatValue {
        self.initial_temperature
    }

    pub fn initial_co2_density(&self) -> FloatValue {
        self.initial_co2_density
    }

    pub fn co2_slope(&self) -> FloatValue {
        self.co2_slope
    }

    pub fn use_greenhouse(&self) -> bool {
        self.use_greenhouse
    }

    /// Number of recorded steps, $\lfloor \text{end\_year} / \text{time\_step} \rfloor$.
    ///
    /// Ratios within floating point noise of an integer (`30.0 / 0.1`) count as that integer.
    pub fn step_count(&self) -> usize {
        let ratio = self.end_year as FloatValue / self.time_step;
        let nearest = ratio.round();
        if relative_eq!(ratio, nearest, max_relative = 1e-9) {
            nearest as usize
        } else {
            ratio.floor() as usize
        }
    }

    /// Elapsed time of step `index` (years).
    pub fn time_at(&self, index: usize) -> Time {
        index as Time * self.time_step
    }

    /// CO2 molar density at time `t` ($\text{mol/cm}^3$).
    pub fn co2_density_at(&self, t: Time) -> FloatValue {
        self.initial_co2_density + self.co2_slope * t
    }

    /// CO2 molar density at time `t` as a typed quantity.
    pub fn co2_at(&self, t: Time) -> MolarDensity {
        MolarDensity::from_mol_per_cm3(self.co2_density_at(t))
    }
}

/// A scenario as stored on disk: the run configuration plus optional calibration overrides.
///
/// ```toml
/// [simulation]
/// end_year = 30
/// time_step = 0.1
/// initial_temperature = 270.0
/// initial_co2_density = 1.5946843853820598e-8
/// co2_slope = 0.0
/// use_greenhouse = true
///
/// [parameters]
/// atmosphere_temperature_offset = 50.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub parameters: CalibrationParameters,
}

impl ScenarioFile {
    pub fn from_toml_str(contents: &str) -> RadbalResult<Self> {
        let scenario: ScenarioFile =
            toml::from_str(contents).map_err(|e| RadbalError::ConfigParse(e.to_string()))?;
        scenario.parameters.validate()?;
        debug!(
            "Loaded scenario: {} yr at {} yr steps from {} K",
            scenario.simulation.end_year,
            scenario.simulation.time_step,
            scenario.simulation.initial_temperature
        );
        Ok(scenario)
    }

    pub fn to_toml_string(&self) -> RadbalResult<String> {
        toml::to_string(self).map_err(|e| RadbalError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> SimulationConfig {
        SimulationConfig::new(30, 0.1, 270.0, 9.6e15 / 6.02e23, 0.0, true).unwrap()
    }

    #[test]
    fn test_step_count() {
        assert_eq!(reference().step_count(), 300);

        let config = SimulationConfig::new(30, 0.5, 281.0, 0.0, 0.0, true).unwrap();
        assert_eq!(config.step_count(), 60);

        // 10 / 3 = 3.33.. -> 3
        let config = SimulationConfig::new(10, 3.0, 281.0, 0.0, 0.0, true).unwrap();
        assert_eq!(config.step_count(), 3);

        let config = SimulationConfig::new(1, 1.0, 281.0, 0.0, 0.0, false).unwrap();
        assert_eq!(config.step_count(), 1);

        let config = SimulationConfig::new(7, 0.7, 281.0, 0.0, 0.0, false).unwrap();
        assert_eq!(config.step_count(), 10);
    }

    #[test]
    fn test_time_and_co2() {
        let config = SimulationConfig::new(10, 0.5, 281.0, 1.0e-8, 2.0e-10, true).unwrap();
        assert_eq!(config.time_at(0), 0.0);
        assert!((config.time_at(3) - 1.5).abs() < 1e-12);
        assert!((config.co2_density_at(5.0) - 1.1e-8).abs() < 1e-20);
        assert!((config.co2_at(0.0).mol_per_m3() - 1.0e-2).abs() < 1e-14);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            SimulationConfig::new(0, 0.1, 270.0, 0.0, 0.0, true),
            Err(RadbalError::InvalidArgument {
                name: "end_year",
                ..
            })
        ));
        assert!(SimulationConfig::new(-5, 0.1, 270.0, 0.0, 0.0, true).is_err());
        assert!(matches!(
            SimulationConfig::new(30, 0.0, 270.0, 0.0, 0.0, true),
            Err(RadbalError::InvalidArgument {
                name: "time_step",
                ..
            })
        ));
        assert!(SimulationConfig::new(30, -0.1, 270.0, 0.0, 0.0, true).is_err());
        assert!(matches!(
            SimulationConfig::new(1, 2.0, 270.0, 0.0, 0.0, true),
            Err(RadbalError::InvalidConfig(_))
        ));
        assert!(SimulationConfig::new(30, 0.1, 0.0, 0.0, 0.0, true).is_err());
        assert!(SimulationConfig::new(30, 0.1, 270.0, f64::NAN, 0.0, true).is_err());
        assert!(SimulationConfig::new(30, 0.1, 270.0, -1.0, 0.0, true).is_err());
        assert!(SimulationConfig::new(30, 0.1, 270.0, 0.0, f64::INFINITY, true).is_err());
        assert!(matches!(
            SimulationConfig::new(30, 0.1, 270.0, 1.0e-8, -1.0e-9, true),
            Err(RadbalError::InvalidConfig(_))
        ));
        assert!(SimulationConfig::new(30, 0.1, 270.0, 1.0e-8, -1.0e-10, true).is_ok());
    }

    #[test]
    fn test_scenario_from_toml() {
        let contents = r#"
[simulation]
end_year = 30
time_step = 0.1
initial_temperature = 270.0
initial_co2_density = 1.5946843853820598e-8
co2_slope = 0.0
use_greenhouse = true

[parameters]
atmosphere_temperature_offset = 50.0
"#;
        let scenario = ScenarioFile::from_toml_str(contents).unwrap();
        assert_eq!(scenario.simulation.step_count(), 300);
        assert!(scenario.simulation.use_greenhouse());
        assert!((scenario.parameters.atmosphere_temperature_offset - 50.0).abs() < 1e-12);
        assert!((scenario.parameters.planck_efficiency - 2.78).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_without_parameters() {
        let contents = r#"
[simulation]
end_year = 30
time_step = 0.5
initial_temperature = 281.0
initial_co2_density = 0.0
co2_slope = 0.0
use_greenhouse = false
"#;
        let scenario = ScenarioFile::from_toml_str(contents).unwrap();
        assert_eq!(scenario.parameters, CalibrationParameters::default());
    }

    #[test]
    fn test_scenario_validation_applies() {
        let contents = r#"
[simulation]
end_year = 1
time_step = 2.0
initial_temperature = 281.0
initial_co2_density = 0.0
co2_slope = 0.0
use_greenhouse = false
"#;
        let err = ScenarioFile::from_toml_str(contents).unwrap_err();
        assert!(matches!(err, RadbalError::ConfigParse(_)));
        assert!(err.to_string().contains("exceeds end_year"));

        // Missing fields are not silently defaulted
        let err = ScenarioFile::from_toml_str("[simulation]\nend_year = 30\n").unwrap_err();
        assert!(matches!(err, RadbalError::ConfigParse(_)));
    }

    #[test]
    fn test_scenario_round_trip() {
        let scenario = ScenarioFile {
            simulation: reference(),
            parameters: CalibrationParameters::default(),
        };
        let serialised = scenario.to_toml_string().unwrap();
        let parsed = ScenarioFile::from_toml_str(&serialised).unwrap();
        assert_eq!(parsed, scenario);
    }
}
