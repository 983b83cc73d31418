//! Output series of a simulation run.

use crate::errors::{RadbalError, RadbalResult};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

pub type FloatValue = f64;
/// Elapsed simulation time in years since the start of a run.
pub type Time = f64;

/// A single recorded time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    /// Years since the start of the run.
    pub time: Time,
    /// Surface temperature (K).
    pub temperature: FloatValue,
    /// CO2 molar density ($\text{mol/cm}^3$).
    pub co2_density: FloatValue,
    /// Total outgoing thermal power (W).
    pub heat_out: FloatValue,
}

/// Parallel time series produced by a single simulation run.
///
/// Samples are appended in time order while a run is in progress and the series is
/// handed out read-only once the run completes. All four sequences always have the same length.
///
/// Deserialising replays every sample through [`SimulationSeries::push`], so a stored series
/// obeys the same rules as one recorded by a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationSeries")]
pub struct SimulationSeries {
    time: Vec<Time>,
    temperature: Vec<FloatValue>,
    co2_density: Vec<FloatValue>,
    heat_out: Vec<FloatValue>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSimulationSeries {
    time: Vec<Time>,
    temperature: Vec<FloatValue>,
    co2_density: Vec<FloatValue>,
    heat_out: Vec<FloatValue>,
}

impl TryFrom<RawSimulationSeries> for SimulationSeries {
    type Error = RadbalError;

    fn try_from(raw: RawSimulationSeries) -> RadbalResult<Self> {
        let len = raw.time.len();
        for (name, column_len) in [
            ("temperature", raw.temperature.len()),
            ("co2_density", raw.co2_density.len()),
            ("heat_out", raw.heat_out.len()),
        ] {
            if column_len != len {
                return Err(RadbalError::InvalidConfig(format!(
                    "series column {name} has {column_len} values but time has {len}"
                )));
            }
        }

        let mut series = SimulationSeries::with_capacity(len);
        for i in 0..len {
            series.push(SeriesSample {
                time: raw.time[i],
                temperature: raw.temperature[i],
                co2_density: raw.co2_density[i],
                heat_out: raw.heat_out[i],
            })?;
        }
        Ok(series)
    }
}

impl SimulationSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            co2_density: Vec::with_capacity(capacity),
            heat_out: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample.
    ///
    /// Time must be strictly increasing and every value finite.
    pub fn push(&mut self, sample: SeriesSample) -> RadbalResult<()> {
        let values = [
            ("time", sample.time),
            ("temperature", sample.temperature),
            ("co2_density", sample.co2_density),
            ("heat_out", sample.heat_out),
        ];
        if let Some(&(name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RadbalError::NumericDegeneracy {
                quantity: name,
                detail: format!("non-finite value {value} at t={}", sample.time),
            });
        }
        if let Some(&last) = self.time.last() {
            if sample.time <= last {
                return Err(RadbalError::InvalidArgument {
                    name: "time",
                    value: sample.time,
                    reason: "series time must be strictly increasing",
                });
            }
        }

        self.time.push(sample.time);
        self.temperature.push(sample.temperature);
        self.co2_density.push(sample.co2_density);
        self.heat_out.push(sample.heat_out);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[Time] {
        &self.time
    }

    pub fn temperature(&self) -> &[FloatValue] {
        &self.temperature
    }

    pub fn co2_density(&self) -> &[FloatValue] {
        &self.co2_density
    }

    pub fn heat_out(&self) -> &[FloatValue] {
        &self.heat_out
    }

    pub fn time_view(&self) -> ArrayView1<'_, Time> {
        ArrayView1::from(self.time.as_slice())
    }

    pub fn temperature_view(&self) -> ArrayView1<'_, FloatValue> {
        ArrayView1::from(self.temperature.as_slice())
    }

    pub fn co2_density_view(&self) -> ArrayView1<'_, FloatValue> {
        ArrayView1::from(self.co2_density.as_slice())
    }

    pub fn heat_out_view(&self) -> ArrayView1<'_, FloatValue> {
        ArrayView1::from(self.heat_out.as_slice())
    }

    /// Get the sample recorded at `index`
    pub fn at(&self, index: usize) -> Option<SeriesSample> {
        Some(SeriesSample {
            time: *self.time.get(index)?,
            temperature: *self.temperature.get(index)?,
            co2_density: *self.co2_density.get(index)?,
            heat_out: *self.heat_out.get(index)?,
        })
    }

    pub fn latest(&self) -> Option<SeriesSample> {
        self.len().checked_sub(1).and_then(|i| self.at(i))
    }

    /// Temperature at the end of the run.
    ///
    /// For a run long enough to settle this is the equilibrium temperature of the scenario.
    pub fn equilibrium_temperature(&self) -> Option<FloatValue> {
        self.temperature.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = SeriesSample> + '_ {
        (0..self.len()).filter_map(move |i| self.at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: Time, temperature: FloatValue) -> SeriesSample {
        SeriesSample {
            time,
            temperature,
            co2_density: 1.6e-8,
            heat_out: 1.7e17,
        }
    }

    #[test]
    fn adding() {
        let mut series = SimulationSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.equilibrium_temperature(), None);

        series.push(sample(0.0, 270.0)).unwrap();
        series.push(sample(0.1, 271.0)).unwrap();
        series.push(sample(0.2, 271.5)).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.time(), &[0.0, 0.1, 0.2]);
        assert_eq!(series.temperature_view().len(), 3);
        assert_eq!(series.heat_out().len(), series.co2_density().len());
        assert_eq!(series.equilibrium_temperature(), Some(271.5));
        assert_eq!(series.latest().unwrap().time, 0.2);
        assert_eq!(series.iter().count(), 3);
    }

    #[test]
    fn rejects_non_increasing_time() {
        let mut series = SimulationSeries::new();
        series.push(sample(1.0, 270.0)).unwrap();

        let err = series.push(sample(1.0, 270.0)).unwrap_err();
        assert!(matches!(err, RadbalError::InvalidArgument { name: "time", .. }));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut series = SimulationSeries::new();
        let err = series.push(sample(0.0, f64::NAN)).unwrap_err();
        assert!(matches!(
            err,
            RadbalError::NumericDegeneracy {
                quantity: "temperature",
                ..
            }
        ));
        assert!(series.is_empty());
    }

    #[test]
    fn serialise() {
        let mut series = SimulationSeries::with_capacity(2);
        series.push(sample(0.0, 270.0)).unwrap();
        series.push(sample(0.5, 272.0)).unwrap();

        let json = serde_json::to_string(&series).unwrap();
        let parsed: SimulationSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, series);
    }

    #[test]
    fn deserialise_rejects_mismatched_columns() {
        let json = r#"{"time":[0.0,1.0],"temperature":[270.0],"co2_density":[0.0],"heat_out":[0.0]}"#;
        let err = serde_json::from_str::<SimulationSeries>(json).unwrap_err();
        assert!(err.to_string().contains("temperature"), "{err}");
    }

    #[test]
    fn deserialise_rejects_unordered_time() {
        let json = r#"{
            "time": [1.0, 0.5],
            "temperature": [270.0, 271.0],
            "co2_density": [0.0, 0.0],
            "heat_out": [1.0, 1.0]
        }"#;
        assert!(serde_json::from_str::<SimulationSeries>(json).is_err());
    }

    #[test]
    fn deserialised_series_is_readable() {
        let json = r#"{
            "time": [0.0, 0.5],
            "temperature": [270.0, 271.0],
            "co2_density": [1.6e-8, 1.6e-8],
            "heat_out": [1.7e17, 1.7e17]
        }"#;
        let series: SimulationSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.iter().count(), 2);
        assert_eq!(series.latest().unwrap().temperature, 271.0);
        assert_eq!(series.at(2), None);
    }
}
