use radbal_core::constants::UM_PER_M;
use radbal_core::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// Sampled spectrum: parallel wavelength (µm) and spectral intensity
/// ($\text{W m}^{-2} \text{m}^{-1}$) sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralSample {
    wavelength_um: Vec<FloatValue>,
    intensity: Vec<FloatValue>,
}

impl SpectralSample {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            wavelength_um: Vec::with_capacity(capacity),
            intensity: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, wavelength_um: FloatValue, intensity: FloatValue) {
        self.wavelength_um.push(wavelength_um);
        self.intensity.push(intensity);
    }

    pub fn len(&self) -> usize {
        self.wavelength_um.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength_um.is_empty()
    }

    pub fn wavelength_um(&self) -> &[FloatValue] {
        &self.wavelength_um
    }

    pub fn intensity(&self) -> &[FloatValue] {
        &self.intensity
    }

    /// `(wavelength, intensity)` pairs in wavelength order.
    pub fn pairs(&self) -> impl Iterator<Item = (FloatValue, FloatValue)> + '_ {
        self.wavelength_um
            .iter()
            .copied()
            .zip(self.intensity.iter().copied())
    }

    /// Keep only samples with `lower_um <= wavelength <= upper_um`.
    pub fn truncated(&self, lower_um: FloatValue, upper_um: FloatValue) -> Self {
        let mut out = Self::default();
        for (wavelength, intensity) in self
            .pairs()
            .filter(|(w, _)| *w >= lower_um && *w <= upper_um)
        {
            out.push(wavelength, intensity);
        }
        out
    }

    /// Rectangle-rule integral over wavelength for a uniform bin width given in µm
    /// ($\text{W/m}^2$).
    pub fn integrate(&self, step_um: FloatValue) -> FloatValue {
        self.intensity.iter().sum::<FloatValue>() * step_um / UM_PER_M
    }

    /// Wavelength of the most intense sample (µm).
    pub fn peak_wavelength_um(&self) -> Option<FloatValue> {
        self.pairs()
            .fold(None, |best: Option<(FloatValue, FloatValue)>, (w, i)| match best {
                Some((_, best_i)) if best_i >= i => best,
                _ => Some((w, i)),
            })
            .map(|(w, _)| w)
    }
}
