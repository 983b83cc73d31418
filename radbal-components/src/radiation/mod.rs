//! Radiative components
//!
//! - `blackbody`: Planck's law with an empirical efficiency factor
//! - `incoming`: absorbed stellar power
//! - `outgoing`: spectral integral of the thermal emission with greenhouse windows
//! - `spectrum`: sampled spectra handed to plotting code

pub mod blackbody;
pub mod incoming;
pub mod outgoing;
mod spectrum;

pub use blackbody::{blackbody_intensity, BlackbodyModel};
pub use incoming::{incoming_flux, incoming_flux_per_area, StellarGeometry};
pub use outgoing::{outgoing_flux, OutgoingFlux, OutgoingFluxIntegrator, SpectralRegion};
pub use spectrum::SpectralSample;
