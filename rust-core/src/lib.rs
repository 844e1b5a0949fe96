//! Hopping Goertzel DFT - streaming sparse spectral analysis
//!
//! Converts a stream of fixed-size audio blocks into periodic multi-band,
//! multi-resolution complex spectra, computing only the bins each band needs.

pub mod audio;
pub mod error;
pub mod pipeline;
pub mod spectrum;

pub use audio::SignalBank;
pub use error::{DftError, Result};
pub use pipeline::{HoppingGoertzelStage, Stage};
pub use spectrum::{BandSpec, EngineConfig, HoppingGoertzelDft, ReferenceDft, WindowType};
