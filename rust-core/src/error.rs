//! Error types shared by the engine, the reference transform and the pipeline stage

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DftError {
    /// Invalid or incompatible configuration, fatal to the instance being built
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed per-call argument; engine state is left untouched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Reference FFT failed: {0}")]
    ReferenceFft(#[from] realfft::FftError),
}

pub type Result<T> = std::result::Result<T, DftError>;
