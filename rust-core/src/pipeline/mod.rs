//! Processing-stage boundary: stages read an input bank and publish an output bank

pub mod hopping_goertzel;

pub use hopping_goertzel::HoppingGoertzelStage;

use crate::audio::SignalBank;
use crate::error::Result;

/// Lifecycle shared by every stage in a processing chain
pub trait Stage {
    /// Configure against the upstream bank; builds the output bank
    fn initialize(&mut self, input: &SignalBank) -> Result<()>;

    /// Consume one input bank (skipped when the input trigger is low)
    fn process(&mut self, input: &SignalBank) -> Result<()>;

    /// Clear internal state, keeping the configuration
    fn reset(&mut self);

    /// Output bank, available once initialized
    fn output(&self) -> Option<&SignalBank>;
}
