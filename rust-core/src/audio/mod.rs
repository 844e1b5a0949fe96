//! Sample containers at the engine boundary

pub mod bank;
pub mod buffer;

pub use bank::SignalBank;
pub use buffer::{BlockReader, SampleProducer, SampleQueue};
