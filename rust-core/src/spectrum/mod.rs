//! Multi-band sparse spectral analysis on a block stream

pub mod band;
pub mod engine;
pub mod frame;
pub mod goertzel;
pub mod reference;
pub mod scheduler;
pub mod window;
pub mod windowing;

pub use band::{BandSpec, EngineConfig};
pub use engine::HoppingGoertzelDft;
pub use frame::FrameAssembler;
pub use goertzel::SparseGoertzelBank;
pub use reference::ReferenceDft;
pub use scheduler::HopScheduler;
pub use window::SlidingSampleWindow;
pub use windowing::WindowType;
