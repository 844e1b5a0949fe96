//! Hopping Goertzel DFT engine
//!
//! Turns a stream of fixed-size blocks into band-major complex frames, one
//! frame every `hop_size` samples once the largest window has filled. Only
//! the configured bins of each band are ever computed.
//!
//! ```
//! use hopping_dft::spectrum::{EngineConfig, HoppingGoertzelDft};
//!
//! let config = EngineConfig::from_band_edges(
//!     48000.0, &[0.0, 5000.0, 24000.0], &[1024, 512], 256, 128,
//! ).unwrap();
//! let mut engine = HoppingGoertzelDft::new(config).unwrap();
//!
//! let block = vec![0.0; 128];
//! for _ in 0..8 {
//!     engine.process(&block).unwrap();
//! }
//! assert!(engine.trig());
//! assert_eq!(engine.frame().len(), 107 + 202);
//! ```

use log::{debug, trace};
use num_complex::Complex;

use super::band::EngineConfig;
use super::frame::FrameAssembler;
use super::goertzel::SparseGoertzelBank;
use super::scheduler::HopScheduler;
use super::window::SlidingSampleWindow;
use crate::error::{DftError, Result};

/// Window and bin bank of one band
struct BandState {
    window: SlidingSampleWindow,
    bank: SparseGoertzelBank,
}

/// Streaming multi-band sparse DFT
///
/// Owns all of its buffers; `process` is the only mutating entry point
/// besides `reset`. Independent engines may live on independent threads.
pub struct HoppingGoertzelDft {
    config: EngineConfig,
    bands: Vec<BandState>,
    scheduler: HopScheduler,
    assembler: FrameAssembler,
}

impl HoppingGoertzelDft {
    /// Build an engine from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let max_window = config.max_window_size();

        let bands = config
            .bands()
            .iter()
            .map(|band| -> Result<BandState> {
                let lag = max_window - band.center_offset() - band.window_size();
                Ok(BandState {
                    window: SlidingSampleWindow::new(band.window_size(), lag, config.block_size())?,
                    bank: SparseGoertzelBank::new(band, config.window()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let scheduler = HopScheduler::new(config.hop_size(), max_window);
        let assembler = FrameAssembler::new(&config.band_bin_counts());

        debug!(
            "HoppingGoertzelDft: {} bands, {} bins/frame, hop {}, block {}, warm-up {} samples",
            bands.len(),
            assembler.len(),
            config.hop_size(),
            config.block_size(),
            max_window
        );

        Ok(Self {
            config,
            bands,
            scheduler,
            assembler,
        })
    }

    /// Ingest one block; returns true when a new frame was assembled
    ///
    /// A block of the wrong length fails with [`DftError::InvalidArgument`]
    /// and leaves the engine untouched.
    pub fn process(&mut self, block: &[f64]) -> Result<bool> {
        if block.len() != self.config.block_size() {
            return Err(DftError::InvalidArgument(format!(
                "expected a block of {} samples, got {}",
                self.config.block_size(),
                block.len()
            )));
        }

        for band in self.bands.iter_mut() {
            band.window.append(block)?;
        }

        let triggered = self.scheduler.advance(block.len());
        if triggered {
            for (i, band) in self.bands.iter_mut().enumerate() {
                band.bank.compute(&band.window, self.assembler.band_slot(i));
            }
            trace!("frame assembled at sample {}", self.scheduler.samples_ingested());
        }
        self.assembler.set_triggered(triggered);

        Ok(triggered)
    }

    /// Most recently assembled frame, band-major and bin-ascending
    pub fn frame(&self) -> &[Complex<f64>] {
        self.assembler.frame()
    }

    /// True only right after the call to `process` that assembled the frame
    pub fn trig(&self) -> bool {
        self.assembler.trig()
    }

    /// Bins of one band within the last frame
    pub fn band_frame(&self, band: usize) -> Option<&[Complex<f64>]> {
        self.assembler.band(band)
    }

    /// Per-band views of the last frame, in declaration order
    pub fn band_frames(&self) -> impl Iterator<Item = &[Complex<f64>]> + '_ {
        self.assembler
            .band_ranges()
            .iter()
            .map(move |r| &self.assembler.frame()[r.clone()])
    }

    /// Return to the freshly built state
    pub fn reset(&mut self) {
        for band in self.bands.iter_mut() {
            band.window.reset();
        }
        self.scheduler.reset();
        self.assembler.reset();
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get total samples ingested since creation or reset
    pub fn samples_ingested(&self) -> u64 {
        self.scheduler.samples_ingested()
    }

    /// Get number of bins in every frame
    pub fn frame_len(&self) -> usize {
        self.assembler.len()
    }
}
