//! Band layout and engine configuration
//!
//! A band pairs an analysis window length with the contiguous range of DFT
//! bins that downstream consumers need from it. Bands are kept in one ordered
//! `Vec` so the frame layout is fully described by the config.

use std::ops::Range;

use log::warn;

use super::windowing::WindowType;
use crate::error::{DftError, Result};

/// Static configuration of one analysis band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandSpec {
    window_size: usize,
    bin_start: usize,
    bin_end: usize,
    center_offset: usize,
}

impl BandSpec {
    /// Create a band analysing `bins` of a `window_size`-point transform
    ///
    /// The center offset is assigned when the band is placed into an
    /// [`EngineConfig`], since it depends on the largest window.
    pub fn new(window_size: usize, bins: Range<usize>) -> Result<Self> {
        if window_size == 0 {
            return Err(DftError::Config("band window size must be > 0".into()));
        }
        let max_bin = window_size / 2 + 1;
        if bins.start > bins.end || bins.end > max_bin {
            return Err(DftError::Config(format!(
                "bin range {}..{} is outside 0..={} for a {}-sample window",
                bins.start, bins.end, max_bin, window_size
            )));
        }

        Ok(Self {
            window_size,
            bin_start: bins.start,
            bin_end: bins.end,
            center_offset: 0,
        })
    }

    /// Get window length in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Get first bin index (inclusive)
    pub fn bin_start(&self) -> usize {
        self.bin_start
    }

    /// Get last bin index (exclusive)
    pub fn bin_end(&self) -> usize {
        self.bin_end
    }

    /// Get bin range `bin_start..bin_end`
    pub fn bins(&self) -> Range<usize> {
        self.bin_start..self.bin_end
    }

    /// Get number of bins this band contributes to a frame
    pub fn num_bins(&self) -> usize {
        self.bin_end - self.bin_start
    }

    /// Samples by which this band's window start trails the largest window's start
    pub fn center_offset(&self) -> usize {
        self.center_offset
    }

    /// Centre frequency in Hz of bin `k` of this band's transform
    pub fn bin_frequency(&self, k: usize, sample_rate: f64) -> f64 {
        k as f64 * sample_rate / self.window_size as f64
    }
}

/// Engine configuration: ordered bands plus the shared hop and block sizes
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    bands: Vec<BandSpec>,
    hop_size: usize,
    block_size: usize,
    window: WindowType,
}

impl EngineConfig {
    /// Validate and build a configuration
    ///
    /// Every band is re-centred on the largest window. Fails with
    /// [`DftError::Config`] when the bands cannot be reconstructed block by
    /// block at the same positions a batch transform would use.
    pub fn new(bands: Vec<BandSpec>, hop_size: usize, block_size: usize) -> Result<Self> {
        if bands.is_empty() {
            return Err(DftError::Config("at least one band is required".into()));
        }
        if hop_size == 0 {
            return Err(DftError::Config("hop size must be > 0".into()));
        }
        if block_size == 0 {
            return Err(DftError::Config("block size must be > 0".into()));
        }

        let max_window = bands.iter().map(BandSpec::window_size).max().unwrap_or(0);

        // Warm-up must end on a block boundary, otherwise the first frame
        // would already be misaligned with the batch positions.
        if max_window % block_size != 0 {
            return Err(DftError::Config(format!(
                "largest window ({}) is not a multiple of the block size ({})",
                max_window, block_size
            )));
        }

        let mut aligned = Vec::with_capacity(bands.len());
        for (i, mut band) in bands.into_iter().enumerate() {
            if block_size > band.window_size {
                return Err(DftError::Config(format!(
                    "block size ({}) exceeds window size ({}) of band {}",
                    block_size, band.window_size, i
                )));
            }
            band.center_offset = max_window / 2 - band.window_size / 2;
            debug_assert!(band.center_offset + band.window_size <= max_window);
            aligned.push(band);
        }

        let config = Self {
            bands: aligned,
            hop_size,
            block_size,
            window: WindowType::Rectangular,
        };

        if config.coalesces_hops() {
            warn!(
                "hop size {} is not a multiple of block size {}; at most one frame per block",
                hop_size, block_size
            );
        }

        Ok(config)
    }

    /// True when some hop boundaries cannot land on a block boundary
    ///
    /// Frames then fire at most once per block: a block spanning several hops
    /// yields a single frame, and frames drift from the exact hop positions.
    pub fn coalesces_hops(&self) -> bool {
        self.hop_size % self.block_size != 0
    }

    /// Build a configuration from band edges in Hz
    ///
    /// Band `i` spans `edges_hz[i]..edges_hz[i + 1]` and is analysed with
    /// `window_sizes[i]` samples. Bin limits are `ceil(edge * N / fs)`, so a
    /// bin belongs to the band whose lower edge is at or below its frequency.
    pub fn from_band_edges(
        sample_rate: f64,
        edges_hz: &[f64],
        window_sizes: &[usize],
        hop_size: usize,
        block_size: usize,
    ) -> Result<Self> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(DftError::Config(format!("invalid sample rate {}", sample_rate)));
        }
        if edges_hz.len() != window_sizes.len() + 1 {
            return Err(DftError::Config(format!(
                "{} band edges given for {} windows (need windows + 1)",
                edges_hz.len(),
                window_sizes.len()
            )));
        }
        if edges_hz.iter().any(|e| !e.is_finite() || *e < 0.0) {
            return Err(DftError::Config("band edges must be finite and non-negative".into()));
        }
        if edges_hz.windows(2).any(|w| w[1] < w[0]) {
            return Err(DftError::Config("band edges must be non-decreasing".into()));
        }

        let bands = window_sizes
            .iter()
            .zip(edges_hz.windows(2))
            .map(|(&n, edge)| {
                let to_bin = |hz: f64| (hz * n as f64 / sample_rate).ceil() as usize;
                BandSpec::new(n, to_bin(edge[0])..to_bin(edge[1]))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(bands, hop_size, block_size)
    }

    /// Select the analysis window applied to every snapshot
    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    /// Get bands in declaration (frame) order
    pub fn bands(&self) -> &[BandSpec] {
        &self.bands
    }

    /// Get samples between frames
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Get samples per ingested block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Get analysis window applied before bin summation
    pub fn window(&self) -> WindowType {
        self.window
    }

    /// Length of the largest window, i.e. the warm-up before the first frame
    pub fn max_window_size(&self) -> usize {
        self.bands.iter().map(BandSpec::window_size).max().unwrap_or(0)
    }

    /// Number of bins emitted per frame
    pub fn frame_len(&self) -> usize {
        self.bands.iter().map(BandSpec::num_bins).sum()
    }

    /// Get per-band bin counts, for splitting a frame by band
    pub fn band_bin_counts(&self) -> Vec<usize> {
        self.bands.iter().map(BandSpec::num_bins).collect()
    }

    /// Centre frequency in Hz of every emitted bin, in frame order
    pub fn bin_frequencies(&self, sample_rate: f64) -> Vec<f64> {
        self.bands
            .iter()
            .flat_map(|band| band.bins().map(move |k| band.bin_frequency(k, sample_rate)))
            .collect()
    }

    /// Frames emitted per second in steady state
    pub fn frame_rate(&self, sample_rate: f64) -> f64 {
        sample_rate / self.hop_size as f64
    }
}
