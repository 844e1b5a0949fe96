//! Signal bank passed between processing stages
//!
//! A bank holds `ears x channels x samples` real values plus the metadata
//! downstream stages need: sample rate, frame rate, channel centre
//! frequencies and a trigger telling the next stage whether to process.

use ndarray::{s, Array3, ArrayView1};

use crate::error::{DftError, Result};

/// Multi-ear, multi-channel block of real signals with stage metadata
///
/// Signals are stored as one `(ears, channels, samples)` array.
#[derive(Debug, Clone)]
pub struct SignalBank {
    signals: Array3<f64>,
    fs: f64,
    frame_rate: f64,
    centre_freqs: Vec<f64>,
    trig: bool,
}

impl SignalBank {
    /// Create a zeroed bank
    ///
    /// The frame rate defaults to `fs` (one frame per sample) and the trigger
    /// to true. Stages that decimate set their own rate.
    pub fn new(n_ears: usize, n_channels: usize, n_samples: usize, fs: f64) -> Result<Self> {
        if n_ears == 0 || n_channels == 0 || n_samples == 0 {
            return Err(DftError::Config(format!(
                "signal bank shape ({}, {}, {}) has an empty dimension",
                n_ears, n_channels, n_samples
            )));
        }
        if !(fs > 0.0 && fs.is_finite()) {
            return Err(DftError::Config(format!("invalid sample rate {}", fs)));
        }

        Ok(Self {
            signals: Array3::zeros((n_ears, n_channels, n_samples)),
            fs,
            frame_rate: fs,
            centre_freqs: vec![0.0; n_channels],
            trig: true,
        })
    }

    /// Copy `samples` into one ear/channel signal
    pub fn set_signal(&mut self, ear: usize, channel: usize, samples: &[f64]) -> Result<()> {
        self.check_index(ear, channel)?;
        if samples.len() != self.n_samples() {
            return Err(DftError::InvalidArgument(format!(
                "signal has {} samples, bank expects {}",
                samples.len(),
                self.n_samples()
            )));
        }

        self.signals
            .slice_mut(s![ear, channel, ..])
            .assign(&ArrayView1::from(samples));
        Ok(())
    }

    /// Read one ear/channel signal
    pub fn signal(&self, ear: usize, channel: usize) -> Result<ArrayView1<'_, f64>> {
        self.check_index(ear, channel)?;
        Ok(self.signals.slice(s![ear, channel, ..]))
    }

    /// Mutable access to one sample
    pub(crate) fn sample_mut(&mut self, ear: usize, channel: usize, sample: usize) -> &mut f64 {
        &mut self.signals[[ear, channel, sample]]
    }

    /// All signals, ear-major then channel-major
    pub fn signals(&self) -> &Array3<f64> {
        &self.signals
    }

    /// All signals flattened in standard (C) order
    pub fn flattened(&self) -> Vec<f64> {
        self.signals.iter().copied().collect()
    }

    /// Set every sample to zero, keeping shape and metadata
    pub fn zero_signals(&mut self) {
        self.signals.fill(0.0);
    }

    /// True when both banks have the same (ears, channels, samples) shape
    pub fn has_same_shape(&self, other: &SignalBank) -> bool {
        self.signals.shape() == other.signals.shape()
    }

    /// Get trigger flag
    pub fn trig(&self) -> bool {
        self.trig
    }

    /// Set trigger flag
    pub fn set_trig(&mut self, trig: bool) {
        self.trig = trig;
    }

    /// Get number of ears
    pub fn n_ears(&self) -> usize {
        self.signals.dim().0
    }

    /// Get number of channels per ear
    pub fn n_channels(&self) -> usize {
        self.signals.dim().1
    }

    /// Get number of samples per channel
    pub fn n_samples(&self) -> usize {
        self.signals.dim().2
    }

    /// Get sample rate in Hz
    pub fn fs(&self) -> f64 {
        self.fs
    }

    /// Get frame rate in Hz
    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    /// Set frame rate in Hz
    pub fn set_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    /// Get channel centre frequencies in Hz
    pub fn centre_freqs(&self) -> &[f64] {
        &self.centre_freqs
    }

    /// Set channel centre frequencies (one per channel)
    pub fn set_centre_freqs(&mut self, freqs: Vec<f64>) -> Result<()> {
        if freqs.len() != self.n_channels() {
            return Err(DftError::InvalidArgument(format!(
                "{} centre frequencies for {} channels",
                freqs.len(),
                self.n_channels()
            )));
        }
        self.centre_freqs = freqs;
        Ok(())
    }

    fn check_index(&self, ear: usize, channel: usize) -> Result<()> {
        if ear >= self.n_ears() || channel >= self.n_channels() {
            return Err(DftError::InvalidArgument(format!(
                "ear {} / channel {} out of range for {} ears x {} channels",
                ear,
                channel,
                self.n_ears(),
                self.n_channels()
            )));
        }
        Ok(())
    }
}
