//! Batch reference transform using realfft
//!
//! Computes, for a whole recorded signal, the same per-hop per-band bins the
//! streaming engine emits, but with a full fixed-window FFT per band. Used to
//! check the engine and handy for offline analysis.

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use super::band::EngineConfig;
use super::windowing::{apply_window_inplace, generate_window};
use crate::error::Result;

/// Full real FFT of one band with reusable buffers
struct BandFft {
    r2c: Arc<dyn RealToComplex<f64>>,
    coefficients: Vec<f64>,
    input_buffer: Vec<f64>,
    output_buffer: Vec<Complex<f64>>,
}

/// Per-hop, per-band windowed FFT over a complete signal
pub struct ReferenceDft {
    config: EngineConfig,
    bands: Vec<BandFft>,
}

impl ReferenceDft {
    pub fn new(config: EngineConfig) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();

        let bands = config
            .bands()
            .iter()
            .map(|band| {
                let n = band.window_size();
                let r2c = planner.plan_fft_forward(n);
                let coefficients = if config.window().is_rectangular() {
                    Vec::new()
                } else {
                    generate_window(config.window(), n)
                };
                BandFft {
                    input_buffer: r2c.make_input_vec(),
                    output_buffer: r2c.make_output_vec(),
                    r2c,
                    coefficients,
                }
            })
            .collect();

        Self { config, bands }
    }

    /// Number of frames a signal of `len` samples yields
    pub fn num_frames(&self, len: usize) -> usize {
        let warmup = self.config.max_window_size();
        if len < warmup {
            0
        } else {
            (len - warmup) / self.config.hop_size() + 1
        }
    }

    /// Frame `index` of `signal`, band-major and bin-ascending
    ///
    /// Band `b` of frame `f` covers
    /// `f * hop + center_offset .. + window_size`. Returns `Ok(None)` when
    /// the signal is too short for that frame.
    pub fn frame(&mut self, signal: &[f64], index: usize) -> Result<Option<Vec<Complex<f64>>>> {
        if index >= self.num_frames(signal.len()) {
            return Ok(None);
        }

        let hop_start = index * self.config.hop_size();
        let mut frame = Vec::with_capacity(self.config.frame_len());

        for (band, fft) in self.config.bands().iter().zip(self.bands.iter_mut()) {
            let start = hop_start + band.center_offset();
            let segment = &signal[start..start + band.window_size()];

            fft.input_buffer.copy_from_slice(segment);
            apply_window_inplace(&mut fft.input_buffer, &fft.coefficients);
            fft.r2c.process(&mut fft.input_buffer, &mut fft.output_buffer)?;

            frame.extend_from_slice(&fft.output_buffer[band.bins()]);
        }

        Ok(Some(frame))
    }

    /// Every frame of `signal`
    pub fn frames(&mut self, signal: &[f64]) -> Result<Vec<Vec<Complex<f64>>>> {
        let count = self.num_frames(signal.len());
        let mut frames = Vec::with_capacity(count);
        for index in 0..count {
            if let Some(frame) = self.frame(signal, index)? {
                frames.push(frame);
            }
        }
        Ok(frames)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::band::BandSpec;
    use std::f64::consts::PI;

    #[test]
    fn test_frame_count() {
        let config = EngineConfig::new(vec![BandSpec::new(1024, 0..4).unwrap()], 256, 128).unwrap();
        let reference = ReferenceDft::new(config);

        assert_eq!(reference.num_frames(1000), 0);
        assert_eq!(reference.num_frames(1024), 1);
        assert_eq!(reference.num_frames(1024 * 48), (1024 * 47) / 256 + 1);
    }

    #[test]
    fn test_sine_peak_in_reference() {
        let band = BandSpec::new(1024, 0..513).unwrap();
        let config = EngineConfig::new(vec![band], 512, 512).unwrap();
        let mut reference = ReferenceDft::new(config);

        // Exactly bin 32
        let signal: Vec<f64> = (0..2048)
            .map(|n| (2.0 * PI * 32.0 * n as f64 / 1024.0).cos())
            .collect();
        let frames = reference.frames(&signal).unwrap();
        assert_eq!(frames.len(), 3);

        for frame in &frames {
            assert!((frame[32].norm() - 512.0).abs() < 1e-6);
            assert!(frame[31].norm() < 1e-6);
        }
    }

    #[test]
    fn test_short_band_is_centred() {
        // Impulse at the centre of the long window hits the short window's centre too
        let bands = vec![
            BandSpec::new(16, 0..9).unwrap(),
            BandSpec::new(8, 0..5).unwrap(),
        ];
        let mut reference = ReferenceDft::new(EngineConfig::new(bands, 8, 8).unwrap());

        let mut signal = vec![0.0; 16];
        signal[8] = 1.0;
        let frame = reference.frame(&signal, 0).unwrap().unwrap();
        // Short band spans samples 4..12, impulse at its index 4: X[k] = (-1)^k
        let short = &frame[9..];
        for (k, value) in short.iter().enumerate() {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            assert!((value - Complex::new(sign, 0.0)).norm() < 1e-12);
        }
        assert!(reference.frame(&signal, 1).unwrap().is_none());
    }
}
