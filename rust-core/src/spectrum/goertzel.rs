//! Sparse Goertzel bank: only the bins a band needs
//!
//! Each bin costs O(N) via the second-order Goertzel recursion, so a band
//! costs O(N * bins) per frame. This wins over a full transform whenever a
//! band keeps only a small slice of its spectrum.

use num_complex::Complex;
use std::f64::consts::PI;

use super::band::BandSpec;
use super::window::SlidingSampleWindow;
use super::windowing::{apply_window_inplace, generate_window, WindowType};

/// Complex DFT value X[k] = Σ x[n]·e^(-j2πkn/N) of a single bin
///
/// # Arguments
/// * `samples` - N time-domain samples
/// * `cos_w`, `sin_w` - cos/sin of ω = 2πk/N
#[inline]
pub fn goertzel_bin(samples: &[f64], cos_w: f64, sin_w: f64) -> Complex<f64> {
    let coeff = 2.0 * cos_w;
    let mut s1 = 0.0;
    let mut s2 = 0.0;
    for &x in samples {
        let s0 = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }

    // One extra zero-input step folds the e^(jωN) = 1 phase back in
    Complex::new(s1 * cos_w - s2, s1 * sin_w)
}

/// Bins `bin_start..bin_end` of one band
pub struct SparseGoertzelBank {
    window_size: usize,

    /// (cos ω, sin ω) per requested bin, ascending bin order
    twiddles: Vec<(f64, f64)>,

    /// Analysis window coefficients (empty = rectangular)
    coefficients: Vec<f64>,

    /// Reusable snapshot buffer
    scratch: Vec<f64>,
}

impl SparseGoertzelBank {
    /// Create a bank for `band`, applying `window` to each snapshot
    pub fn new(band: &BandSpec, window: WindowType) -> Self {
        let n = band.window_size();
        let twiddles = band
            .bins()
            .map(|k| {
                let omega = 2.0 * PI * k as f64 / n as f64;
                (omega.cos(), omega.sin())
            })
            .collect();

        let coefficients = if window.is_rectangular() {
            Vec::new()
        } else {
            generate_window(window, n)
        };

        Self {
            window_size: n,
            twiddles,
            coefficients,
            scratch: vec![0.0; n],
        }
    }

    /// Evaluate every bin over the current window contents
    ///
    /// `out` must hold exactly [`num_bins`](Self::num_bins) values.
    pub fn compute(&mut self, window: &SlidingSampleWindow, out: &mut [Complex<f64>]) {
        debug_assert_eq!(window.window_size(), self.window_size);

        window.snapshot_into(&mut self.scratch);
        apply_window_inplace(&mut self.scratch, &self.coefficients);

        for (value, &(cos_w, sin_w)) in out.iter_mut().zip(self.twiddles.iter()) {
            *value = goertzel_bin(&self.scratch, cos_w, sin_w);
        }
    }

    /// Evaluate every bin over `samples` (`window_size` long, unwindowed)
    pub fn compute_slice(&mut self, samples: &[f64]) -> Vec<Complex<f64>> {
        debug_assert_eq!(samples.len(), self.window_size);

        self.scratch.copy_from_slice(samples);
        apply_window_inplace(&mut self.scratch, &self.coefficients);
        self.twiddles
            .iter()
            .map(|&(cos_w, sin_w)| goertzel_bin(&self.scratch, cos_w, sin_w))
            .collect()
    }

    pub fn num_bins(&self) -> usize {
        self.twiddles.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}
