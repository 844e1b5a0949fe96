//! Output frame and trigger flag

use num_complex::Complex;
use std::ops::Range;

/// Holds the most recent band-major frame and whether it is fresh
pub struct FrameAssembler {
    frame: Vec<Complex<f64>>,

    /// Slice of `frame` owned by each band, in declaration order
    band_ranges: Vec<Range<usize>>,

    triggered: bool,
}

impl FrameAssembler {
    /// Create a zeroed frame for bands with the given bin counts
    pub fn new(bin_counts: &[usize]) -> Self {
        let mut band_ranges = Vec::with_capacity(bin_counts.len());
        let mut start = 0;
        for &count in bin_counts {
            band_ranges.push(start..start + count);
            start += count;
        }

        Self {
            frame: vec![Complex::new(0.0, 0.0); start],
            band_ranges,
            triggered: false,
        }
    }

    /// Writable slice for `band`; used while publishing a frame
    pub(crate) fn band_slot(&mut self, band: usize) -> &mut [Complex<f64>] {
        let range = self.band_ranges[band].clone();
        &mut self.frame[range]
    }

    /// Mark the frame as freshly assembled (or not) for this cycle
    pub(crate) fn set_triggered(&mut self, triggered: bool) {
        self.triggered = triggered;
    }

    /// Most recently assembled frame (stale unless [`trig`](Self::trig) is set)
    pub fn frame(&self) -> &[Complex<f64>] {
        &self.frame
    }

    /// Bins of one band within the last frame
    pub fn band(&self, band: usize) -> Option<&[Complex<f64>]> {
        self.band_ranges.get(band).map(|r| &self.frame[r.clone()])
    }

    pub fn band_ranges(&self) -> &[Range<usize>] {
        &self.band_ranges
    }

    pub fn trig(&self) -> bool {
        self.triggered
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn reset(&mut self) {
        self.frame.fill(Complex::new(0.0, 0.0));
        self.triggered = false;
    }
}
