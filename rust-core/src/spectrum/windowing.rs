//! Analysis windows applied to a band snapshot before bin summation
//!
//! The streaming engine and the reference transform share these coefficients,
//! so both sides of the equivalence check see identical windowed samples.

use std::f64::consts::PI;

/// Analysis window types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// w[n] = 1 (no windowing)
    #[default]
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
}

impl WindowType {
    /// True when the window leaves samples unscaled
    pub fn is_rectangular(&self) -> bool {
        matches!(self, WindowType::Rectangular)
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if window_type.is_rectangular() || length < 2 {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / denom;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

/// Apply precomputed coefficients in-place
///
/// An empty coefficient slice means rectangular and leaves `signal` untouched.
pub fn apply_window_inplace(signal: &mut [f64], coefficients: &[f64]) {
    if coefficients.is_empty() {
        return;
    }
    for (s, w) in signal.iter_mut().zip(coefficients.iter()) {
        *s *= w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_window() {
        let window = generate_window(WindowType::Rectangular, 100);
        assert_eq!(window.len(), 100);
        assert!(window.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_window_symmetry() {
        let length = 161;
        for window_type in [WindowType::Hann, WindowType::Hamming, WindowType::Blackman] {
            let w = generate_window(window_type, length);
            assert_eq!(w.len(), length);
            assert!((w[0] - w[length - 1]).abs() < 1e-10);
            assert!((w[length / 2] - 1.0).abs() < 1e-10);
        }

        // Hamming keeps non-zero endpoints (0.08)
        let hamming = generate_window(WindowType::Hamming, length);
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);
    }

    #[test]
    fn test_degenerate_length() {
        assert_eq!(generate_window(WindowType::Hann, 1), vec![1.0]);
        assert!(generate_window(WindowType::Hann, 0).is_empty());
    }

    #[test]
    fn test_apply_window_inplace() {
        let mut signal = vec![2.0; 4];
        apply_window_inplace(&mut signal, &[0.0, 0.5, 1.0, 0.25]);
        assert_eq!(signal, vec![0.0, 1.0, 2.0, 0.5]);

        let mut untouched = vec![3.0; 4];
        apply_window_inplace(&mut untouched, &[]);
        assert_eq!(untouched, vec![3.0; 4]);
    }
}
