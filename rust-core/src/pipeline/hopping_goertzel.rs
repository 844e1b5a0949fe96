//! Hopping Goertzel DFT as a pipeline stage
//!
//! Input: `ears x 1 x block_size` time signal. Output: `ears x bins x 2`,
//! where each channel is one bin holding (real, imaginary), so the flattened
//! output interleaves real and imaginary parts in band-major order.

use log::debug;

use super::Stage;
use crate::audio::SignalBank;
use crate::error::{DftError, Result};
use crate::spectrum::{EngineConfig, HoppingGoertzelDft, WindowType};

enum Setup {
    /// Bands described in Hz; bins resolved against the input sample rate
    Edges {
        edges_hz: Vec<f64>,
        window_sizes: Vec<usize>,
        hop_size: usize,
        window: WindowType,
    },
    /// Fully resolved configuration; input block size must agree
    Config(EngineConfig),
}

/// Pipeline stage running one hopping Goertzel engine per ear
///
/// Input is a bank of `(ears, 1, block_size)`; output is a bank of
/// `(ears, bins, 2)` holding the real and imaginary part of every bin of the
/// last frame. The output trigger follows the engines' trigger.
pub struct HoppingGoertzelStage {
    setup: Setup,
    engines: Vec<HoppingGoertzelDft>,
    output: Option<SignalBank>,
}

impl HoppingGoertzelStage {
    /// Stage analysing `edges_hz[i]..edges_hz[i + 1]` with `window_sizes[i]` samples
    pub fn new(edges_hz: Vec<f64>, window_sizes: Vec<usize>, hop_size: usize) -> Self {
        Self {
            setup: Setup::Edges {
                edges_hz,
                window_sizes,
                hop_size,
                window: WindowType::Rectangular,
            },
            engines: Vec::new(),
            output: None,
        }
    }

    /// Stage using an explicit configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            setup: Setup::Config(config),
            engines: Vec::new(),
            output: None,
        }
    }

    /// Analysis window for band-edge setups (explicit configs carry their own)
    pub fn with_window(mut self, window_type: WindowType) -> Self {
        if let Setup::Edges { window, .. } = &mut self.setup {
            *window = window_type;
        }
        self
    }

    /// Resolved configuration, available once initialized
    pub fn config(&self) -> Option<&EngineConfig> {
        self.engines.first().map(HoppingGoertzelDft::config)
    }

    fn resolve(&self, input: &SignalBank) -> Result<EngineConfig> {
        match &self.setup {
            Setup::Edges {
                edges_hz,
                window_sizes,
                hop_size,
                window,
            } => Ok(EngineConfig::from_band_edges(
                input.fs(),
                edges_hz,
                window_sizes,
                *hop_size,
                input.n_samples(),
            )?
            .with_window(*window)),
            Setup::Config(config) => {
                if config.block_size() != input.n_samples() {
                    return Err(DftError::Config(format!(
                        "input block size {} disagrees with configured block size {}",
                        input.n_samples(),
                        config.block_size()
                    )));
                }
                Ok(config.clone())
            }
        }
    }
}

impl Stage for HoppingGoertzelStage {
    fn initialize(&mut self, input: &SignalBank) -> Result<()> {
        if input.n_channels() != 1 {
            return Err(DftError::Config(format!(
                "expected a single channel per ear, got {}",
                input.n_channels()
            )));
        }

        let config = self.resolve(input)?;
        let frame_len = config.frame_len();
        if frame_len == 0 {
            return Err(DftError::Config("configuration selects no bins".into()));
        }

        let mut output = SignalBank::new(input.n_ears(), frame_len, 2, input.fs())?;
        output.set_frame_rate(config.frame_rate(input.fs()));
        output.set_centre_freqs(config.bin_frequencies(input.fs()))?;
        output.set_trig(false);

        self.engines = (0..input.n_ears())
            .map(|_| HoppingGoertzelDft::new(config.clone()))
            .collect::<Result<Vec<_>>>()?;
        self.output = Some(output);

        debug!(
            "HoppingGoertzelStage initialized: {} ears, {} bins, {:.2} frames/s",
            input.n_ears(),
            frame_len,
            config.frame_rate(input.fs())
        );
        Ok(())
    }

    fn process(&mut self, input: &SignalBank) -> Result<()> {
        let output = self
            .output
            .as_mut()
            .ok_or_else(|| DftError::Config("stage used before initialize".into()))?;

        if input.n_ears() != self.engines.len() || input.n_channels() != 1 {
            return Err(DftError::InvalidArgument(format!(
                "input has {} ears x {} channels, stage expects {} x 1",
                input.n_ears(),
                input.n_channels(),
                self.engines.len()
            )));
        }
        if let Some(engine) = self.engines.first() {
            if input.n_samples() != engine.config().block_size() {
                return Err(DftError::InvalidArgument(format!(
                    "input block has {} samples, expected {}",
                    input.n_samples(),
                    engine.config().block_size()
                )));
            }
        }

        if !input.trig() {
            output.set_trig(false);
            return Ok(());
        }

        let mut triggered = false;
        for (ear, engine) in self.engines.iter_mut().enumerate() {
            let signal = input.signal(ear, 0)?;
            let fresh = match signal.as_slice() {
                Some(block) => engine.process(block)?,
                None => engine.process(&signal.to_vec())?,
            };

            if fresh {
                for (bin, value) in engine.frame().iter().enumerate() {
                    *output.sample_mut(ear, bin, 0) = value.re;
                    *output.sample_mut(ear, bin, 1) = value.im;
                }
            }
            triggered |= fresh;
        }
        output.set_trig(triggered);

        Ok(())
    }

    fn reset(&mut self) {
        for engine in self.engines.iter_mut() {
            engine.reset();
        }
        if let Some(output) = self.output.as_mut() {
            output.zero_signals();
            output.set_trig(false);
        }
    }

    fn output(&self) -> Option<&SignalBank> {
        self.output.as_ref()
    }
}
