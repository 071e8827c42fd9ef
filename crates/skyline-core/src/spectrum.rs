//! Windowed FFT spectrum analysis with per-bin temporal smoothing.
//!
//! Output follows the byte frequency data convention of browser analysers:
//! magnitudes are smoothed, converted to decibels and mapped from
//! `[min_db, max_db]` onto `0..=255`.

use rustfft::{num_complex::Complex32, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::constants::{
    DEFAULT_BINS, DEFAULT_MAX_DB, DEFAULT_MIN_DB, DEFAULT_SMOOTHING, SPECTRUM_MAX,
};
use crate::error::VisualizerError;
use crate::playback::TrackId;

/// Anything that can hand out its most recent time-domain samples.
pub trait SignalSource {
    /// Fill `out` with the latest samples in `[-1, 1]`.
    ///
    /// Returns `false` when there is no signal to read (not connected, not
    /// loaded); `out` is then left untouched.
    fn fill_time_domain(&self, out: &mut [f32]) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzerConfig {
    /// Number of frequency bins per snapshot. The FFT runs over twice as many samples.
    pub bins: usize,
    /// 0 disables temporal blending, values close to 1 nearly freeze the output.
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            smoothing: DEFAULT_SMOOTHING,
            min_db: DEFAULT_MIN_DB,
            max_db: DEFAULT_MAX_DB,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), VisualizerError> {
        if self.bins == 0 {
            return Err(VisualizerError::invalid_range("analyzer bins must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.smoothing) {
            return Err(VisualizerError::invalid_range(format!(
                "smoothing {} outside [0, 1]",
                self.smoothing
            )));
        }
        if self.min_db >= self.max_db {
            return Err(VisualizerError::invalid_range(format!(
                "min_db {} must be below max_db {}",
                self.min_db, self.max_db
            )));
        }
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        self.bins = self.bins.max(1);
        self.smoothing = if self.smoothing.is_nan() {
            DEFAULT_SMOOTHING
        } else {
            self.smoothing.clamp(0.0, 1.0)
        };
        if !(self.min_db < self.max_db) {
            self.min_db = DEFAULT_MIN_DB;
            self.max_db = DEFAULT_MAX_DB;
        }
        self
    }

    #[inline]
    pub fn fft_size(&self) -> usize {
        self.bins * 2
    }
}

/// One frame of frequency magnitudes on the 0..=255 scale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpectrumSnapshot {
    bins: Vec<u8>,
}

impl SpectrumSnapshot {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn silent(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    #[inline]
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.bins.get(index).map(|&v| v as f32)
    }

    pub fn max(&self) -> u8 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

/// Synthetic spectrum used to keep the scene moving before any audio plays.
///
/// Deterministic in `(len, time_sec)` and always within `0..=192`.
pub fn idle_waveform(len: usize, time_sec: f32) -> SpectrumSnapshot {
    let bins = (0..len)
        .map(|k| {
            let k = k as f32;
            let v = 96.0
                + 64.0 * (time_sec * 1.7 + k * 0.45).sin()
                + 32.0 * (time_sec * 0.6 - k * 0.2).sin();
            v.clamp(0.0, SPECTRUM_MAX) as u8
        })
        .collect();
    SpectrumSnapshot { bins }
}

pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    input: Option<TrackId>,

    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    samples: Vec<f32>,
    fft_buf: Vec<Complex32>,
    smoothed: Vec<f32>,

    snapshot: SpectrumSnapshot,
    analyzed_frame: Option<u64>,
    analysis_count: u64,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let config = config.sanitized();
        let size = config.fft_size();
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(size);
        let window = (0..size).map(|i| hann_window(i, size)).collect();
        Self {
            input: None,
            fft,
            window,
            samples: vec![0.0; size],
            fft_buf: vec![Complex32::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.bins],
            snapshot: SpectrumSnapshot::silent(config.bins),
            analyzed_frame: None,
            analysis_count: 0,
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.config.bins
    }

    /// Track whose signal is currently routed into the analyzer.
    #[inline]
    pub fn input(&self) -> Option<TrackId> {
        self.input
    }

    /// Route `track` into the analyzer. Smoothing state and the frame cache
    /// start over, so the next `analyze` reads only the new input.
    pub fn connect(&mut self, track: TrackId) {
        self.input = Some(track);
        self.reroute();
    }

    pub fn disconnect(&mut self) {
        self.input = None;
        self.reroute();
    }

    /// How many times a fresh transform was computed.
    pub fn analysis_count(&self) -> u64 {
        self.analysis_count
    }

    /// Most recent snapshot without recomputing.
    pub fn last(&self) -> &SpectrumSnapshot {
        &self.snapshot
    }

    /// Analyze the connected signal for `frame`.
    ///
    /// A second call with the same `frame` returns the cached snapshot. With no
    /// source, or a source that has nothing to read, the snapshot is all zero.
    pub fn analyze<S>(&mut self, source: Option<&S>, frame: u64) -> &SpectrumSnapshot
    where
        S: SignalSource + ?Sized,
    {
        if self.analyzed_frame == Some(frame) {
            return &self.snapshot;
        }
        self.analyzed_frame = Some(frame);
        self.analysis_count += 1;

        let has_signal = self.input.is_some()
            && source.is_some_and(|s| s.fill_time_domain(&mut self.samples));
        if !has_signal {
            self.reset();
            return &self.snapshot;
        }

        for ((out, &x), &w) in self.fft_buf.iter_mut().zip(&self.samples).zip(&self.window) {
            *out = Complex32::new(x * w, 0.0);
        }
        self.fft.process(&mut self.fft_buf);

        let size = self.config.fft_size() as f32;
        let s = self.config.smoothing;
        let range = self.config.max_db - self.config.min_db;
        let scale = SPECTRUM_MAX / range;
        let min_db = self.config.min_db;
        let bins = self.snapshot.bins.iter_mut();
        for ((c, smooth), out) in self.fft_buf.iter().zip(&mut self.smoothed).zip(bins) {
            let magnitude = c.norm() / size;
            let blended = s * *smooth + (1.0 - s) * magnitude;
            *smooth = if blended.is_finite() { blended } else { 0.0 };
            *out = if *smooth > 0.0 {
                let db = 20.0 * smooth.log10();
                (scale * (db - min_db)).clamp(0.0, SPECTRUM_MAX) as u8
            } else {
                0
            };
        }
        &self.snapshot
    }

    fn reroute(&mut self) {
        self.analyzed_frame = None;
        self.reset();
    }

    fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.snapshot.bins.fill(0);
    }
}

/// Periodic Hann window; zero at index 0 and 1 at `size / 2`.
#[inline]
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / size as f32).cos())
}
