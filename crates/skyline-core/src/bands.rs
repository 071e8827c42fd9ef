//! Reduction of a spectrum snapshot into bass / mid / treble energies.
//!
//! Bands are contiguous linear fractions of the spectrum length. Index bounds
//! are `floor(fraction * len)`, clamped to the snapshot.

use std::ops::Range;

use crate::error::VisualizerError;
use crate::spectrum::SpectrumSnapshot;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergy {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

/// Fractions of the spectrum covered by each band, as `start..end` in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BandLayout {
    pub bass: Range<f64>,
    pub mid: Range<f64>,
    pub treble: Range<f64>,
}

impl Default for BandLayout {
    fn default() -> Self {
        Self {
            bass: 0.0..0.3,
            mid: 0.3..0.7,
            treble: 0.7..1.0,
        }
    }
}

impl BandLayout {
    pub fn validate(&self) -> Result<(), VisualizerError> {
        for (name, r) in [("bass", &self.bass), ("mid", &self.mid), ("treble", &self.treble)] {
            let inside = |f: f64| (0.0..=1.0).contains(&f);
            if !inside(r.start) || !inside(r.end) || r.start > r.end {
                return Err(VisualizerError::invalid_range(format!(
                    "{name} band {}..{} is not an ordered range within [0, 1]",
                    r.start, r.end
                )));
            }
        }
        Ok(())
    }
}

/// Bin index for a spectrum fraction, clamped to `[0, len]`.
#[inline]
pub fn band_index(fraction: f64, len: usize) -> usize {
    let idx = (fraction * len as f64).floor();
    if idx.is_nan() || idx <= 0.0 {
        0
    } else {
        (idx as usize).min(len)
    }
}

/// Mean of `bins[floor(lo * len)..floor(hi * len)]`, or 0 for an empty range.
pub fn band_average(bins: &[u8], lo: f64, hi: f64) -> f32 {
    let start = band_index(lo, bins.len());
    let end = band_index(hi, bins.len());
    if end <= start {
        return 0.0;
    }
    let sum: u32 = bins[start..end].iter().map(|&v| v as u32).sum();
    sum as f32 / (end - start) as f32
}

pub fn extract_bands(snapshot: &SpectrumSnapshot, layout: &BandLayout) -> BandEnergy {
    let bins = snapshot.bins();
    BandEnergy {
        bass: band_average(bins, layout.bass.start, layout.bass.end),
        mid: band_average(bins, layout.mid.start, layout.mid.end),
        treble: band_average(bins, layout.treble.start, layout.treble.end),
    }
}
