// Host-side tests for band extraction over spectrum snapshots.

use rand::prelude::*;
use skyline_core::{band_average, band_index, extract_bands, BandLayout, SpectrumSnapshot};

fn split_snapshot() -> SpectrumSnapshot {
    let mut bins = vec![0u8; 100];
    bins[..30].fill(255);
    bins[70..].fill(255);
    SpectrumSnapshot::new(bins)
}

#[test]
fn split_spectrum_yields_loud_edges_and_quiet_middle() {
    let bands = extract_bands(&split_snapshot(), &BandLayout::default());
    assert!((bands.bass - 255.0).abs() < 1.0, "bass {}", bands.bass);
    assert!(bands.mid.abs() < 1.0, "mid {}", bands.mid);
    assert!((bands.treble - 255.0).abs() < 1.0, "treble {}", bands.treble);
}

#[test]
fn empty_snapshot_has_no_energy() {
    let bands = extract_bands(&SpectrumSnapshot::default(), &BandLayout::default());
    assert_eq!((bands.bass, bands.mid, bands.treble), (0.0, 0.0, 0.0));
}

#[test]
fn band_average_stays_within_snapshot_bounds() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for len in [1usize, 7, 64, 100, 512] {
        let bins: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let max = *bins.iter().max().unwrap_or(&0) as f32;
        for _ in 0..200 {
            let a: f64 = rng.gen();
            let b: f64 = rng.gen();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let avg = band_average(&bins, lo, hi);
            assert!(avg >= 0.0 && avg <= max, "avg {avg} outside [0, {max}]");
            if band_index(hi, len) <= band_index(lo, len) {
                assert_eq!(avg, 0.0, "degenerate range {lo}..{hi} over {len}");
            }
        }
    }
}

#[test]
fn band_average_matches_manual_mean() {
    let bins: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
    // floor(0.25 * 64) = 16, floor(0.5 * 64) = 32
    let expected = (16..32).map(|i| (i * 4) as f32).sum::<f32>() / 16.0;
    assert!((band_average(&bins, 0.25, 0.5) - expected).abs() < 1e-4);
}

#[test]
fn custom_layout_is_respected() {
    let layout = BandLayout {
        bass: 0.0..0.1,
        mid: 0.1..0.9,
        treble: 0.9..1.0,
    };
    let mut bins = vec![10u8; 10];
    bins[0] = 200;
    bins[9] = 100;
    let bands = extract_bands(&SpectrumSnapshot::new(bins), &layout);
    assert_eq!(bands.bass, 200.0);
    assert_eq!(bands.mid, 10.0);
    assert_eq!(bands.treble, 100.0);
}
