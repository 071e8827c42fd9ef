// Host-side tests for the FFT spectrum analyzer.

mod common;

use common::ScriptedTrack;
use skyline_core::{AnalyzerConfig, SilentTrack, SpectrumAnalyzer};

fn analyzer(smoothing: f32) -> SpectrumAnalyzer {
    SpectrumAnalyzer::new(AnalyzerConfig {
        smoothing,
        ..AnalyzerConfig::default()
    })
}

#[test]
fn no_source_yields_silent_snapshot_of_fixed_length() {
    let mut a = analyzer(0.8);
    a.connect(0);
    let snap = a.analyze(None::<&SilentTrack>, 1);
    assert_eq!(snap.len(), 64);
    assert!(snap.bins().iter().all(|&v| v == 0));
}

#[test]
fn unconnected_analyzer_ignores_the_source() {
    let (track, probe) = ScriptedTrack::ready(Some(8));
    probe.borrow_mut().connected = true;
    let mut a = analyzer(0.0);
    let snap = a.analyze(Some(&track), 1);
    assert_eq!(snap.max(), 0);
    assert_eq!(probe.borrow().reads, 0);
}

#[test]
fn tone_shows_up_at_its_bin() {
    let (track, probe) = ScriptedTrack::ready(Some(8));
    probe.borrow_mut().connected = true;
    let mut a = analyzer(0.0);
    a.connect(0);
    let snap = a.analyze(Some(&track), 1);
    assert_eq!(snap.len(), 64);
    assert_eq!(snap.bins()[8], 255);
    assert!(snap.bins()[30] < 64, "far bin {}", snap.bins()[30]);
    assert!(snap.bins()[0] < 64, "dc bin {}", snap.bins()[0]);
}

#[test]
fn repeated_calls_within_a_frame_reuse_the_snapshot() {
    let (track, probe) = ScriptedTrack::ready(Some(4));
    probe.borrow_mut().connected = true;
    let mut a = analyzer(0.8);
    a.connect(0);
    let first = a.analyze(Some(&track), 7).clone();
    let second = a.analyze(Some(&track), 7).clone();
    assert_eq!(first, second);
    assert_eq!(a.analysis_count(), 1);
    assert_eq!(probe.borrow().reads, 1);

    a.analyze(Some(&track), 8);
    assert_eq!(a.analysis_count(), 2);
    assert_eq!(probe.borrow().reads, 2);
}

#[test]
fn smoothing_holds_energy_after_the_signal_stops() {
    let run = |smoothing: f32| {
        let (track, probe) = ScriptedTrack::ready(Some(12));
        probe.borrow_mut().connected = true;
        let mut a = analyzer(smoothing);
        a.connect(0);
        for frame in 0..10 {
            a.analyze(Some(&track), frame);
        }
        probe.borrow_mut().tone_bin = None;
        a.analyze(Some(&track), 10).bins()[12]
    };
    assert_eq!(run(0.0), 0);
    assert!(run(0.9) > 0);
}

#[test]
fn disconnect_resets_to_silence() {
    let (track, probe) = ScriptedTrack::ready(Some(8));
    probe.borrow_mut().connected = true;
    let mut a = analyzer(0.8);
    a.connect(0);
    assert!(a.analyze(Some(&track), 1).max() > 0);
    a.disconnect();
    assert_eq!(a.input(), None);
    assert_eq!(a.analyze(Some(&track), 2).max(), 0);
    assert_eq!(a.last().len(), 64);
}

#[test]
fn default_config_values() {
    let cfg = AnalyzerConfig::default();
    assert_eq!(cfg.bins, 64);
    assert_eq!(cfg.fft_size(), 128);
    assert!((cfg.smoothing - 0.8).abs() < f32::EPSILON);
    assert!(cfg.validate().is_ok());
}

#[test]
fn reconnecting_drops_the_cached_frame() {
    let (first, p1) = ScriptedTrack::ready(Some(4));
    let (second, p2) = ScriptedTrack::ready(Some(20));
    p1.borrow_mut().connected = true;
    p2.borrow_mut().connected = true;
    let mut a = analyzer(0.8);
    a.connect(0);
    assert_eq!(a.analyze(Some(&first), 1).bins()[4], 255);

    a.connect(1);
    let snap = a.analyze(Some(&second), 1);
    assert_eq!(snap.bins()[20], 255);
    assert_eq!(snap.bins()[4], 0);
    assert_eq!(p2.borrow().reads, 1);
    assert_eq!(a.analysis_count(), 2);
}

#[test]
fn silent_frames_are_still_cached() {
    let mut a = analyzer(0.8);
    a.connect(0);
    a.analyze(None::<&SilentTrack>, 3);
    a.analyze(None::<&SilentTrack>, 3);
    assert_eq!(a.analysis_count(), 1);
}
