// Host-side tests for the clamped linear mapper.

use skyline_core::{map_energy, map_linear};

const RANGES: &[(f32, f32, f32, f32)] = &[
    (0.0, 255.0, 0.0, 5.0),
    (0.0, 255.0, 100.0, 255.0),
    (0.1, 0.7, 0.3, 0.9),
    (-3.0, 12.5, 40.0, -8.0),
    (10.0, 2.0, 0.0, 1.0),
];

#[test]
fn endpoints_map_exactly() {
    for &(a, b, c, d) in RANGES {
        assert_eq!(map_linear(a, a, b, c, d), c, "start of {a}..{b}");
        assert_eq!(map_linear(b, a, b, c, d), d, "end of {a}..{b}");
    }
}

#[test]
fn out_of_range_inputs_equal_their_clamped_value() {
    for &(a, b, c, d) in RANGES {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        for v in [lo - 1000.0, lo - 0.5, hi + 0.5, hi + 1e6, f32::INFINITY, f32::NEG_INFINITY] {
            let clamped = v.clamp(lo, hi);
            assert_eq!(
                map_linear(v, a, b, c, d),
                map_linear(clamped, a, b, c, d),
                "v={v} range {a}..{b}"
            );
        }
    }
}

#[test]
fn output_never_leaves_output_range() {
    for &(a, b, c, d) in RANGES {
        let (lo, hi) = if c < d { (c, d) } else { (d, c) };
        for i in -20..=40 {
            let v = a + (b - a) * (i as f32 / 20.0);
            let out = map_linear(v, a, b, c, d);
            assert!(out >= lo - 1e-4 && out <= hi + 1e-4, "{out} outside {lo}..{hi}");
        }
    }
}

#[test]
fn zero_width_input_returns_out_min() {
    for x in [-5.0, 0.0, 3.0, 3.0001, 1e9, f32::NAN] {
        assert_eq!(map_linear(x, 3.0, 3.0, 7.0, 9.0), 7.0);
    }
}

#[test]
fn interpolates_linearly_inside_range() {
    assert!((map_linear(127.5, 0.0, 255.0, 0.0, 10.0) - 5.0).abs() < 1e-5);
    assert!((map_linear(0.25, 0.0, 1.0, 10.0, 0.0) - 7.5).abs() < 1e-5);
    assert!((map_energy(51.0, 100.0, 255.0) - 131.0).abs() < 1e-3);
}

#[test]
fn nan_input_maps_to_out_min() {
    assert_eq!(map_linear(f32::NAN, 0.0, 1.0, 2.0, 4.0), 2.0);
}

#[test]
fn mapping_is_bit_reproducible() {
    for i in 0..100 {
        let v = i as f32 * 2.71;
        let a = map_linear(v, 0.0, 255.0, 0.3, 17.9);
        let b = map_linear(v, 0.0, 255.0, 0.3, 17.9);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
