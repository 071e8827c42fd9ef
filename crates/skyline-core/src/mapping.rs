//! Clamped linear mapping from band energies to render attributes.

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The input is clamped first, so the result never leaves the output range.
/// A zero-width input range yields `out_min`, as does a NaN input.
/// Reversed ranges on either side are allowed.
#[inline]
pub fn map_linear(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_min == in_max {
        return out_min;
    }
    let t = (value - in_min) / (in_max - in_min);
    if t.is_nan() || t <= 0.0 {
        out_min
    } else if t >= 1.0 {
        out_max
    } else {
        out_min + t * (out_max - out_min)
    }
}

/// [`map_linear`] specialised to the 0..=255 spectrum scale.
#[inline]
pub fn map_energy(energy: f32, out_min: f32, out_max: f32) -> f32 {
    map_linear(energy, 0.0, crate::constants::SPECTRUM_MAX, out_min, out_max)
}
