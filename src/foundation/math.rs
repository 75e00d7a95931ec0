/// Clamp `v` into `[0, hi]`.
///
/// NaN maps to `0`, `+inf` to `hi`, `-inf` to `0`.
pub(crate) fn clamp_axis(v: f64, hi: f64) -> f64 {
    // f64::max/min return the non-NaN operand.
    v.max(0.0).min(hi)
}

/// Truncate an already clamped coordinate to a pixel index.
pub(crate) fn truncate_axis(v: f64) -> u32 {
    v as u32
}

/// SplitMix64 finalizer, used to derive independent per-frame seeds from one run seed.
pub(crate) fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
