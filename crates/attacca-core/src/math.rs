//! Small DSP math helpers shared across the pipeline.
//!
//! All functions are allocation-free and `no_std`.

use libm::{expf, log10f};

/// Amplitude ratio for a level in dB.
///
/// ```rust
/// use attacca_core::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(6.0206) - 2.0).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const LN10_OVER_20: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * LN10_OVER_20)
}

/// Level in dB of an amplitude ratio, floored at -200 dB.
///
/// ```rust
/// use attacca_core::linear_to_db;
///
/// assert!((linear_to_db(1.0)).abs() < 0.001);
/// assert!((linear_to_db(0.5) + 6.02).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * log10f(linear.max(1e-10))
}

/// Flush values below `1e-20` in magnitude to exactly zero.
///
/// Recursive state passed through this settles at exactly `0.0` instead of
/// decaying through subnormals.
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Linear crossfade `dry * (1 - mix) + wet * mix`.
///
/// `mix = 0` returns `dry` exactly and `mix = 1` returns `wet` exactly.
#[inline]
pub fn crossfade(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Sign-preserving fifth power.
#[inline]
pub fn pow5(x: f32) -> f32 {
    let sq = x * x;
    sq * sq * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_round_trip() {
        for db in [-24.0, -6.0, 0.0, 6.0, 24.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 1e-3, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!((linear_to_db(0.0) + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1e-25), 0.0);
        assert_eq!(flush_denormal(-1e-25), 0.0);
        assert_eq!(flush_denormal(1e-10), 1e-10);
    }

    #[test]
    fn test_crossfade_endpoints_exact() {
        let dry = 0.123_456_7;
        let wet = -0.765_432_1;
        assert_eq!(crossfade(dry, wet, 0.0), dry);
        assert_eq!(crossfade(dry, wet, 1.0), wet);
        assert!((crossfade(1.0, 0.0, 0.25) - 0.75).abs() < 1e-7);
    }

    #[test]
    fn test_pow5_odd_symmetry() {
        assert_eq!(pow5(2.0), 32.0);
        assert_eq!(pow5(-2.0), -32.0);
        assert_eq!(pow5(-0.5), -pow5(0.5));
    }
}
