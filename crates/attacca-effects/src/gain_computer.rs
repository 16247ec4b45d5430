//! Attack/sustain gain computer.
//!
//! Turns the knob settings plus the per-sample transient strength `t` into
//! the two stage gains that scale the attack and sustain components.
//!
//! ```text
//! raw gains → psychoacoustic weighting → SNAP → harmonic → focus → clamp
//! ```
//!
//! Everything that does not depend on `t` is folded once per block in
//! [`GainComputer::from_params`]; [`GainComputer::compute`] is the per-sample
//! part.

use attacca_core::snap_curve;

use crate::params::TransientParams;

/// Attack gain range after shaping.
pub const ATTACK_GAIN_RANGE: (f32, f32) = (0.1, 5.0);
/// Sustain gain range after shaping.
pub const SUSTAIN_GAIN_RANGE: (f32, f32) = (0.1, 3.0);

const AMOUNT_SCALE: f32 = 3.0;
const ATTACK_SNAP_CAP: f32 = 2.0;
const SUSTAIN_SNAP_CAP: f32 = 1.3;

/// Gains for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageGains {
    /// Attack-path gain, in [`ATTACK_GAIN_RANGE`].
    pub attack: f32,
    /// Sustain-path gain, in [`SUSTAIN_GAIN_RANGE`].
    pub sustain: f32,
}

impl StageGains {
    /// Both gains at unity.
    pub const UNITY: Self = Self {
        attack: 1.0,
        sustain: 1.0,
    };
}

/// Boost/cut law shared by both paths: `1 + k` for a boost, `1/(1 + k)` for a
/// cut, where `k = |amount|/100 * 3 * scale`.
#[inline]
fn amount_gain(amount: f32, scale: f32) -> f32 {
    let k = amount.abs() / 100.0 * AMOUNT_SCALE * scale;
    if amount > 0.0 {
        1.0 + k
    } else if amount < 0.0 {
        1.0 / (1.0 + k)
    } else {
        1.0
    }
}

/// Block-constant gain computer.
#[derive(Debug, Clone, Copy)]
pub struct GainComputer {
    attack_amount: f32,
    sustain_base: f32,
    critical_band_weight: f32,
    temporal_weight: f32,
    snap_amount: f32,
    snap_hardness: f32,
    sustain_snap: f32,
    harmonic: f32,
    focus: f32,
}

impl GainComputer {
    /// Fold the `t`-independent terms of `params`.
    pub fn from_params(params: &TransientParams) -> Self {
        let sustain_snap = if params.snap_amount > 0.0 {
            snap_curve(params.snap_amount / 300.0, params.snap_hardness).min(SUSTAIN_SNAP_CAP)
        } else {
            1.0
        };
        Self {
            attack_amount: params.attack_amount,
            sustain_base: amount_gain(params.sustain_amount, 1.0),
            critical_band_weight: params.critical_band_weight,
            temporal_weight: params.temporal_weight,
            snap_amount: params.snap_amount,
            snap_hardness: params.snap_hardness,
            sustain_snap,
            harmonic: params.harmonic_enhancement,
            focus: params.focus,
        }
    }

    /// Stage gains for transient strength `t`.
    #[inline]
    pub fn compute(&self, t: f32) -> StageGains {
        let mut attack = amount_gain(self.attack_amount, t);
        let mut sustain = self.sustain_base;

        attack *= 1.0 + (self.critical_band_weight - 1.0) * t;
        sustain *= 1.0 + (self.temporal_weight - 1.0) * (1.0 - t);

        if self.snap_amount > 0.0 {
            let drive = self.snap_amount / 100.0 * (0.2 + (5.0 * t).min(1.0) * 0.5);
            attack *= snap_curve(drive, self.snap_hardness).min(ATTACK_SNAP_CAP);
            sustain *= self.sustain_snap;
        }

        if self.harmonic > 0.0 {
            attack += attack * attack * 0.3 * self.harmonic * 0.06 * (0.1 + 0.9 * t);
            sustain += sustain * sustain * 0.15 * self.harmonic * 0.03;
        }

        if self.focus > 1.0 {
            attack *= self.focus;
        }

        StageGains {
            attack: attack.clamp(ATTACK_GAIN_RANGE.0, ATTACK_GAIN_RANGE.1),
            sustain: sustain.clamp(SUSTAIN_GAIN_RANGE.0, SUSTAIN_GAIN_RANGE.1),
        }
    }
}

impl Default for GainComputer {
    fn default() -> Self {
        Self::from_params(&TransientParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer(f: impl FnOnce(&mut TransientParams)) -> GainComputer {
        let mut params = TransientParams::default();
        f(&mut params);
        GainComputer::from_params(&params)
    }

    #[test]
    fn test_defaults_are_unity() {
        let gc = GainComputer::default();
        for t in [0.0, 0.2, 0.7, 1.0] {
            assert_eq!(gc.compute(t), StageGains::UNITY);
        }
    }

    #[test]
    fn test_attack_boost_scales_with_strength() {
        let gc = computer(|p| p.attack_amount = 50.0);
        assert_eq!(gc.compute(0.0).attack, 1.0);
        assert!((gc.compute(0.5).attack - 1.75).abs() < 1e-6);
        assert!((gc.compute(1.0).attack - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_attack_cut_is_reciprocal() {
        let gc = computer(|p| p.attack_amount = -100.0);
        assert!((gc.compute(1.0).attack - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_sustain_independent_of_strength() {
        let gc = computer(|p| p.sustain_amount = 50.0);
        assert!((gc.compute(0.0).sustain - 2.5).abs() < 1e-6);
        assert!((gc.compute(0.9).sustain - 2.5).abs() < 1e-6);

        let gc = computer(|p| p.sustain_amount = -50.0);
        assert!((gc.compute(0.3).sustain - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_weighting() {
        let gc = computer(|p| {
            p.critical_band_weight = 2.0;
            p.temporal_weight = 0.0;
        });
        let g = gc.compute(0.5);
        assert!((g.attack - 1.5).abs() < 1e-6);
        assert!((g.sustain - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_snap_boosts_attack_more_than_sustain() {
        let gc = computer(|p| p.snap_amount = 200.0);
        let g = gc.compute(1.0);
        assert!(g.attack > g.sustain);
        assert!(g.attack <= ATTACK_SNAP_CAP);
        assert!(g.sustain <= SUSTAIN_SNAP_CAP);
        assert!(g.sustain > 1.0);
    }

    #[test]
    fn test_harmonic_applies_without_amounts() {
        let gc = computer(|p| p.harmonic_enhancement = 100.0);
        let g = gc.compute(1.0);
        assert!((g.attack - 2.8).abs() < 1e-5, "attack {}", g.attack);
        assert!((g.sustain - 1.45).abs() < 1e-5, "sustain {}", g.sustain);
    }

    #[test]
    fn test_focus_only_above_one() {
        let gc = computer(|p| p.focus = 3.0);
        assert!((gc.compute(0.0).attack - 3.0).abs() < 1e-6);
        assert_eq!(gc.compute(0.0).sustain, 1.0);
    }

    #[test]
    fn test_clamps_after_shaping() {
        let gc = computer(|p| {
            p.attack_amount = 100.0;
            p.sustain_amount = 100.0;
            p.focus = 5.0;
            p.harmonic_enhancement = 100.0;
        });
        let g = gc.compute(1.0);
        assert_eq!(g.attack, 5.0);
        assert_eq!(g.sustain, 3.0);

        let gc = computer(|p| {
            p.attack_amount = -100.0;
            p.sustain_amount = -100.0;
            p.critical_band_weight = 0.0;
            p.temporal_weight = 0.0;
        });
        let g = gc.compute(1.0);
        assert_eq!(g.attack, 0.1);
        assert!((g.sustain - 0.25).abs() < 1e-6);
        assert_eq!(gc.compute(0.0).sustain, 0.1);
    }
}
