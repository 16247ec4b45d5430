//! Property-based tests for the transient designer.
//!
//! Uses proptest to check the pipeline-level invariants: bounded output under
//! adversarial settings, exact pass-through at zero mix, a silent attack path
//! at zero attack amount, and the impulse response shape.

use attacca_core::{Effect, ParameterInfo};
use attacca_effects::{GainComputer, TransientDesigner, TransientDesignerCore, TransientParams};
use proptest::prelude::*;

/// Map normalized values onto every parameter's range.
fn set_normalized(designer: &mut TransientDesigner, values: &[f32]) {
    for i in 0..designer.param_count() {
        if let Some(desc) = designer.param_info(i) {
            designer.set_param(i, desc.denormalize(values[i % values.len()]));
        }
    }
    designer.set_bypass(false);
    designer.set_output_gain_db(0.0);
}

/// Full-scale samples mixed with arbitrary finite values up to `±f32::MAX`.
fn any_finite_sample() -> impl Strategy<Value = f32> {
    use prop::num::f32::{NEGATIVE, NORMAL, POSITIVE, ZERO};
    prop_oneof![
        4 => -1.0f32..=1.0f32,
        2 => POSITIVE | NEGATIVE | NORMAL | ZERO,
        1 => Just(f32::MAX),
        1 => Just(-f32::MAX),
    ]
}

fn transient_params() -> impl Strategy<Value = TransientParams> {
    (
        -100.0f32..=100.0,
        -100.0f32..=100.0,
        0.0f32..=2.0,
        0.0f32..=2.0,
        0.0f32..=200.0,
        0.1f32..=10.0,
        0.0f32..=100.0,
        1.0f32..=5.0,
    )
        .prop_map(
            |(attack, sustain, cbw, tw, snap, hardness, harmonic, focus)| TransientParams {
                attack_amount: attack,
                sustain_amount: sustain,
                critical_band_weight: cbw,
                temporal_weight: tw,
                snap_amount: snap,
                snap_hardness: hardness,
                harmonic_enhancement: harmonic,
                focus,
                ..TransientParams::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any legal parameter set and any finite input the output stays
    /// finite and within ±2.
    #[test]
    fn output_bounded(
        values in prop::array::uniform32(0.0f32..=1.0f32),
        input in prop::collection::vec(any_finite_sample(), 1..512),
    ) {
        let mut designer = TransientDesigner::new(48000.0, 1);
        set_normalized(&mut designer, &values);
        for &x in &input {
            let y = designer.process(x);
            prop_assert!(y.is_finite() && y.abs() <= 2.0, "{} -> {}", x, y);
        }
    }

    /// Zero mix returns the input bit-for-bit whatever else is set, as long as
    /// the trims and final clipper stay neutral.
    #[test]
    fn mix_zero_is_identity(
        params in transient_params(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..512),
    ) {
        let mut core = TransientDesignerCore::new(44100.0, 1);
        let params = TransientParams { mix: 0.0, ..params };
        let mut buffer = input.clone();
        core.process_block(&mut [&mut buffer[..]], &params);
        prop_assert_eq!(buffer, input);
    }

    /// Beyond full scale, zero mix still tracks the input up to the output
    /// ceiling.
    #[test]
    fn mix_zero_follows_huge_input(
        params in transient_params(),
        input in prop::collection::vec(any_finite_sample(), 1..256),
    ) {
        let mut core = TransientDesignerCore::new(48000.0, 1);
        let params = TransientParams { mix: 0.0, ..params };
        let mut buffer = input.clone();
        core.process_block(&mut [&mut buffer[..]], &params);
        let expected: Vec<f32> = input.iter().map(|x| x.clamp(-2.0, 2.0)).collect();
        prop_assert_eq!(buffer, expected);
    }

    /// The attack path only matters through the attack amount: at zero, no
    /// combination of weighting or shaping changes the processed sample.
    #[test]
    fn zero_attack_amount_silences_attack_path(
        params in transient_params(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
    ) {
        let base = TransientParams {
            attack_amount: 0.0,
            sustain_amount: params.sustain_amount.max(0.0),
            auto_gain_comp: false,
            ..params
        };
        // the attack-only knobs move, the sustain path does not
        let varied = TransientParams {
            critical_band_weight: 2.0 - base.critical_band_weight,
            focus: 6.0 - base.focus,
            ..base
        };

        let mut a = TransientDesignerCore::new(48000.0, 1);
        let mut b = TransientDesignerCore::new(48000.0, 1);
        let mut ya = input.clone();
        let mut yb = input;
        a.process_block(&mut [&mut ya[..]], &base);
        b.process_block(&mut [&mut yb[..]], &varied);
        prop_assert_eq!(ya, yb);
    }

    /// Stage gains always land inside their clamp ranges.
    #[test]
    fn gains_clamped(params in transient_params(), t in 0.0f32..=4.0f32) {
        let gains = GainComputer::from_params(&params).compute(t);
        prop_assert!((0.1..=5.0).contains(&gains.attack), "attack {}", gains.attack);
        prop_assert!((0.1..=3.0).contains(&gains.sustain), "sustain {}", gains.sustain);
    }
}

#[test]
fn impulse_boosted_and_decays() {
    let sr = 44100.0;
    let mut designer = TransientDesigner::new(sr, 1);
    designer.set_param(designer.find_param("attack_amount").unwrap(), 50.0);
    designer.set_param(designer.find_param("auto_gain_comp").unwrap(), 0.0);

    let len = (0.2 * sr) as usize;
    let mut buffer = vec![0.0f32; len];
    buffer[0] = 1.0;
    designer.process_block(&mut [&mut buffer[..]]);

    assert!(buffer[0] > 1.0, "impulse not boosted: {}", buffer[0]);
    let after_100ms = (0.1 * sr) as usize;
    assert!(
        buffer[after_100ms..].iter().all(|&y| y == 0.0),
        "tail not silent after 100 ms"
    );
}

#[test]
fn defaults_mix_zero_bit_identical() {
    let mut designer = TransientDesigner::new(48000.0, 2);
    designer.set_param(designer.find_param("mix").unwrap(), 0.0);

    let left: Vec<f32> = (0..4096)
        .map(|i| libm::sinf(i as f32 * 0.01) * if i % 1024 < 32 { 1.0 } else { 0.1 })
        .collect();
    let right: Vec<f32> = left.iter().map(|x| x * -0.5).collect();
    let (mut l, mut r) = (left.clone(), right.clone());
    designer.process_block(&mut [&mut l[..], &mut r[..]]);
    assert_eq!(l, left);
    assert_eq!(r, right);
}
