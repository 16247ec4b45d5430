//! Integration tests for attacca-config.
//!
//! Presets loaded from disk drive a real designer end to end.

use attacca_config::{ConfigError, ParamValue, Preset, factory_presets, parse_assignment, validate_param};
use attacca_core::ParameterInfo;
use attacca_effects::TransientDesigner;
use tempfile::TempDir;

fn drum_loop(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let since_hit = (i % 12_000) as f32 / 48_000.0;
            (i as f32 * 0.03).sin() * (-since_hit * 25.0).exp()
        })
        .collect()
}

#[test]
fn file_preset_changes_processing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("snappy.toml");
    std::fs::write(
        &path,
        r#"
name = "Snappy"

[params]
attack_amount = 80
sustain_amount = "-50%"
auto_gain_comp = "off"
"#,
    )
    .unwrap();

    let preset = Preset::load(&path).unwrap();
    let mut shaped = TransientDesigner::new(48000.0, 1);
    preset.apply_to(&mut shaped).unwrap();
    let mut plain = TransientDesigner::new(48000.0, 1);

    let input = drum_loop(48_000);
    let mut a = input.clone();
    let mut b = input.clone();
    shaped.process_block(&mut [&mut a[..]]);
    plain.process_block(&mut [&mut b[..]]);

    assert!(a.iter().all(|y| y.is_finite()));
    assert!(a.iter().zip(&b).any(|(x, y)| (x - y).abs() > 1e-3));
}

#[test]
fn every_factory_preset_processes_cleanly() {
    let input = drum_loop(24_000);
    for preset in factory_presets() {
        let mut designer = TransientDesigner::new(48000.0, 2);
        preset.apply_to(&mut designer).unwrap();
        let mut left = input.clone();
        let mut right = input.clone();
        designer.process_block(&mut [&mut left[..], &mut right[..]]);
        assert!(
            left.iter().chain(&right).all(|y| y.is_finite() && y.abs() <= 2.0),
            "{} produced out-of-range output",
            preset.name
        );
    }
}

#[test]
fn capture_save_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut designer = TransientDesigner::default();
    for (key, value) in [("attack_amount", 42.5), ("release_time", 333.0), ("clipper_type", 2.0)] {
        let index = designer.find_param(key).unwrap();
        designer.set_param(index, value);
    }

    let path = temp.path().join("captured.toml");
    Preset::capture("Captured", &designer).save(&path).unwrap();

    let mut restored = TransientDesigner::default();
    Preset::load(&path).unwrap().apply_to(&mut restored).unwrap();
    for i in 0..designer.param_count() {
        assert!((restored.get_param(i) - designer.get_param(i)).abs() < 1e-4, "param {i}");
    }
    assert_eq!(restored.params().clipper_type, designer.params().clipper_type);
}

#[test]
fn overrides_layer_on_top_of_preset() {
    let mut preset = Preset::find("punchy_drums").unwrap();
    for assignment in ["attack_amount=10", "mix = 50%"] {
        let (key, value) = parse_assignment(assignment).unwrap();
        preset.set_param(key, value);
    }
    let mut designer = TransientDesigner::default();
    preset.apply_to(&mut designer).unwrap();
    assert_eq!(designer.params().attack_amount, 10.0);
    assert_eq!(designer.params().mix, 0.5);
    assert!(designer.params().clipper_enabled);
}

#[test]
fn malformed_file_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "name = [unterminated").unwrap();
    assert!(matches!(Preset::load(&path), Err(ConfigError::TomlParse(_))));

    let missing = temp.path().join("missing.toml");
    let err = Preset::load(&missing).unwrap_err();
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn validation_reports_parameter_name() {
    let designer = TransientDesigner::default();
    let err = validate_param(&designer, "snap_amount", &ParamValue::Number(999.0)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("snap_amount") && msg.contains("999"), "{msg}");
}
