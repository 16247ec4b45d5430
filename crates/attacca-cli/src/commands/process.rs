//! File-based transient processing command.

use anyhow::Context;
use attacca_config::Preset;
use attacca_io::{DEFAULT_BLOCK_SIZE, ProcessingEngine, WavSpec, read_wav, write_wav};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use super::common::{TracingObserver, apply_overrides, level_db, load_preset, peak, rms};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file, applied before any --param
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override, e.g. "attack_amount=40" or "release_time=80ms"
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Processing block size in frames
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32 float)
    #[arg(long, default_value = "32", value_parser = clap::builder::PossibleValuesParser::new(["16", "24", "32"]))]
    bit_depth: String,

    /// Log envelope diagnostics every MS milliseconds (visible with -v)
    #[arg(long, value_name = "MS")]
    report_interval_ms: Option<f64>,

    /// Save the final settings as a preset file
    #[arg(long, value_name = "FILE")]
    save_preset: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let bit_depth: u16 = args.bit_depth.parse()?;
    let (mut samples, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let channels = usize::from(spec.channels);
    let frames = samples.len() / channels.max(1);
    println!(
        "Read {}: {} ch, {} Hz, {:.2}s",
        args.input.display(),
        spec.channels,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let mut engine = ProcessingEngine::for_spec(spec).with_block_size(args.block_size);
    let designer = engine.designer_mut();
    if let Some(name) = &args.preset {
        let preset = load_preset(name)?;
        preset
            .apply_to(designer)
            .with_context(|| format!("Preset '{}' has invalid values", preset.name))?;
        println!("Preset: {}", preset.name);
    }
    apply_overrides(designer, &args.params)?;

    if let Some(ms) = args.report_interval_ms {
        let interval = (ms * f64::from(spec.sample_rate) / 1000.0).round().max(1.0) as u64;
        designer.set_report_interval(Some(interval));
    }
    if tracing::enabled!(tracing::Level::DEBUG) {
        designer.set_observer(Some(Box::new(TracingObserver)));
    }

    if let Some(path) = &args.save_preset {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Untitled");
        Preset::capture(name, &*designer)
            .save(path)
            .with_context(|| format!("Failed to save preset {}", path.display()))?;
        println!("Saved settings to {}", path.display());
    }

    let (in_peak, in_rms) = (peak(&samples), rms(&samples));

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(frames as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})")?
            .progress_chars("##-"),
    );
    engine.process_interleaved(&mut samples, |n| pb.inc(n as u64));
    pb.finish_and_clear();

    let (out_peak, out_rms) = (peak(&samples), rms(&samples));
    println!(
        "Input:  peak {:6.1} dBFS, RMS {:6.1} dBFS",
        level_db(in_peak),
        level_db(in_rms)
    );
    println!(
        "Output: peak {:6.1} dBFS, RMS {:6.1} dBFS",
        level_db(out_peak),
        level_db(out_rms)
    );
    tracing::info!(
        makeup_db = level_db(engine.designer().diagnostics().makeup_gain),
        "processing finished"
    );

    let out_spec = WavSpec {
        bits_per_sample: bit_depth,
        ..spec
    };
    write_wav(&args.output, &samples, out_spec)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
