//! WAV metadata and level summary.

use anyhow::Context;
use attacca_io::{WavFormat, deinterleave, read_wav, read_wav_info};
use clap::Args;
use std::path::PathBuf;

use super::common::{level_db, peak, rms};

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect
    pub file: PathBuf,

    /// Also decode the file and print per-channel peak and RMS
    #[arg(long)]
    pub levels: bool,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let encoding = match info.format {
        WavFormat::Pcm => "integer PCM",
        WavFormat::IeeeFloat => "float",
    };

    println!("{}", args.file.display());
    println!(
        "  {} ch, {} Hz, {}-bit {}",
        info.channels, info.sample_rate, info.bits_per_sample, encoding
    );
    println!("  {} frames, {:.3} s", info.num_frames, info.duration_secs);

    if args.levels {
        let (samples, spec) = read_wav(&args.file)
            .with_context(|| format!("Failed to decode {}", args.file.display()))?;
        for (ch, channel) in deinterleave(&samples, usize::from(spec.channels))
            .iter()
            .enumerate()
        {
            println!(
                "  ch{ch}: peak {:.1} dBFS, RMS {:.1} dBFS",
                level_db(peak(channel)),
                level_db(rms(channel))
            );
        }
    }

    Ok(())
}
