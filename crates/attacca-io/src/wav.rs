//! WAV file reading and writing.
//!
//! Samples travel as frame-interleaved `f32` in the nominal `[-1, 1]` range,
//! whatever the file's channel count.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Sample encoding stored in a WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Signed integer PCM.
    Pcm,
    /// IEEE 754 float.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => Self::Pcm,
            SampleFormat::Float => Self::IeeeFloat,
        }
    }
}

/// Header summary of a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per stored sample.
    pub bits_per_sample: u16,
    /// Sample encoding.
    pub format: WavFormat,
    /// Frames, i.e. samples per channel.
    pub num_frames: u64,
    /// `num_frames / sample_rate`.
    pub duration_secs: f64,
}

/// Open `path` and summarize its header without decoding samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();
    let num_frames = u64::from(reader.duration());
    Ok(WavInfo {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
        format: header.sample_format.into(),
        num_frames,
        duration_secs: num_frames as f64 / f64::from(header.sample_rate),
    })
}

/// Layout of an interleaved buffer and the file it maps to.
///
/// On write the bit depth selects the encoding: 32 is IEEE float, 16 and 24
/// are integer PCM. Defaults to stereo 48 kHz float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Interleaved channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// 16, 24 or 32 when writing.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Bit depths [`write_wav`] accepts.
    pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

    /// Same layout at another bit depth.
    pub fn with_bit_depth(self, bits_per_sample: u16) -> Self {
        Self {
            bits_per_sample,
            ..self
        }
    }

    fn to_hound(self) -> Result<hound::WavSpec> {
        if self.channels == 0 {
            return Err(Error::UnsupportedFormat("zero channels".to_string()));
        }
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            bits => {
                return Err(Error::UnsupportedFormat(format!(
                    "{bits}-bit output (use 16, 24 or 32)"
                )));
            }
        };
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(header: hound::WavSpec) -> Self {
        Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
        }
    }
}

/// Full-scale magnitude of a signed integer sample.
fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits - 1)) as f32
}

/// Decode every sample of `path`, interleaved, with the file's layout.
///
/// Integer PCM is scaled so full scale maps to `[-1, 1)`. Float input must
/// be 32-bit.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let header = reader.spec();
    let samples: Vec<f32> = match (header.sample_format, header.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.into_samples::<f32>().collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Float, bits) => {
            return Err(Error::UnsupportedFormat(format!("{bits}-bit float input")));
        }
        (SampleFormat::Int, bits) => {
            let scale = int_scale(bits);
            reader
                .into_samples::<i32>()
                .map(|raw| raw.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };
    Ok((samples, header.into()))
}

/// Encode interleaved `samples` to `path` using `spec`.
///
/// Integer output saturates at full scale; float output is written
/// unchanged. A trailing partial frame is written as-is.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let hound_spec = spec.to_hound()?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    if hound_spec.sample_format == SampleFormat::Float {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let scale = int_scale(spec.bits_per_sample);
        for &sample in samples {
            writer.write_sample((sample * scale).clamp(-scale, scale - 1.0) as i32)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Split interleaved samples into one buffer per channel.
pub fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let channels = channels.max(1);
    let frames = samples.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (buffer, &sample) in planar.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    planar
}

/// Interleave per-channel buffers. Output length follows the shortest one.
pub fn interleave(planar: &[Vec<f32>]) -> Vec<f32> {
    let frames = planar.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * planar.len());
    for i in 0..frames {
        out.extend(planar.iter().map(|buffer| buffer[i]));
    }
    out
}
