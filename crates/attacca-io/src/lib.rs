//! WAV input/output and offline rendering for attacca.
//!
//! [`read_wav`] and [`write_wav`] move frame-interleaved `f32` audio in and
//! out of WAV files of any channel count; [`read_wav_info`] reads only the
//! header. [`ProcessingEngine`] pushes a whole file through a
//! [`TransientDesigner`](attacca_effects::TransientDesigner) block by block.
//!
//! ```rust,ignore
//! use attacca_io::{ProcessingEngine, read_wav, write_wav};
//!
//! let (mut samples, spec) = read_wav("drums.wav")?;
//! ProcessingEngine::for_spec(spec).process_interleaved(&mut samples, |_| {});
//! write_wav("drums_shaped.wav", &samples, spec)?;
//! ```

mod engine;
mod wav;

pub use engine::{DEFAULT_BLOCK_SIZE, ProcessingEngine};
pub use wav::{
    WavFormat, WavInfo, WavSpec, deinterleave, interleave, read_wav, read_wav_info, write_wav,
};

/// Failure while reading, writing or rendering a file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decoding or encoding failed inside hound.
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),

    /// Channel count or bit depth that cannot be written.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Filesystem failure outside hound.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
