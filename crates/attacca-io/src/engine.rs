//! Offline block processing of whole files.

use attacca_effects::TransientDesigner;

use crate::WavSpec;

/// Default block length in frames.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Runs a [`TransientDesigner`] over interleaved audio in fixed-size blocks.
///
/// Auto gain compensation is shared by all channels and runs channel-major
/// within a block, so with it enabled the block size shifts its trajectory
/// slightly. Everything else is independent of block boundaries.
pub struct ProcessingEngine {
    designer: TransientDesigner,
    channels: usize,
    block_size: usize,
}

impl ProcessingEngine {
    /// Wrap a prepared designer. The channel count is taken from it.
    pub fn new(designer: TransientDesigner) -> Self {
        let channels = designer.core().num_channels().max(1);
        Self {
            designer,
            channels,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Engine with a default designer prepared for `spec`.
    pub fn for_spec(spec: WavSpec) -> Self {
        Self::new(TransientDesigner::new(
            spec.sample_rate as f32,
            usize::from(spec.channels),
        ))
    }

    /// Set the block length in frames (at least 1).
    pub fn with_block_size(mut self, frames: usize) -> Self {
        self.block_size = frames.max(1);
        self
    }

    /// Block length in frames.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Interleaved channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// The wrapped designer.
    pub fn designer(&self) -> &TransientDesigner {
        &self.designer
    }

    /// Mutable access to the wrapped designer.
    pub fn designer_mut(&mut self) -> &mut TransientDesigner {
        &mut self.designer
    }

    /// Unwrap the designer.
    pub fn into_designer(self) -> TransientDesigner {
        self.designer
    }

    /// Process interleaved samples in place.
    ///
    /// `progress` is called after each block with the number of frames in
    /// that block. A trailing partial frame is left untouched.
    pub fn process_interleaved(&mut self, samples: &mut [f32], mut progress: impl FnMut(usize)) {
        let whole = samples.len() - samples.len() % self.channels;
        for block in samples[..whole].chunks_mut(self.block_size * self.channels) {
            self.designer.process_interleaved(block);
            progress(block.len() / self.channels);
        }
    }

    /// Process a whole file's worth of interleaved samples into a new buffer.
    pub fn process_file(&mut self, input: &[f32]) -> Vec<f32> {
        let mut output = input.to_vec();
        self.process_interleaved(&mut output, |_| {});
        output
    }
}

impl Default for ProcessingEngine {
    fn default() -> Self {
        Self::new(TransientDesigner::default())
    }
}
