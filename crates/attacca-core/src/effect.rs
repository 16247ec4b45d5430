//! The mono [`Effect`] trait.
//!
//! One `f32` in, one `f32` out. Multichannel processors such as the
//! transient designer keep their own planar and interleaved entry points
//! and implement this trait by running channel 0. The trait is object safe
//! and none of its methods allocate.

/// Sample-at-a-time audio processor.
///
/// ```rust
/// use attacca_core::Effect;
///
/// struct Trim {
///     gain: f32,
/// }
///
/// impl Effect for Trim {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut trim = Trim { gain: 0.5 };
/// assert_eq!(trim.process(1.0), 0.5);
/// ```
pub trait Effect {
    /// Process a single sample, advancing any internal state by one step.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples from `input` into `output`.
    ///
    /// Both slices must have the same length; only the common prefix is
    /// processed otherwise.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "process_block needs equal-length buffers"
        );
        for (&x, y) in input.iter().zip(output) {
            *y = self.process(x);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for x in buffer {
            *x = self.process(*x);
        }
    }

    /// Update the sample rate and recompute rate-dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear all internal state without touching parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Sample-by-sample processors report 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
