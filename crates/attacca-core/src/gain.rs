//! Input/output trim stages.
//!
//! The transient designer is bracketed by two plain gain stages: an input
//! trim before detection and an output trim after the final clipper. Both
//! are exposed in dB over [`TRIM_MIN_DB`]..=[`TRIM_MAX_DB`] and applied as
//! a constant linear multiplier per block. Input trim is the first parameter
//! index and output trim the last.
//!
//! # Usage
//!
//! ```rust
//! use attacca_core::gain::Trim;
//!
//! let mut trim = Trim::new();
//! trim.set_db(-6.0);
//!
//! let mut block = [1.0, -1.0];
//! trim.apply(&mut block);
//! assert!((block[0] - 0.501).abs() < 0.01);
//! ```

use crate::{ParamDescriptor, db_to_linear};

/// Minimum trim in dB.
pub const TRIM_MIN_DB: f32 = -24.0;

/// Maximum trim in dB.
pub const TRIM_MAX_DB: f32 = 24.0;

/// Constant gain stage with a dB interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trim {
    db: f32,
    linear: f32,
}

impl Trim {
    /// Unity trim (0 dB).
    pub const fn new() -> Self {
        Self {
            db: 0.0,
            linear: 1.0,
        }
    }

    /// Set the trim in dB, clamped to [`TRIM_MIN_DB`]..=[`TRIM_MAX_DB`].
    /// NaN is ignored.
    pub fn set_db(&mut self, db: f32) {
        if db.is_nan() {
            return;
        }
        self.db = db.clamp(TRIM_MIN_DB, TRIM_MAX_DB);
        self.linear = if self.db == 0.0 {
            1.0
        } else {
            db_to_linear(self.db)
        };
    }

    /// Trim in dB.
    pub fn db(&self) -> f32 {
        self.db
    }

    /// Trim as a linear multiplier.
    pub fn linear(&self) -> f32 {
        self.linear
    }

    /// True when the stage is exactly unity.
    pub fn is_unity(&self) -> bool {
        self.linear == 1.0
    }

    /// Scale `buffer` in place. Unity trims leave the buffer untouched.
    #[inline]
    pub fn apply(&self, buffer: &mut [f32]) {
        if self.is_unity() {
            return;
        }
        for sample in buffer.iter_mut() {
            *sample *= self.linear;
        }
    }
}

impl Default for Trim {
    fn default() -> Self {
        Self::new()
    }
}

/// [`ParamDescriptor`] for the input trim. Always the first parameter index.
pub const fn input_param_descriptor() -> ParamDescriptor {
    ParamDescriptor::gain_db("Input Gain", "Input", TRIM_MIN_DB, TRIM_MAX_DB, 0.0)
}

/// [`ParamDescriptor`] for the output trim. Always the last parameter index.
pub const fn output_param_descriptor() -> ParamDescriptor {
    ParamDescriptor::gain_db("Output Gain", "Output", TRIM_MIN_DB, TRIM_MAX_DB, 0.0)
}
