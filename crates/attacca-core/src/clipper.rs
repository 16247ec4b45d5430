//! Final-stage output clipper with six selectable curves.
//!
//! The clipper applies a pre-gain (drive) and leaves the driven sample alone
//! while its magnitude stays at or below the ceiling. Above the ceiling the
//! magnitude is normalized by the ceiling, passed through the selected curve,
//! limited to `[-1, 1]`, and scaled back by the ceiling with the original sign
//! restored. The output magnitude therefore never exceeds the ceiling.
//!
//! | Curve | `f(n)` for `n > 1` |
//! |-------|--------------------|
//! | Hard | `1` |
//! | Quintic | `n - n⁵/5` |
//! | Cubic | `n - n³/3` |
//! | Tangent | `tanh(0.7n) / tanh(0.7)` |
//! | Algebraic | `n / sqrt(1 + n²)` |
//! | Arctangent | `(2/π) atan(πn/2)` |
//!
//! The polynomial curves fall off past the ceiling and turn negative for
//! large overs; the `[-1, 1]` limit keeps those within the ceiling too.

use core::f32::consts::{FRAC_2_PI, FRAC_PI_2};
use core::fmt;
use core::str::FromStr;

use libm::{atanf, copysignf, sqrtf, tanhf};

/// Default clipper ceiling (linear).
pub const DEFAULT_CEILING: f32 = 0.8;
/// Default clipper drive (linear pre-gain).
pub const DEFAULT_DRIVE: f32 = 2.0;

/// Clipping curve selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipperType {
    /// Flat at the ceiling.
    Hard,
    /// Fifth-order polynomial knee.
    #[default]
    Quintic,
    /// Third-order polynomial knee.
    Cubic,
    /// Normalized hyperbolic tangent.
    Tangent,
    /// `x / sqrt(1 + x²)`.
    Algebraic,
    /// Normalized arctangent.
    Arctangent,
}

impl ClipperType {
    /// Every variant, in index order.
    pub const ALL: [ClipperType; 6] = [
        ClipperType::Hard,
        ClipperType::Quintic,
        ClipperType::Cubic,
        ClipperType::Tangent,
        ClipperType::Algebraic,
        ClipperType::Arctangent,
    ];

    /// Display labels, in index order.
    pub const LABELS: [&'static str; 6] = [
        "Hard",
        "Quintic",
        "Cubic",
        "Tangent",
        "Algebraic",
        "Arctangent",
    ];

    /// Variant for a stepped parameter index. Out-of-range indices saturate
    /// to the nearest end.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Index of this variant in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }

    /// Curve value for a normalized magnitude `n > 1`, limited to `[-1, 1]`.
    #[inline]
    pub fn shape(self, n: f32) -> f32 {
        let shaped = match self {
            ClipperType::Hard => 1.0,
            ClipperType::Quintic => {
                let n2 = n * n;
                n - n2 * n2 * n / 5.0
            }
            ClipperType::Cubic => n - n * n * n / 3.0,
            ClipperType::Tangent => tanhf(0.7 * n) / tanhf(0.7),
            ClipperType::Algebraic => n / sqrtf(1.0 + n * n),
            ClipperType::Arctangent => FRAC_2_PI * atanf(FRAC_PI_2 * n),
        };
        shaped.clamp(-1.0, 1.0)
    }
}

impl fmt::Display for ClipperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no clipper curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClipperTypeError;

impl fmt::Display for ParseClipperTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of: hard, quintic, cubic, tangent, algebraic, arctangent")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseClipperTypeError {}

impl FromStr for ClipperType {
    type Err = ParseClipperTypeError;

    /// Case-insensitive label match. `tanh` and `atan` are accepted aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("tanh") {
            return Ok(ClipperType::Tangent);
        }
        if s.eq_ignore_ascii_case("atan") {
            return Ok(ClipperType::Arctangent);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or(ParseClipperTypeError)
    }
}

/// Drive + ceiling clipper.
///
/// # Example
///
/// ```rust
/// use attacca_core::{ClipperType, FinalClipper};
///
/// let clipper = FinalClipper::new(0.5, 1.0, ClipperType::Hard);
/// assert_eq!(clipper.clip(0.25), 0.25);
/// assert_eq!(clipper.clip(-0.9), -0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalClipper {
    ceiling: f32,
    drive: f32,
    kind: ClipperType,
}

impl FinalClipper {
    /// Create a clipper. Values are used as given.
    pub fn new(ceiling: f32, drive: f32, kind: ClipperType) -> Self {
        Self {
            ceiling,
            drive,
            kind,
        }
    }

    /// Output ceiling (linear).
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Set the output ceiling (linear).
    pub fn set_ceiling(&mut self, ceiling: f32) {
        self.ceiling = ceiling;
    }

    /// Drive pre-gain (linear).
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Set the drive pre-gain (linear).
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = drive;
    }

    /// Selected curve.
    pub fn kind(&self) -> ClipperType {
        self.kind
    }

    /// Select the curve.
    pub fn set_kind(&mut self, kind: ClipperType) {
        self.kind = kind;
    }

    /// Clip one sample.
    #[inline]
    pub fn clip(&self, input: f32) -> f32 {
        let driven = input * self.drive;
        let magnitude = driven.abs();
        if magnitude <= self.ceiling {
            return driven;
        }
        let shaped = self.kind.shape(magnitude / self.ceiling);
        copysignf(1.0, driven) * shaped * self.ceiling
    }
}

impl Default for FinalClipper {
    fn default() -> Self {
        Self::new(DEFAULT_CEILING, DEFAULT_DRIVE, ClipperType::default())
    }
}
