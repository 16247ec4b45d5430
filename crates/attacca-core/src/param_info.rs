//! Indexed, self-describing parameters.
//!
//! A processor implementing [`ParameterInfo`] lists its controls by index and
//! returns a [`ParamDescriptor`] for each. Preset files, the command line and
//! host glue resolve names through this table rather than through struct
//! fields, so one lookup path serves every front end.
//!
//! Toggles and choices are stepped floats: `0.0`/`1.0` for a toggle, a label
//! index for a choice. Values always travel in display units.
//!
//! ```rust
//! use attacca_core::{ParamDescriptor, ParamId, ParameterInfo};
//!
//! struct Trim {
//!     db: f32,
//!     mute: bool,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 2 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(1), "trim")),
//!             1 => Some(ParamDescriptor::toggle("Mute", "Mute", false)
//!                 .with_id(ParamId(2), "mute")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.db,
//!             1 => f32::from(u8::from(self.mute)),
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         match index {
//!             0 => self.db = value.clamp(-24.0, 24.0),
//!             1 => self.mute = value >= 0.5,
//!             _ => {}
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { db: 0.0, mute: false };
//! let mute = trim.find_param("MUTE").unwrap();
//! trim.set_param(mute, 1.0);
//! assert!(trim.mute);
//! ```

/// Numeric parameter identity that outlives index reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Bit set of parameter capabilities.
///
/// ```rust
/// use attacca_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// May change between blocks.
    pub const AUTOMATABLE: Self = Self(1);
    /// Toggle or choice index.
    pub const STEPPED: Self = Self(2);

    /// True when every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Both sets combined.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Unit a value is displayed and parsed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// `dB`.
    Decibels,
    /// `ms`.
    Milliseconds,
    /// `%`.
    Percent,
    /// Unitless, including toggles and choices.
    None,
}

impl ParamUnit {
    /// Display suffix, including any leading space.
    ///
    /// ```rust
    /// use attacca_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Milliseconds.suffix(), " ms");
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Decibels => " dB",
            Self::Milliseconds => " ms",
            Self::Percent => "%",
            Self::None => "",
        }
    }
}

/// Index-addressed parameter table.
///
/// Indices `0..param_count()` never change for an instance. Unknown indices
/// read as `0.0` and ignore writes.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor at `index`, or `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`, in display units.
    fn get_param(&self, index: usize) -> f32;

    /// Write a display-unit value, clamped to the descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Index whose string id, name or short name equals `key`, ignoring
    /// ASCII case. String ids win over names.
    fn find_param(&self, key: &str) -> Option<usize> {
        let descriptors = || (0..self.param_count()).filter_map(move |i| Some((i, self.param_info(i)?)));
        descriptors()
            .find(|(_, d)| d.string_id.eq_ignore_ascii_case(key))
            .or_else(|| {
                descriptors().find(|(_, d)| {
                    d.name.eq_ignore_ascii_case(key) || d.short_name.eq_ignore_ascii_case(key)
                })
            })
            .map(|(i, _)| i)
    }
}

/// Static description of one parameter.
///
/// ```rust
/// use attacca_core::{ParamDescriptor, ParamId};
///
/// let release = ParamDescriptor::time_ms("Release Time", "Release", 1.0, 1000.0, 100.0)
///     .with_id(ParamId(104), "release_time");
/// assert_eq!(release.clamp(5000.0), 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// At most 8 characters.
    pub short_name: &'static str,
    /// Display and parsing unit.
    pub unit: ParamUnit,
    /// Lower bound, in display units.
    pub min: f32,
    /// Upper bound, in display units.
    pub max: f32,
    /// Value after construction or reset.
    pub default: f32,
    /// Nudge increment.
    pub step: f32,
    /// `ParamId(0)` until assigned.
    pub id: ParamId,
    /// Preset key; empty until assigned.
    pub string_id: &'static str,
    /// Capability bits.
    pub flags: ParamFlags,
    /// Listing section; empty for none.
    pub group: &'static str,
    /// One label per step starting at `min`. Empty when continuous.
    pub labels: &'static [&'static str],
}

impl ParamDescriptor {
    const fn continuous(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        range: (f32, f32, f32),
        step: f32,
    ) -> Self {
        let (min, max, default) = range;
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            labels: &[],
        }
    }

    const fn stepped(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: f32,
    ) -> Self {
        let max = labels.len().saturating_sub(1) as f32;
        let mut desc = Self::continuous(name, short_name, ParamUnit::None, (0.0, max, default), 1.0);
        desc.flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
        desc.labels = labels;
        desc
    }

    /// 0 to 100 %, default fully wet.
    pub const fn mix() -> Self {
        Self::percent("Mix", "Mix", 0.0, 100.0, 100.0)
    }

    /// -100 to 100 %, centred.
    pub const fn amount(name: &'static str, short_name: &'static str) -> Self {
        Self::percent(name, short_name, -100.0, 100.0, 0.0)
    }

    /// Percentage over a custom range.
    pub const fn percent(name: &'static str, short_name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self::continuous(name, short_name, ParamUnit::Percent, (min, max, default), 1.0)
    }

    /// Duration in milliseconds.
    pub const fn time_ms(name: &'static str, short_name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self::continuous(name, short_name, ParamUnit::Milliseconds, (min, max, default), 1.0)
    }

    /// Level in decibels, stepped by 0.5 dB.
    pub const fn gain_db(name: &'static str, short_name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self::continuous(name, short_name, ParamUnit::Decibels, (min, max, default), 0.5)
    }

    /// Unitless continuous value.
    pub const fn scalar(name: &'static str, short_name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self::continuous(name, short_name, ParamUnit::None, (min, max, default), 0.01)
    }

    /// Off/On switch.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self::stepped(name, short_name, &["Off", "On"], if default { 1.0 } else { 0.0 })
    }

    /// One of `labels`, stored as its index.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        Self::stepped(name, short_name, labels, default as f32)
    }

    /// Assign the numeric and preset identities.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Place the parameter in a listing section.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Override the nudge increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Toggles and choices.
    pub const fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Limit `value` to `[min, max]`. NaN passes through.
    ///
    /// ```rust
    /// use attacca_core::ParamDescriptor;
    ///
    /// let trim = ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0);
    /// assert_eq!(trim.clamp(-100.0), -24.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() { value } else { value.clamp(self.min, self.max) }
    }

    /// True when `value` lies in `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Plain value at position `t` in `[0, 1]` of the range.
    #[inline]
    pub fn denormalize(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    /// Label of the step nearest `value`.
    ///
    /// ```rust
    /// use attacca_core::ParamDescriptor;
    ///
    /// let tape = ParamDescriptor::toggle("Tape Clip", "Tape", false);
    /// assert_eq!(tape.value_label(0.8), Some("On"));
    /// ```
    pub fn value_label(&self, value: f32) -> Option<&'static str> {
        let step = libm::roundf(self.clamp(value) - self.min);
        self.labels.get(step as usize).copied()
    }

    /// Inverse of [`value_label`](Self::value_label), ignoring case and
    /// surrounding whitespace.
    pub fn label_value(&self, label: &str) -> Option<f32> {
        let label = label.trim();
        self.labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .map(|i| self.min + i as f32)
    }
}
