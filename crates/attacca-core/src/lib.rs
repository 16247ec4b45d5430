//! Attacca Core - DSP primitives for transient shaping
//!
//! Building blocks for the attacca transient designer, designed for real-time
//! audio with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for all audio processors
//! - [`ParameterInfo`] - Indexed, discoverable parameters ([`ParamDescriptor`])
//!
//! ## Detection
//!
//! - [`EnvelopeFollower`] - Single-pole attack/release envelope
//! - [`DualEnvelopeDetector`] - Fast-minus-slow transient strength
//!
//! ## Shaping & Dynamics
//!
//! - [`snap_curve`], [`hf_saturation`], [`tape_clip`] - Static shaping curves
//! - [`AutoGainCompensator`] - RMS-matched makeup gain
//! - [`FinalClipper`] / [`ClipperType`] - Six-curve ceiling clipper
//! - [`gain::Trim`] - Input/output trim stage
//!
//! ## Utilities
//!
//! - [`db_to_linear`], [`linear_to_db`], [`flush_denormal`], [`crossfade`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! attacca-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Plain data**: Per-channel state is ordinary structs, no dynamic dispatch

#![cfg_attr(not(feature = "std"), no_std)]

pub mod agc;
pub mod clipper;
pub mod dual_envelope;
pub mod effect;
pub mod envelope;
pub mod gain;
pub mod math;
pub mod param_info;
pub mod waveshape;

pub use agc::AutoGainCompensator;
pub use clipper::{ClipperType, FinalClipper, ParseClipperTypeError};
pub use dual_envelope::DualEnvelopeDetector;
pub use effect::Effect;
pub use envelope::{EnvelopeFollower, time_constant_coeff};
pub use math::{crossfade, db_to_linear, flush_denormal, linear_to_db, pow5};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use waveshape::{hf_saturation, snap_curve, tape_clip};
