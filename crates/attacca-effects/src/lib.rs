//! Attacca Effects - the transient designer
//!
//! This crate assembles the attacca-core primitives into a multichannel
//! transient designer:
//!
//! - [`TransientDesigner`] - Trims, bypass and [`ParameterInfo`] around the engine
//! - [`TransientDesignerCore`] - Per-channel detection and the per-sample pipeline
//! - [`TransientParams`] - Per-block parameter snapshot
//! - [`GainComputer`] - Transient strength to attack/sustain gains
//! - [`Diagnostics`] / [`DiagnosticsObserver`] - Envelope snapshots for meters and logs
//!
//! ## Example
//!
//! ```rust
//! use attacca_core::ParameterInfo;
//! use attacca_effects::TransientDesigner;
//!
//! let mut designer = TransientDesigner::new(48000.0, 1);
//! designer.set_param(1, 50.0); // attack amount
//! designer.set_param(4, -30.0); // sustain amount
//!
//! let mut block = vec![0.0f32; 480];
//! block[0] = 1.0;
//! designer.process_block(&mut [&mut block[..]]);
//! ```
//!
//! [`ParameterInfo`]: attacca_core::ParameterInfo

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod designer;
pub mod diagnostics;
pub mod gain_computer;
pub mod params;
pub mod processor;

pub use designer::TransientDesigner;
pub use diagnostics::{Diagnostics, DiagnosticsObserver};
pub use gain_computer::{GainComputer, StageGains};
pub use params::{DESCRIPTORS, PARAM_COUNT, TransientParams};
pub use processor::{ChannelState, TransientDesignerCore};
