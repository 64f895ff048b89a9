//! Liberty timing arcs for static timing analysis.
//!
//! A [`Timing`] is one `timing` group of a library pin: the related pin, the unateness,
//! the arc type and up to six lookup tables. The STA engine classifies arcs with the
//! `is_*` predicates, then asks for [`Timing::delay`], [`Timing::slew`] or
//! [`Timing::constraint`] at a given operating point.

pub mod arcfile;
pub mod classify;
pub mod corner;
pub mod error;
pub mod lut;
pub mod timing;
pub mod types;

pub use corner::{Split, SplitData, TimingView};
pub use lut::{LutVar, TimingLut};
pub use timing::{TableKind, Timing, TimingShape};
pub use types::{timing_senses, timing_types, TimingSense, TimingType, Transition};
