#![forbid(unsafe_code)]

//! Core: geometry, style properties, and animation primitives.
//!
//! # Role in folio
//! `folio-core` is the math layer. It owns the geometry snapshots that the
//! reconciler and modal morph compare, the style property vocabulary that the
//! tween engine writes, and the time-based primitives (easing curves, tweens,
//! staggers, springs) that every animation is built from.
//!
//! # How it fits in the system
//! `folio-runtime` drives these primitives against a `Surface`, and
//! `folio-widgets` composes them into the page choreography. Nothing in this
//! crate touches a surface or a clock; all time arrives as `Duration` deltas.

pub mod animation;
pub mod geometry;
pub mod logging;
pub mod style;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
