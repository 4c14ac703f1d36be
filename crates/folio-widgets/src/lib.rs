#![forbid(unsafe_code)]

//! Page behavior for the portfolio site.
//!
//! # Role in folio
//! `folio-widgets` owns the page's semantics: which cards exist, which are
//! shown for a filter, how they move when the filter changes, how a card
//! morphs into the project modal, and the decorative effects around them.
//! Everything is written against [`folio_runtime::Surface`] and advanced by
//! [`folio_runtime::TweenEngine`] events, so each choreography is an explicit
//! state machine rather than a chain of completion callbacks.
//!
//! # Primary responsibilities
//! - **data / registry**: JSON records and the ordered card registry.
//! - **filter**: FLIP reconciliation of the project gallery.
//! - **morph**: card-to-modal morph and its session phases.
//! - **effects / scroll / nav / theme**: the rest of the page.
//! - **page**: mounts everything and routes host events.

pub mod data;
pub mod effects;
pub mod error;
pub mod filter;
pub mod morph;
pub mod nav;
pub mod page;
pub mod registry;
pub mod scroll;
pub mod theme;

pub use error::{FolioError, Result};
