#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! Re-exports the types a host needs to mount a page, forward input and
//! drive frames, plus a prelude for day-to-day use. The internal crates stay
//! reachable as modules for anything the facade does not surface.

// --- Core re-exports -------------------------------------------------------

pub use folio_core::animation::{Easing, Spring, SpringCurve};
pub use folio_core::geometry::{GeometrySnapshot, Rect, Transform};
pub use folio_core::style::{Display, StyleProp};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    ConfigError, ElementId, FrameClock, GridSpec, HeadlessSurface, MotionConfig, Placement, Surface,
    TweenEngine, TweenEvent, TweenId, TweenSpec,
};

// --- Widget re-exports -----------------------------------------------------

pub use folio_widgets::data::DataSet;
pub use folio_widgets::filter::{Filter, FilterOutcome, FilterReconciler, TransitionPlan};
pub use folio_widgets::morph::{ModalElements, ModalFields, ModalMorph, ModalPhase, MorphError};
pub use folio_widgets::page::{HostPrefs, Key, Page, PageElements, PageEvent, load_motion_config};
pub use folio_widgets::registry::{CardId, CardRegistry};
pub use folio_widgets::theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeStore};
pub use folio_widgets::{FolioError, Result};

/// Logging initializers, available with the `logging` feature.
#[cfg(feature = "logging")]
pub mod logging {
    pub use folio_core::logging::init;
    #[cfg(feature = "logging-json")]
    pub use folio_core::logging::init_json;
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DataSet, ElementId, Filter, FolioError, HostPrefs, Key, ModalPhase, MotionConfig, Page,
        PageElements, PageEvent, Rect, Result, Surface, Theme, ThemeStore,
    };

    pub use crate::{core, runtime, widgets};
}

pub use folio_core as core;
pub use folio_runtime as runtime;
pub use folio_widgets as widgets;
