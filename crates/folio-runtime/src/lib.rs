#![forbid(unsafe_code)]

//! Runtime: the surface the page is drawn on and the engine that animates it.
//!
//! # Role in folio
//! `folio-runtime` is the host boundary. The browser (through a thin wasm
//! shim) or a test implements [`Surface`]; the [`TweenEngine`] writes style
//! values into it frame by frame and reports completions as events.
//!
//! # Primary responsibilities
//! - **Surface**: element handles, layout reads, style/class/text writes.
//! - **HeadlessSurface**: deterministic in-memory surface with grid layout.
//! - **TweenEngine**: batches, staggers, per-element cancellation, events.
//! - **FrameClock**: wall-clock to frame-delta conversion for hosts.
//! - **MotionConfig**: every timing constant, loadable from TOML or JSON.

pub mod clock;
pub mod config;
pub mod engine;
pub mod headless;
pub mod surface;

pub use clock::FrameClock;
pub use config::{
    ConfigError, EffectsMotion, EntranceMotion, EntranceStep, FilterMotion, ModalMotion, MotionConfig,
};
pub use engine::{Track, TweenEngine, TweenEvent, TweenId, TweenSpec};
pub use headless::{GridSpec, HeadlessSurface, Placement};
pub use surface::{ElementId, Surface};
