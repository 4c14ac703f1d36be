#![forbid(unsafe_code)]

//! Decorative effects.
//!
//! Each effect is a small controller that owns its own state and is advanced
//! by the page's frame tick; none of them keeps state outside itself.
//!
//! | Effect | Drives |
//! |---|---|
//! | [`entrance`] | One-shot staggered intro of the hero, tags and cards |
//! | [`Typewriter`] | Types, holds, erases and cycles a list of phrases |
//! | [`ImageCycler`] | Moves `active` through the profile images |
//! | [`Magnetic`] | Buttons that lean toward the pointer on a spring |

pub mod cycler;
pub mod entrance;
pub mod magnetic;
pub mod typewriter;

pub use cycler::ImageCycler;
pub use entrance::{EntranceTargets, play_entrance};
pub use magnetic::Magnetic;
pub use typewriter::{Typewriter, TypewriterPhase};
