#![forbid(unsafe_code)]

//! Motion configuration as data.
//!
//! Every timing and magnitude used by the page choreography lives in a single
//! [`MotionConfig`] that can be loaded from TOML or JSON at startup.
//!
//! ```toml
//! reduced_motion = false
//!
//! [filter]
//! leave_ms = 300
//! enter_stagger_ms = 60
//!
//! [modal]
//! morph_ms = 800
//!
//! [effects.entrance.project_cards]
//! duration_ms = 800
//! offset = 50.0
//! ```
//!
//! # Defaults
//!
//! `MotionConfig::default()` reproduces the site's shipped timings. Partial
//! files override only the keys they name.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a motion configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read motion config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML motion config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON motion config: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Top-level MotionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MotionConfig {
    pub filter: FilterMotion,
    pub modal: ModalMotion,
    pub effects: EffectsMotion,
    /// Collapse every transition to an instant change.
    pub reduced_motion: bool,
}

impl MotionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let f = &self.filter;
        if !(f.hidden_scale > 0.0 && f.hidden_scale <= 1.0) {
            errors.push(format!("filter.hidden_scale must be in (0, 1], got {}", f.hidden_scale));
        }
        let e = &self.effects;
        if e.typing_step_ms == 0 {
            errors.push("effects.typing_step_ms must be > 0".to_owned());
        }
        if e.erase_step_ms == 0 {
            errors.push("effects.erase_step_ms must be > 0".to_owned());
        }
        if e.cycle_ms == 0 {
            errors.push("effects.cycle_ms must be > 0".to_owned());
        }
        if !(0.0..=1.0).contains(&e.magnetic_strength) {
            errors.push(format!(
                "effects.magnetic_strength must be in [0, 1], got {}",
                e.magnetic_strength
            ));
        }
        if e.reveal_margin < 0.0 {
            errors.push(format!("effects.reveal_margin must be >= 0, got {}", e.reveal_margin));
        }
        let hero_scale = e.entrance.hero_image_scale;
        if !(hero_scale > 0.0 && hero_scale <= 1.0) {
            errors.push(format!("effects.entrance.hero_image_scale must be in (0, 1], got {hero_scale}"));
        }
        errors
    }

    /// The config actually used at runtime: with `reduced_motion` set, every
    /// transition duration, delay and stagger becomes zero. Timers that pace
    /// content (typewriter, image cycling) are kept.
    #[must_use]
    pub fn effective(&self) -> Self {
        if !self.reduced_motion {
            return self.clone();
        }
        Self {
            filter: FilterMotion {
                leave_ms: 0,
                enter_ms: 0,
                flip_ms: 0,
                enter_stagger_ms: 0,
                ..self.filter.clone()
            },
            modal: ModalMotion {
                backdrop_ms: 0,
                morph_ms: 0,
                field_ms: 0,
                field_delay_ms: 0,
                field_stagger_ms: 0,
                close_ms: 0,
                ..self.modal.clone()
            },
            effects: EffectsMotion {
                reveal_ms: 0,
                magnetic_strength: 0.0,
                entrance: self.effects.entrance.instant(),
                ..self.effects.clone()
            },
            reduced_motion: true,
        }
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Project filter choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterMotion {
    pub leave_ms: u64,
    pub enter_ms: u64,
    pub flip_ms: u64,
    pub enter_stagger_ms: u64,
    /// Scale of a card while faded out.
    pub hidden_scale: f64,
    /// Downward offset of a card while faded out.
    pub hidden_offset_y: f64,
}

impl Default for FilterMotion {
    fn default() -> Self {
        Self {
            leave_ms: 300,
            enter_ms: 600,
            flip_ms: 600,
            enter_stagger_ms: 60,
            hidden_scale: 0.8,
            hidden_offset_y: 20.0,
        }
    }
}

impl FilterMotion {
    pub fn leave(&self) -> Duration {
        ms(self.leave_ms)
    }

    pub fn enter(&self) -> Duration {
        ms(self.enter_ms)
    }

    pub fn flip(&self) -> Duration {
        ms(self.flip_ms)
    }

    pub fn enter_stagger(&self) -> Duration {
        ms(self.enter_stagger_ms)
    }
}

/// Card-to-modal morph choreography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalMotion {
    pub backdrop_ms: u64,
    pub morph_ms: u64,
    pub field_ms: u64,
    pub field_delay_ms: u64,
    pub field_stagger_ms: u64,
    pub field_offset_y: f64,
    pub close_ms: u64,
}

impl Default for ModalMotion {
    fn default() -> Self {
        Self {
            backdrop_ms: 400,
            morph_ms: 800,
            field_ms: 600,
            field_delay_ms: 200,
            field_stagger_ms: 60,
            field_offset_y: 20.0,
            close_ms: 300,
        }
    }
}

impl ModalMotion {
    pub fn backdrop(&self) -> Duration {
        ms(self.backdrop_ms)
    }

    pub fn morph(&self) -> Duration {
        ms(self.morph_ms)
    }

    pub fn field(&self) -> Duration {
        ms(self.field_ms)
    }

    pub fn field_delay(&self) -> Duration {
        ms(self.field_delay_ms)
    }

    pub fn field_stagger(&self) -> Duration {
        ms(self.field_stagger_ms)
    }

    pub fn close(&self) -> Duration {
        ms(self.close_ms)
    }
}

/// Decorative effects, scroll behavior and entrance animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsMotion {
    pub typing_step_ms: u64,
    pub erase_step_ms: u64,
    pub hold_ms: u64,
    pub restart_ms: u64,
    pub cycle_ms: u64,
    /// Distance above the viewport bottom at which elements reveal.
    pub reveal_margin: f64,
    pub reveal_ms: u64,
    pub reveal_offset_y: f64,
    /// Scroll offset past which the header is marked `scrolled`.
    pub header_threshold: f64,
    /// Look-ahead used to pick the active section.
    pub section_lead: f64,
    pub magnetic_strength: f64,
    pub entrance: EntranceMotion,
}

impl Default for EffectsMotion {
    fn default() -> Self {
        Self {
            typing_step_ms: 50,
            erase_step_ms: 25,
            hold_ms: 2000,
            restart_ms: 500,
            cycle_ms: 5000,
            reveal_margin: 100.0,
            reveal_ms: 800,
            reveal_offset_y: 30.0,
            header_threshold: 50.0,
            section_lead: 200.0,
            magnetic_strength: 0.3,
            entrance: EntranceMotion::default(),
        }
    }
}

impl EffectsMotion {
    pub fn typing_step(&self) -> Duration {
        ms(self.typing_step_ms)
    }

    pub fn erase_step(&self) -> Duration {
        ms(self.erase_step_ms)
    }

    pub fn hold(&self) -> Duration {
        ms(self.hold_ms)
    }

    pub fn restart(&self) -> Duration {
        ms(self.restart_ms)
    }

    pub fn cycle(&self) -> Duration {
        ms(self.cycle_ms)
    }

    pub fn reveal(&self) -> Duration {
        ms(self.reveal_ms)
    }
}

/// One staggered fade-and-slide group of the entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceStep {
    pub duration_ms: u64,
    pub stagger_ms: u64,
    /// Starting offset along the group's slide axis.
    pub offset: f64,
}

impl Default for EntranceStep {
    fn default() -> Self {
        Self::new(800, 100, 20.0)
    }
}

impl EntranceStep {
    pub const fn new(duration_ms: u64, stagger_ms: u64, offset: f64) -> Self {
        Self {
            duration_ms,
            stagger_ms,
            offset,
        }
    }

    pub fn duration(&self) -> Duration {
        ms(self.duration_ms)
    }

    pub fn stagger(&self) -> Duration {
        ms(self.stagger_ms)
    }
}

/// Mount-time entrance animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceMotion {
    pub hero_text: EntranceStep,
    pub skill_tags: EntranceStep,
    pub project_cards: EntranceStep,
    pub partner_cards: EntranceStep,
    /// Social links slide in horizontally; a negative offset starts left.
    pub social_links: EntranceStep,
    pub hero_image_ms: u64,
    pub hero_image_delay_ms: u64,
    /// Starting scale of the hero image.
    pub hero_image_scale: f64,
}

impl Default for EntranceMotion {
    fn default() -> Self {
        Self {
            hero_text: EntranceStep::new(800, 100, 20.0),
            skill_tags: EntranceStep::new(600, 50, 20.0),
            project_cards: EntranceStep::new(800, 100, 50.0),
            partner_cards: EntranceStep::new(600, 100, 30.0),
            social_links: EntranceStep::new(600, 100, -20.0),
            hero_image_ms: 800,
            hero_image_delay_ms: 300,
            hero_image_scale: 0.9,
        }
    }
}

impl EntranceMotion {
    pub fn hero_image(&self) -> Duration {
        ms(self.hero_image_ms)
    }

    pub fn hero_image_delay(&self) -> Duration {
        ms(self.hero_image_delay_ms)
    }

    /// Every step collapsed to zero time, landing at rest.
    #[must_use]
    pub fn instant(&self) -> Self {
        let still = |step: EntranceStep| EntranceStep::new(0, 0, step.offset);
        Self {
            hero_text: still(self.hero_text),
            skill_tags: still(self.skill_tags),
            project_cards: still(self.project_cards),
            partner_cards: still(self.partner_cards),
            social_links: still(self.social_links),
            hero_image_ms: 0,
            hero_image_delay_ms: 0,
            hero_image_scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_validates_clean() {
        assert!(MotionConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_toml_override_preserves_defaults() {
        let config = MotionConfig::from_toml_str(
            r#"
            [filter]
            leave_ms = 150

            [effects]
            cycle_ms = 3000
            "#,
        )
        .unwrap();
        assert_eq!(config.filter.leave(), Duration::from_millis(150));
        assert_eq!(config.filter.enter_ms, 600);
        assert_eq!(config.effects.cycle(), Duration::from_secs(3));
        assert_eq!(config.modal, ModalMotion::default());
    }

    #[test]
    fn entrance_steps_override_per_group() {
        let config = MotionConfig::from_toml_str(
            r#"
            [effects.entrance]
            hero_image_delay_ms = 0

            [effects.entrance.project_cards]
            offset = 80.0
            "#,
        )
        .unwrap();
        let entrance = &config.effects.entrance;
        assert_eq!(entrance.project_cards, EntranceStep::new(800, 100, 80.0));
        assert_eq!(entrance.hero_image_delay(), Duration::ZERO);
        assert_eq!(entrance.social_links, EntranceMotion::default().social_links);
        assert_eq!(config.effects.reveal_ms, 800);
    }

    #[test]
    fn json_round_trip() {
        let config = MotionConfig {
            reduced_motion: true,
            ..MotionConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MotionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = MotionConfig::default();
        config.filter.hidden_scale = 0.0;
        config.effects.typing_step_ms = 0;
        config.effects.magnetic_strength = 2.0;
        assert_eq!(config.validate().len(), 3);
    }

    #[test]
    fn reduced_motion_zeroes_transitions_only() {
        let config = MotionConfig {
            reduced_motion: true,
            ..MotionConfig::default()
        }
        .effective();
        assert_eq!(config.filter.leave(), Duration::ZERO);
        assert_eq!(config.modal.morph(), Duration::ZERO);
        assert_eq!(config.modal.field_delay(), Duration::ZERO);
        assert_eq!(config.effects.reveal(), Duration::ZERO);
        assert_eq!(config.effects.entrance.project_cards.duration(), Duration::ZERO);
        assert_eq!(config.effects.entrance.social_links.stagger(), Duration::ZERO);
        assert_eq!(config.effects.entrance.hero_image_delay(), Duration::ZERO);
        assert_eq!(config.effects.entrance.hero_image_scale, 1.0);
        assert_eq!(config.effects.typing_step(), Duration::from_millis(50));
        assert_eq!(config.effects.cycle(), Duration::from_secs(5));
    }

    #[test]
    fn bad_toml_is_an_error() {
        let err = MotionConfig::from_toml_str("[filter]\nleave_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MotionConfig::from_toml_file(dir.path().join("motion.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
