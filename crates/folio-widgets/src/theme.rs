#![forbid(unsafe_code)]

//! Light/dark theme with a persisted preference.
//!
//! The theme is a single `dark-theme` class on the root element. The choice
//! is persisted through a [`ThemeStore`]; on startup the stored choice wins,
//! then the host's reported system preference, then light.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use folio_runtime::{ElementId, Surface};

use crate::error::{FolioError, Result};

pub const DARK_CLASS: &str = "dark-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[inline]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Where the theme choice is kept between visits.
pub trait ThemeStore {
    /// The stored choice, if any.
    fn load(&self) -> Option<Theme>;

    fn save(&mut self, theme: Theme) -> Result<()>;
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    theme: Option<Theme>,
}

impl MemoryThemeStore {
    pub fn new(theme: Option<Theme>) -> Self {
        Self { theme }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.theme
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        self.theme = Some(theme);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    dark_theme: bool,
}

/// JSON file holding `{"dark_theme": bool}`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let json = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<ThemeFile>(&json) {
            Ok(file) => Some(if file.dark_theme { Theme::Dark } else { Theme::Light }),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable theme file");
                None
            }
        }
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        let json = serde_json::to_string(&ThemeFile {
            dark_theme: theme.is_dark(),
        })
        .map_err(|source| FolioError::Data {
            resource: "theme",
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| FolioError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Applies and persists the theme.
#[derive(Debug)]
pub struct ThemeSwitch<T: ThemeStore> {
    root: ElementId,
    theme: Theme,
    store: T,
}

impl<T: ThemeStore> ThemeSwitch<T> {
    /// Resolve the initial theme and apply it to `root`.
    pub fn init<S: Surface + ?Sized>(
        root: ElementId,
        store: T,
        system_prefers_dark: Option<bool>,
        surface: &mut S,
    ) -> Self {
        let theme = store
            .load()
            .or_else(|| system_prefers_dark.map(|dark| if dark { Theme::Dark } else { Theme::Light }))
            .unwrap_or_default();
        if theme.is_dark() {
            surface.set_class(root, DARK_CLASS, true);
        }
        debug!(?theme, "theme applied");
        Self { root, theme, store }
    }

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Flip the theme and persist it. A failed save is logged; the new theme
    /// stays applied.
    pub fn toggle<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Theme {
        self.theme = self.theme.toggled();
        surface.set_class(self.root, DARK_CLASS, self.theme.is_dark());
        if let Err(err) = self.store.save(self.theme) {
            warn!(error = %err, "failed to persist theme");
        }
        self.theme
    }
}
