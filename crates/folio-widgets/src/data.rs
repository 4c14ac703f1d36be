#![forbid(unsafe_code)]

//! Static JSON records that populate the page.
//!
//! The site ships three data files: `projects.json`, `partners.json` and
//! `socials.json`. Records are deserialized leniently: unknown keys are
//! ignored and missing keys take their defaults, so a malformed record shows
//! up as an empty field on the page rather than a load failure.
//!
//! Loading never fails the page. [`DataSet::load_dir`] logs each resource
//! that cannot be read or parsed and substitutes an empty list, leaving the
//! corresponding container empty.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{FolioError, Result};

pub const PROJECTS_FILE: &str = "projects.json";
pub const PARTNERS_FILE: &str = "partners.json";
pub const SOCIALS_FILE: &str = "socials.json";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub title: String,
    /// Raw category text, tags joined with `+` (e.g. `"Web + Design"`).
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Image path without extension.
    pub picture: String,
    pub link: String,
    pub archived: bool,
}

impl ProjectRecord {
    /// Lower-cased category tags.
    pub fn categories(&self) -> Vec<String> {
        split_categories(&self.category)
    }

    pub fn picture_sources(&self) -> PictureSources {
        PictureSources::from_base(&self.picture, format!("{}.jpg", self.picture))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerRecord {
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: Option<String>,
    pub video: Option<String>,
    pub archived: bool,
}

impl PartnerRecord {
    /// Which media element the partner card shows.
    pub fn media(&self) -> PartnerMedia {
        if let Some(video) = self.video.as_deref().filter(|v| !v.is_empty()) {
            return PartnerMedia::Video(video.to_owned());
        }
        match self.image.as_deref().filter(|i| !i.is_empty()) {
            Some(image) if image.ends_with(".svg") => PartnerMedia::Svg(image.to_owned()),
            Some(image) => {
                let base = [".jpg", ".jpeg", ".png"]
                    .iter()
                    .find_map(|ext| image.strip_suffix(ext))
                    .unwrap_or(image);
                PartnerMedia::Picture(PictureSources::from_base(base, image.to_owned()))
            }
            None => PartnerMedia::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl SocialRecord {
    pub fn icon(&self) -> SocialIcon {
        SocialIcon::for_id(&self.id)
    }
}

// ---------------------------------------------------------------------------
// Derived presentation choices
// ---------------------------------------------------------------------------

/// Split a raw category on `+`, trimming and lower-casing each tag.
pub fn split_categories(raw: &str) -> Vec<String> {
    raw.split('+')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Modern-format sources plus a fallback for a `<picture>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSources {
    pub avif: String,
    pub webp: String,
    pub fallback: String,
}

impl PictureSources {
    fn from_base(base: &str, fallback: String) -> Self {
        Self {
            avif: format!("{base}.avif"),
            webp: format!("{base}.webp"),
            fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerMedia {
    Video(String),
    /// Vector logos are used as-is.
    Svg(String),
    Picture(PictureSources),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialIcon {
    Envelope,
    Telegram,
    Discord,
    Github,
    None,
}

impl SocialIcon {
    /// First match wins, in this order: mail, telegram, discord, github.
    pub fn for_id(id: &str) -> Self {
        if id.contains("mail") {
            Self::Envelope
        } else if id.contains("telegram") {
            Self::Telegram
        } else if id.contains("discord") {
            Self::Discord
        } else if id.contains("github") {
            Self::Github
        } else {
            Self::None
        }
    }

    /// Icon font classes for the `<i>` element.
    pub fn class(self) -> &'static str {
        match self {
            Self::Envelope => "fab fas fa-envelope",
            Self::Telegram => "fab fa-telegram",
            Self::Discord => "fab fa-discord",
            Self::Github => "fab fa-github",
            Self::None => "fab",
        }
    }
}

// ---------------------------------------------------------------------------
// DataSet
// ---------------------------------------------------------------------------

/// Everything the page renders from data files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSet {
    pub projects: Vec<ProjectRecord>,
    pub partners: Vec<PartnerRecord>,
    pub socials: Vec<SocialRecord>,
}

impl DataSet {
    /// Load all three resources from `dir`. Failures are logged and leave
    /// that list empty.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            projects: load_or_empty(dir, PROJECTS_FILE, "projects"),
            partners: load_or_empty(dir, PARTNERS_FILE, "partners"),
            socials: load_or_empty(dir, SOCIALS_FILE, "social links"),
        }
    }

    /// Partners that are shown (archived partners are skipped).
    pub fn visible_partners(&self) -> impl Iterator<Item = &PartnerRecord> {
        self.partners.iter().filter(|p| !p.archived)
    }
}

pub fn parse_projects(json: &str) -> Result<Vec<ProjectRecord>> {
    parse(json, "projects")
}

pub fn parse_partners(json: &str) -> Result<Vec<PartnerRecord>> {
    parse(json, "partners")
}

pub fn parse_socials(json: &str) -> Result<Vec<SocialRecord>> {
    parse(json, "social links")
}

fn parse<T: DeserializeOwned>(json: &str, resource: &'static str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| FolioError::Data { resource, source })
}

fn load<T: DeserializeOwned>(dir: &Path, file: &str, resource: &'static str) -> Result<Vec<T>> {
    let path = dir.join(file);
    let json = std::fs::read_to_string(&path).map_err(|source| FolioError::Io {
        path: path.clone(),
        source,
    })?;
    parse(&json, resource)
}

fn load_or_empty<T: DeserializeOwned>(dir: &Path, file: &str, resource: &'static str) -> Vec<T> {
    match load(dir, file, resource) {
        Ok(records) => {
            debug!(resource, count = records.len(), "data loaded");
            records
        }
        Err(err) => {
            error!(resource, error = %err, "error loading data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn categories_split_on_plus() {
        assert_eq!(split_categories("Web + Design"), vec!["web", "design"]);
        assert_eq!(split_categories(" AI+ +Research "), vec!["ai", "research"]);
        assert!(split_categories("").is_empty());
    }

    #[test]
    fn project_defaults_fill_missing_fields() {
        let projects = parse_projects(r#"[{"title": "Atlas", "extra": 1}]"#).unwrap();
        assert_eq!(projects[0].title, "Atlas");
        assert!(projects[0].tags.is_empty());
        assert!(!projects[0].archived);
    }

    #[test]
    fn project_picture_sources() {
        let project = ProjectRecord {
            picture: "img/atlas".into(),
            ..Default::default()
        };
        assert_eq!(
            project.picture_sources(),
            PictureSources {
                avif: "img/atlas.avif".into(),
                webp: "img/atlas.webp".into(),
                fallback: "img/atlas.jpg".into(),
            }
        );
    }

    #[test]
    fn partner_media_preference() {
        let mut partner = PartnerRecord {
            image: Some("logos/acme.png".into()),
            video: Some("logos/acme.webm".into()),
            ..Default::default()
        };
        assert_eq!(partner.media(), PartnerMedia::Video("logos/acme.webm".into()));

        partner.video = None;
        assert_eq!(
            partner.media(),
            PartnerMedia::Picture(PictureSources {
                avif: "logos/acme.avif".into(),
                webp: "logos/acme.webp".into(),
                fallback: "logos/acme.png".into(),
            })
        );

        partner.image = Some("logos/acme.svg".into());
        assert_eq!(partner.media(), PartnerMedia::Svg("logos/acme.svg".into()));

        partner.image = None;
        assert_eq!(partner.media(), PartnerMedia::None);
    }

    #[test]
    fn social_icon_order() {
        assert_eq!(SocialIcon::for_id("email"), SocialIcon::Envelope);
        assert_eq!(SocialIcon::for_id("telegram-mail"), SocialIcon::Envelope);
        assert_eq!(SocialIcon::for_id("github"), SocialIcon::Github);
        assert_eq!(SocialIcon::for_id("mastodon"), SocialIcon::None);
        assert_eq!(SocialIcon::Discord.class(), "fab fa-discord");
    }

    #[test]
    fn malformed_json_names_the_resource() {
        let err = parse_partners("{not json").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse partners"));
    }

    #[test]
    fn load_dir_tolerates_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECTS_FILE),
            r#"[{"title": "Atlas", "category": "Web"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join(SOCIALS_FILE), "oops").unwrap();

        let data = DataSet::load_dir(dir.path());
        assert_eq!(data.projects.len(), 1);
        assert!(data.partners.is_empty());
        assert!(data.socials.is_empty());
    }

    #[test]
    fn archived_partners_are_hidden() {
        let data = DataSet {
            partners: vec![
                PartnerRecord { title: "A".into(), ..Default::default() },
                PartnerRecord { title: "B".into(), archived: true, ..Default::default() },
            ],
            ..Default::default()
        };
        let titles: Vec<&str> = data.visible_partners().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);
    }
}
