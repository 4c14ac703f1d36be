#![forbid(unsafe_code)]

//! Ordered registry of project cards.
//!
//! Cards are created once, in data order, when projects are loaded and are
//! never removed; filtering only flips their logical visibility. Each card is
//! addressed by a [`CardId`] (its position) and carries a stable string key
//! derived from its title.

use std::fmt;

use ahash::AHashMap;
use folio_runtime::{ElementId, Surface};
use tracing::{debug, warn};

use crate::data::{ProjectRecord, split_categories};

/// Class on every project card element.
pub const CARD_CLASS: &str = "project-card";
/// Class on cards of archived projects.
pub const ARCHIVED_CLASS: &str = "archived";
/// Class present while a card is being moved by a filter pass.
pub const TRANSITIONING_CLASS: &str = "is-transitioning";

/// Position of a card in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub(crate) usize);

impl CardId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card{}", self.0)
    }
}

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Stable key slugged from the title; duplicates get `-2`, `-3`, ...
    pub key: String,
    /// Lower-cased tags split from the category.
    pub tags: Vec<String>,
    /// Lower-cased raw category, used for substring matching.
    pub category_text: String,
    pub visible: bool,
    pub in_transition: bool,
    pub archived: bool,
    pub element: ElementId,
    /// Index of the backing record in the project list.
    pub project: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CardRegistry {
    cards: Vec<CardRecord>,
    by_key: AHashMap<String, CardId>,
    by_element: AHashMap<ElementId, CardId>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one card element per project inside `container`.
    ///
    /// A missing container logs a warning and yields an empty registry.
    pub fn from_projects<S: Surface + ?Sized>(
        projects: &[ProjectRecord],
        container: ElementId,
        surface: &mut S,
    ) -> Self {
        let mut registry = Self::new();
        if !surface.contains(container) {
            warn!(%container, "projects container missing; no cards created");
            return registry;
        }
        for (index, project) in projects.iter().enumerate() {
            let Some(element) = surface.append_child(container, CARD_CLASS) else {
                warn!(title = %project.title, "failed to create project card");
                continue;
            };
            surface.set_attr(element, "data-category", Some(project.category.as_str()));
            if project.archived {
                surface.set_class(element, ARCHIVED_CLASS, true);
            }
            registry.register(&project.title, &project.category, project.archived, element, index);
        }
        debug!(cards = registry.len(), "project cards created");
        registry
    }

    /// Add a card for an existing element. New cards start visible.
    pub fn register(
        &mut self,
        title: &str,
        category: &str,
        archived: bool,
        element: ElementId,
        project: usize,
    ) -> CardId {
        let id = CardId(self.cards.len());
        let key = self.unique_key(&slugify(title));
        self.by_key.insert(key.clone(), id);
        self.by_element.insert(element, id);
        self.cards.push(CardRecord {
            key,
            tags: split_categories(category),
            category_text: category.to_lowercase(),
            visible: true,
            in_transition: false,
            archived,
            element,
            project,
        });
        id
    }

    fn unique_key(&self, base: &str) -> String {
        if !self.by_key.contains_key(base) {
            return base.to_owned();
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !self.by_key.contains_key(candidate))
            .unwrap_or_else(|| base.to_owned())
    }

    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.cards.get(id.0)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardRecord> {
        self.cards.get_mut(id.0)
    }

    pub fn by_key(&self, key: &str) -> Option<CardId> {
        self.by_key.get(key).copied()
    }

    pub fn by_element(&self, element: ElementId) -> Option<CardId> {
        self.by_element.get(&element).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardRecord)> {
        self.cards.iter().enumerate().map(|(i, c)| (CardId(i), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CardId, &mut CardRecord)> {
        self.cards.iter_mut().enumerate().map(|(i, c)| (CardId(i), c))
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..self.cards.len()).map(CardId)
    }

    pub fn visible(&self) -> impl Iterator<Item = CardId> + '_ {
        self.iter().filter(|(_, c)| c.visible).map(|(id, _)| id)
    }

    pub fn elements(&self) -> Vec<ElementId> {
        self.cards.iter().map(|c| c.element).collect()
    }
}

/// Lower-cased alphanumeric runs joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("card");
    }
    slug
}
