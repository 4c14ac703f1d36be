#![forbid(unsafe_code)]

//! Card-to-modal morph.
//!
//! Opening the project modal makes the modal's content panel appear to grow
//! out of the clicked card: the panel is laid out at its natural size, then
//! transformed so it renders exactly over the card, then sprung back to
//! identity while the backdrop fades in and the fields cascade in.
//!
//! # State machine
//!
//! ```text
//! Closed ──open──► Opening ──backdrop, morph and fields done──► Open
//!    ▲                │                                          │
//!    │                └────────────close / Escape────────────┐   │
//!    │                                                       ▼   ▼
//!    └──────────────────fade out done────────────────────── Closing
//! ```
//!
//! Measuring the natural geometry is deferred to [`ModalMorph::on_frame`],
//! the first frame after `open`, so the host has laid out the newly
//! displayed modal.
//!
//! # Invariants
//!
//! 1. Only one session exists; `open` outside `Closed` is rejected.
//! 2. Right after the inverse transform is applied, the panel's rendered box
//!    equals the source card's box.
//! 3. When the morph finishes, the panel rests at its natural geometry.
//! 4. After `Closing` completes the panel has no residual transform and page
//!    scrolling is restored.

use std::fmt;

use ahash::AHashSet;
use folio_core::animation::{Easing, SpringCurve};
use folio_core::geometry::{GeometrySnapshot, Rect, Transform};
use folio_core::style::{Display, StyleProp};
use folio_runtime::{ElementId, ModalMotion, Surface, TweenEngine, TweenEvent, TweenId, TweenSpec};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::data::ProjectRecord;
use crate::registry::{CardId, CardRegistry};

/// Phase of the modal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalPhase {
    /// Whether the modal is on screen.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

impl fmt::Display for ModalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MorphError {
    #[error("modal is {0}; open ignored")]
    Busy(ModalPhase),
    #[error("modal element missing: {0}")]
    MissingElement(&'static str),
}

/// Field elements, in the order they cascade in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalFields {
    pub image: ElementId,
    pub title: ElementId,
    pub category: ElementId,
    pub description: ElementId,
    pub tags: ElementId,
    pub link: ElementId,
}

impl ModalFields {
    pub fn all(&self) -> [ElementId; 6] {
        [
            self.image,
            self.title,
            self.category,
            self.description,
            self.tags,
            self.link,
        ]
    }

    fn named(&self) -> [(&'static str, ElementId); 6] {
        [
            ("image", self.image),
            ("title", self.title),
            ("category", self.category),
            ("description", self.description),
            ("tags", self.tags),
            ("link", self.link),
        ]
    }
}

/// Handles to the modal's markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalElements {
    /// Full-screen backdrop; clicks on it close the modal.
    pub container: ElementId,
    /// The panel that morphs.
    pub content: ElementId,
    pub fields: ModalFields,
    /// `<source>` elements of the image's `<picture>`, if present.
    pub avif_source: Option<ElementId>,
    pub webp_source: Option<ElementId>,
    pub close_button: Option<ElementId>,
}

impl ModalElements {
    /// Name of the first required element the surface does not have.
    pub fn first_missing<S: Surface + ?Sized>(&self, surface: &S) -> Option<&'static str> {
        [("container", self.container), ("content", self.content)]
            .into_iter()
            .chain(self.fields.named())
            .find(|(_, el)| !surface.contains(*el))
            .map(|(name, _)| name)
    }
}

/// The single modal session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModalSession {
    pub source_card: Option<CardId>,
    pub source_geometry: GeometrySnapshot,
    /// Natural panel geometry, measured on the first frame.
    pub target_geometry: Option<GeometrySnapshot>,
    pub phase: ModalPhase,
}

#[derive(Debug, Clone, Default)]
enum Stage {
    #[default]
    Idle,
    AwaitingFrame,
    Opening { batches: AHashSet<TweenId> },
    Closing { batch: TweenId },
}

/// Owns the modal session and its choreography.
#[derive(Debug, Clone)]
pub struct ModalMorph {
    elements: ModalElements,
    motion: ModalMotion,
    session: ModalSession,
    stage: Stage,
}

impl ModalMorph {
    pub fn new(elements: ModalElements, motion: ModalMotion) -> Self {
        Self {
            elements,
            motion,
            session: ModalSession::default(),
            stage: Stage::Idle,
        }
    }

    #[inline]
    pub fn phase(&self) -> ModalPhase {
        self.session.phase
    }

    pub fn session(&self) -> &ModalSession {
        &self.session
    }

    pub fn elements(&self) -> &ModalElements {
        &self.elements
    }

    /// Whether the next frame must run [`Self::on_frame`].
    pub fn needs_frame(&self) -> bool {
        matches!(self.stage, Stage::AwaitingFrame)
    }

    /// Start opening the modal from `card`.
    pub fn open<S: Surface + ?Sized>(
        &mut self,
        card: CardId,
        registry: &CardRegistry,
        project: &ProjectRecord,
        surface: &mut S,
    ) -> Result<(), MorphError> {
        if self.session.phase != ModalPhase::Closed {
            warn!(phase = %self.session.phase, "modal busy; open rejected");
            return Err(MorphError::Busy(self.session.phase));
        }
        if let Some(name) = self.elements.first_missing(surface) {
            warn!(element = name, "modal element missing; open aborted");
            return Err(MorphError::MissingElement(name));
        }
        let source_geometry = registry
            .get(card)
            .and_then(|c| surface.bounding_rect(c.element))
            .ok_or(MorphError::MissingElement("source card"))?;

        self.populate(project, surface);

        let ModalElements {
            container, content, ..
        } = self.elements;
        surface.set_display(container, Display::Block);
        surface.set_style(container, StyleProp::Opacity, 0.0);
        surface.set_transform(content, Transform::IDENTITY);
        surface.set_scroll_locked(true);

        self.session = ModalSession {
            source_card: Some(card),
            source_geometry,
            target_geometry: None,
            phase: ModalPhase::Opening,
        };
        self.stage = Stage::AwaitingFrame;
        info!(%card, title = %project.title, "modal opening");
        Ok(())
    }

    fn populate<S: Surface + ?Sized>(&self, project: &ProjectRecord, surface: &mut S) {
        let fields = self.elements.fields;
        surface.set_text(fields.title, &project.title);
        surface.set_text(fields.category, &project.category);
        surface.set_text(fields.description, &project.description);
        surface.set_text(fields.tags, &project.tags.join(", "));

        let sources = project.picture_sources();
        surface.set_attr(fields.image, "src", Some(sources.fallback.as_str()));
        surface.set_attr(fields.image, "alt", Some(project.title.as_str()));
        if let Some(avif) = self.elements.avif_source {
            surface.set_attr(avif, "srcset", Some(sources.avif.as_str()));
        }
        if let Some(webp) = self.elements.webp_source {
            surface.set_attr(webp, "srcset", Some(sources.webp.as_str()));
        }

        surface.set_attr(fields.link, "href", Some(project.link.as_str()));
        let link_display = if project.archived {
            Display::None
        } else {
            Display::Block
        };
        surface.set_display(fields.link, link_display);
    }

    /// Deferred half of `open`: measure, invert, and start the morph.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, engine: &mut TweenEngine) {
        if !self.needs_frame() {
            return;
        }
        let ModalElements {
            container,
            content,
            fields,
            ..
        } = self.elements;

        let target = surface.bounding_rect(content).unwrap_or(Rect::ZERO);
        self.session.target_geometry = Some(target);
        let inverse = Transform::morph_from(self.session.source_geometry, target);
        surface.set_transform(content, inverse);
        surface.set_style(content, StyleProp::Opacity, 1.0);
        debug!(
            source = ?self.session.source_geometry,
            target = ?target,
            scale_x = inverse.scale_x,
            scale_y = inverse.scale_y,
            "modal morph measured"
        );

        let m = &self.motion;
        let backdrop = engine.start(
            TweenSpec::new([container], m.backdrop())
                .track(StyleProp::Opacity, 0.0, 1.0)
                .label("modal-backdrop"),
            surface,
        );
        let morph = engine.start(
            TweenSpec::new([content], m.morph())
                .track(StyleProp::TranslateX, inverse.translate_x, 0.0)
                .track(StyleProp::TranslateY, inverse.translate_y, 0.0)
                .track(StyleProp::ScaleX, inverse.scale_x, 1.0)
                .track(StyleProp::ScaleY, inverse.scale_y, 1.0)
                .easing(Easing::Spring(SpringCurve::bouncy()))
                .label("modal-morph"),
            surface,
        );
        let fields = engine.start(
            TweenSpec::new(fields.all(), m.field())
                .track(StyleProp::Opacity, 0.0, 1.0)
                .track(StyleProp::TranslateY, m.field_offset_y, 0.0)
                .delay(m.field_delay())
                .stagger(m.field_stagger())
                .easing(Easing::EaseOutExpo)
                .label("modal-fields"),
            surface,
        );
        self.stage = Stage::Opening {
            batches: [backdrop, morph, fields].into_iter().collect(),
        };
    }

    /// Begin closing. Returns `false` if already closed or closing.
    pub fn close<S: Surface + ?Sized>(&mut self, surface: &mut S, engine: &mut TweenEngine) -> bool {
        match self.session.phase {
            ModalPhase::Closed | ModalPhase::Closing => return false,
            ModalPhase::Opening | ModalPhase::Open => {}
        }
        if let Stage::Opening { batches } = &self.stage {
            for batch in batches {
                engine.cancel_batch(*batch);
            }
        }
        let batch = engine.start(
            TweenSpec::new([self.elements.container], self.motion.close())
                .to(StyleProp::Opacity, 0.0)
                .easing(Easing::EaseInQuad)
                .label("modal-close"),
            surface,
        );
        info!(from = %self.session.phase, "modal closing");
        self.session.phase = ModalPhase::Closing;
        self.stage = Stage::Closing { batch };
        true
    }

    /// Escape closes the modal while it is opening or open.
    pub fn handle_escape<S: Surface + ?Sized>(&mut self, surface: &mut S, engine: &mut TweenEngine) -> bool {
        matches!(self.session.phase, ModalPhase::Opening | ModalPhase::Open) && self.close(surface, engine)
    }

    /// Clicks on the backdrop (not the panel) or the close button close the
    /// modal.
    pub fn handle_click<S: Surface + ?Sized>(
        &mut self,
        target: ElementId,
        surface: &mut S,
        engine: &mut TweenEngine,
    ) -> bool {
        let is_close = target == self.elements.container || Some(target) == self.elements.close_button;
        is_close && self.close(surface, engine)
    }

    /// Route an engine event. Events from other batches are ignored.
    pub fn on_tween_event<S: Surface + ?Sized>(&mut self, event: &TweenEvent, surface: &mut S) {
        let TweenEvent::BatchDone { batch: done, .. } = *event else {
            return;
        };
        match &mut self.stage {
            Stage::Opening { batches } => {
                if batches.remove(&done) && batches.is_empty() {
                    self.session.phase = ModalPhase::Open;
                    self.stage = Stage::Idle;
                    info!("modal open");
                }
            }
            Stage::Closing { batch } if *batch == done => self.finish_close(surface),
            _ => {}
        }
    }

    fn finish_close<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let ModalElements {
            container,
            content,
            fields,
            ..
        } = self.elements;
        surface.set_display(container, Display::None);
        surface.clear_styles(container);
        surface.clear_styles(content);
        for field in fields.all() {
            surface.clear_styles(field);
        }
        surface.set_scroll_locked(false);
        self.session = ModalSession::default();
        self.stage = Stage::Idle;
        info!("modal closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::SUBPIXEL_TOLERANCE;
    use folio_runtime::{HeadlessSurface, Placement};
    use std::time::Duration;

    struct Fixture {
        surface: HeadlessSurface,
        registry: CardRegistry,
        engine: TweenEngine,
        morph: ModalMorph,
        project: ProjectRecord,
    }

    fn fixture() -> Fixture {
        let mut surface = HeadlessSurface::new(1280.0, 800.0);
        let root = surface.root();
        let card = surface.insert(root, "project-card", Placement::Fixed(Rect::new(40.0, 300.0, 300.0, 200.0)));
        let container = surface.insert(root, "project-modal", Placement::Viewport(Rect::new(0.0, 0.0, 1280.0, 800.0)));
        surface.set_display(container, Display::None);
        let content = surface.insert(container, "modal-content", Placement::Viewport(Rect::new(240.0, 100.0, 800.0, 600.0)));
        let mut field = |class| surface.insert(content, class, Placement::Fixed(Rect::ZERO));
        let fields = ModalFields {
            image: field("modal-image"),
            title: field("modal-title"),
            category: field("modal-category"),
            description: field("modal-description"),
            tags: field("modal-tags"),
            link: field("modal-link"),
        };
        let close_button = surface.insert(content, "modal-close", Placement::Fixed(Rect::ZERO));
        let mut registry = CardRegistry::new();
        registry.register("Atlas", "Web", false, card, 0);
        let elements = ModalElements {
            container,
            content,
            fields,
            avif_source: None,
            webp_source: None,
            close_button: Some(close_button),
        };
        Fixture {
            surface,
            registry,
            engine: TweenEngine::new(),
            morph: ModalMorph::new(elements, ModalMotion::default()),
            project: ProjectRecord {
                title: "Atlas".into(),
                category: "Web".into(),
                tags: vec!["rust".into(), "wasm".into()],
                picture: "img/atlas".into(),
                link: "https://example.com/atlas".into(),
                ..Default::default()
            },
        }
    }

    impl Fixture {
        fn open(&mut self) -> Result<(), MorphError> {
            let card = self.registry.by_key("atlas").unwrap();
            self.morph.open(card, &self.registry, &self.project, &mut self.surface)
        }

        fn frame(&mut self, dt: Duration) {
            for event in self.engine.tick(dt, &mut self.surface) {
                self.morph.on_tween_event(&event, &mut self.surface);
            }
            self.morph.on_frame(&mut self.surface, &mut self.engine);
        }
    }

    #[test]
    fn open_populates_and_locks_scroll() {
        let mut f = fixture();
        f.open().unwrap();
        let fields = f.morph.elements().fields;
        assert_eq!(f.surface.text(fields.title), Some("Atlas"));
        assert_eq!(f.surface.text(fields.tags), Some("rust, wasm"));
        assert_eq!(f.surface.attr(fields.image, "src").as_deref(), Some("img/atlas.jpg"));
        assert_eq!(f.surface.display(fields.link), Display::Block);
        assert!(f.surface.is_scroll_locked());
        assert_eq!(f.morph.phase(), ModalPhase::Opening);
        assert!(f.morph.needs_frame());
    }

    #[test]
    fn archived_projects_hide_the_link() {
        let mut f = fixture();
        f.project.archived = true;
        f.open().unwrap();
        assert_eq!(f.surface.display(f.morph.elements().fields.link), Display::None);
    }

    #[test]
    fn inverse_transform_covers_the_card() {
        let mut f = fixture();
        f.open().unwrap();
        f.frame(Duration::ZERO);
        let content = f.morph.elements().content;
        let rendered = f.surface.bounding_rect(content).unwrap();
        assert!(rendered.approx_eq(&Rect::new(40.0, 300.0, 300.0, 200.0), SUBPIXEL_TOLERANCE));
        assert_eq!(f.morph.session().target_geometry, Some(Rect::new(240.0, 100.0, 800.0, 600.0)));
    }

    #[test]
    fn opening_completes_then_closes() {
        let mut f = fixture();
        f.open().unwrap();
        for _ in 0..120 {
            f.frame(Duration::from_millis(16));
        }
        assert_eq!(f.morph.phase(), ModalPhase::Open);
        let content = f.morph.elements().content;
        assert!(f.surface.transform(content).is_identity());

        assert!(f.morph.close(&mut f.surface, &mut f.engine));
        assert!(!f.morph.close(&mut f.surface, &mut f.engine));
        for _ in 0..30 {
            f.frame(Duration::from_millis(16));
        }
        assert_eq!(f.morph.phase(), ModalPhase::Closed);
        assert_eq!(f.surface.display(f.morph.elements().container), Display::None);
        assert!(!f.surface.is_scroll_locked());
    }

    #[test]
    fn second_open_is_rejected() {
        let mut f = fixture();
        f.open().unwrap();
        assert_eq!(f.open(), Err(MorphError::Busy(ModalPhase::Opening)));
    }

    #[test]
    fn missing_element_aborts_open() {
        let mut f = fixture();
        f.morph.elements.fields.tags = ElementId::new(999);
        assert_eq!(f.open(), Err(MorphError::MissingElement("tags")));
        assert_eq!(f.morph.phase(), ModalPhase::Closed);
        assert!(!f.surface.is_scroll_locked());
    }

    #[test]
    fn clicks_on_panel_do_not_close() {
        let mut f = fixture();
        f.open().unwrap();
        f.frame(Duration::ZERO);
        let ModalElements { content, container, .. } = *f.morph.elements();
        assert!(!f.morph.handle_click(content, &mut f.surface, &mut f.engine));
        assert!(f.morph.handle_click(container, &mut f.surface, &mut f.engine));
        assert_eq!(f.morph.phase(), ModalPhase::Closing);
    }

    #[test]
    fn escape_is_ignored_when_closed() {
        let mut f = fixture();
        assert!(!f.morph.handle_escape(&mut f.surface, &mut f.engine));
    }
}
