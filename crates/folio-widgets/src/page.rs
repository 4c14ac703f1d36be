#![forbid(unsafe_code)]

//! The page controller.
//!
//! [`Page::mount`] is the DOM-ready step: it builds cards from the data set,
//! wires every controller to its elements and plays the entrance. After
//! that the host forwards input through [`Page::handle`] and drives time
//! through [`Page::tick`].
//!
//! # Event routing
//!
//! Engine events go to the filter reconciler and the modal morph only. The
//! effects own their own timers and never see engine events.
//!
//! # Failure Modes
//!
//! Missing optional elements disable the feature that needs them with a
//! `warn` event. Nothing here returns an error to the host.

use std::path::Path;
use std::time::Duration;

use folio_runtime::{ElementId, MotionConfig, Surface, TweenEngine};
use tracing::{debug, info, warn};

use crate::data::{DataSet, PartnerMedia, PartnerRecord, SocialRecord};
use crate::effects::{EntranceTargets, ImageCycler, Magnetic, Typewriter, play_entrance};
use crate::error::{FolioError, Result};
use crate::filter::{Filter, FilterOutcome, FilterReconciler};
use crate::morph::{ModalElements, ModalMorph, ModalPhase};
use crate::nav::MobileMenu;
use crate::registry::CardRegistry;
use crate::scroll::{ScrollController, ScrollElements};
use crate::theme::{MemoryThemeStore, Theme, ThemeStore, ThemeSwitch};

/// Class marking the selected filter button.
pub const ACTIVE_FILTER_CLASS: &str = "active";

/// Expansions cycled by the typewriter in the hero.
pub const LMF_MEANINGS: [&str; 5] = [
    "Logge's Modern Frontier",
    "Logge's Media Factory",
    "Learning Made Fun",
    "Limitless Mind Factory",
    "Let's Make Future",
];

/// Handles to the host's static markup. Every field is optional in effect:
/// empty lists and `None` simply disable the feature.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub projects: Option<ElementId>,
    pub partners: Option<ElementId>,
    pub socials: Option<ElementId>,
    /// Filter buttons with the filter each one selects.
    pub filter_buttons: Vec<(ElementId, Filter)>,
    pub modal: Option<ModalElements>,
    pub menu: Option<MobileMenu>,
    pub scroll: ScrollElements,
    pub typewriter: Option<ElementId>,
    pub profile_images: Vec<ElementId>,
    pub magnetic: Vec<ElementId>,
    pub hero_text: Vec<ElementId>,
    pub hero_image: Vec<ElementId>,
    pub skill_tags: Vec<ElementId>,
    pub year: Option<ElementId>,
}

impl PageElements {
    /// Fails with the first referenced element the surface does not have.
    pub fn check<S: Surface + ?Sized>(&self, surface: &S) -> Result<()> {
        let named = [
            ("projects container", self.projects),
            ("partners container", self.partners),
            ("socials container", self.socials),
            ("typewriter", self.typewriter),
            ("footer year", self.year),
        ];
        for (name, el) in named {
            if el.is_some_and(|el| !surface.contains(el)) {
                return Err(FolioError::MissingElement(name));
            }
        }
        if let Some(name) = self.modal.and_then(|modal| modal.first_missing(surface)) {
            return Err(FolioError::MissingElement(name));
        }
        Ok(())
    }
}

/// Load a motion config, choosing JSON for `.json` files and TOML otherwise.
pub fn load_motion_config(path: impl AsRef<Path>) -> Result<MotionConfig> {
    let path = path.as_ref();
    let config = if path.extension().is_some_and(|ext| ext == "json") {
        MotionConfig::from_json_file(path)?
    } else {
        MotionConfig::from_toml_file(path)?
    };
    Ok(config)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Input forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// A filter button was clicked.
    FilterClick(ElementId),
    /// A project card was clicked.
    CardClick(ElementId),
    /// The modal's close button was clicked.
    ModalCloseClick,
    /// Any click, with its target. Used for backdrop detection.
    Click(ElementId),
    Key(Key),
    /// The host has already updated the scroll offset.
    Scroll,
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    MenuToggle,
    NavLinkClick,
    ThemeToggle,
}

/// Host-side facts that are not elements.
#[derive(Debug, Clone, Default)]
pub struct HostPrefs {
    pub system_prefers_dark: Option<bool>,
    /// Typewriter phrases; empty uses [`LMF_MEANINGS`].
    pub meanings: Vec<String>,
}

/// Everything on the page, mounted over one surface.
#[derive(Debug)]
pub struct Page<S: Surface, T: ThemeStore = MemoryThemeStore> {
    surface: S,
    engine: TweenEngine,
    config: MotionConfig,
    data: DataSet,
    registry: CardRegistry,
    reconciler: FilterReconciler,
    morph: Option<ModalMorph>,
    filter_buttons: Vec<(ElementId, Filter)>,
    menu: Option<MobileMenu>,
    scroll: ScrollController,
    theme: ThemeSwitch<T>,
    typewriter: Option<(ElementId, Typewriter)>,
    cycler: ImageCycler,
    magnetic: Magnetic,
    partner_cards: Vec<ElementId>,
    social_links: Vec<ElementId>,
    year: Option<ElementId>,
}

impl<S: Surface, T: ThemeStore> Page<S, T> {
    /// Build the page and start the entrance animation.
    pub fn mount(
        mut surface: S,
        elements: PageElements,
        data: DataSet,
        config: MotionConfig,
        theme_store: T,
        prefs: HostPrefs,
    ) -> Self {
        let config = checked_config(config).effective();
        if let Err(err) = elements.check(&surface) {
            warn!(error = %err, "page markup incomplete");
        }
        let root = surface.document_root();
        let theme = ThemeSwitch::init(root, theme_store, prefs.system_prefers_dark, &mut surface);

        let registry = match elements.projects {
            Some(container) => CardRegistry::from_projects(&data.projects, container, &mut surface),
            None => {
                warn!("no projects container; gallery disabled");
                CardRegistry::new()
            }
        };
        let partner_cards = match elements.partners {
            Some(container) => create_partner_cards(data.visible_partners(), container, &mut surface),
            None => Vec::new(),
        };
        let social_links = match elements.socials {
            Some(container) => create_social_links(&data.socials, container, &mut surface),
            None => Vec::new(),
        };

        let morph = elements
            .modal
            .map(|modal| ModalMorph::new(modal, config.modal.clone()));

        let typewriter = elements.typewriter.map(|el| {
            let typewriter = if prefs.meanings.is_empty() {
                Typewriter::new(LMF_MEANINGS, &config.effects)
            } else {
                Typewriter::new(&prefs.meanings, &config.effects)
            };
            (el, typewriter)
        });
        let cycler = ImageCycler::new(elements.profile_images.clone(), config.effects.cycle(), &surface);
        let magnetic = Magnetic::new(elements.magnetic.iter().copied(), config.effects.magnetic_strength);

        let mut page = Self {
            surface,
            engine: TweenEngine::new(),
            reconciler: FilterReconciler::new(config.filter.clone()),
            scroll: ScrollController::new(elements.scroll.clone(), config.effects.clone()),
            config,
            data,
            registry,
            morph,
            filter_buttons: elements.filter_buttons.clone(),
            menu: elements.menu.clone(),
            theme,
            typewriter,
            cycler,
            magnetic,
            partner_cards,
            social_links,
            year: elements.year,
        };

        let targets = EntranceTargets {
            hero_text: elements.hero_text,
            hero_image: elements.hero_image,
            skill_tags: elements.skill_tags,
            project_cards: page.registry.elements(),
            partner_cards: page.partner_cards.clone(),
            social_links: page.social_links.clone(),
        };
        play_entrance(
            &targets,
            &page.config.effects.entrance,
            &mut page.surface,
            &mut page.engine,
        );
        page.scroll.watch(
            page.registry
                .elements()
                .into_iter()
                .chain(page.partner_cards.iter().copied())
                .chain(page.social_links.iter().copied()),
        );
        page.scroll.on_scroll(&mut page.surface, &mut page.engine);
        info!(
            projects = page.registry.len(),
            partners = page.partner_cards.len(),
            socials = page.social_links.len(),
            theme = ?page.theme.theme(),
            "page mounted"
        );
        page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn engine(&self) -> &TweenEngine {
        &self.engine
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn data(&self) -> &DataSet {
        &self.data
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn active_filter(&self) -> &Filter {
        self.reconciler.active()
    }

    pub fn is_filtering(&self) -> bool {
        self.reconciler.is_transitioning()
    }

    pub fn modal_phase(&self) -> ModalPhase {
        self.morph.as_ref().map_or(ModalPhase::Closed, ModalMorph::phase)
    }

    pub fn modal(&self) -> Option<&ModalMorph> {
        self.morph.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn partner_cards(&self) -> &[ElementId] {
        &self.partner_cards
    }

    pub fn social_links(&self) -> &[ElementId] {
        &self.social_links
    }

    /// Write the footer year, if the page has one.
    pub fn set_year(&mut self, year: i32) {
        if let Some(el) = self.year {
            self.surface.set_text(el, &year.to_string());
        }
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::FilterClick(button) => self.on_filter_click(button),
            PageEvent::CardClick(card) => self.on_card_click(card),
            PageEvent::ModalCloseClick => {
                if let Some(morph) = &mut self.morph {
                    morph.close(&mut self.surface, &mut self.engine);
                }
            }
            PageEvent::Click(target) => {
                if let Some(morph) = &mut self.morph {
                    morph.handle_click(target, &mut self.surface, &mut self.engine);
                }
            }
            PageEvent::Key(Key::Escape) => {
                if let Some(morph) = &mut self.morph {
                    morph.handle_escape(&mut self.surface, &mut self.engine);
                }
            }
            PageEvent::Key(Key::Other) => {}
            PageEvent::Scroll => self.scroll.on_scroll(&mut self.surface, &mut self.engine),
            PageEvent::PointerMove { x, y } => self.magnetic.pointer_moved(x, y, &self.surface),
            PageEvent::PointerLeave => self.magnetic.pointer_left(),
            PageEvent::MenuToggle => {
                if let Some(menu) = &self.menu {
                    let open = menu.toggle(&mut self.surface);
                    debug!(open, "mobile menu toggled");
                }
            }
            PageEvent::NavLinkClick => {
                if let Some(menu) = &self.menu {
                    menu.close(&mut self.surface);
                }
            }
            PageEvent::ThemeToggle => {
                self.theme.toggle(&mut self.surface);
            }
        }
    }

    fn on_filter_click(&mut self, button: ElementId) {
        let Some(filter) = self
            .filter_buttons
            .iter()
            .find(|(el, _)| *el == button)
            .map(|(_, f)| f.clone())
        else {
            warn!(%button, "click on unknown filter button");
            return;
        };
        let outcome = self
            .reconciler
            .apply_filter(filter, &mut self.registry, &mut self.surface, &mut self.engine);
        if matches!(outcome, FilterOutcome::Unchanged) {
            return;
        }
        for (el, _) in &self.filter_buttons {
            self.surface.set_class(*el, ACTIVE_FILTER_CLASS, *el == button);
        }
    }

    fn on_card_click(&mut self, element: ElementId) {
        let Some(morph) = &mut self.morph else {
            return;
        };
        let Some(card) = self.registry.by_element(element) else {
            warn!(%element, "click on unknown card");
            return;
        };
        let Some(project) = self
            .registry
            .get(card)
            .and_then(|c| self.data.projects.get(c.project))
        else {
            warn!(%card, "card has no backing project");
            return;
        };
        if let Err(err) = morph.open(card, &self.registry, project, &mut self.surface) {
            debug!(%card, error = %err, "modal not opened");
        }
    }

    /// Advance time by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        let events = self.engine.tick(dt, &mut self.surface);
        for event in &events {
            self.reconciler
                .on_tween_event(event, &mut self.registry, &mut self.surface, &mut self.engine);
            if let Some(morph) = &mut self.morph {
                morph.on_tween_event(event, &mut self.surface);
            }
        }
        if let Some(morph) = &mut self.morph {
            morph.on_frame(&mut self.surface, &mut self.engine);
        }

        if let Some((el, typewriter)) = &mut self.typewriter {
            if let Some(markup) = typewriter.tick(dt) {
                self.surface.set_text(*el, &markup);
            }
        }
        self.cycler.tick(dt, &mut self.surface);
        self.magnetic.tick(dt, &mut self.surface);
    }

    /// Tick in fixed frames until the engine is idle and no choreography is
    /// pending, or `limit` elapses. Returns the time advanced.
    pub fn settle(&mut self, frame: Duration, limit: Duration) -> Duration {
        let mut elapsed = Duration::ZERO;
        while elapsed < limit {
            let pending = self.morph.as_ref().is_some_and(ModalMorph::needs_frame);
            if self.engine.is_idle() && !pending && !self.reconciler.is_transitioning() {
                break;
            }
            self.tick(frame);
            elapsed += frame;
        }
        elapsed
    }
}

fn checked_config(config: MotionConfig) -> MotionConfig {
    let errors = config.validate();
    if errors.is_empty() {
        return config;
    }
    for error in &errors {
        warn!(%error, "invalid motion config");
    }
    MotionConfig {
        reduced_motion: config.reduced_motion,
        ..MotionConfig::default()
    }
}

fn create_partner_cards<'a, S: Surface + ?Sized>(
    partners: impl Iterator<Item = &'a PartnerRecord>,
    container: ElementId,
    surface: &mut S,
) -> Vec<ElementId> {
    let mut cards = Vec::new();
    for partner in partners {
        let Some(card) = surface.append_child(container, "partner-card") else {
            warn!(title = %partner.title, "failed to create partner card");
            continue;
        };
        match partner.media() {
            PartnerMedia::Video(src) => {
                if let Some(video) = surface.append_child(card, "partner-logo partner-video") {
                    surface.set_attr(video, "src", Some(src.as_str()));
                }
            }
            PartnerMedia::Svg(src) => {
                if let Some(img) = surface.append_child(card, "partner-logo partner-image") {
                    surface.set_attr(img, "src", Some(src.as_str()));
                    surface.set_attr(img, "alt", Some(partner.title.as_str()));
                }
            }
            PartnerMedia::Picture(sources) => {
                if let Some(picture) = surface.append_child(card, "partner-logo partner-picture") {
                    surface.set_attr(picture, "data-avif", Some(sources.avif.as_str()));
                    surface.set_attr(picture, "data-webp", Some(sources.webp.as_str()));
                    surface.set_attr(picture, "src", Some(sources.fallback.as_str()));
                    surface.set_attr(picture, "alt", Some(partner.title.as_str()));
                }
            }
            PartnerMedia::None => {}
        }
        append_text(surface, card, "partner-title", &partner.title);
        append_text(surface, card, "partner-description", &partner.description);
        if let Some(link) = append_text(surface, card, "partner-link", "Visit Website") {
            surface.set_attr(link, "href", Some(partner.link.as_str()));
            surface.set_attr(link, "target", Some("_blank"));
        }
        cards.push(card);
    }
    cards
}

fn create_social_links<S: Surface + ?Sized>(
    socials: &[SocialRecord],
    container: ElementId,
    surface: &mut S,
) -> Vec<ElementId> {
    let mut links = Vec::new();
    for social in socials {
        let Some(link) = surface.append_child(container, "social-link") else {
            warn!(id = %social.id, "failed to create social link");
            continue;
        };
        surface.set_attr(link, "href", Some(social.link.as_str()));
        surface.set_attr(link, "target", Some("_blank"));
        surface.append_child(link, social.icon().class());
        append_text(surface, link, "social-link-title", &social.title);
        append_text(surface, link, "social-link-description", &social.description);
        links.push(link);
    }
    links
}

fn append_text<S: Surface + ?Sized>(
    surface: &mut S,
    parent: ElementId,
    class: &str,
    text: &str,
) -> Option<ElementId> {
    let el = surface.append_child(parent, class)?;
    surface.set_text(el, text);
    Some(el)
}
