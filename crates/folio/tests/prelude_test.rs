//! The prelude alone is enough to mount a page and drive it.

use std::time::Duration;

use folio::prelude::*;
use folio::{GridSpec, HeadlessSurface, MemoryThemeStore, Placement};
use folio::widgets::data::ProjectRecord;
use pretty_assertions::assert_eq;

#[test]
fn mount_filter_and_settle_through_the_facade() {
    let mut surface = HeadlessSurface::new(1024.0, 768.0);
    let root = surface.root();
    let projects = surface.insert(root, "projects-container", Placement::Fixed(Rect::ZERO));
    surface.set_grid(
        projects,
        GridSpec {
            origin_x: 0.0,
            origin_y: 0.0,
            columns: 3,
            cell_width: 300.0,
            cell_height: 200.0,
            gap: 16.0,
        },
    );
    let web = surface.insert(root, "filter-btn", Placement::Fixed(Rect::ZERO));

    let data = DataSet {
        projects: ["Web", "Game", "Web + Mobile"]
            .into_iter()
            .enumerate()
            .map(|(i, category)| ProjectRecord {
                title: format!("P{i}"),
                category: category.to_owned(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    let elements = PageElements {
        projects: Some(projects),
        filter_buttons: vec![(web, Filter::parse("web"))],
        ..Default::default()
    };

    let mut page: Page<HeadlessSurface> = Page::mount(
        surface,
        elements,
        data,
        MotionConfig::default(),
        MemoryThemeStore::default(),
        HostPrefs::default(),
    );
    page.handle(PageEvent::FilterClick(web));
    page.settle(Duration::from_millis(16), Duration::from_secs(5));

    let shown: Vec<_> = page
        .registry()
        .iter()
        .filter(|(_, c)| c.visible)
        .map(|(_, c)| c.key.clone())
        .collect();
    assert_eq!(shown, vec!["p0".to_owned(), "p2".to_owned()]);
    assert_eq!(page.theme(), Theme::Light);
    assert_eq!(page.modal_phase(), ModalPhase::Closed);
}
