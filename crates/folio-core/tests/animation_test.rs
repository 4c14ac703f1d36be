//! Integration tests for the animation module.

use folio_core::animation::*;
use folio_core::geometry::{Rect, SUBPIXEL_TOLERANCE, Transform};
use proptest::prelude::*;
use std::time::Duration;

const MS_16: Duration = Duration::from_millis(16);

#[test]
fn frame_ticks_complete_tween() {
    let mut tween = Tween::new(Duration::from_millis(600)).easing(Easing::EaseOutExpo);
    let mut frames = 0;
    while !tween.is_complete() {
        tween.tick(MS_16);
        frames += 1;
    }
    assert_eq!(frames, 38, "600ms at 16ms frames");
    assert_eq!(tween.value(), 1.0);
}

#[test]
fn easing_functions_are_monotonic() {
    let curves = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutExpo,
        Easing::Spring(SpringCurve::critical()),
    ];
    for easing in curves {
        let mut prev = 0.0f64;
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let v = easing.apply(t);
            assert!(v >= prev - 0.001, "{easing:?} should be monotonic at t={t}");
            prev = v;
        }
    }
}

#[test]
fn staggered_tweens_finish_in_order() {
    let stagger = Stagger::new(Duration::from_millis(60));
    let mut tweens: Vec<Tween> = stagger
        .offsets(3)
        .into_iter()
        .map(|offset| Tween::new(Duration::from_millis(600)).delay(offset))
        .collect();

    for t in &mut tweens {
        t.tick(Duration::from_millis(620));
    }
    let done: Vec<bool> = tweens.iter().map(Animation::is_complete).collect();
    assert_eq!(done, vec![true, false, false]);
}

proptest! {
    #[test]
    fn morph_transform_always_lands_on_source(
        sx in -500.0f64..1500.0, sy in -500.0f64..1500.0,
        sw in 1.0f64..800.0, sh in 1.0f64..800.0,
        tx in -500.0f64..1500.0, ty in -500.0f64..1500.0,
        tw in 1.0f64..1200.0, th in 1.0f64..900.0,
    ) {
        let source = Rect::new(sx, sy, sw, sh);
        let target = Rect::new(tx, ty, tw, th);
        let rendered = Transform::morph_from(source, target).apply(target);
        prop_assert!(rendered.approx_eq(&source, SUBPIXEL_TOLERANCE));
    }

    #[test]
    fn flip_inversion_restores_first(
        fx in -2000.0f64..2000.0, fy in -2000.0f64..2000.0,
        lx in -2000.0f64..2000.0, ly in -2000.0f64..2000.0,
        w in 1.0f64..600.0, h in 1.0f64..600.0,
    ) {
        let first = Rect::new(fx, fy, w, h);
        let last = Rect::new(lx, ly, w, h);
        let rendered = Transform::invert(first, last).apply(last);
        prop_assert!(rendered.approx_eq(&first, SUBPIXEL_TOLERANCE));
    }

    #[test]
    fn tween_value_bounded_for_monotone_curves(ms in 0u64..2000) {
        let mut tween = Tween::new(Duration::from_millis(800))
            .delay(Duration::from_millis(200))
            .easing(Easing::EaseOutExpo);
        tween.tick(Duration::from_millis(ms));
        let v = tween.value();
        prop_assert!((0.0..=1.0).contains(&v));
    }
}
