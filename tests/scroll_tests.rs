// Host-side tests for the damped wheel sampler and the scroll camera path.

use lob_core::constants::{SCROLL_DAMPING, WHEEL_DELTA_SCALE};
use lob_core::{CameraPose, Scene, SceneField, ScrollPath, ScrollSampler, Section};
use std::cell::RefCell;
use std::rc::Rc;

/// Deterministic wheel deltas in [-2000, 2000).
fn wheel_deltas(seed: u32, n: usize) -> Vec<f32> {
    let mut x = seed;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x % 4000) as f32 - 2000.0
        })
        .collect()
}

#[test]
fn progress_stays_in_unit_range_for_any_wheel_sequence() {
    for seed in [1u32, 7, 42, 1234] {
        let mut s = ScrollSampler::default();
        for (i, d) in wheel_deltas(seed, 500).into_iter().enumerate() {
            s.on_wheel(d * 10.0, Section::Hero);
            if i % 3 == 0 {
                s.on_wheel(f32::NAN, Section::Hero);
                s.on_wheel(f32::INFINITY, Section::Hero);
            }
            let sample = s.tick();
            assert!((0.0..=1.0).contains(&s.target()));
            assert!((0.0..=1.0).contains(&sample.offset));
        }
    }
}

#[test]
fn offset_converges_monotonically_without_input() {
    let mut s = ScrollSampler::default();
    assert!(s.on_wheel(2000.0, Section::Hero));
    let target = s.target();
    assert!((target - 2000.0 * WHEEL_DELTA_SCALE).abs() < 1e-6);

    let mut prev = s.current();
    for _ in 0..300 {
        let sample = s.tick();
        assert!(sample.offset >= prev, "offset went backwards");
        assert!(sample.offset <= target + 1e-6, "offset overshot");
        assert!((sample.velocity - (sample.offset - prev)).abs() < 1e-6);
        prev = sample.offset;
    }
    assert!((prev - target).abs() < 1e-4);
}

#[test]
fn one_tick_covers_the_damping_fraction() {
    let mut s = ScrollSampler::default();
    s.set_target(0.5);
    let sample = s.tick();
    assert!((sample.offset - 0.5 * SCROLL_DAMPING).abs() < 1e-6);
}

#[test]
fn wheel_is_ignored_in_terminal_overlay_sections() {
    let mut s = ScrollSampler::default();
    for section in [Section::Shop, Section::Schedule, Section::Words] {
        assert!(!s.on_wheel(500.0, section));
        assert_eq!(s.target(), 0.0);
    }
    assert!(s.on_wheel(500.0, Section::ShopTransition));
    assert!(s.target() > 0.0);
}

#[test]
fn reset_jumps_without_velocity() {
    let mut s = ScrollSampler::default();
    s.set_target(0.9);
    for _ in 0..50 {
        s.tick();
    }
    s.reset(0.0);
    let sample = s.tick();
    assert_eq!(sample.offset, 0.0);
    assert_eq!(sample.velocity, 0.0);
}

#[test]
fn held_target_reaches_court_once_within_bounded_ticks() {
    let mut scene = Scene::default();
    let sections = Rc::new(RefCell::new(Vec::new()));
    let seen = sections.clone();
    scene.store_mut().subscribe(move |field, state| {
        if field == SceneField::CurrentSection {
            seen.borrow_mut().push(state.current_section);
        }
    });

    // 750 px of wheel → target 0.3
    assert!(scene.on_wheel(750.0));
    let mut converged_at = None;
    for tick in 1..=200 {
        scene.tick(1.0 / 60.0);
        let p = scene.store().state().scroll_progress;
        if converged_at.is_none() && (p - 0.3).abs() < 1e-3 {
            converged_at = Some(tick);
        }
    }
    let converged_at = converged_at.expect("scroll progress converged");
    assert!(converged_at <= 80, "took {converged_at} ticks");
    assert_eq!(*sections.borrow(), vec![Section::Court]);
    assert_eq!(scene.store().state().current_section, Section::Court);
}

#[test]
fn scroll_path_starts_at_hero_and_is_continuous() {
    let path = ScrollPath::default();
    assert_eq!(path.sample(0.0), path.keyframes()[0]);
    assert_eq!(path.sample(0.0).position, CameraPose::HERO.position);
    let last = *path.keyframes().last().expect("keyframes");
    assert!(path.sample(1.0).position.distance(last.position) < 1e-5);
    assert!(path.sample(1.0).look_at.distance(last.look_at) < 1e-5);

    let mut prev = path.sample(0.0);
    for i in 1..=1000 {
        let pose = path.sample(i as f32 / 1000.0);
        assert!(pose.position.distance(prev.position) < 0.2, "jump at {i}");
        prev = pose;
    }
}

#[test]
fn scroll_path_needs_two_keyframes() {
    let err = ScrollPath::new([CameraPose::HERO], lob_core::Ease::Linear).unwrap_err();
    assert_eq!(err, lob_core::ConfigError::ShortScrollPath(1));
}
