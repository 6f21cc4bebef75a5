//! Property-based invariant tests for layout and animation helpers.
//!
//! 1. Clamped displacement always lands between rest and hidden.
//! 2. Visible fraction stays within [0.0, 1.0].
//! 3. Keyboard offset is respected whenever the keyboard is visible.
//! 4. Scaled durations never exceed the full duration.
//! 5. A timed animation always ends exactly on its target.

use std::time::Duration;

use modalbox_core::{
    AnimationDriver, AnimationEvent, Easing, Edge, FrameDriver, Layout, Placement, TimedDriver,
    Viewport, scaled_duration,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn placement() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::Top),
        Just(Placement::Center),
        Just(Placement::Bottom)
    ]
}

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![Just(Edge::Top), Just(Edge::Bottom)]
}

fn easing() -> impl Strategy<Value = Easing> {
    prop_oneof![
        Just(Easing::Linear),
        Just(Easing::EaseOut),
        Just(Easing::EaseIn)
    ]
}

fn between(value: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value >= lo - 1e-9 && value <= hi + 1e-9
}

proptest! {
    #[test]
    fn displacement_stays_on_segment(
        container in 0.0f64..2000.0,
        modal in 0.0f64..2000.0,
        placement in placement(),
        entry in edge(),
        displacement in -5000.0f64..5000.0,
    ) {
        let layout = Layout::resolve(Viewport::new(container, modal), placement, entry, 0.0);
        let y = layout.y_at_displacement(displacement);
        prop_assert!(
            between(y, layout.rest_y(), layout.hidden_y()),
            "y {} outside [{}, {}]", y, layout.rest_y(), layout.hidden_y()
        );
    }

    #[test]
    fn visible_fraction_in_unit_range(
        container in 0.0f64..2000.0,
        modal in 0.0f64..2000.0,
        placement in placement(),
        entry in edge(),
        y in -5000.0f64..5000.0,
    ) {
        let layout = Layout::resolve(Viewport::new(container, modal), placement, entry, 0.0);
        let fraction = layout.visible_fraction(y);
        prop_assert!((0.0..=1.0).contains(&fraction));
    }

    #[test]
    fn keyboard_offset_respected(
        container in 100.0f64..2000.0,
        modal in 0.0f64..2000.0,
        keyboard in 1.0f64..800.0,
        offset in 0.0f64..60.0,
        placement in placement(),
        entry in edge(),
    ) {
        let viewport = Viewport::new(container, modal).with_keyboard(keyboard);
        let layout = Layout::resolve(viewport, placement, entry, offset);
        prop_assert!(layout.rest_y() >= offset);
    }

    #[test]
    fn scaled_duration_bounded(full_ms in 0u64..5000, remaining in -2.0f64..3.0) {
        let full = Duration::from_millis(full_ms);
        prop_assert!(scaled_duration(full, remaining) <= full);
    }

    #[test]
    fn timed_animation_ends_on_target(
        from in -1000.0f64..1000.0,
        to in -1000.0f64..1000.0,
        duration_ms in 0u64..1000,
        step_ms in 1u64..50,
        easing in easing(),
    ) {
        let mut driver = TimedDriver::new();
        let handle = driver.start(from, to, Duration::from_millis(duration_ms), easing);
        let mut last = None;
        let mut completions = 0;
        for _ in 0..2000 {
            for event in driver.tick(Duration::from_millis(step_ms)) {
                prop_assert_eq!(event.handle(), handle);
                match event {
                    AnimationEvent::Frame { position, .. } => last = Some(position),
                    AnimationEvent::Complete { .. } => completions += 1,
                }
            }
            if driver.live() == 0 {
                break;
            }
        }
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(last, Some(to));
    }
}
