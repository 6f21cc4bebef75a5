//! Benchmark: per-frame cost of the modal state machine.
//!
//! Run with: `cargo bench -p modalbox --bench modal_bench`
//!
//! Measures a full open/close cycle driven at 60 fps, a swipe with pointer
//! moves every frame, the release decision, and the facade fan-out of a registry tick.

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use modalbox::{
    Modal, ModalConfig, ModalController, ModalRegistry, SwipeDecisionPolicy, TimedDriver, Viewport,
};
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);

fn controller(start_open: bool) -> ModalController {
    ModalController::new(
        ModalConfig::default().start_open(start_open),
        Viewport::new(800.0, 300.0),
        TimedDriver::new(),
    )
    .expect("valid config")
}

// ===========================================================================
// Programmatic transitions
// ===========================================================================

fn bench_open_close_cycle(c: &mut Criterion) {
    c.bench_function("open_close_cycle_60fps", |b| {
        let mut modal = controller(false);
        b.iter(|| {
            modal.open();
            for _ in 0..26 {
                black_box(modal.tick(FRAME));
            }
            modal.close();
            for _ in 0..26 {
                black_box(modal.tick(FRAME));
            }
            black_box(modal.frame())
        });
    });
}

// ===========================================================================
// Swipe
// ===========================================================================

fn bench_swipe(c: &mut Criterion) {
    c.bench_function("swipe_close_and_reopen", |b| {
        let mut modal = controller(true);
        b.iter(|| {
            let t = Instant::now();
            let y = modal.position();
            modal.pointer_down(y + 10.0, t);
            for step in 1..=12u32 {
                modal.pointer_move(y + 10.0 + f64::from(step) * 12.0, t + FRAME * step);
            }
            modal.pointer_up(y + 160.0, t + FRAME * 13);
            for _ in 0..26 {
                modal.tick(FRAME);
            }
            modal.open();
            for _ in 0..26 {
                modal.tick(FRAME);
            }
            black_box(modal.state())
        });
    });
}

fn bench_decide(c: &mut Criterion) {
    let policy = SwipeDecisionPolicy::new(50.0);
    c.bench_function("swipe_decide", |b| {
        b.iter(|| {
            let mut closes = 0u32;
            for i in 0..128 {
                let d = f64::from(i) - 32.0;
                let v = f64::from(i % 16) * 0.1;
                if policy.decide(black_box(d), black_box(v), 1.0)
                    == modalbox::SwipeDecision::ContinueClose
                {
                    closes += 1;
                }
            }
            closes
        });
    });
}

// ===========================================================================
// Registry
// ===========================================================================

fn bench_registry_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_tick");
    for count in [1usize, 8, 64] {
        group.bench_function(format!("{count}_modals"), |b| {
            let mut registry = ModalRegistry::new();
            for _ in 0..count {
                let modal = Modal::new(ModalConfig::default(), Viewport::new(800.0, 300.0))
                    .expect("valid config");
                let id = registry.mount(modal);
                registry.open_id(id).expect("no hooks installed");
            }
            b.iter(|| black_box(registry.tick(FRAME)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_open_close_cycle,
    bench_swipe,
    bench_decide,
    bench_registry_tick
);
criterion_main!(benches);
