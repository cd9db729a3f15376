//! Benchmarks for registry lookups.
//!
//! Measures cached lookups against the scan performed on a cache miss, for
//! both backends and a growing number of stored types.
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use typereg::builtins::{CharSequence, Float, Integer, Number};
use typereg::prelude::*;
use typereg::{Backend, ValueRegistry};

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

/// Fill a registry with `count` of the builtin value types.
fn populate<R: Typed, B: Backend>(registry: &ValueRegistry<R, B>, count: usize) {
    for i in 0..count {
        let _ = match i {
            0 => registry.put(1i8),
            1 => registry.put(1i16),
            2 => registry.put(1i32),
            3 => registry.put(1u64),
            4 => registry.put(1.0f64),
            5 => registry.put(String::from("text")),
            6 => registry.put(true),
            7 => registry.put('c'),
            8 => registry.put(1u8),
            _ => registry.put(i),
        };
    }
}

fn bench_lookups(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("value_lookup");

    for count in [1usize, 5, 10] {
        let local = LocalValueRegistry::new();
        populate(&local, count);

        group.bench_with_input(BenchmarkId::new("local_cached", count), &count, |b, _| {
            b.iter(|| {
                let found = local.get_or_none::<i8>();
                end_profiling_frame();
                black_box(found)
            })
        });

        group.bench_with_input(BenchmarkId::new("local_miss", count), &count, |b, _| {
            b.iter(|| {
                local.clear();
                populate(&local, count);
                let found = local.get_or_none::<Float>();
                end_profiling_frame();
                black_box(found)
            })
        });

        #[cfg(feature = "concurrent")]
        {
            let concurrent = ConcurrentValueRegistry::new();
            populate(&concurrent, count);

            group.bench_with_input(BenchmarkId::new("concurrent_cached", count), &count, |b, _| {
                b.iter(|| {
                    let found = concurrent.get_or_none::<CharSequence>();
                    end_profiling_frame();
                    black_box(found)
                })
            });
        }
    }

    group.finish();
}

fn bench_presence(c: &mut Criterion) {
    setup_profiler();
    let registry = LocalPresenceRegistry::new();
    let _ = registry.add::<i32>();
    let _ = registry.add::<f32>();
    let _ = registry.add::<String>();

    c.bench_function("presence_cached", |b| {
        b.iter(|| {
            let found = registry.get_or_none::<Integer>();
            end_profiling_frame();
            black_box(found)
        })
    });

    c.bench_function("presence_ambiguous", |b| {
        b.iter(|| {
            let found = registry.get_or_none::<Number>();
            end_profiling_frame();
            black_box(found)
        })
    });
}

criterion_group!(benches, bench_lookups, bench_presence);
criterion_main!(benches);
