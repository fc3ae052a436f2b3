use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use viewport_window::{Align, ConfigError, VirtualListOptions, WindowRange};

#[test]
fn debounce_burst_emits_last_value_once() {
    let settled = Arc::new(Mutex::new(Vec::new()));
    let settled2 = Arc::clone(&settled);
    let mut d = Debouncer::new(DebounceOptions { delay_ms: 300 }).with_on_settled(Some(
        move |v: &String| settled2.lock().unwrap().push(v.clone()),
    ));

    for (i, value) in ["h", "he", "hel", "hell", "hello"].into_iter().enumerate() {
        let now = i as u64 * 100;
        d.notify(String::from(value), now);
        assert_eq!(d.poll(now), None);
    }
    assert_eq!(d.next_deadline(), Some(700));
    assert_eq!(d.latest().map(String::as_str), Some("hello"));

    assert_eq!(d.poll(699), None);
    assert_eq!(d.poll(700).as_deref(), Some("hello"));
    assert_eq!(d.poll(2_000), None);
    assert_eq!(*settled.lock().unwrap(), ["hello"]);
}

#[test]
fn debounce_separate_bursts_emit_separately() {
    let mut d = Debouncer::new(DebounceOptions { delay_ms: 50 });
    d.notify(1, 0);
    d.notify(2, 10);
    assert_eq!(d.poll(60), Some(2));
    d.notify(3, 100);
    assert!(d.is_pending());
    assert_eq!(d.poll(149), None);
    assert_eq!(d.poll(150), Some(3));
    assert!(!d.is_pending());
}

#[test]
fn disposed_debouncer_never_fires() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut d = Debouncer::new(DebounceOptions { delay_ms: 300 }).with_on_settled(Some(
        move |_: &u32| {
            fired2.fetch_add(1, Ordering::Relaxed);
        },
    ));
    d.notify(7, 0);
    d.dispose();
    assert_eq!(d.poll(10_000), None);
    assert_eq!(d.flush(), None);

    d.notify(8, 20_000);
    assert!(!d.is_pending());
    assert_eq!(d.poll(30_000), None);
    assert_eq!(fired.load(Ordering::Relaxed), 0);
    assert!(d.is_disposed());
}

#[test]
fn debounce_sync_overrides_local_value_without_emitting() {
    let mut d = Debouncer::new(DebounceOptions::default());
    d.notify(String::from("typed"), 0);
    d.sync(String::from("from parent"));
    assert_eq!(d.latest().map(String::as_str), Some("from parent"));
    assert_eq!(d.poll(1_000), None);
}

#[test]
fn debounce_flush_and_cancel() {
    let mut d = Debouncer::new(DebounceOptions { delay_ms: 100 });
    d.notify('a', 0);
    assert_eq!(d.flush(), Some('a'));
    assert_eq!(d.flush(), None);

    d.notify('b', 10);
    d.cancel();
    assert_eq!(d.poll(500), None);
    assert_eq!(d.latest(), Some(&'b'));
}

#[test]
fn zero_delay_settles_on_next_poll() {
    let mut d = Debouncer::new(DebounceOptions { delay_ms: 0 });
    d.notify(5u8, 42);
    assert_eq!(d.poll(42), Some(5));
}

#[test]
fn throttle_forwards_one_of_an_instant_burst() {
    let forwarded = Arc::new(AtomicUsize::new(0));
    let forwarded2 = Arc::clone(&forwarded);
    let mut t = Throttle::new(ThrottleOptions { interval_ms: 100 }).with_on_forward(Some(
        move |_: &u32| {
            forwarded2.fetch_add(1, Ordering::Relaxed);
        },
    ));

    let passed = (0..100u32).filter_map(|i| t.emit(i, 1_000)).count();
    assert_eq!(passed, 1);
    assert_eq!(forwarded.load(Ordering::Relaxed), 1);
    assert_eq!(t.last_forwarded(), Some(&0));
}

#[test]
fn throttle_caps_rate_without_trailing_edge() {
    let mut t = Throttle::new(ThrottleOptions { interval_ms: 16 });
    let mut out = Vec::new();
    for now in 0..100u64 {
        if let Some(v) = t.emit(now, now) {
            out.push(v);
        }
    }
    assert_eq!(out, [0, 16, 32, 48, 64, 80, 96]);
    // 99 was dropped, nothing flushes it later.
    assert_eq!(t.last_forwarded(), Some(&96));
}

#[test]
fn throttle_reset_and_dispose() {
    let mut t = Throttle::new(ThrottleOptions { interval_ms: 100 });
    assert_eq!(t.emit(1, 0), Some(1));
    assert_eq!(t.emit(2, 50), None);
    t.reset();
    assert_eq!(t.emit(3, 50), Some(3));

    t.dispose();
    assert!(!t.is_open(10_000));
    assert_eq!(t.emit(4, 10_000), None);
}

#[test]
fn throttle_ignores_time_going_backwards() {
    let mut t = Throttle::new(ThrottleOptions { interval_ms: 10 });
    assert_eq!(t.emit(1, 100), Some(1));
    assert_eq!(t.emit(2, 50), None);
    assert_eq!(t.emit(3, 110), Some(3));
}

fn monitor(
    window_ms: u64,
    idle: IdleSupport,
) -> (SamplingMonitor<impl MemoryProbe>, Arc<AtomicUsize>) {
    let reports = Arc::new(AtomicUsize::new(0));
    let reports2 = Arc::clone(&reports);
    let m = SamplingMonitor::new(
        SamplingOptions {
            sampling_window_ms: window_ms,
        },
        idle,
        || Some(4_096u64),
    )
    .unwrap()
    .with_reporter(Some(move |_: &MetricsSnapshot| {
        reports2.fetch_add(1, Ordering::Relaxed);
    }));
    (m, reports)
}

#[test]
fn monitor_reports_one_snapshot_per_cycle() {
    let (mut m, reports) = monitor(1_000, IdleSupport::Available);
    assert_eq!(m.start(0), Some(Schedule::Idle));
    assert_eq!(m.on_frame(5), None);

    m.run_scheduled(40);
    assert_eq!(m.render_time_ms(), 40);
    assert!(m.is_sampling());

    let mut snapshots = Vec::new();
    for frame in 1..=200u64 {
        if let Some(s) = m.on_frame(40 + frame * 10) {
            snapshots.push(s);
        }
    }
    assert_eq!(snapshots.len(), 2);
    assert_eq!(
        snapshots[0],
        MetricsSnapshot {
            render_time_ms: 40,
            memory_usage: 4_096,
            frame_rate: 100.0,
        }
    );
    assert_eq!(m.latest(), Some(snapshots[1]));
    assert_eq!(reports.load(Ordering::Relaxed), 2);
}

#[test]
fn monitor_normalises_frame_rate_to_seconds() {
    let (mut m, _) = monitor(500, IdleSupport::Available);
    m.start(0);
    m.run_scheduled(0);
    let mut last = None;
    for frame in 1..=30u64 {
        last = m.on_frame(frame * 50 / 3).or(last);
    }
    // 30 frames over 500ms.
    assert_eq!(last.map(|s| s.frame_rate), Some(60.0));
}

#[test]
fn monitor_without_memory_counter_reports_zero() {
    let mut m = SamplingMonitor::new(
        SamplingOptions::default(),
        IdleSupport::Unavailable,
        NoMemoryProbe,
    )
    .unwrap();
    assert_eq!(m.start(10), Some(Schedule::Macrotask));
    m.run_scheduled(10);
    let snap = m.on_frame(1_010).unwrap();
    assert_eq!(snap.memory_usage, 0);
    assert_eq!(snap.render_time_ms, 0);
    assert_eq!(snap.frame_rate, 1.0);
}

#[test]
fn monitor_dispose_stops_reporting() {
    let (mut m, reports) = monitor(100, IdleSupport::Available);
    m.start(0);
    m.run_scheduled(0);
    m.on_frame(50);
    m.dispose();
    assert_eq!(m.on_frame(500), None);
    assert_eq!(m.start(600), None);
    m.run_scheduled(700);
    assert!(!m.is_sampling());
    assert_eq!(reports.load(Ordering::Relaxed), 0);
    assert!(m.latest().is_none());
}

#[test]
fn monitor_measures_instrumented_region() {
    let clock = ManualClock::new(1_000);
    let (mut m, _) = monitor(100, IdleSupport::Available);
    let out = m.measure(&clock, || {
        clock.advance(12);
        "rendered"
    });
    assert_eq!(out, "rendered");
    assert_eq!(m.render_time_ms(), 12);

    m.start(clock.now_ms());
    m.run_scheduled(clock.advance(3));
    assert_eq!(m.render_time_ms(), 3);
    m.record_render_time(0, 9);
    let snap = m.on_frame(clock.advance(100)).unwrap();
    assert_eq!(snap.render_time_ms, 9);
}

#[test]
fn monitor_rejects_zero_window() {
    let err = SamplingMonitor::new(
        SamplingOptions {
            sampling_window_ms: 0,
        },
        IdleSupport::Available,
        NoMemoryProbe,
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::ZeroSamplingWindow);
}

fn controller() -> Controller<usize> {
    Controller::new(
        (0..1_000).collect(),
        VirtualListOptions::new(60.0, 256.0).with_overscan(5),
        ControllerOptions {
            scroll_interval_ms: 16,
            scroll_end_delay_ms: 150,
        },
    )
    .unwrap()
}

#[test]
fn controller_throttles_and_settles_on_last_sample() {
    let mut c = controller();
    assert!(c.on_scroll(600.0, 0));
    assert_eq!(c.list().window(), WindowRange { start_index: 5, end_index: 20 });

    // Dropped by the throttle.
    assert!(!c.on_scroll(900.0, 5));
    assert!(!c.on_scroll(1_200.0, 10));
    assert_eq!(c.list().scroll_offset(), 600.0);
    assert!(c.is_scrolling());
    assert_eq!(c.next_deadline(), Some(160));

    assert!(!c.tick(100));
    assert!(c.tick(160));
    assert!(!c.is_scrolling());
    assert_eq!(c.list().scroll_offset(), 1_200.0);
    assert_eq!(c.list().window(), WindowRange { start_index: 15, end_index: 30 });
}

#[test]
fn controller_drains_events_in_delivery_order() {
    let offsets = Arc::new(AtomicU64::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let (offsets2, calls2) = (Arc::clone(&offsets), Arc::clone(&calls));
    let mut c = controller();
    c.list_mut().set_on_change(Some(move |v: &viewport_window::VirtualList<usize>| {
        offsets2.store(v.scroll_offset() as u64, Ordering::Relaxed);
        calls2.fetch_add(1, Ordering::Relaxed);
    }));

    c.enqueue(HostEvent::Scroll { offset: 120.0, now_ms: 0 });
    c.enqueue(HostEvent::Resize { viewport_extent: 300.0 });
    c.enqueue(HostEvent::Scroll { offset: 240.0, now_ms: 20 });
    c.enqueue(HostEvent::Scroll { offset: 360.0, now_ms: 25 });
    c.enqueue(HostEvent::Tick { now_ms: 200 });
    assert_eq!(c.pending_events(), 5);

    assert_eq!(c.drain(), 5);
    assert_eq!(c.pending_events(), 0);
    assert_eq!(c.list().viewport_extent(), 300.0);
    assert_eq!(offsets.load(Ordering::Relaxed), 360);
    // 120 (scroll), resize, 240 (scroll), 360 (settle).
    assert_eq!(calls.load(Ordering::Relaxed), 4);
}

#[test]
fn controller_scroll_to_index_cancels_pending_settle() {
    let mut c = controller();
    c.on_scroll(600.0, 0);
    c.on_scroll(660.0, 1);
    let off = c.scroll_to_index(100, Align::Start);
    assert_eq!(off, 6_000.0);
    assert!(!c.tick(1_000));
    assert_eq!(c.list().scroll_offset(), 6_000.0);
}

#[test]
fn controller_dispose_ignores_late_events() {
    let mut c = controller();
    c.on_scroll(600.0, 0);
    c.on_scroll(900.0, 1);
    c.enqueue(HostEvent::Tick { now_ms: 10 });
    c.dispose();
    assert_eq!(c.pending_events(), 0);

    c.enqueue(HostEvent::Scroll { offset: 3_000.0, now_ms: 500 });
    assert_eq!(c.drain(), 0);
    assert!(!c.on_scroll(3_000.0, 500));
    assert!(!c.tick(10_000));
    c.on_resize(999.0);
    assert_eq!(c.scroll_to_index(500, Align::Start), 600.0);
    assert_eq!(c.list().scroll_offset(), 600.0);
    assert_eq!(c.list().window(), WindowRange { start_index: 5, end_index: 20 });
    assert_eq!(c.list().viewport_extent(), 256.0);
}

#[test]
fn manual_clock_advances() {
    let clock = ManualClock::new(5);
    assert_eq!(clock.advance(10), 15);
    clock.set(3);
    assert_eq!((&clock).now_ms(), 3);
}

#[cfg(feature = "std")]
#[test]
fn monotonic_clock_does_not_go_backwards() {
    let clock = MonotonicClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
}
