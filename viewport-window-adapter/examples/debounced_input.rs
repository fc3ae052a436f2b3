// Example: debounce keystrokes and sample frame rate with a real clock.
use viewport_window_adapter::{
    Clock, DebounceOptions, Debouncer, IdleSupport, MonotonicClock, NoMemoryProbe,
    SamplingMonitor, SamplingOptions,
};

fn main() -> Result<(), viewport_window::ConfigError> {
    let mut input = Debouncer::new(DebounceOptions { delay_ms: 300 })
        .with_on_settled(Some(|q: &String| println!("search for {q:?}")));
    for (i, q) in ["r", "ru", "rus", "rust"].into_iter().enumerate() {
        input.notify(q.to_string(), i as u64 * 80);
    }
    if let Some(deadline) = input.next_deadline() {
        input.poll(deadline);
    }

    let clock = MonotonicClock::new();
    let mut monitor = SamplingMonitor::new(
        SamplingOptions {
            sampling_window_ms: 200,
        },
        IdleSupport::Unavailable,
        NoMemoryProbe,
    )?
    .with_reporter(Some(|s: &viewport_window_adapter::MetricsSnapshot| {
        println!("metrics: {s:?}")
    }));

    monitor.start(clock.now_ms());
    monitor.run_scheduled(clock.now_ms());
    while monitor.latest().is_none() {
        std::thread::sleep(std::time::Duration::from_millis(16));
        monitor.on_frame(clock.now_ms());
    }
    monitor.dispose();
    Ok(())
}
