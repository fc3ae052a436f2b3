// Example: drive a list from a burst of scroll samples and let the last one settle.
use viewport_window::VirtualListOptions;
use viewport_window_adapter::{Controller, ControllerOptions, HostEvent};

fn main() -> Result<(), viewport_window::ConfigError> {
    let mut c = Controller::new(
        (0..10_000u32).collect(),
        VirtualListOptions::new(24.0, 480.0).with_overscan(3),
        ControllerOptions::default(),
    )?;

    // A fling: one sample every 4ms, most of them dropped by the throttle.
    for step in 0..50u64 {
        c.enqueue(HostEvent::Scroll {
            offset: step as f64 * 37.0,
            now_ms: step * 4,
        });
    }
    c.drain();
    println!(
        "during fling: offset={} window={:?} scrolling={}",
        c.list().scroll_offset(),
        c.list().window(),
        c.is_scrolling()
    );

    if let Some(deadline) = c.next_deadline() {
        c.tick(deadline);
    }
    println!(
        "settled: offset={} window={:?} scrolling={}",
        c.list().scroll_offset(),
        c.list().window(),
        c.is_scrolling()
    );
    Ok(())
}
