// Example: gate an expensive region behind a one-shot visibility observer.
use viewport_window::{Bounds, IntersectionSupport, VisibilityObserver, VisibilityOptions};

fn main() -> Result<(), viewport_window::ConfigError> {
    let mut observer = VisibilityObserver::new(
        VisibilityOptions::new(0.1, 50.0).with_on_visible(Some(|| println!("load image now"))),
        IntersectionSupport::Native,
    )?;
    observer.observe();

    let viewport = Bounds::new(0.0, 0.0, 800.0, 600.0);
    for y in [1_200.0, 900.0, 620.0, 300.0] {
        let region = Bounds::new(0.0, y, 800.0, 200.0);
        let fired = observer.on_geometry(region, viewport);
        let shown = observer.materialize_or(|| "<img>", || "<placeholder>");
        println!("region at y={y}: fired={fired} shown={shown}");
    }

    observer.disconnect();
    Ok(())
}
