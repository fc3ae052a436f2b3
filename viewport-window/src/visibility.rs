use crate::{Bounds, ConfigError, VisibilityOptions};

/// Lifecycle of a lazily materialized region.
///
/// `Triggered` and `Disconnected` are terminal: an observer is never re-armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObserverState {
    Unobserved,
    Observing,
    Triggered,
    /// Torn down before it ever became visible.
    Disconnected,
}

/// Whether the host can report intersections.
///
/// Negotiated once, when the observer is created. Without an intersection source every region is
/// treated as visible as soon as it is observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionSupport {
    #[default]
    Native,
    Unsupported,
}

/// A single intersection report for an observed region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    /// Visible fraction of the region, in `[0, 1]`.
    pub ratio: f32,
}

impl IntersectionEntry {
    /// Measures `region` against `viewport` grown by `margin` on every side.
    ///
    /// Zero-area regions report a ratio of `1.0` while they touch the expanded viewport.
    /// Non-finite geometry never intersects.
    pub fn from_geometry(region: Bounds, viewport: Bounds, margin: f64) -> Self {
        if !region.is_finite() || !viewport.is_finite() || !margin.is_finite() {
            return Self::default();
        }
        let root = viewport.expand(margin);
        let Some(overlap) = region.intersection(&root) else {
            return Self::default();
        };
        let area = region.area();
        let ratio = if area > 0.0 {
            (overlap.area() / area).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            is_intersecting: true,
            ratio: ratio as f32,
        }
    }
}

/// One-shot visibility gate for expensive content.
///
/// The observer fires exactly once, the first time the region's visible fraction reaches the
/// threshold, then stops observing. Everything delivered after that (or after `disconnect`) is
/// ignored without side effects.
#[derive(Clone, Debug)]
pub struct VisibilityObserver {
    options: VisibilityOptions,
    support: IntersectionSupport,
    state: ObserverState,
    disposed: bool,
}

impl VisibilityObserver {
    pub fn new(
        options: VisibilityOptions,
        support: IntersectionSupport,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        if support == IntersectionSupport::Unsupported {
            vwarn!("intersection source unavailable; observed regions are treated as visible");
        }
        Ok(Self {
            options,
            support,
            state: ObserverState::Unobserved,
            disposed: false,
        })
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    pub fn support(&self) -> IntersectionSupport {
        self.support
    }

    pub fn state(&self) -> ObserverState {
        self.state
    }

    pub fn is_observing(&self) -> bool {
        self.state == ObserverState::Observing
    }

    /// `true` once the region has become visible. Never reverts.
    pub fn is_materialized(&self) -> bool {
        self.state == ObserverState::Triggered
    }

    /// Starts observing (mount).
    ///
    /// Returns `true` if the region was materialized by this call, which only happens in the
    /// degraded mode without an intersection source.
    pub fn observe(&mut self) -> bool {
        if self.disposed || self.state != ObserverState::Unobserved {
            return false;
        }
        match self.support {
            IntersectionSupport::Native => {
                vtrace!(
                    threshold = self.options.threshold,
                    margin = self.options.trigger_margin,
                    "VisibilityObserver::observe"
                );
                self.state = ObserverState::Observing;
                false
            }
            IntersectionSupport::Unsupported => {
                self.trigger();
                true
            }
        }
    }

    /// Feeds an intersection report. Returns `true` on the single visible transition.
    pub fn on_intersection(&mut self, entry: IntersectionEntry) -> bool {
        if self.disposed || self.state != ObserverState::Observing {
            return false;
        }
        if !entry.is_intersecting || entry.ratio.is_nan() || entry.ratio < self.options.threshold {
            return false;
        }
        self.trigger();
        true
    }

    /// Computes the intersection from host geometry, then behaves like `on_intersection`.
    pub fn on_geometry(&mut self, region: Bounds, viewport: Bounds) -> bool {
        if self.disposed || self.state != ObserverState::Observing {
            return false;
        }
        let entry = IntersectionEntry::from_geometry(region, viewport, self.options.trigger_margin);
        self.on_intersection(entry)
    }

    /// Releases the observation (unmount). Idempotent; never fires callbacks.
    pub fn disconnect(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.state != ObserverState::Triggered {
            self.state = ObserverState::Disconnected;
        }
        vtrace!(state = ?self.state, "VisibilityObserver::disconnect");
    }

    /// Picks the materialized content or the placeholder.
    pub fn materialize_or<R>(
        &self,
        content: impl FnOnce() -> R,
        fallback: impl FnOnce() -> R,
    ) -> R {
        if self.is_materialized() {
            content()
        } else {
            fallback()
        }
    }

    fn trigger(&mut self) {
        self.state = ObserverState::Triggered;
        vdebug!("VisibilityObserver: region became visible");
        if let Some(cb) = &self.options.on_visible {
            cb();
        }
    }
}
