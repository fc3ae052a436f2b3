/// Rejected configuration, reported by constructors and option setters.
///
/// Runtime inputs (scroll samples, intersection events, timestamps) never produce errors: they are
/// clamped or ignored instead, so render passes cannot fail once construction succeeded.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("item extent must be a finite positive number (got {0})")]
    InvalidItemExtent(f64),
    #[error("viewport extent must be a finite non-negative number (got {0})")]
    InvalidViewportExtent(f64),
    #[error("visibility threshold must lie within [0, 1] (got {0})")]
    InvalidThreshold(f32),
    #[error("trigger margin must be finite (got {0})")]
    InvalidTriggerMargin(f64),
    #[error("sampling window must be at least 1 ms")]
    ZeroSamplingWindow,
}
