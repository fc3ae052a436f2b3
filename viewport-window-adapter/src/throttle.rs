use alloc::sync::Arc;

/// A callback fired for every forwarded value.
pub type OnForwardCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrottleOptions {
    /// Minimum time between two forwarded values.
    pub interval_ms: u64,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        // ~60fps
        Self { interval_ms: 16 }
    }
}

/// Leading-edge rate limiter for high-frequency events.
///
/// Values arriving within `interval_ms` of the last forwarded one are dropped, not queued. There
/// is no trailing emission: pair it with a [`crate::Debouncer`] when the final value matters.
pub struct Throttle<T> {
    interval_ms: u64,
    last_forward_ms: Option<u64>,
    last_forwarded: Option<T>,
    on_forward: Option<OnForwardCallback<T>>,
    disposed: bool,
}

impl<T> Throttle<T> {
    pub fn new(options: ThrottleOptions) -> Self {
        Self {
            interval_ms: options.interval_ms,
            last_forward_ms: None,
            last_forwarded: None,
            on_forward: None,
            disposed: false,
        }
    }

    pub fn with_on_forward(
        mut self,
        on_forward: Option<impl Fn(&T) + Send + Sync + 'static>,
    ) -> Self {
        self.on_forward = on_forward.map(|f| Arc::new(f) as _);
        self
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_forwarded(&self) -> Option<&T> {
        self.last_forwarded.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether a value emitted at `now_ms` would be forwarded.
    pub fn is_open(&self, now_ms: u64) -> bool {
        if self.disposed {
            return false;
        }
        match self.last_forward_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Forgets the last forward time; the next value passes.
    pub fn reset(&mut self) {
        self.last_forward_ms = None;
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.last_forward_ms = None;
    }
}

impl<T: Clone> Throttle<T> {
    /// Forwards `value` if the interval has elapsed, otherwise drops it.
    pub fn emit(&mut self, value: T, now_ms: u64) -> Option<T> {
        if !self.is_open(now_ms) {
            return None;
        }
        self.last_forward_ms = Some(now_ms);
        if let Some(cb) = &self.on_forward {
            cb(&value);
        }
        self.last_forwarded = Some(value.clone());
        Some(value)
    }
}

impl<T: Clone> Clone for Throttle<T> {
    fn clone(&self) -> Self {
        Self {
            interval_ms: self.interval_ms,
            last_forward_ms: self.last_forward_ms,
            last_forwarded: self.last_forwarded.clone(),
            on_forward: self.on_forward.clone(),
            disposed: self.disposed,
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Throttle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval_ms", &self.interval_ms)
            .field("last_forward_ms", &self.last_forward_ms)
            .field("last_forwarded", &self.last_forwarded)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
