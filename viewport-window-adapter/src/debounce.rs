use alloc::sync::Arc;

/// A callback fired with the settled value.
pub type OnSettledCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebounceOptions {
    /// Quiet period after the last `notify` before the value settles.
    pub delay_ms: u64,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self { delay_ms: 300 }
    }
}

/// Collapses a burst of value changes into one trailing emission.
///
/// Adapter-driven: `notify` records the value and (re)arms a single deadline, `poll` emits once
/// the deadline has passed. A new `notify` replaces the pending deadline in the same call, so a
/// superseded emission can never fire.
pub struct Debouncer<T> {
    delay_ms: u64,
    latest: Option<T>,
    deadline: Option<u64>,
    on_settled: Option<OnSettledCallback<T>>,
    disposed: bool,
}

impl<T> Debouncer<T> {
    pub fn new(options: DebounceOptions) -> Self {
        Self {
            delay_ms: options.delay_ms,
            latest: None,
            deadline: None,
            on_settled: None,
            disposed: false,
        }
    }

    pub fn with_on_settled(
        mut self,
        on_settled: Option<impl Fn(&T) + Send + Sync + 'static>,
    ) -> Self {
        self.on_settled = on_settled.map(|f| Arc::new(f) as _);
        self
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// The most recent value, settled or not.
    ///
    /// Input adapters echo this back immediately while the settled value lags behind.
    pub fn latest(&self) -> Option<&T> {
        self.latest.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// When the pending value settles, if any. Hosts arm their one timer for this instant.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn notify(&mut self, value: T, now_ms: u64) {
        if self.disposed {
            return;
        }
        let deadline = now_ms.saturating_add(self.delay_ms);
        vtrace!(deadline, rearmed = self.deadline.is_some(), "Debouncer::notify");
        self.latest = Some(value);
        self.deadline = Some(deadline);
    }

    /// Replaces the local value from an authoritative source and drops the pending emission.
    pub fn sync(&mut self, value: T) {
        if self.disposed {
            return;
        }
        self.latest = Some(value);
        self.deadline = None;
    }

    /// Drops the pending emission but keeps the latest value.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancels everything. Later `notify`/`poll` calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vtrace!(pending = self.deadline.is_some(), "Debouncer::dispose");
        self.disposed = true;
        self.deadline = None;
    }
}

impl<T: Clone> Debouncer<T> {
    /// Emits the latest value once its quiet period has elapsed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        if self.disposed {
            return None;
        }
        let deadline = self.deadline?;
        if now_ms < deadline {
            return None;
        }
        self.settle()
    }

    /// Emits the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        if self.disposed || self.deadline.is_none() {
            return None;
        }
        self.settle()
    }

    fn settle(&mut self) -> Option<T> {
        self.deadline = None;
        let value = self.latest.clone()?;
        if let Some(cb) = &self.on_settled {
            cb(&value);
        }
        Some(value)
    }
}

impl<T: Clone> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            delay_ms: self.delay_ms,
            latest: self.latest.clone(),
            deadline: self.deadline,
            on_settled: self.on_settled.clone(),
            disposed: self.disposed,
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay_ms", &self.delay_ms)
            .field("latest", &self.latest)
            .field("deadline", &self.deadline)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
