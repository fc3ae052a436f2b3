use alloc::sync::Arc;

use viewport_window::ConfigError;

use crate::Clock;

/// A callback receiving each completed snapshot.
pub type ReportCallback = Arc<dyn Fn(&MetricsSnapshot) + Send + Sync>;

/// Metrics of one sampling cycle. Only the latest snapshot is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// Duration of the instrumented region.
    pub render_time_ms: u64,
    /// Bytes reported by the memory probe, `0` when no counter is available.
    pub memory_usage: u64,
    /// Frames per second over the cycle.
    pub frame_rate: f64,
}

/// Reads a memory counter, when the platform has one.
pub trait MemoryProbe {
    fn used_bytes(&self) -> Option<u64>;
}

/// The probe for platforms without memory counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMemoryProbe;

impl MemoryProbe for NoMemoryProbe {
    fn used_bytes(&self) -> Option<u64> {
        None
    }
}

impl<F: Fn() -> Option<u64>> MemoryProbe for F {
    fn used_bytes(&self) -> Option<u64> {
        self()
    }
}

/// Whether the host can run work when it is idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdleSupport {
    #[default]
    Available,
    Unavailable,
}

/// The primitive the host should use to call [`SamplingMonitor::run_scheduled`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Schedule {
    /// An idle callback.
    Idle,
    /// The next macrotask (a zero-delay timer).
    Macrotask,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingOptions {
    pub sampling_window_ms: u64,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            sampling_window_ms: 1_000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Stopped,
    Scheduled { region_start_ms: u64 },
    Sampling { cycle_start_ms: u64, frames: u64 },
    Disposed,
}

/// Periodic frame-rate / render-time / memory sampler.
///
/// The monitor never blocks: the host runs its first step from an idle (or macrotask) callback
/// and then feeds it per-frame timestamps. Every `sampling_window_ms` one snapshot is produced
/// and reported.
pub struct SamplingMonitor<P = NoMemoryProbe> {
    options: SamplingOptions,
    idle: IdleSupport,
    probe: P,
    reporter: Option<ReportCallback>,
    phase: Phase,
    render_time_ms: u64,
    latest: Option<MetricsSnapshot>,
}

impl<P: MemoryProbe> SamplingMonitor<P> {
    pub fn new(options: SamplingOptions, idle: IdleSupport, probe: P) -> Result<Self, ConfigError> {
        if options.sampling_window_ms == 0 {
            return Err(ConfigError::ZeroSamplingWindow);
        }
        if idle == IdleSupport::Unavailable {
            vwarn!("idle scheduling unavailable; sampling falls back to macrotasks");
        }
        Ok(Self {
            options,
            idle,
            probe,
            reporter: None,
            phase: Phase::Stopped,
            render_time_ms: 0,
            latest: None,
        })
    }

    pub fn with_reporter(
        mut self,
        reporter: Option<impl Fn(&MetricsSnapshot) + Send + Sync + 'static>,
    ) -> Self {
        self.reporter = reporter.map(|f| Arc::new(f) as _);
        self
    }

    pub fn options(&self) -> SamplingOptions {
        self.options
    }

    pub fn schedule(&self) -> Schedule {
        match self.idle {
            IdleSupport::Available => Schedule::Idle,
            IdleSupport::Unavailable => Schedule::Macrotask,
        }
    }

    pub fn latest(&self) -> Option<MetricsSnapshot> {
        self.latest
    }

    pub fn render_time_ms(&self) -> u64 {
        self.render_time_ms
    }

    pub fn is_sampling(&self) -> bool {
        matches!(self.phase, Phase::Sampling { .. })
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    /// Marks the start of the instrumented region (mount) and tells the host how to schedule the
    /// first sampling step. Returns `None` once disposed.
    pub fn start(&mut self, now_ms: u64) -> Option<Schedule> {
        if self.is_disposed() {
            return None;
        }
        vtrace!(now_ms, "SamplingMonitor::start");
        self.phase = Phase::Scheduled {
            region_start_ms: now_ms,
        };
        Some(self.schedule())
    }

    /// The scheduled step: closes the instrumented region and opens the first cycle.
    pub fn run_scheduled(&mut self, now_ms: u64) {
        let Phase::Scheduled { region_start_ms } = self.phase else {
            return;
        };
        self.render_time_ms = now_ms.saturating_sub(region_start_ms);
        self.phase = Phase::Sampling {
            cycle_start_ms: now_ms,
            frames: 0,
        };
    }

    /// Overrides the render time with a measured region.
    pub fn record_render_time(&mut self, start_ms: u64, end_ms: u64) {
        if self.is_disposed() {
            return;
        }
        self.render_time_ms = end_ms.saturating_sub(start_ms);
    }

    /// Runs `f` as the instrumented region, timing it with `clock`.
    pub fn measure<R>(&mut self, clock: &impl Clock, f: impl FnOnce() -> R) -> R {
        let start = clock.now_ms();
        let out = f();
        self.record_render_time(start, clock.now_ms());
        out
    }

    /// Counts one frame. Returns the snapshot when this frame completes a cycle.
    pub fn on_frame(&mut self, now_ms: u64) -> Option<MetricsSnapshot> {
        let Phase::Sampling {
            cycle_start_ms,
            frames,
        } = self.phase
        else {
            return None;
        };
        let frames = frames.saturating_add(1);
        let elapsed = now_ms.saturating_sub(cycle_start_ms);
        if elapsed < self.options.sampling_window_ms {
            self.phase = Phase::Sampling {
                cycle_start_ms,
                frames,
            };
            return None;
        }

        let snapshot = MetricsSnapshot {
            render_time_ms: self.render_time_ms,
            memory_usage: self.probe.used_bytes().unwrap_or(0),
            frame_rate: frames as f64 * 1_000.0 / elapsed as f64,
        };
        vdebug!(
            frames,
            elapsed,
            frame_rate = snapshot.frame_rate,
            "SamplingMonitor: cycle complete"
        );
        self.latest = Some(snapshot);
        self.phase = Phase::Sampling {
            cycle_start_ms: now_ms,
            frames: 0,
        };
        if let Some(cb) = &self.reporter {
            cb(&snapshot);
        }
        Some(snapshot)
    }

    /// Stops sampling; no snapshot is produced or reported afterwards.
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
    }
}

impl<P: core::fmt::Debug> core::fmt::Debug for SamplingMonitor<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SamplingMonitor")
            .field("options", &self.options)
            .field("idle", &self.idle)
            .field("probe", &self.probe)
            .field("phase", &self.phase)
            .field("render_time_ms", &self.render_time_ms)
            .field("latest", &self.latest)
            .finish_non_exhaustive()
    }
}
