//! Adapter utilities for the `viewport-window` crate.
//!
//! The `viewport-window` crate decides which items to render. This crate provides the small,
//! time-driven helpers that keep a continuously updating UI responsive:
//!
//! - [`Debouncer`]: one trailing emission after a burst of input
//! - [`Throttle`]: leading-edge rate cap for scroll-like event streams
//! - [`SamplingMonitor`]: periodic frame-rate / render-time / memory snapshots
//! - [`Controller`]: a list engine wired to a throttled scroll source and scroll-end detection
//!
//! Nothing here owns a platform timer. Adapters pass `now_ms` (or use a [`Clock`]) and arm at
//! most one real timer per instance from `next_deadline`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod clock;
mod controller;
mod debounce;
mod monitor;
mod throttle;

#[cfg(test)]
mod tests;

#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use clock::{Clock, ManualClock};
pub use controller::{Controller, ControllerOptions, HostEvent};
pub use debounce::{DebounceOptions, Debouncer, OnSettledCallback};
pub use monitor::{
    IdleSupport, MemoryProbe, MetricsSnapshot, NoMemoryProbe, ReportCallback, SamplingMonitor,
    SamplingOptions, Schedule,
};
pub use throttle::{OnForwardCallback, Throttle, ThrottleOptions};
