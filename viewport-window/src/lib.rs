//! Headless viewport windowing for large or expensive-to-render collections.
//!
//! For time-driven adapter utilities (debounce, throttle, performance sampling), see the
//! `viewport-window-adapter` crate.
//!
//! This crate decides *which* items must exist at any instant:
//! - [`compute_window`]: scroll geometry → overscanned contiguous index range
//! - [`VirtualList`]: scroll state + item collection → ordered visible entries and track size
//! - [`VisibilityObserver`]: one-shot "became visible" gate for deferred materialization
//! - [`RenderMemo`]: skips re-renders while a dependency value is unchanged
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size and scroll offset samples
//! - intersection reports (or region/viewport geometry) for lazily materialized regions
//! - a render callback turning a visible `(item, index)` into its displayable unit
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod list;
mod memo;
mod options;
mod state;
mod types;
mod visibility;
mod window;


pub use error::ConfigError;
pub use list::VirtualList;
pub use memo::{DepsEqCallback, RenderMemo};
pub use options::{OnChangeCallback, OnVisibleCallback, VirtualListOptions, VisibilityOptions};
pub use state::ViewportState;
pub use types::{Align, Bounds, VisibleEntry, WindowRange};
pub use visibility::{IntersectionEntry, IntersectionSupport, ObserverState, VisibilityObserver};
pub use window::{WindowParams, compute_window};
