use alloc::sync::Arc;

use crate::ConfigError;
use crate::list::VirtualList;
use crate::window::is_valid_item_extent;

/// A callback fired after the list's window or collection changed.
///
/// Adapters typically schedule a render pass from here.
pub type OnChangeCallback<T> = Arc<dyn Fn(&VirtualList<T>) + Send + Sync>;

/// A callback fired once, when an observed region first becomes visible.
pub type OnVisibleCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Cheap to clone: the callback lives in an `Arc`.
pub struct VirtualListOptions<T> {
    /// Fixed size of every item in the scroll axis. Must be finite and positive.
    pub item_extent: f64,
    /// Initial size of the viewport in the scroll axis.
    pub viewport_extent: f64,
    /// Extra items rendered before and after the visible range.
    pub overscan: usize,
    /// Initial scroll offset. Negative and NaN values are clamped to `0.0`.
    pub initial_offset: f64,
    pub on_change: Option<OnChangeCallback<T>>,
}

impl<T> Clone for VirtualListOptions<T> {
    fn clone(&self) -> Self {
        Self {
            item_extent: self.item_extent,
            viewport_extent: self.viewport_extent,
            overscan: self.overscan,
            initial_offset: self.initial_offset,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> VirtualListOptions<T> {
    pub const DEFAULT_OVERSCAN: usize = 5;

    pub fn new(item_extent: f64, viewport_extent: f64) -> Self {
        Self {
            item_extent,
            viewport_extent,
            overscan: Self::DEFAULT_OVERSCAN,
            initial_offset: 0.0,
            on_change: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: f64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&VirtualList<T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_item_extent(self.item_extent) {
            return Err(ConfigError::InvalidItemExtent(self.item_extent));
        }
        if !self.viewport_extent.is_finite() || self.viewport_extent < 0.0 {
            return Err(ConfigError::InvalidViewportExtent(self.viewport_extent));
        }
        Ok(())
    }
}

impl<T> core::fmt::Debug for VirtualListOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("item_extent", &self.item_extent)
            .field("viewport_extent", &self.viewport_extent)
            .field("overscan", &self.overscan)
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::VisibilityObserver`].
#[derive(Clone)]
pub struct VisibilityOptions {
    /// Fraction of the region (in `[0, 1]`) that must be visible to trigger.
    pub threshold: f32,
    /// Distance added around the viewport on every side before testing intersection.
    ///
    /// Negative values shrink the viewport.
    pub trigger_margin: f64,
    pub on_visible: Option<OnVisibleCallback>,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            trigger_margin: 50.0,
            on_visible: None,
        }
    }
}

impl VisibilityOptions {
    pub fn new(threshold: f32, trigger_margin: f64) -> Self {
        Self {
            threshold,
            trigger_margin,
            on_visible: None,
        }
    }

    pub fn with_on_visible(
        mut self,
        on_visible: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_visible = on_visible.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if !self.trigger_margin.is_finite() {
            return Err(ConfigError::InvalidTriggerMargin(self.trigger_margin));
        }
        Ok(())
    }
}

impl core::fmt::Debug for VisibilityOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityOptions")
            .field("threshold", &self.threshold)
            .field("trigger_margin", &self.trigger_margin)
            .finish_non_exhaustive()
    }
}
