use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::window::{compute_window, floor_index, sanitize_extent};
use crate::{
    Align, ConfigError, ViewportState, VirtualListOptions, VisibleEntry, WindowParams,
    WindowRange,
};

/// A headless virtualized list over a fixed-extent item collection.
///
/// This type is UI-agnostic:
/// - It never renders. Your adapter feeds it scroll samples and viewport sizes.
/// - After every viewport change the window range is recomputed eagerly, so the query methods
///   (`window`, `visible_entries`, `for_each_visible_entry`) are cheap.
/// - Indexes are absolute into the item collection, never relative to the window.
#[derive(Clone, Debug)]
pub struct VirtualList<T> {
    items: Vec<T>,
    options: VirtualListOptions<T>,
    viewport: ViewportState,
    range: WindowRange,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T> VirtualList<T> {
    /// Creates a list from an item collection and options.
    ///
    /// Fails when `item_extent` is not a finite positive number or `viewport_extent` is negative.
    pub fn new(items: Vec<T>, options: VirtualListOptions<T>) -> Result<Self, ConfigError> {
        options.validate()?;
        vdebug!(
            count = items.len(),
            item_extent = options.item_extent,
            overscan = options.overscan,
            "VirtualList::new"
        );
        let viewport = ViewportState::new(options.initial_offset, options.viewport_extent);
        let mut list = Self {
            items,
            options,
            viewport,
            range: WindowRange::EMPTY,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        list.recompute();
        Ok(list)
    }

    pub fn options(&self) -> &VirtualListOptions<T> {
        &self.options
    }

    /// Replaces the options. The current viewport is kept; `initial_offset` is ignored.
    pub fn set_options(&mut self, options: VirtualListOptions<T>) -> Result<(), ConfigError> {
        options.validate()?;
        self.options = options;
        vtrace!(
            item_extent = self.options.item_extent,
            overscan = self.options.overscan,
            "VirtualList::set_options"
        );
        self.recompute();
        self.notify();
        Ok(())
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.recompute();
        self.notify();
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualList<T>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_extent(&self) -> f64 {
        self.options.item_extent
    }

    /// Supplies a new collection. Indexes refer to the new collection from now on.
    pub fn set_items(&mut self, items: Vec<T>) {
        vtrace!(count = items.len(), "VirtualList::set_items");
        self.items = items;
        self.recompute();
        self.notify();
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport.viewport_extent
    }

    /// Applies a scroll sample together with the viewport size.
    ///
    /// Negative and NaN values are clamped to `0.0`. The window range and placement offset are
    /// recomputed before `on_change` fires.
    pub fn set_viewport(&mut self, scroll_offset: f64, viewport_extent: f64) {
        self.apply_viewport(ViewportState::new(scroll_offset, viewport_extent));
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        let viewport_extent = self.viewport.viewport_extent;
        self.set_viewport(scroll_offset, viewport_extent);
    }

    pub fn set_viewport_extent(&mut self, viewport_extent: f64) {
        let scroll_offset = self.viewport.scroll_offset;
        self.set_viewport(scroll_offset, viewport_extent);
    }

    /// Restores viewport geometry from a previously captured snapshot.
    pub fn restore_viewport_state(&mut self, viewport: ViewportState) {
        self.set_viewport(viewport.scroll_offset, viewport.viewport_extent);
    }

    fn apply_viewport(&mut self, next: ViewportState) {
        if self.viewport == next {
            return;
        }
        vtrace!(
            scroll_offset = next.scroll_offset,
            viewport_extent = next.viewport_extent,
            "VirtualList::set_viewport"
        );
        self.viewport = next;
        self.recompute();
        self.notify();
    }

    /// The current window (overscan included).
    pub fn window(&self) -> WindowRange {
        self.range
    }

    /// Computes the window for an arbitrary viewport without touching the list state.
    pub fn window_for(&self, scroll_offset: f64, viewport_extent: f64) -> WindowRange {
        compute_window(self.params_for(ViewportState::new(scroll_offset, viewport_extent)))
    }

    /// Offset of the first rendered item; the rendered block is translated by this amount.
    pub fn placement_offset(&self) -> f64 {
        self.offset_of(self.range.start_index)
    }

    /// Size of the whole scrollable track (`item_count * item_extent`).
    pub fn total_extent(&self) -> f64 {
        self.items.len() as f64 * self.options.item_extent
    }

    pub fn item_offset(&self, index: usize) -> Option<f64> {
        (index < self.items.len()).then(|| self.offset_of(index))
    }

    pub fn for_each_visible_entry<'a>(&'a self, mut f: impl FnMut(VisibleEntry<'a, T>)) {
        let range = self.range;
        for (index, item) in self.items[range.indexes()].iter().enumerate() {
            let index = range.start_index + index;
            f(VisibleEntry {
                index,
                item,
                offset: self.offset_of(index),
            });
        }
    }

    /// The ordered `(index, item, offset)` entries of the current window.
    pub fn visible_entries(&self) -> Vec<VisibleEntry<'_, T>> {
        let mut out = Vec::with_capacity(self.range.len());
        self.for_each_visible_entry(|entry| out.push(entry));
        out
    }

    /// Collects visible indexes into `out` (clears `out` first).
    pub fn collect_visible_indexes(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(self.range.indexes());
    }

    /// Runs the render callback once per visible entry, in ascending index order.
    pub fn render_with<R>(&self, mut render: impl FnMut(&T, usize) -> R) -> Vec<R> {
        let mut out = Vec::with_capacity(self.range.len());
        self.for_each_visible_entry(|entry| out.push(render(entry.item, entry.index)));
        out
    }

    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        let count = self.items.len();
        if count == 0 {
            return None;
        }
        let index = floor_index(sanitize_extent(offset) / self.options.item_extent);
        Some(index.min(count - 1))
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_extent() - self.viewport.viewport_extent).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        sanitize_extent(offset).min(self.max_scroll_offset())
    }

    /// Programmatically scrolls to an index.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> f64 {
        let count = self.items.len();
        if count == 0 {
            return 0.0;
        }
        let index = index.min(count - 1);
        let extent = self.options.item_extent;
        let start = self.offset_of(index);
        let end = start + extent;
        let view = self.viewport.viewport_extent;

        let target = match align {
            Align::Start => start,
            Align::End => end - view,
            Align::Center => start + extent / 2.0 - view / 2.0,
            Align::Auto => {
                let cur = self.viewport.scroll_offset;
                if start >= cur && end <= cur + view {
                    cur
                } else if start < cur {
                    start
                } else {
                    end - view
                }
            }
        };

        self.clamp_scroll_offset(target)
    }

    fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.options.item_extent
    }

    fn params_for(&self, viewport: ViewportState) -> WindowParams {
        WindowParams {
            scroll_offset: viewport.scroll_offset,
            item_extent: self.options.item_extent,
            viewport_extent: viewport.viewport_extent,
            item_count: self.items.len(),
            overscan: self.options.overscan,
        }
    }

    fn recompute(&mut self) {
        self.range = compute_window(self.params_for(self.viewport));
        debug_assert!(self.range.end_index <= self.items.len());
    }
}
