use alloc::collections::VecDeque;
use alloc::vec::Vec;

use viewport_window::{Align, ConfigError, VirtualList, VirtualListOptions};

use crate::{DebounceOptions, Debouncer, Throttle, ThrottleOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerOptions {
    /// Minimum time between two scroll samples applied to the list.
    pub scroll_interval_ms: u64,
    /// Quiet period after which scrolling is considered finished.
    pub scroll_end_delay_ms: u64,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            scroll_interval_ms: ThrottleOptions::default().interval_ms,
            scroll_end_delay_ms: 150,
        }
    }
}

/// An event delivered by the host view.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostEvent {
    Scroll { offset: f64, now_ms: u64 },
    Resize { viewport_extent: f64 },
    Tick { now_ms: u64 },
}

/// A framework-neutral controller wrapping a [`VirtualList`].
///
/// Scroll samples pass through a [`Throttle`] before reaching the list, and a [`Debouncer`]
/// applies the last raw sample once scrolling stops, so the rendered window never drifts from
/// the real scroll position.
///
/// Adapters either call `on_scroll` / `on_resize` / `tick` directly, or `enqueue` events and
/// `drain` them; queued events are applied strictly in delivery order.
#[derive(Clone, Debug)]
pub struct Controller<T> {
    list: VirtualList<T>,
    scroll: Throttle<f64>,
    scroll_end: Debouncer<f64>,
    queue: VecDeque<HostEvent>,
}

impl<T> Controller<T> {
    pub fn new(
        items: Vec<T>,
        list_options: VirtualListOptions<T>,
        options: ControllerOptions,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_list(VirtualList::new(items, list_options)?, options))
    }

    pub fn from_list(list: VirtualList<T>, options: ControllerOptions) -> Self {
        Self {
            list,
            scroll: Throttle::new(ThrottleOptions {
                interval_ms: options.scroll_interval_ms,
            }),
            scroll_end: Debouncer::new(DebounceOptions {
                delay_ms: options.scroll_end_delay_ms,
            }),
            queue: VecDeque::new(),
        }
    }

    pub fn list(&self) -> &VirtualList<T> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList<T> {
        &mut self.list
    }

    pub fn into_list(self) -> VirtualList<T> {
        self.list
    }

    /// `true` between the first scroll sample of a gesture and its settle.
    pub fn is_scrolling(&self) -> bool {
        self.scroll_end.is_pending()
    }

    /// When `tick` must run next to settle the current gesture.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scroll_end.next_deadline()
    }

    /// Call this when the UI reports a scroll offset change.
    ///
    /// Returns `true` if the sample was applied to the list immediately.
    pub fn on_scroll(&mut self, offset: f64, now_ms: u64) -> bool {
        if self.scroll.is_disposed() {
            return false;
        }
        self.scroll_end.notify(offset, now_ms);
        match self.scroll.emit(offset, now_ms) {
            Some(offset) => {
                self.list.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    pub fn on_resize(&mut self, viewport_extent: f64) {
        if self.scroll.is_disposed() {
            return;
        }
        self.list.set_viewport_extent(viewport_extent);
    }

    /// Advances timers. Returns `true` when a scroll gesture settled on this tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(offset) = self.scroll_end.poll(now_ms) else {
            return false;
        };
        vtrace!(offset, "Controller: scroll settled");
        self.list.set_scroll_offset(offset);
        self.scroll.reset();
        true
    }

    /// Programmatic scroll (no throttling). Cancels a pending settle of a previous gesture.
    ///
    /// Returns the applied (clamped) offset, or the current one once disposed.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> f64 {
        if self.scroll.is_disposed() {
            return self.list.scroll_offset();
        }
        self.scroll_end.cancel();
        self.list.scroll_to_index(index, align)
    }

    pub fn enqueue(&mut self, event: HostEvent) {
        if self.scroll.is_disposed() {
            return;
        }
        self.queue.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Applies queued events in delivery order. Returns how many were processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.pop_front() {
            match event {
                HostEvent::Scroll { offset, now_ms } => {
                    self.on_scroll(offset, now_ms);
                }
                HostEvent::Resize { viewport_extent } => self.on_resize(viewport_extent),
                HostEvent::Tick { now_ms } => {
                    self.tick(now_ms);
                }
            }
            processed += 1;
        }
        processed
    }

    /// Releases every timer and queued event. Later events are ignored.
    pub fn dispose(&mut self) {
        vdebug!(dropped = self.queue.len(), "Controller::dispose");
        self.scroll.dispose();
        self.scroll_end.dispose();
        self.queue.clear();
    }
}
