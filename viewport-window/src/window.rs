//! The window calculator: scroll geometry in, contiguous index range out.

use crate::WindowRange;

/// Inputs of a single window computation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowParams {
    pub scroll_offset: f64,
    pub item_extent: f64,
    pub viewport_extent: f64,
    pub item_count: usize,
    pub overscan: usize,
}

impl WindowParams {
    pub fn compute(&self) -> WindowRange {
        compute_window(*self)
    }
}

/// Computes the overscanned window for a fixed-extent list.
///
/// - `start = max(0, floor(scroll / extent) - overscan)`
/// - `first = floor(scroll / extent)`
/// - `end = min(count, max(ceil((scroll + viewport) / extent), first + 1) + overscan)`
///
/// Overscan is added once at each end; it is not scaled by the viewport. The item under the
/// scroll offset is always part of the result, so a zero-extent viewport still renders it.
///
/// Negative and NaN offsets/extents are treated as `0.0`. A non-positive `item_extent` yields an
/// empty range; [`crate::VirtualList`] rejects such extents at construction.
pub fn compute_window(params: WindowParams) -> WindowRange {
    let WindowParams {
        scroll_offset,
        item_extent,
        viewport_extent,
        item_count,
        overscan,
    } = params;

    if item_count == 0 {
        return WindowRange::EMPTY;
    }
    if !is_valid_item_extent(item_extent) {
        vwarn!(item_extent, "compute_window: invalid item extent");
        return WindowRange::EMPTY;
    }

    let scroll = sanitize_extent(scroll_offset);
    let view = sanitize_extent(viewport_extent);

    let first = floor_index(scroll / item_extent);
    let visible_end = ceil_index((scroll + view) / item_extent).max(first.saturating_add(1));

    let end_index = visible_end.saturating_add(overscan).min(item_count);
    let start_index = first.saturating_sub(overscan).min(end_index);

    WindowRange {
        start_index,
        end_index,
    }
}

pub(crate) fn is_valid_item_extent(extent: f64) -> bool {
    extent.is_finite() && extent > 0.0
}

/// Clamps negative and NaN values to zero.
pub(crate) fn sanitize_extent(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

// `f64::floor`/`ceil` need `std`; for non-negative inputs truncation is floor. Casts saturate, so
// infinities map to `usize::MAX` and get clamped by the item count.
pub(crate) fn floor_index(value: f64) -> usize {
    value as usize
}

pub(crate) fn ceil_index(value: f64) -> usize {
    let truncated = value as usize;
    if (truncated as f64) < value {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}
