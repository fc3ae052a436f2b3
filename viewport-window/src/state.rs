use crate::window::sanitize_extent;

/// A lightweight, serializable snapshot of the current viewport geometry.
///
/// Both fields are always finite-or-infinite non-negative numbers: negative and NaN inputs are
/// clamped to `0.0` on construction.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: f64,
    pub viewport_extent: f64,
}

impl ViewportState {
    pub fn new(scroll_offset: f64, viewport_extent: f64) -> Self {
        Self {
            scroll_offset: sanitize_extent(scroll_offset),
            viewport_extent: sanitize_extent(viewport_extent),
        }
    }

    /// End of the viewport in the scroll axis.
    pub fn end(&self) -> f64 {
        self.scroll_offset + self.viewport_extent
    }
}
