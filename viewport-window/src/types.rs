#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive, overscan included
}

impl WindowRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn indexes(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// One entry of the rendered window.
pub struct VisibleEntry<'a, T> {
    /// Absolute index into the item collection.
    pub index: usize,
    pub item: &'a T,
    /// Start offset in the scroll axis (`index * item_extent`).
    pub offset: f64,
}

impl<T> Clone for VisibleEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VisibleEntry<'_, T> {}

impl<T: core::fmt::Debug> core::fmt::Debug for VisibleEntry<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibleEntry")
            .field("index", &self.index)
            .field("item", self.item)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for VisibleEntry<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.offset == other.offset && self.item == other.item
    }
}

/// An axis-aligned rectangle in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `false` while any coordinate is NaN or infinite (e.g. not laid out yet).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grows the rectangle by `margin` on every side. A negative margin shrinks it, never below an
    /// empty rectangle centred on the original one.
    pub fn expand(&self, margin: f64) -> Self {
        let width = (self.width + 2.0 * margin).max(0.0);
        let height = (self.height + 2.0 * margin).max(0.0);
        Self {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Overlap of two rectangles. Edge-adjacent rectangles intersect with a zero-area result.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Bounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
