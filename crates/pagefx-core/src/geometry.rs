#![forbid(unsafe_code)]

//! Viewport geometry: bounding boxes relative to the visible window.
//!
//! An [`ElementBox`] is a snapshot of where an element sits relative to the
//! current viewport origin (so a negative `top` means the element starts above
//! the visible area). Snapshots are derived on demand and never persisted;
//! anyone holding one after a scroll is holding stale data on purpose.
//!
//! [`GeometryProbe`] is the seam between behavior engines and whatever is
//! actually doing layout. Production hosts answer from real layout;
//! [`FixedProbe`] answers from a map and is what the tests use.

use ahash::AHashMap;

use crate::page::ElementId;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Size of the visible window, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An element's bounding box relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl ElementBox {
    /// Box from top/left plus extents.
    #[must_use]
    pub fn new(top: f32, left: f32, height: f32, width: f32) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
        }
    }

    /// The same box shifted vertically by `dy` (positive = downward).
    ///
    /// Scrolling down by `n` pixels translates every box by `-n`.
    #[must_use]
    pub fn translate_y(self, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            bottom: self.bottom + dy,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// Source of element geometry.
pub trait GeometryProbe {
    /// Bounding box of `id` relative to the current viewport, or `None` when
    /// the element is unknown or not laid out.
    fn element_box(&self, id: ElementId) -> Option<ElementBox>;
}

/// Map-backed probe for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct FixedProbe {
    boxes: AHashMap<ElementId, ElementBox>,
}

impl FixedProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the box for `id`, replacing any previous one.
    pub fn place(&mut self, id: ElementId, b: ElementBox) {
        self.boxes.insert(id, b);
    }

    /// Shift every placed box vertically, simulating a scroll by `-dy`.
    pub fn scroll_by(&mut self, dy: f32) {
        for b in self.boxes.values_mut() {
            *b = b.translate_y(-dy);
        }
    }
}

impl GeometryProbe for FixedProbe {
    fn element_box(&self, id: ElementId) -> Option<ElementBox> {
        self.boxes.get(&id).copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
