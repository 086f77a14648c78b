#![forbid(unsafe_code)]

//! Reveal groups and their trigger geometry.
//!
//! Every reveal target belongs to exactly one of three priority groups,
//! derived from its classes at registration time and immutable afterwards.
//! Each group watches the viewport through its own [`TriggerWindow`]: cards
//! and team members pre-trigger up to 300px below the fold (and tolerate
//! 100px above the top edge), while everything else waits for actual
//! intersection with the unexpanded viewport.
//!
//! The initial sweep deliberately uses the expanded window for *all* groups,
//! matching the observed behavior of the page this engine replaces; only live
//! observation is stricter for [`RevealGroup::Other`].

use pagefx_core::{ElementBox, ElementId, Page, Viewport};

/// Class marking an element as reveal-eligible.
pub const REVEAL_MARKER: &str = "reveal-up";

/// Presentation class for the hidden state.
pub const HIDDEN_CLASS: &str = "is-hidden";

/// Presentation class for the visible state.
pub const VISIBLE_CLASS: &str = "is-visible";

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// Priority group of a reveal target. Membership is immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealGroup {
    /// Portfolio cards (`card` class): expanded trigger window.
    Card,
    /// Team members (`team-member` class): expanded trigger window.
    TeamMember,
    /// Everything else (titles, subtitles, ...): strict intersection.
    Other,
}

impl RevealGroup {
    /// Classify an element by its static classes.
    #[must_use]
    pub fn classify(page: &Page, id: ElementId) -> Self {
        if page.has_class(id, "card") {
            Self::Card
        } else if page.has_class(id, "team-member") {
            Self::TeamMember
        } else {
            Self::Other
        }
    }

    /// Trigger window used by this group's live observation.
    #[must_use]
    pub fn live_window(self) -> TriggerWindow {
        match self {
            Self::Card | Self::TeamMember => TriggerWindow::EXPANDED,
            Self::Other => TriggerWindow::NONE,
        }
    }
}

// ---------------------------------------------------------------------------
// Trigger window
// ---------------------------------------------------------------------------

/// Vertical expansion of the viewport used when testing whether a box
/// qualifies for reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerWindow {
    /// Extra pixels below the fold that still count.
    pub below: f32,
    /// Extra pixels above the top edge that still count.
    pub above: f32,
}

impl TriggerWindow {
    /// The expanded window: 300px below the fold, 100px above the top edge.
    pub const EXPANDED: Self = Self {
        below: 300.0,
        above: 100.0,
    };

    /// No expansion: strict intersection with the viewport.
    pub const NONE: Self = Self {
        below: 0.0,
        above: 0.0,
    };

    /// Whether `b` qualifies for reveal within this window.
    #[must_use]
    pub fn admits(self, b: ElementBox, viewport: Viewport) -> bool {
        b.top < viewport.height + self.below
            && b.bottom > -self.above
            && b.left < viewport.width
            && b.right > 0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
