#![forbid(unsafe_code)]

//! Single-shot page behaviors.
//!
//! Everything here is presentation glue with no internal state machine of
//! consequence: each operation is a direct, idempotent read/write against a
//! [`pagefx_core::Page`], triggered by a host event. Missing elements silently
//! skip the associated behavior.

pub mod hover;
pub mod links;
pub mod nav;
pub mod scrollfx;
pub mod theme;

pub use hover::{HoverSwap, derive_hover_src};
pub use links::{highlight_active_links, matches_location};
pub use nav::NavToggle;
pub use scrollfx::{
    FloatingNav, ScrollRequest, back_to_top_request, scroll_to_section, update_back_to_top,
    update_header_shadow,
};
pub use theme::{MemoryStore, PreferenceStore, StoreError, SystemScheme, ThemeManager, ThemeMode};
