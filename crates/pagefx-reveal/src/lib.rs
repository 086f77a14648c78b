#![forbid(unsafe_code)]

//! Scroll-reveal visibility engine.
//!
//! Transitions a fixed set of page elements from hidden to visible, each
//! exactly once, through two converging paths:
//!
//! - **Live observation**: the host reports viewport geometry whenever it
//!   changes (scroll, resize) and any still-observed target whose box
//!   qualifies under its group's trigger window reveals immediately.
//! - **Initial sweep**: one deferred pass over everything still hidden after
//!   layout settles (two frames plus a settling delay), revealing
//!   already-visible targets with staggered delays so they do not all appear
//!   at once.
//!
//! Both paths end in the same idempotent reveal transition, so racing them is
//! harmless: the first caller wins, the second is a no-op.

pub mod engine;
pub mod window;

pub use engine::{RevealConfig, RevealEngine};
pub use window::{HIDDEN_CLASS, REVEAL_MARKER, RevealGroup, TriggerWindow, VISIBLE_CLASS};
