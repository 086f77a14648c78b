#![forbid(unsafe_code)]

//! Core: element surface, viewport geometry, document lifecycle, and
//! virtual-time timers.
//!
//! Everything in this crate is deterministic and free of I/O. Hosts own the
//! clock: time only moves when they say so, which makes every consumer of
//! these types reproducible under test.

pub mod geometry;
pub mod lifecycle;
pub mod page;
pub mod timer;

pub use geometry::{ElementBox, FixedProbe, GeometryProbe, Viewport};
pub use lifecycle::DocumentPhase;
pub use page::{Element, ElementId, Page};
pub use timer::TimerQueue;
