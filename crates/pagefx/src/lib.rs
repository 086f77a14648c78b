#![forbid(unsafe_code)]

//! pagefx public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use pagefx_behaviors as behaviors;
    pub use pagefx_core as core;
    pub use pagefx_reveal as reveal;
}
