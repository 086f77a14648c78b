#![forbid(unsafe_code)]

//! Document lifecycle phases.
//!
//! Mirrors the three readiness states a host document can be in when a
//! behavior engine is initialized. Engines that defer work until layout has
//! stabilized must behave correctly when started under any of the three.

/// Readiness of the host document at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentPhase {
    /// Markup still streaming in; layout is not trustworthy yet.
    Loading,
    /// Markup parsed, subresources may still be loading.
    Interactive,
    /// Fully loaded.
    Complete,
}

impl DocumentPhase {
    /// Whether layout can be consulted at all in this phase.
    #[inline]
    #[must_use]
    pub fn layout_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_ready_per_phase() {
        assert!(!DocumentPhase::Loading.layout_ready());
        assert!(DocumentPhase::Interactive.layout_ready());
        assert!(DocumentPhase::Complete.layout_ready());
    }
}
