#![forbid(unsafe_code)]

//! The reveal engine: registration, the initial-viewport sweep, and the
//! idempotent reveal transition.
//!
//! # State machine
//!
//! The one-shot sweep moves through these phases:
//!
//! ```text
//! Unarmed ──initialize(Loading)──────▶ AwaitingLoad
//!    │                                     │ document_complete()
//!    │ initialize(Interactive|Complete)    ▼
//!    └────────────────────────────▶ CountingFrames(n)
//!                                          │ on_frame() × settle_frames
//!                                          ▼
//!                                      Settling ──settle timer──▶ Done
//! ```
//!
//! The sweep itself runs when the settle timer fires: every still-hidden
//! target whose box qualifies under the expanded window gets a reveal
//! scheduled at `base_delay + k * stagger` for the k-th qualifying target in
//! document order.
//!
//! # Invariants
//!
//! 1. `reveal` is idempotent: the second caller for a target is a no-op.
//! 2. A target's `revealed` flag goes false → true at most once, never back.
//! 3. Live observation notifies at most once per target (unobserve on fire).
//! 4. The sweep runs exactly once, under any [`DocumentPhase`] at
//!    initialization and any interleaving of `document_complete` calls.
//! 5. Within one sweep, reveals fire in non-decreasing document order.
//!
//! # Failure Modes
//!
//! - Host never reports viewport geometry (no platform intersection support):
//!   the engine degrades to the sweep alone; targets scrolled into view later
//!   stay hidden. Best-effort by design.
//! - Probe has no box for a target: the target does not qualify this pass;
//!   nothing is logged at error level.

use pagefx_core::{DocumentPhase, ElementId, GeometryProbe, Page, TimerQueue, Viewport};
use tracing::{debug, trace};
use web_time::Duration;

use crate::window::{HIDDEN_CLASS, REVEAL_MARKER, RevealGroup, TriggerWindow, VISIBLE_CLASS};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Timing knobs for the initial sweep and its staggered reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Delay before the first staggered reveal.
    pub base_delay: Duration,
    /// Spacing between consecutive staggered reveals.
    pub stagger: Duration,
    /// Settling delay after the frame deferral, before the sweep runs.
    pub settle: Duration,
    /// Rendered frames to wait before the settling delay starts.
    pub settle_frames: u8,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(200),
            stagger: Duration::from_millis(30),
            settle: Duration::from_millis(100),
            settle_frames: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Target {
    id: ElementId,
    group: RevealGroup,
    revealed: bool,
    /// Still subscribed to live observation.
    observed: bool,
}

/// Progress of the one-shot initial-viewport sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepPhase {
    /// No targets registered yet.
    Unarmed,
    /// Initialized while the document was still loading.
    AwaitingLoad,
    /// Waiting out the frame deferral; counts frames seen so far.
    CountingFrames(u8),
    /// Settle timer armed.
    Settling,
    /// Sweep has run.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Sweep,
    Reveal(ElementId),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Reveals each registered target exactly once, via live observation or the
/// staggered initial sweep.
///
/// The engine owns no clock and spawns nothing: hosts drive it with
/// [`on_frame`](Self::on_frame), [`advance`](Self::advance), and
/// [`observe_viewport`](Self::observe_viewport).
#[derive(Debug)]
pub struct RevealEngine {
    config: RevealConfig,
    /// Sorted by id (document order).
    targets: Vec<Target>,
    sweep: SweepPhase,
    timers: TimerQueue<TimerEvent>,
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

impl RevealEngine {
    /// Engine with the given timing configuration and no targets.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            sweep: SweepPhase::Unarmed,
            timers: TimerQueue::new(),
        }
    }

    /// All reveal-eligible elements on the page, in document order.
    #[must_use]
    pub fn discover(page: &Page) -> Vec<ElementId> {
        page.query_class(REVEAL_MARKER)
    }

    /// Register `ids` and arm the one-shot sweep.
    ///
    /// Resets the engine wholesale: any previous targets and pending timers
    /// are dropped. Elements already carrying the visible presentation are
    /// excluded (defense against re-initialization); everything else is
    /// marked hidden before any observation begins, so nothing flashes.
    pub fn initialize(&mut self, page: &mut Page, ids: &[ElementId], phase: DocumentPhase) {
        self.targets.clear();
        self.timers.clear();

        let mut ids: Vec<ElementId> = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        for id in ids {
            if page.get(id).is_none() || page.has_class(id, VISIBLE_CLASS) {
                continue;
            }
            page.add_class(id, HIDDEN_CLASS);
            self.targets.push(Target {
                id,
                group: RevealGroup::classify(page, id),
                revealed: false,
                observed: true,
            });
        }

        self.sweep = if phase.layout_ready() {
            SweepPhase::CountingFrames(0)
        } else {
            SweepPhase::AwaitingLoad
        };
        debug!(targets = self.targets.len(), ?phase, "reveal engine initialized");
    }

    /// The host document finished loading. Starts the frame deferral when the
    /// engine was initialized mid-load; otherwise a no-op, so the sweep still
    /// runs exactly once however many load notifications arrive.
    pub fn document_complete(&mut self) {
        if self.sweep == SweepPhase::AwaitingLoad {
            self.sweep = SweepPhase::CountingFrames(0);
        }
    }

    /// One rendering frame completed. After `settle_frames` frames the settle
    /// timer is armed; further frames are ignored.
    pub fn on_frame(&mut self) {
        if let SweepPhase::CountingFrames(seen) = self.sweep {
            let seen = seen.saturating_add(1);
            if seen >= self.config.settle_frames {
                self.sweep = SweepPhase::Settling;
                self.timers.schedule_after(self.config.settle, TimerEvent::Sweep);
            } else {
                self.sweep = SweepPhase::CountingFrames(seen);
            }
        }
    }

    /// Advance virtual time, running the sweep and firing due staggered
    /// reveals. Returns the targets revealed by this call, in firing order.
    pub fn advance(
        &mut self,
        page: &mut Page,
        probe: &dyn GeometryProbe,
        viewport: Viewport,
        dt: Duration,
    ) -> Vec<ElementId> {
        let mut revealed = Vec::new();
        for event in self.timers.advance(dt) {
            match event {
                TimerEvent::Sweep => self.run_sweep(probe, viewport),
                TimerEvent::Reveal(id) => {
                    if self.reveal(page, id) {
                        revealed.push(id);
                    }
                }
            }
        }
        revealed
    }

    /// Live observation pass: reveal every still-observed target whose box
    /// currently qualifies under its own group's trigger window.
    ///
    /// Hosts call this when the platform reports intersection changes
    /// (scroll, resize). Runs concurrently with the sweep in the sense that
    /// both paths converge on [`reveal`](Self::reveal); the loser of any race
    /// is a no-op. Returns the targets revealed by this call.
    pub fn observe_viewport(
        &mut self,
        page: &mut Page,
        probe: &dyn GeometryProbe,
        viewport: Viewport,
    ) -> Vec<ElementId> {
        let due: Vec<ElementId> = self
            .targets
            .iter()
            .filter(|t| t.observed && !t.revealed)
            .filter(|t| {
                probe
                    .element_box(t.id)
                    .is_some_and(|b| t.group.live_window().admits(b, viewport))
            })
            .map(|t| t.id)
            .collect();

        let mut revealed = Vec::new();
        for id in due {
            if self.reveal(page, id) {
                revealed.push(id);
            }
        }
        revealed
    }

    /// Transition one target to visible. Idempotent: returns `true` only on
    /// the first call for a target; later calls (from whichever path) change
    /// nothing. Releases the target's observation subscription immediately.
    pub fn reveal(&mut self, page: &mut Page, id: ElementId) -> bool {
        let Some(target) = self.targets.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if target.revealed {
            trace!(id = id.0, "reveal skipped: already visible");
            return false;
        }
        target.revealed = true;
        target.observed = false;
        page.remove_class(id, HIDDEN_CLASS);
        page.add_class(id, VISIBLE_CLASS);
        trace!(id = id.0, group = ?target.group, "revealed");
        true
    }

    /// Whether `id` is a registered target that has been revealed.
    #[must_use]
    pub fn is_revealed(&self, id: ElementId) -> bool {
        self.targets.iter().any(|t| t.id == id && t.revealed)
    }

    /// Whether `id` still holds a live observation subscription.
    #[must_use]
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.targets.iter().any(|t| t.id == id && t.observed)
    }

    /// Number of registered targets not yet revealed.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.targets.iter().filter(|t| !t.revealed).count()
    }

    /// Whether the one-shot sweep has already run.
    #[must_use]
    pub fn sweep_done(&self) -> bool {
        self.sweep == SweepPhase::Done
    }

    fn run_sweep(&mut self, probe: &dyn GeometryProbe, viewport: Viewport) {
        self.sweep = SweepPhase::Done;
        let mut qualifying = 0u32;
        // The sweep applies the expanded window to every group, including
        // Other; only live observation is stricter. Preserved as observed in
        // the page this engine replaces.
        for target in self.targets.iter().filter(|t| !t.revealed) {
            let qualifies = probe
                .element_box(target.id)
                .is_some_and(|b| TriggerWindow::EXPANDED.admits(b, viewport));
            if qualifies {
                let delay = self.config.base_delay + self.config.stagger * qualifying;
                self.timers.schedule_after(delay, TimerEvent::Reveal(target.id));
                qualifying += 1;
            }
        }
        debug!(qualifying, "initial-viewport sweep scheduled");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
