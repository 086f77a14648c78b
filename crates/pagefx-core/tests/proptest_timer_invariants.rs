//! Property-based invariant tests for the virtual-time timer queue.
//!
//! Verifies structural guarantees under arbitrary schedule/advance
//! interleavings:
//!
//! 1. Conservation: everything scheduled fires exactly once, nothing else
//! 2. Delivery order is non-decreasing in deadline
//! 3. Equal deadlines deliver in insertion order
//! 4. Virtual time is the sum of advances
//! 5. Nothing fires before its deadline, everything at or after it

use pagefx_core::TimerQueue;
use proptest::prelude::*;
use web_time::Duration;

#[derive(Debug, Clone)]
enum Op {
    Schedule(u64),
    Advance(u64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..=500).prop_map(Op::Schedule),
        (0u64..=500).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn conservation_and_ordering(ops in proptest::collection::vec(arb_op(), 0..=50)) {
        let mut q: TimerQueue<usize> = TimerQueue::new();
        let mut scheduled: Vec<(usize, Duration)> = Vec::new();
        let mut fired: Vec<usize> = Vec::new();
        let mut fired_deadlines: Vec<Duration> = Vec::new();
        let mut elapsed = Duration::ZERO;

        for op in &ops {
            match op {
                Op::Schedule(delay) => {
                    let token = scheduled.len();
                    let deadline = q.now() + Duration::from_millis(*delay);
                    q.schedule_after(Duration::from_millis(*delay), token);
                    scheduled.push((token, deadline));
                }
                Op::Advance(ms) => {
                    elapsed += Duration::from_millis(*ms);
                    for token in q.advance(Duration::from_millis(*ms)) {
                        // 5. Due at or after its deadline, never before.
                        let (_, deadline) = scheduled[token];
                        prop_assert!(deadline <= q.now());
                        fired.push(token);
                        fired_deadlines.push(deadline);
                    }
                    // 4. Virtual time is the sum of advances.
                    prop_assert_eq!(q.now(), elapsed);
                }
            }
        }

        // 2./3. Deadline order, insertion order on ties.
        for pair in fired_deadlines.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        for (i, pair) in fired.windows(2).enumerate() {
            if fired_deadlines[i] == fired_deadlines[i + 1] {
                prop_assert!(pair[0] < pair[1], "tie broken out of insertion order");
            }
        }

        // 1. Conservation: drain the rest; every token fires exactly once.
        fired.extend(q.advance(Duration::from_secs(3600)));
        prop_assert!(q.is_empty());
        let mut all = fired.clone();
        all.sort_unstable();
        let expected: Vec<usize> = (0..scheduled.len()).collect();
        prop_assert_eq!(all, expected);
    }
}
