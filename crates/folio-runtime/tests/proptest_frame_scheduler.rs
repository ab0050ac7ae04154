//! Property tests for frame request bookkeeping.
//!
//! ## Invariants
//!
//! 1. Replace-then-request (cancel the previous handle before requesting a
//!    new one) never leaves more than one request pending.
//! 2. `take_due` never returns a cancelled handle.
//! 3. Handles returned by `take_due` are in request order.

use folio_runtime::{FrameHandle, FrameHost, FrameScheduler};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Request,
    CancelLast,
    Frame,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![Just(Op::Request), Just(Op::CancelLast), Just(Op::Frame)],
        1..200,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn replace_then_request_keeps_one_pending(bursts in prop::collection::vec(1usize..20, 1..30)) {
        let mut scheduler = FrameScheduler::new();
        let mut pending: Option<FrameHandle> = None;
        for burst in bursts {
            for _ in 0..burst {
                if let Some(handle) = pending.take() {
                    scheduler.cancel_frame(handle);
                }
                pending = Some(scheduler.request_frame());
                prop_assert_eq!(scheduler.pending_count(), 1);
            }
            let due = scheduler.take_due();
            prop_assert_eq!(due.len(), 1);
            prop_assert_eq!(Some(due[0]), pending.take());
        }
    }

    #[test]
    fn cancelled_handles_never_fire(ops in arb_ops()) {
        let mut scheduler = FrameScheduler::new();
        let mut issued: Vec<FrameHandle> = Vec::new();
        let mut cancelled: Vec<FrameHandle> = Vec::new();
        for op in ops {
            match op {
                Op::Request => issued.push(scheduler.request()),
                Op::CancelLast => {
                    if let Some(last) = issued.last().copied() {
                        if scheduler.cancel(last) {
                            cancelled.push(last);
                        }
                    }
                }
                Op::Frame => {
                    let due = scheduler.take_due();
                    for handle in &due {
                        prop_assert!(!cancelled.contains(handle));
                    }
                    prop_assert!(due.windows(2).all(|w| w[0] < w[1]));
                }
            }
        }
    }
}
