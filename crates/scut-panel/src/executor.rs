//! Applies a cut plan to the host.
//!
//! The whole batch runs inside one undo group. A failed cut is logged and
//! recorded; the remaining cuts still run.

use scut_media::CutPlan;
use scut_models::{CutRange, Ticks};
use tracing::{debug, info, warn};

use crate::error::{PanelError, PanelResult};
use crate::host::{HostEditor, HostResult};
use crate::metrics;

/// Label of the undo group wrapping a batch of cuts.
pub const UNDO_GROUP_LABEL: &str = "Cut Silence";

/// A cut the host rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct CutFailure {
    /// Position in the plan's execution order.
    pub index: usize,
    pub range: CutRange,
    pub error: PanelError,
}

/// Result of executing a plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutOutcome {
    /// Cuts the host applied.
    pub applied: usize,
    pub failures: Vec<CutFailure>,
}

/// Execute `plan` against `host`, highest timecode first.
///
/// Fails only when the undo group cannot be opened; no cut has been made at
/// that point.
pub fn execute_plan<H: HostEditor + ?Sized>(host: &mut H, plan: &CutPlan) -> PanelResult<CutOutcome> {
    host.begin_undo_group(UNDO_GROUP_LABEL).map_err(|e| {
        PanelError::host_operation_failed(format!("could not open undo group: {}", e))
    })?;

    let mut outcome = CutOutcome::default();
    for (index, range) in plan.cuts.iter().enumerate() {
        debug!(index, start = range.start, end = range.end, "Processing cut");
        match apply_cut(host, range) {
            Ok(()) => outcome.applied += 1,
            Err(e) => {
                warn!(index, start = range.start, end = range.end, error = %e, "Cut failed");
                outcome.failures.push(CutFailure {
                    index,
                    range: *range,
                    error: e.into(),
                });
            }
        }
    }

    if let Err(e) = host.end_undo_group() {
        warn!(error = %e, "Failed to close undo group");
    }

    metrics::record_cuts(outcome.applied, outcome.failures.len(), plan.skipped);
    info!(
        applied = outcome.applied,
        failed = outcome.failures.len(),
        skipped = plan.skipped,
        merged = plan.merged,
        "Cut batch finished"
    );

    Ok(outcome)
}

fn apply_cut<H: HostEditor + ?Sized>(host: &mut H, range: &CutRange) -> HostResult<()> {
    host.set_in_point(Ticks::from_seconds(range.start))?;
    host.set_out_point(Ticks::from_seconds(range.end))?;
    host.ripple_delete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, MockHostEditor};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn plan(cuts: Vec<CutRange>) -> CutPlan {
        CutPlan {
            cuts,
            skipped: 0,
            merged: 0,
        }
    }

    #[test]
    fn test_cuts_run_inside_undo_group_in_order() {
        let mut host = MockHostEditor::new();
        let mut seq = Sequence::new();

        host.expect_begin_undo_group()
            .with(eq(UNDO_GROUP_LABEL))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        for (start, end) in [(20.0, 21.0), (5.0, 6.5)] {
            host.expect_set_in_point()
                .with(eq(Ticks::from_seconds(start)))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            host.expect_set_out_point()
                .with(eq(Ticks::from_seconds(end)))
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            host.expect_ripple_delete()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|| Ok(()));
        }
        host.expect_end_undo_group()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let outcome = execute_plan(
            &mut host,
            &plan(vec![
                CutRange { start: 20.0, end: 21.0 },
                CutRange { start: 5.0, end: 6.5 },
            ]),
        )
        .unwrap();

        assert_eq!(outcome.applied, 2);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_failed_cut_is_not_fatal() {
        let mut host = MockHostEditor::new();
        host.expect_begin_undo_group().returning(|_| Ok(()));
        host.expect_end_undo_group().times(1).returning(|| Ok(()));
        host.expect_set_in_point().returning(|_| Ok(()));
        host.expect_set_out_point().returning(|_| Ok(()));

        let mut calls = 0;
        host.expect_ripple_delete().times(3).returning(move || {
            calls += 1;
            if calls == 2 {
                Err(HostError::operation("track locked"))
            } else {
                Ok(())
            }
        });

        let outcome = execute_plan(
            &mut host,
            &plan(vec![
                CutRange { start: 30.0, end: 31.0 },
                CutRange { start: 20.0, end: 21.0 },
                CutRange { start: 10.0, end: 11.0 },
            ]),
        )
        .unwrap();

        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(
            outcome.failures[0].error,
            PanelError::HostOperationFailed("track locked".to_string())
        );
    }

    #[test]
    fn test_undo_group_failure_aborts_before_cutting() {
        let mut host = MockHostEditor::new();
        host.expect_begin_undo_group()
            .returning(|_| Err(HostError::operation("busy")));
        host.expect_set_in_point().never();
        host.expect_ripple_delete().never();

        let result = execute_plan(&mut host, &plan(vec![CutRange { start: 1.0, end: 2.0 }]));
        assert!(matches!(result, Err(PanelError::HostOperationFailed(_))));
    }

    #[test]
    fn test_empty_plan_still_balances_undo_group() {
        let mut host = MockHostEditor::new();
        host.expect_begin_undo_group().times(1).returning(|_| Ok(()));
        host.expect_end_undo_group().times(1).returning(|| Ok(()));

        let outcome = execute_plan(&mut host, &CutPlan::default()).unwrap();
        assert_eq!(outcome.applied, 0);
    }
}
