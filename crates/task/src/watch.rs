use std::time::Instant;

use rootline_core::Observer;
use rootline_solvers::equation::{bisection, newton, scan};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::Clock;

/// Observer shared by all three solver stages of a task.
///
/// Logs every solver event at `trace` level and asks the solver to stop once
/// the deadline passes or the cancellation token fires.
#[derive(Debug)]
pub(crate) struct Watch<'a, C> {
    task_id: i64,
    clock: &'a C,
    deadline: Option<Instant>,
    cancel: Option<&'a CancellationToken>,
}

impl<C> Clone for Watch<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Watch<'_, C> {}

impl<'a, C: Clock> Watch<'a, C> {
    pub(crate) fn new(
        task_id: i64,
        clock: &'a C,
        deadline: Option<Instant>,
        cancel: Option<&'a CancellationToken>,
    ) -> Self {
        Self {
            task_id,
            clock,
            deadline,
            cancel,
        }
    }

    /// Returns `true` if the solve should stop now.
    fn tripped(&self, stage: &'static str) -> bool {
        if let Some(token) = self.cancel
            && token.is_cancelled()
        {
            debug!(task_id = self.task_id, stage, "solve cancelled");
            return true;
        }
        if let Some(deadline) = self.deadline
            && self.clock.now() > deadline
        {
            debug!(task_id = self.task_id, stage, "deadline passed");
            return true;
        }
        false
    }
}

impl<C: Clock> Observer<scan::Event, scan::Action> for Watch<'_, C> {
    fn observe(&mut self, event: &scan::Event) -> Option<scan::Action> {
        trace!(
            task_id = self.task_id,
            index = event.index,
            x = event.x,
            evaluation = ?event.evaluation,
            "scan sample"
        );
        self.tripped("scan").then_some(scan::Action::StopEarly)
    }
}

impl<C: Clock> Observer<bisection::Event, bisection::Action> for Watch<'_, C> {
    fn observe(&mut self, event: &bisection::Event) -> Option<bisection::Action> {
        trace!(
            task_id = self.task_id,
            iter = event.iter,
            left = event.bracket[0],
            right = event.bracket[1],
            x = event.x,
            evaluation = ?event.evaluation,
            "bisection step"
        );
        self.tripped("bisection")
            .then_some(bisection::Action::StopEarly)
    }
}

impl<C: Clock> Observer<newton::Event, newton::Action> for Watch<'_, C> {
    fn observe(&mut self, event: &newton::Event) -> Option<newton::Action> {
        trace!(
            task_id = self.task_id,
            iter = event.iter,
            x = event.x,
            value = event.value,
            derivative = event.derivative,
            "newton step"
        );
        self.tripped("newton").then_some(newton::Action::StopEarly)
    }
}
