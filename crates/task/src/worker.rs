use jiff::Timestamp;
use tracing::{error, info};

use crate::{
    Clock, Controller, OutcomeSink, SinkError, SolveOutcome, SolveTask, SystemClock, TaskRecord,
};

/// Solves tasks one at a time and records each transition.
#[derive(Debug)]
pub struct Worker<S, C = SystemClock> {
    controller: Controller<C>,
    sink: S,
}

impl<S: OutcomeSink, C: Clock> Worker<S, C> {
    pub fn new(controller: Controller<C>, sink: S) -> Self {
        Self { controller, sink }
    }

    /// Marks `task` as processing, solves it, and records the outcome.
    ///
    /// The TTL is measured from the moment this call accepts the task.
    ///
    /// # Errors
    ///
    /// Returns an error if either record could not be stored. A failed
    /// processing record stops the task before it is solved.
    pub fn process(&mut self, task: &SolveTask) -> Result<SolveOutcome, SinkError> {
        let accepted_at = self.controller.clock().now();
        info!(task_id = task.id, expression = %task.expression, "processing task");
        self.store(&TaskRecord::processing(task.id))?;

        let outcome = self.controller.solve(task, accepted_at);
        self.store(&TaskRecord::from_outcome(task.id, &outcome, Timestamp::now()))?;
        Ok(outcome)
    }

    fn store(&mut self, record: &TaskRecord) -> Result<(), SinkError> {
        self.sink.record(record).inspect_err(|e| {
            error!(
                task_id = record.id,
                status = %record.status,
                error = %e,
                "failed to store record"
            );
        })
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySink, SolveConfig, Status};

    struct FailingSink;

    impl OutcomeSink for FailingSink {
        fn record(&mut self, _record: &TaskRecord) -> Result<(), SinkError> {
            Err(SinkError::Closed)
        }
    }

    fn task(id: i64, expression: &str) -> SolveTask {
        SolveTask {
            id,
            expression: expression.into(),
            point_a: 0.0,
            point_b: 3.0,
            ttl: 60.0,
        }
    }

    #[test]
    fn records_terminal_state() {
        let controller = Controller::new(SolveConfig::default());
        let mut worker = Worker::new(controller, MemorySink::new());

        let outcome = worker.process(&task(1, "x^2 - 4")).unwrap();
        assert_eq!(outcome.status(), Status::Completed);

        let record = worker.sink().get(1).unwrap();
        assert_eq!(record.status, Status::Completed);
        assert_eq!(record.newton_result, Some(2.0));
        assert_eq!(record.bisection_result, Some(2.0));
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn redelivery_overwrites_the_record() {
        let controller = Controller::new(SolveConfig::default());
        let mut worker = Worker::new(controller, MemorySink::new());

        let first = worker.process(&task(1, "x^2 - 4")).unwrap();
        let first_record = worker.sink().get(1).cloned().unwrap();
        let second = worker.process(&task(1, "x^2 - 4")).unwrap();
        let second_record = worker.sink().get(1).cloned().unwrap();

        assert_eq!(first, second);
        assert_eq!(worker.sink().len(), 1);
        assert_eq!(first_record.newton_result, second_record.newton_result);
        assert_eq!(first_record.bisection_result, second_record.bisection_result);
    }

    #[test]
    fn sink_failures_are_returned() {
        let mut worker = Worker::new(Controller::new(SolveConfig::default()), FailingSink);
        assert!(matches!(
            worker.process(&task(1, "x")),
            Err(SinkError::Closed)
        ));
    }
}
