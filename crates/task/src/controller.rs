use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    time::{Duration, Instant},
};

use rootline_expr::{Formula, normalize};
use rootline_solvers::equation::{Bracket, bisection, newton, scan};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{Clock, SolveConfig, SolveOutcome, SolveTask, SystemClock, watch::Watch};

/// Turns a [`SolveTask`] into exactly one [`SolveOutcome`].
///
/// The controller normalizes the expression, scans `[point_a, point_b]` for a
/// bracket, then runs Newton from the bracket midpoint and bisection on the
/// bracket independently. The TTL is measured from the acceptance instant
/// passed to [`Controller::solve`].
///
/// The TTL is checked after both solvers finish, and a late finish reports
/// `TtlExceeded` carrying the computed results. With preemption enabled, the
/// solver loops also stop as soon as the deadline passes, and the task
/// reports `TtlExceeded` with no results.
///
/// A fired cancellation token is treated like a passed deadline.
#[derive(Debug, Clone)]
pub struct Controller<C = SystemClock> {
    config: SolveConfig,
    clock: C,
    cancel: Option<CancellationToken>,
}

/// Faults that end a solve as `RuntimeFailure`.
#[derive(Debug, Error)]
enum Fault {
    #[error("ttl must be positive, got {0}")]
    Ttl(f64),

    #[error(transparent)]
    Scan(#[from] scan::Error),

    #[error("panic during solve: {0}")]
    Panic(String),
}

/// A solver stopped at the watch's request.
struct Preempted;

impl Controller<SystemClock> {
    /// Creates a controller using the system clock.
    #[must_use]
    pub fn new(config: SolveConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Controller<C> {
    /// Creates a controller using a custom clock.
    #[must_use]
    pub fn with_clock(config: SolveConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            cancel: None,
        }
    }

    /// Attaches a token that stops in-flight solves when cancelled.
    #[must_use]
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self
        }
    }

    #[must_use]
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Solves `task`, measuring its TTL from `accepted_at`.
    ///
    /// Never panics and never fails; faults are reported as
    /// [`SolveOutcome::RuntimeFailure`].
    pub fn solve(&self, task: &SolveTask, accepted_at: Instant) -> SolveOutcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run(task, accepted_at)))
            .unwrap_or_else(|payload| Err(Fault::Panic(panic_message(payload.as_ref()))));

        let outcome = result.unwrap_or_else(|fault| {
            warn!(task_id = task.id, error = %fault, "solve failed");
            SolveOutcome::RuntimeFailure {
                message: fault.to_string(),
            }
        });

        let elapsed = self.clock.now().saturating_duration_since(accepted_at);
        info!(
            task_id = task.id,
            status = %outcome.status(),
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "task solved"
        );
        outcome
    }

    /// Solves `task`, accepting it now.
    pub fn solve_now(&self, task: &SolveTask) -> SolveOutcome {
        self.solve(task, self.clock.now())
    }

    fn run(&self, task: &SolveTask, accepted_at: Instant) -> Result<SolveOutcome, Fault> {
        if task.ttl.is_nan() || task.ttl <= 0.0 {
            return Err(Fault::Ttl(task.ttl));
        }

        let deadline = if self.config.preempt {
            Duration::try_from_secs_f64(task.ttl)
                .ok()
                .and_then(|ttl| accepted_at.checked_add(ttl))
        } else {
            None
        };
        let watch = Watch::new(task.id, &self.clock, deadline, self.cancel.as_ref());

        let formula = Formula::compile(normalize(&task.expression));
        debug!(task_id = task.id, expression = formula.source(), "normalized");

        let interval = [task.point_a, task.point_b];
        let bracket = match scan::find_bracket(&formula, interval, &self.config.scan, watch)? {
            scan::Outcome::Found(bracket) => bracket,
            scan::Outcome::NotFound => return Ok(SolveOutcome::NoRootInInterval),
            scan::Outcome::InvalidExpression => return Ok(SolveOutcome::InvalidExpression),
            scan::Outcome::StoppedByObserver => return Ok(preempted()),
        };
        debug!(
            task_id = task.id,
            left = bracket.left(),
            right = bracket.right(),
            "bracket found"
        );

        let Ok(newton) = self.newton(task.id, &formula, bracket.midpoint(), watch) else {
            return Ok(preempted());
        };
        let Ok(bisection) = self.bisection(task.id, &formula, &bracket, watch) else {
            return Ok(preempted());
        };

        let elapsed = self.clock.now().saturating_duration_since(accepted_at);
        if elapsed.as_secs_f64() > task.ttl {
            return Ok(SolveOutcome::TtlExceeded { newton, bisection });
        }
        Ok(SolveOutcome::Completed { newton, bisection })
    }

    fn newton(
        &self,
        task_id: i64,
        formula: &Formula,
        x0: f64,
        watch: Watch<'_, C>,
    ) -> Result<Option<f64>, Preempted> {
        match newton::solve(formula, x0, &self.config.newton, watch) {
            Ok(solution) => match solution.status {
                newton::Status::Converged => Ok(Some(solution.x)),
                newton::Status::MaxIters => {
                    debug!(task_id, iters = solution.iters, "newton did not converge");
                    Ok(None)
                }
                newton::Status::StoppedByObserver => Err(Preempted),
            },
            Err(error) => {
                debug!(task_id, %error, "newton failed");
                Ok(None)
            }
        }
    }

    fn bisection(
        &self,
        task_id: i64,
        formula: &Formula,
        bracket: &Bracket,
        watch: Watch<'_, C>,
    ) -> Result<Option<f64>, Preempted> {
        match bisection::solve(formula, bracket, &self.config.bisection, watch) {
            Ok(solution) => match solution.status {
                bisection::Status::Converged => Ok(Some(solution.x)),
                bisection::Status::MaxIters => {
                    debug!(
                        task_id,
                        iters = solution.iters,
                        width = solution.width,
                        "bisection hit its iteration cap"
                    );
                    Ok(Some(solution.x))
                }
                bisection::Status::StoppedByObserver => Err(Preempted),
            },
            Err(error) => {
                debug!(task_id, %error, "bisection failed");
                Ok(None)
            }
        }
    }
}

fn preempted() -> SolveOutcome {
    SolveOutcome::TtlExceeded {
        newton: None,
        bisection: None,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn task(expression: &str, point_a: f64, point_b: f64) -> SolveTask {
        SolveTask {
            id: 1,
            expression: expression.into(),
            point_a,
            point_b,
            ttl: 60.0,
        }
    }

    fn results(outcome: &SolveOutcome) -> (f64, f64) {
        match outcome {
            SolveOutcome::Completed {
                newton: Some(newton),
                bisection: Some(bisection),
            } => (*newton, *bisection),
            other => panic!("expected both results, got {other:?}"),
        }
    }

    #[test]
    fn solves_quadratic() {
        let controller = Controller::new(SolveConfig::default());
        let outcome = controller.solve_now(&task("x^2 - 4", 0.0, 3.0));

        let (newton, bisection) = results(&outcome);
        assert_relative_eq!(newton, 2.0, epsilon = 1e-3);
        assert_relative_eq!(bisection, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn reports_scan_outcomes() {
        let controller = Controller::new(SolveConfig::default());
        assert_eq!(
            controller.solve_now(&task("x^2 + 1", -2.0, 2.0)),
            SolveOutcome::NoRootInInterval
        );
        assert_eq!(
            controller.solve_now(&task("x +* 2", 0.0, 1.0)),
            SolveOutcome::InvalidExpression
        );
    }

    #[test]
    fn newton_failure_keeps_bisection() {
        let config = SolveConfig::new(0.01, 1e-4, 1e-4, 0).expect("valid config");
        let controller = Controller::new(config);
        let outcome = controller.solve_now(&task("x^2 - 4", 0.0, 3.0));

        let SolveOutcome::Completed {
            newton: None,
            bisection: Some(bisection),
        } = outcome
        else {
            panic!("expected only a bisection result, got {outcome:?}");
        };
        assert_relative_eq!(bisection, 2.0, epsilon = 1e-3);
    }

    #[test]
    fn rejects_bad_tasks_as_runtime_failures() {
        let controller = Controller::new(SolveConfig::default());

        let mut bad_ttl = task("x", -1.0, 1.0);
        bad_ttl.ttl = 0.0;
        assert!(matches!(
            controller.solve_now(&bad_ttl),
            SolveOutcome::RuntimeFailure { .. }
        ));

        let outcome = controller.solve_now(&task("x", f64::NEG_INFINITY, 1.0));
        let SolveOutcome::RuntimeFailure { message } = outcome else {
            panic!("expected a runtime failure");
        };
        assert!(message.contains("non-finite"), "{message}");
    }

    #[test]
    fn cancelled_token_preempts() {
        let token = CancellationToken::new();
        token.cancel();
        let controller = Controller::new(SolveConfig::default()).with_cancellation(token);
        assert!(!controller.config().preempt());

        assert_eq!(
            controller.solve_now(&task("x^2 - 4", 0.0, 3.0)),
            preempted()
        );
    }

    #[test]
    fn panic_payloads_become_messages() {
        let payload = panic::catch_unwind(|| panic!("boom")).expect_err("panics");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = panic::catch_unwind(|| panic!("{} apples", 3)).expect_err("panics");
        assert_eq!(panic_message(payload.as_ref()), "3 apples");
    }
}
