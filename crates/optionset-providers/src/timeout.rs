// crates/optionset-providers/src/timeout.rs
// ============================================================================
// Module: Time-Bounded Execution
// Description: Bounded-wait execution of a task on a worker thread.
// Purpose: Keep interactive script validation from hanging the caller.
// Dependencies: optionset-core
// ============================================================================

//! ## Overview
//! Runs a task on a dedicated worker thread and blocks the caller until the
//! task completes or a wall-clock deadline expires, whichever is first. This
//! is a bounded wait, not a scheduler: on expiry the worker is abandoned, not
//! stopped, so a timed-out evaluation's side effects may still land.
//! Invariants:
//! - Deadline expiry is reported distinctly from task failure.
//! - The caller never observes a result sent after the deadline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::thread;
use std::time::Duration;

use optionset_core::TimeoutError;

// ============================================================================
// SECTION: Bounded Wait
// ============================================================================

/// Runs `task` on a worker thread, waiting at most `limit` for its result.
///
/// On expiry the worker thread keeps running detached; its eventual result is
/// discarded when the channel closes. Cancellation is best-effort abandonment.
///
/// # Errors
///
/// Returns [`TimeoutError::Expired`] when the deadline passes first, or
/// [`TimeoutError::Worker`] when the worker cannot be spawned or terminates
/// without sending a result (for example, a panic inside the task).
pub fn run_with_timeout<T, F>(task: F, limit: Duration) -> Result<T, TimeoutError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new().name("optionset-eval".to_string()).spawn(move || {
        // The send fails only when the caller has already timed out and gone.
        let _ = sender.send(task());
    });
    if spawned.is_err() {
        return Err(TimeoutError::Worker);
    }
    match receiver.recv_timeout(limit) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => Err(TimeoutError::Expired {
            limit,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(TimeoutError::Worker),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for deadline expiry and worker failure reporting.
    #![allow(
        clippy::unwrap_used,
        clippy::panic,
        reason = "Panic-based assertions are permitted in tests."
    )]

    use std::thread;
    use std::time::Duration;
    use std::time::Instant;

    use optionset_core::TimeoutError;

    use super::run_with_timeout;

    /// Tests that a task finishing before the deadline returns its value.
    #[test]
    fn completed_task_returns_its_value() {
        let value = run_with_timeout(|| 7_i32, Duration::from_secs(5)).unwrap();
        assert_eq!(value, 7);
    }

    /// Tests that expiry is reported promptly, not after the task ends.
    #[test]
    fn sleeping_task_expires_within_bounded_margin() {
        let started = Instant::now();
        let outcome = run_with_timeout(
            || {
                thread::sleep(Duration::from_secs(10));
                0_i32
            },
            Duration::from_millis(100),
        );
        let elapsed = started.elapsed();
        assert!(matches!(outcome, Err(TimeoutError::Expired { .. })));
        assert!(elapsed < Duration::from_millis(400), "expiry took {elapsed:?}");
    }

    /// Tests that a panicking task surfaces as a worker failure.
    #[test]
    fn panicking_task_reports_worker_failure() {
        let outcome: Result<i32, TimeoutError> =
            run_with_timeout(|| panic!("boom"), Duration::from_secs(5));
        assert!(matches!(outcome, Err(TimeoutError::Worker)));
    }
}
