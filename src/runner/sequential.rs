use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::runner::{Done, QueueOutcome, StepQueue, StepRunner};

/// The default [`StepRunner`] implementation.
///
/// Runs one step at a time, blocking on each step's completion signal before
/// moving on. A step that panics synchronously counts as failed without
/// stopping the run, and so does a step whose [`Done`] is dropped without a
/// signal.
#[derive(Debug, Default, Clone)]
pub struct SequentialRunner {
    fail_fast: bool,
}

impl SequentialRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the remaining steps after the first failure.
    ///
    /// The queue's completion callback still fires exactly once, with the
    /// skipped count recorded on the outcome.
    pub fn with_fail_fast(self, fail_fast: bool) -> Self {
        Self { fail_fast }
    }

    /// Convert a panic payload into a string.
    ///
    /// This matches the common payload types produced by `panic!`
    /// (`&'static str` and `String`). Other payload types are formatted as a
    /// generic placeholder.
    pub fn payload_as_string(err: Box<dyn Any + Send + 'static>) -> String {
        err.downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("Box<dyn Any>"))
    }
}

impl StepRunner for SequentialRunner {
    fn run(&self, queue: StepQueue<'_>) {
        let mut failures = Vec::new();
        let mut skipped = 0;

        let mut steps = queue.steps.into_iter();
        for step in steps.by_ref() {
            let (done, completion) = Done::channel();
            let result = match catch_unwind(AssertUnwindSafe(|| step.invoke(done))) {
                Ok(()) => match completion.wait() {
                    Some(result) => result.0,
                    None => Err(String::from("step never signalled completion")),
                },
                Err(payload) => Err(Self::payload_as_string(payload)),
            };

            if let Err(msg) = result {
                failures.push(msg);
                if self.fail_fast {
                    skipped = steps.len();
                    break;
                }
            }
        }

        (queue.on_complete)(QueueOutcome { failures, skipped });
    }
}
