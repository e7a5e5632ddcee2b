//! Step sequencing for suitest.
//!
//! A step runner consumes a [`StepQueue`]: an ordered list of [`Step`]s plus
//! a completion callback. Each step receives a [`Done`] handle and eventually
//! signals its own completion through it; the runner never starts step `N + 1`
//! before step `N` has signalled.
//!
//! Steps may do asynchronous work internally (the [`Done`] handle is `Send`
//! and may be moved to another thread), but the pipeline itself stays
//! strictly ordered: the queue's completion callback fires exactly once,
//! after the last step has signalled (or immediately for an empty queue).
//!
//! Implement [`StepRunner`] to define how queued steps are driven to
//! completion.

use std::fmt::Debug;

use crossbeam_channel::{Receiver, Sender};

use crate::hook::Queueable;

mod sequential;
pub use sequential::*;

mod no;
pub use no::*;

/// A strategy for driving a [`StepQueue`] to completion.
pub trait StepRunner {
    /// Run the queued steps strictly in order and invoke the queue's
    /// completion callback exactly once after the last step has signalled
    /// (or immediately when the queue is empty).
    fn run(&self, queue: StepQueue<'_>);
}

/// One schedulable unit: a one-shot callable receiving the [`Done`] handle it
/// must signal.
pub struct Step<'q> {
    run: Box<dyn FnOnce(Done) + 'q>,
}

impl<'q> Step<'q> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Done) + 'q,
    {
        Self { run: Box::new(f) }
    }

    pub fn from_queueable(queueable: &'q Queueable) -> Self {
        Self::new(move |done| queueable.invoke(done))
    }

    pub fn invoke(self, done: Done) {
        (self.run)(done)
    }
}

impl Debug for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step(...)")
    }
}

/// An ordered list of steps plus the callback to invoke once all of them have
/// completed.
pub struct StepQueue<'q> {
    pub steps: Vec<Step<'q>>,
    pub on_complete: Box<dyn FnOnce(QueueOutcome) + 'q>,
}

impl<'q> StepQueue<'q> {
    pub fn new<F>(steps: Vec<Step<'q>>, on_complete: F) -> Self
    where
        F: FnOnce(QueueOutcome) + 'q,
    {
        Self {
            steps,
            on_complete: Box::new(on_complete),
        }
    }
}

impl Debug for StepQueue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepQueue")
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}

/// What a completed queue looked like: the failure messages collected from
/// its steps and how many steps were never attempted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueueOutcome {
    pub failures: Vec<String>,
    pub skipped: usize,
}

impl QueueOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The completion handle handed to a step.
///
/// Signalling consumes the handle, so a step can complete at most once. A
/// `Done` dropped without signalling is reported as a failed step by the
/// runner instead of hanging the run.
#[derive(Debug)]
pub struct Done {
    tx: Sender<StepResult>,
}

impl Done {
    /// Create a connected `Done`/[`Completion`] pair.
    pub fn channel() -> (Done, Completion) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        (Done { tx }, Completion { rx })
    }

    pub fn ok(self) {
        self.finish(())
    }

    pub fn fail(self, msg: impl Into<String>) {
        self.finish(StepResult(Err(msg.into())))
    }

    pub fn finish(self, result: impl Into<StepResult>) {
        let _ = self.tx.send(result.into());
    }
}

/// The runner's half of a step's completion signal.
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<StepResult>,
}

impl Completion {
    /// Block until the step signals, or return `None` when its [`Done`] was
    /// dropped without a signal.
    pub fn wait(self) -> Option<StepResult> {
        self.rx.recv().ok()
    }
}

/// The result of one completed step.
#[derive(Debug)]
pub struct StepResult(pub Result<(), String>);

impl From<()> for StepResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Debug> From<Result<(), E>> for StepResult {
    fn from(v: Result<(), E>) -> Self {
        StepResult(v.map_err(|e| format!("{e:#?}")))
    }
}
