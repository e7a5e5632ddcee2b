use crate::runner::{QueueOutcome, StepQueue, StepRunner};

/// A [`StepRunner`] implementation that runs no steps.
///
/// Every queued step is skipped and the queue completes immediately. Useful
/// for wiring a tree dry, where only start notifications and result summaries
/// are of interest.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoRunner;

impl StepRunner for NoRunner {
    fn run(&self, queue: StepQueue<'_>) {
        let skipped = queue.steps.len();
        (queue.on_complete)(QueueOutcome {
            failures: Vec::new(),
            skipped,
        });
    }
}
