use std::sync::{Arc, Mutex};

use crate::{
    HookChain, SuiteResult, TestCase,
    runner::{Done, QueueOutcome, StepQueue, StepRunner},
};

/// Shared execution-order log for hook and child ordering assertions.
#[derive(Debug, Default, Clone)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn hook(&self, label: &'static str) -> impl Fn() + use<> {
        let trace = self.clone();
        move || trace.push(label)
    }
}

/// A leaf that only records its execution.
pub struct FakeCase {
    label: &'static str,
    executable: bool,
    trace: Trace,
}

impl FakeCase {
    pub fn new(label: &'static str, trace: &Trace) -> Self {
        Self {
            label,
            executable: true,
            trace: trace.clone(),
        }
    }

    pub fn non_executable(label: &'static str, trace: &Trace) -> Self {
        Self {
            executable: false,
            ..Self::new(label, trace)
        }
    }
}

impl TestCase for FakeCase {
    fn is_executable(&self) -> bool {
        self.executable
    }

    fn execute(&self, _: &HookChain<'_>, done: Done) {
        self.trace.push(self.label);
        done.ok();
    }
}

/// Records the size of every queue it receives and completes it without
/// running any step.
#[derive(Debug, Default, Clone)]
pub struct ProbeRunner {
    queues: Arc<Mutex<Vec<usize>>>,
}

impl ProbeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_counts(&self) -> Vec<usize> {
        self.queues.lock().unwrap().clone()
    }
}

impl StepRunner for ProbeRunner {
    fn run(&self, queue: StepQueue<'_>) {
        self.queues.lock().unwrap().push(queue.steps.len());
        let skipped = queue.steps.len();
        (queue.on_complete)(QueueOutcome {
            failures: Vec::new(),
            skipped,
        });
    }
}

/// Collects suite result summaries.
#[derive(Debug, Default, Clone)]
pub struct ResultSink(Arc<Mutex<Vec<SuiteResult>>>);

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> Box<dyn Fn(SuiteResult)> {
        let sink = self.clone();
        Box::new(move |result| sink.0.lock().unwrap().push(result))
    }

    pub fn entries(&self) -> Vec<SuiteResult> {
        self.0.lock().unwrap().clone()
    }
}

macro_rules! spec {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::Spec::new($crate::SpecConfig {
            $($field: From::from($value),)*
            ..Default::default()
        })
    };
}

pub(crate) use spec;
