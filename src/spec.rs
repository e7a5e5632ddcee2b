use std::{borrow::Cow, cell::Cell, fmt::Debug};

use crate::{
    HookChain, NodeId, Queueable, RunStatus, SpecResult, Suite,
    runner::{Done, SequentialRunner, Step, StepQueue, StepRunner},
};

/// The leaf contract: one executable unit of test logic beneath a suite tree.
///
/// `execute` receives the per-test hook environment composed by the enclosing
/// suites and a [`Done`] handle it must signal exactly once.
pub trait TestCase {
    fn is_executable(&self) -> bool;
    fn execute(&self, hooks: &HookChain<'_>, done: Done);
}

/// The provided leaf: a described body with its own runner and observers.
///
/// Executing a spec queues the inherited before hooks, the body, and the
/// inherited after hooks, then reports a [`SpecResult`] once the queue
/// completes. A failed spec is reported through its own summary; as a step of
/// the parent suite it still completes cleanly.
pub struct Spec {
    id: NodeId,
    description: Cow<'static, str>,
    full_name: String,
    body: Queueable,
    disabled: bool,
    status: Cell<RunStatus>,
    runner: Box<dyn StepRunner>,
    on_start: Option<Box<dyn Fn(&Spec)>>,
    result_callback: Option<Box<dyn Fn(SpecResult)>>,
}

/// Construction configuration for [`Spec`].
///
/// `parent` only contributes the name prefix; insertion into the parent's
/// child list happens separately through [`Suite::add_child`].
pub struct SpecConfig<'p> {
    pub id: NodeId,
    pub description: Cow<'static, str>,
    pub parent: Option<&'p Suite>,
    pub body: Queueable,
    pub on_start: Option<Box<dyn Fn(&Spec)>>,
    pub result_callback: Option<Box<dyn Fn(SpecResult)>>,
    pub runner: Box<dyn StepRunner>,
}

impl Default for SpecConfig<'_> {
    fn default() -> Self {
        Self {
            id: NodeId::default(),
            description: Cow::default(),
            parent: None,
            body: Queueable::default(),
            on_start: None,
            result_callback: None,
            runner: Box::new(SequentialRunner::default()),
        }
    }
}

impl Spec {
    pub fn new(config: SpecConfig<'_>) -> Self {
        let full_name = match config.parent {
            Some(parent) => format!("{} {}", parent.full_name(), config.description),
            None => config.description.to_string(),
        };

        Self {
            id: config.id,
            description: config.description,
            full_name,
            body: config.body,
            disabled: false,
            status: Cell::new(RunStatus::Empty),
            runner: config.runner,
            on_start: config.on_start,
            result_callback: config.result_callback,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn status(&self) -> RunStatus {
        self.status.get()
    }

    /// Exclude this spec from every subsequent run.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn result(&self) -> SpecResult {
        SpecResult {
            id: self.id,
            status: self.status.get(),
            description: self.description.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

impl TestCase for Spec {
    fn is_executable(&self) -> bool {
        !self.disabled
    }

    fn execute(&self, hooks: &HookChain<'_>, done: Done) {
        if self.disabled {
            done.ok();
            return;
        }

        if let Some(on_start) = &self.on_start {
            on_start(self);
        }

        let mut steps = Vec::new();
        steps.extend(hooks.before_each().map(Step::from_queueable));
        steps.push(Step::from_queueable(&self.body));
        steps.extend(hooks.after_each().map(Step::from_queueable));

        self.runner.run(StepQueue::new(steps, |outcome| {
            self.status.set(match outcome.is_clean() {
                true => RunStatus::Passed,
                false => RunStatus::Failed,
            });
            if let Some(result_callback) = &self.result_callback {
                result_callback(self.result());
            }
        }));

        done.ok();
    }
}

impl Debug for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spec")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("full_name", &self.full_name)
            .field("disabled", &self.disabled)
            .field("status", &self.status.get())
            .finish_non_exhaustive()
    }
}
