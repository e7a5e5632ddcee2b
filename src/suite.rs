use std::{borrow::Cow, cell::Cell, fmt::Debug};

use crate::{
    HookChain, HookRegistry, NodeId, Queueable, RunStatus, Spec, SuiteResult, TestCase,
    runner::{Done, SequentialRunner, Step, StepQueue, StepResult, StepRunner},
};

/// A named group node in the test hierarchy.
///
/// A suite owns its hooks and an ordered list of children, decides which
/// children are executable before committing to any work, and drives the
/// resulting step queue through its injected [`StepRunner`]: once-before
/// hooks, then every executable child in declaration order, then once-after
/// hooks. A nested suite's execution is exactly one step of its parent's
/// queue, so depth-first, fully sequential traversal falls out of the
/// recursion.
pub struct Suite {
    id: NodeId,
    description: Cow<'static, str>,
    full_name: String,
    hooks: HookRegistry,
    children: Vec<SuiteChild>,
    disabled: bool,
    status: Cell<RunStatus>,
    runner: Box<dyn StepRunner>,
    on_start: Option<Box<dyn Fn(&Suite)>>,
    result_callback: Option<Box<dyn Fn(SuiteResult)>>,
}

/// Construction configuration for [`Suite`].
///
/// `parent` only contributes the name prefix; insertion into the parent's
/// child list happens separately through [`Suite::add_child`].
pub struct SuiteConfig<'p> {
    pub id: NodeId,
    pub description: Cow<'static, str>,
    pub parent: Option<&'p Suite>,
    pub on_start: Option<Box<dyn Fn(&Suite)>>,
    pub result_callback: Option<Box<dyn Fn(SuiteResult)>>,
    pub runner: Box<dyn StepRunner>,
}

impl Default for SuiteConfig<'_> {
    fn default() -> Self {
        Self {
            id: NodeId::default(),
            description: Cow::default(),
            parent: None,
            on_start: None,
            result_callback: None,
            runner: Box::new(SequentialRunner::default()),
        }
    }
}

/// The closed set of node kinds a suite can hold.
pub enum SuiteChild {
    Suite(Suite),
    Case(Box<dyn TestCase>),
}

impl SuiteChild {
    pub fn case(case: impl TestCase + 'static) -> Self {
        Self::Case(Box::new(case))
    }

    pub fn is_executable(&self) -> bool {
        match self {
            Self::Suite(suite) => suite.is_executable(),
            Self::Case(case) => case.is_executable(),
        }
    }

    fn execute(&self, hooks: &HookChain<'_>, done: Done) {
        match self {
            Self::Suite(suite) => suite.execute_nested(hooks, move || done.ok()),
            Self::Case(case) => case.execute(hooks, done),
        }
    }
}

impl From<Suite> for SuiteChild {
    fn from(value: Suite) -> Self {
        Self::Suite(value)
    }
}

impl From<Spec> for SuiteChild {
    fn from(value: Spec) -> Self {
        Self::Case(Box::new(value))
    }
}

impl Debug for SuiteChild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suite(suite) => f.debug_tuple("Suite").field(suite).finish(),
            Self::Case(_) => write!(f, "Case(...)"),
        }
    }
}

impl Suite {
    pub fn new(config: SuiteConfig<'_>) -> Self {
        let full_name = match config.parent {
            Some(parent) => format!("{} {}", parent.full_name(), config.description),
            None => config.description.to_string(),
        };

        Self {
            id: config.id,
            description: config.description,
            full_name,
            hooks: HookRegistry::new(),
            children: Vec::new(),
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

    /// Space-joined descriptions of every ancestor, root first, followed by
    /// this suite's own description.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn status(&self) -> RunStatus {
        self.status.get()
    }

    pub fn children(&self) -> &[SuiteChild] {
        &self.children
    }

    /// Register a hook that runs before every leaf beneath this suite.
    pub fn before_each<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<StepResult>,
    {
        self.hooks.before_each.push(Queueable::from_fn(f));
    }

    pub fn before_each_async<F>(&mut self, f: F)
    where
        F: Fn(Done) + 'static,
    {
        self.hooks.before_each.push(Queueable::from_async(f));
    }

    /// Register a hook that runs after every leaf beneath this suite.
    pub fn after_each<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<StepResult>,
    {
        self.hooks.after_each.push(Queueable::from_fn(f));
    }

    pub fn after_each_async<F>(&mut self, f: F)
    where
        F: Fn(Done) + 'static,
    {
        self.hooks.after_each.push(Queueable::from_async(f));
    }

    /// Register a hook that runs once per suite execution, before any child.
    pub fn before_all<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<StepResult>,
    {
        self.hooks.before_all.push(Queueable::from_fn(f));
    }

    pub fn before_all_async<F>(&mut self, f: F)
    where
        F: Fn(Done) + 'static,
    {
        self.hooks.before_all.push(Queueable::from_async(f));
    }

    /// Register a hook that runs once per suite execution, after every child.
    pub fn after_all<F, T>(&mut self, f: F)
    where
        F: Fn() -> T + 'static,
        T: Into<StepResult>,
    {
        self.hooks.after_all.push(Queueable::from_fn(f));
    }

    pub fn after_all_async<F>(&mut self, f: F)
    where
        F: Fn(Done) + 'static,
    {
        self.hooks.after_all.push(Queueable::from_async(f));
    }

    /// Append a child node. Declaration order is execution order and is kept
    /// permanently.
    pub fn add_child(&mut self, child: impl Into<SuiteChild>) {
        self.children.push(child.into());
    }

    /// Exclude this suite and everything beneath it from every subsequent
    /// run. Idempotent.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Whether this run would execute anything: the suite is not disabled and
    /// at least one child is itself executable.
    pub fn is_executable(&self) -> bool {
        !self.disabled && self.children.iter().any(SuiteChild::is_executable)
    }

    pub fn result(&self) -> SuiteResult {
        SuiteResult {
            id: self.id,
            status: self.status.get(),
            description: self.description.clone(),
            full_name: self.full_name.clone(),
        }
    }

    /// Run this suite as the root of an execution.
    ///
    /// `on_complete` is invoked exactly once, after the whole subtree has
    /// completed (or immediately when the suite is disabled).
    pub fn execute(&self, on_complete: impl FnOnce()) {
        self.execute_nested(&HookChain::new(), on_complete);
    }

    fn execute_nested(&self, hooks: &HookChain<'_>, on_complete: impl FnOnce()) {
        if self.disabled {
            on_complete();
            return;
        }

        if let Some(on_start) = &self.on_start {
            on_start(self);
        }

        let chain = hooks.extended(&self.hooks);
        let executable: Vec<&SuiteChild> = self
            .children
            .iter()
            .filter(|child| child.is_executable())
            .collect();

        // Once-hooks are only justified when something beneath will run.
        let mut steps = Vec::new();
        if !executable.is_empty() {
            let chain = &chain;
            steps.extend(self.hooks.before_all.iter().map(Step::from_queueable));
            steps.extend(
                executable
                    .into_iter()
                    .map(|child| Step::new(move |done| child.execute(chain, done))),
            );
            steps.extend(self.hooks.after_all.iter().map(Step::from_queueable));
        }

        self.runner.run(StepQueue::new(steps, |outcome| {
            if !outcome.is_clean() {
                self.status.set(RunStatus::Failed);
            }
            if let Some(result_callback) = &self.result_callback {
                result_callback(self.result());
            }
        }));

        on_complete();
    }
}

impl Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("children", &self.children)
            .field("disabled", &self.disabled)
            .field("status", &self.status.get())
            .finish_non_exhaustive()
    }
}
