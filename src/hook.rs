use std::fmt::Debug;

use crate::runner::{Done, StepResult};

/// A callable that can be placed into a step queue.
///
/// Sync callables complete when they return, async callables receive a
/// [`Done`] continuation and complete when they signal it.
pub enum Queueable {
    Sync(Box<dyn Fn() -> StepResult>),
    Async(Box<dyn Fn(Done)>),
}

impl Debug for Queueable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(_) => write!(f, "Sync(...)"),
            Self::Async(_) => write!(f, "Async(...)"),
        }
    }
}

impl Default for Queueable {
    fn default() -> Self {
        Self::Sync(Box::new(|| ().into()))
    }
}

impl Queueable {
    pub fn from_fn<F, T>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Into<StepResult>,
    {
        Self::Sync(Box::new(move || f().into()))
    }

    pub fn from_async<F>(f: F) -> Self
    where
        F: Fn(Done) + 'static,
    {
        Self::Async(Box::new(f))
    }

    pub(crate) fn invoke(&self, done: Done) {
        match self {
            Self::Sync(f) => done.finish(f()),
            Self::Async(f) => f(done),
        }
    }
}

/// Ordered hook lists registered directly on one suite.
///
/// `before_each`/`after_each` apply to every leaf beneath the owning suite,
/// `before_all`/`after_all` wrap the owning suite's children exactly once per
/// execution. All four lists keep registration order.
#[derive(Debug, Default)]
pub struct HookRegistry {
    pub(crate) before_each: Vec<Queueable>,
    pub(crate) after_each: Vec<Queueable>,
    pub(crate) before_all: Vec<Queueable>,
    pub(crate) after_all: Vec<Queueable>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The per-test hook environment composed across the ancestor chain.
///
/// Each suite extends the chain with its own registry on entry, so a leaf
/// sees before hooks outermost suite first and after hooks in mirror order.
#[derive(Debug, Default, Clone)]
pub struct HookChain<'h> {
    levels: Vec<&'h HookRegistry>,
}

impl<'h> HookChain<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extended<'e>(&self, registry: &'e HookRegistry) -> HookChain<'e>
    where
        'h: 'e,
    {
        let mut levels: Vec<&'e HookRegistry> = self.levels.clone();
        levels.push(registry);
        HookChain { levels }
    }

    /// Before hooks for one leaf, outermost suite first, each level in
    /// registration order.
    pub fn before_each(&self) -> impl Iterator<Item = &'h Queueable> {
        self.levels
            .iter()
            .flat_map(|registry| registry.before_each.iter())
    }

    /// After hooks for one leaf, innermost suite first.
    pub fn after_each(&self) -> impl Iterator<Item = &'h Queueable> {
        self.levels
            .iter()
            .rev()
            .flat_map(|registry| registry.after_each.iter())
    }
}
