use std::{borrow::Cow, fmt::Display};

/// Identifier assigned by the caller at node construction, unique within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u64);

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The closed status vocabulary for suites and specs.
///
/// [`RunStatus::Empty`] is the initial value and also what a suite keeps after
/// a clean run: a suite only owns a verdict when one of its own steps failed,
/// child failures live in the child's own summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Empty,
    Passed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Empty => "",
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RunStatus::Empty)
    }

    pub fn passed(&self) -> bool {
        matches!(self, RunStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, RunStatus::Failed)
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable summary of one suite execution, handed to the suite's result
/// callback exactly once per non-disabled [`execute`](crate::Suite::execute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteResult {
    pub id: NodeId,
    pub status: RunStatus,
    pub description: Cow<'static, str>,
    pub full_name: String,
}

/// Immutable summary of one spec execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecResult {
    pub id: NodeId,
    pub status: RunStatus,
    pub description: Cow<'static, str>,
    pub full_name: String,
}
