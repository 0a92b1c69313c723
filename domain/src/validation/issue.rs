//! Validation issue types

/// How an issue affects acceptance of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must trigger a retry.
    Blocking,
    /// Logged but never blocks.
    Advisory,
}

/// A single observation about a candidate turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnIssue {
    EmptyReply,
    TooShort,
    LowValueBoilerplate,
    NearDuplicate,
    /// The turn does not pick up anything from the other speaker's latest point.
    WeakReference { other: String },
    AgentPromptSignalMissing,
}

impl TurnIssue {
    pub fn severity(&self) -> Severity {
        match self {
            TurnIssue::EmptyReply
            | TurnIssue::TooShort
            | TurnIssue::LowValueBoilerplate
            | TurnIssue::NearDuplicate => Severity::Blocking,
            TurnIssue::WeakReference { .. } | TurnIssue::AgentPromptSignalMissing => {
                Severity::Advisory
            }
        }
    }
}

impl std::fmt::Display for TurnIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnIssue::EmptyReply => write!(f, "empty reply"),
            TurnIssue::TooShort => write!(f, "too short"),
            TurnIssue::LowValueBoilerplate => write!(f, "low-value boilerplate"),
            TurnIssue::NearDuplicate => write!(f, "near-duplicate of recent turn"),
            TurnIssue::WeakReference { other } => {
                write!(f, "weak reference to {}'s latest point", other)
            }
            TurnIssue::AgentPromptSignalMissing => {
                write!(f, "agent prompt signal not obvious in this turn")
            }
        }
    }
}

/// Outcome of validating one candidate turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub blocking: Vec<TurnIssue>,
    pub warnings: Vec<TurnIssue>,
}

impl ValidationResult {
    /// Record an issue in the list matching its severity.
    pub fn push(&mut self, issue: TurnIssue) {
        match issue.severity() {
            Severity::Blocking => self.blocking.push(issue),
            Severity::Advisory => self.warnings.push(issue),
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocking.is_empty()
    }

    pub fn blocking_reasons(&self) -> Vec<String> {
        self.blocking.iter().map(ToString::to_string).collect()
    }

    pub fn warning_reasons(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
