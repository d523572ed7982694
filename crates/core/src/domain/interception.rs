// Interception Outcome (pre-execution state machine)

use crate::domain::disposal::DisposalMethod;
use std::fmt;

/// Terminal outcome of intercepting a job before execution
///
/// `Killed` and `Discarded` are control signals, not failures: the job
/// runtime routes them to its dead-job and silent-drop paths respectively
/// and must not feed them into retry handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    Allowed,
    Killed,
    Discarded,
}

impl Interception {
    /// Outcome for a resolved target disposal method (`None` = not targeted)
    pub fn from_target(target: Option<DisposalMethod>) -> Self {
        match target {
            Some(DisposalMethod::Kill) => Interception::Killed,
            Some(DisposalMethod::Discard) => Interception::Discarded,
            None => Interception::Allowed,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Interception::Allowed)
    }
}

impl fmt::Display for Interception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interception::Allowed => write!(f, "ALLOWED"),
            Interception::Killed => write!(f, "KILLED"),
            Interception::Discarded => write!(f, "DISCARDED"),
        }
    }
}

/// State of a single interception run
///
/// `Pending` is initial; every other state is terminal and mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterceptionState {
    #[default]
    Pending,
    Allowed,
    Killed,
    Discarded,
}

impl InterceptionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InterceptionState::Pending)
    }

    /// Terminal outcome, or `None` while still pending
    pub fn outcome(&self) -> Option<Interception> {
        match self {
            InterceptionState::Pending => None,
            InterceptionState::Allowed => Some(Interception::Allowed),
            InterceptionState::Killed => Some(Interception::Killed),
            InterceptionState::Discarded => Some(Interception::Discarded),
        }
    }
}

impl From<Interception> for InterceptionState {
    fn from(outcome: Interception) -> Self {
        match outcome {
            Interception::Allowed => InterceptionState::Allowed,
            Interception::Killed => InterceptionState::Killed,
            Interception::Discarded => InterceptionState::Discarded,
        }
    }
}
