// Disposal Method Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target set key for jobs to be killed
pub const KILL_TARGET_SET: &str = "disposal:kill_targets";

/// Target set key for jobs to be discarded
pub const DISCARD_TARGET_SET: &str = "disposal:discard_targets";

/// How a marked job is disposed of when a worker picks it up
///
/// Variant order is severity order: when a job matches both target sets,
/// `Kill` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisposalMethod {
    /// Route straight to the dead/failed state, bypassing retries
    Kill,
    /// Drop silently, leaving no failure record
    Discard,
}

impl DisposalMethod {
    pub const ALL: [DisposalMethod; 2] = [DisposalMethod::Kill, DisposalMethod::Discard];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisposalMethod::Kill => "kill",
            DisposalMethod::Discard => "discard",
        }
    }

    /// Name of the target set owned by this method in the backing store
    pub fn target_set(&self) -> &'static str {
        match self {
            DisposalMethod::Kill => KILL_TARGET_SET,
            DisposalMethod::Discard => DISCARD_TARGET_SET,
        }
    }
}

impl fmt::Display for DisposalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisposalMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kill" => Ok(DisposalMethod::Kill),
            "discard" => Ok(DisposalMethod::Discard),
            other => Err(DomainError::InvalidDisposalMethod(other.to_string())),
        }
    }
}
