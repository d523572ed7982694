// Dispatch Guard - runtime-facing wrapper around the interception hook
//
// The job's work future is only polled after the hook allowed it, so the
// job body can neither observe nor swallow a kill/discard signal.

use crate::application::interception::{JobContext, PreExecutionHook};
use crate::domain::{Interception, JobDescriptor};
use crate::error::Result;
use crate::port::ClassOptions;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, warn};

/// What to do when disposal status cannot be determined
///
/// No default: the integrating runtime has to pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailurePolicy {
    /// Run the job as if it were not marked
    FailOpen,
    /// Do not run the job; hand StoreUnavailable back to the runtime
    FailClosed,
}

/// Result of dispatching one job through the guard
#[derive(Debug, PartialEq, Eq)]
pub enum DispatchOutcome<T> {
    /// Work ran; carries whatever the work future produced
    Completed(T),
    /// Work never ran; route the job to the dead set, skip retries
    Killed,
    /// Work never ran; drop the job with no failure record
    Discarded,
}

impl<T> DispatchOutcome<T> {
    pub fn interception(&self) -> Interception {
        match self {
            DispatchOutcome::Completed(_) => Interception::Allowed,
            DispatchOutcome::Killed => Interception::Killed,
            DispatchOutcome::Discarded => Interception::Discarded,
        }
    }
}

pub struct DispatchGuard {
    hook: Arc<dyn PreExecutionHook>,
    class_options: Arc<dyn ClassOptions>,
    failure_policy: StoreFailurePolicy,
}

impl DispatchGuard {
    pub fn new(
        hook: Arc<dyn PreExecutionHook>,
        class_options: Arc<dyn ClassOptions>,
        failure_policy: StoreFailurePolicy,
    ) -> Self {
        Self {
            hook,
            class_options,
            failure_policy,
        }
    }

    pub fn failure_policy(&self) -> StoreFailurePolicy {
        self.failure_policy
    }

    /// Intercept the job, then run `work` only if it was allowed
    ///
    /// # Errors
    /// - AppError::StoreUnavailable under `FailClosed` when the lookup failed
    pub async fn run<F, T>(&self, job: &JobDescriptor, queue: &str, work: F) -> Result<DispatchOutcome<T>>
    where
        F: Future<Output = T>,
    {
        let disposable = job
            .class
            .as_deref()
            .map(|class| self.class_options.is_disposable(class))
            .unwrap_or(true);
        let ctx = JobContext::new(job, queue).disposable(disposable);

        let interception = match self.hook.intercept(&ctx).await {
            Ok(interception) => interception,
            Err(e) if e.is_store_unavailable() => match self.failure_policy {
                StoreFailurePolicy::FailOpen => {
                    warn!(jid = ?job.jid, queue = %queue, error = %e, "Disposal status unknown, running job (fail open)");
                    Interception::Allowed
                }
                StoreFailurePolicy::FailClosed => {
                    error!(jid = ?job.jid, queue = %queue, error = %e, "Disposal status unknown, not running job (fail closed)");
                    return Err(e);
                }
            },
            Err(e) => return Err(e),
        };

        Ok(match interception {
            Interception::Allowed => DispatchOutcome::Completed(work.await),
            Interception::Killed => DispatchOutcome::Killed,
            Interception::Discarded => DispatchOutcome::Discarded,
        })
    }
}
