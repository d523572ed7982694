// Interception Hook - pre-execution disposal check

use crate::application::DisposalClient;
use crate::domain::{Interception, InterceptionState, JobDescriptor};
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// What the job runtime hands the hook for each job about to run
#[derive(Debug, Clone, Copy)]
pub struct JobContext<'a> {
    pub job: &'a JobDescriptor,
    pub queue: &'a str,
    /// Resolved class option; `false` makes the job immune to disposal
    pub disposable: bool,
}

impl<'a> JobContext<'a> {
    pub fn new(job: &'a JobDescriptor, queue: &'a str) -> Self {
        Self {
            job,
            queue,
            disposable: true,
        }
    }

    pub fn disposable(mut self, disposable: bool) -> Self {
        self.disposable = disposable;
        self
    }
}

/// Capability invoked synchronously by the job runtime before each job
#[async_trait]
pub trait PreExecutionHook: Send + Sync {
    /// Decide whether the job runs, is killed, or is discarded
    ///
    /// # Errors
    /// - AppError::StoreUnavailable if disposal status could not be determined
    async fn intercept(&self, ctx: &JobContext<'_>) -> Result<Interception>;
}

/// Consults the target sets and turns a match into a kill/discard signal
///
/// Read-only with respect to the store; costs at most one batched round
/// trip per job.
#[derive(Clone)]
pub struct InterceptionHook {
    client: DisposalClient,
}

impl InterceptionHook {
    pub fn new(client: DisposalClient) -> Self {
        Self { client }
    }

    async fn transition(&self, ctx: &JobContext<'_>) -> Result<InterceptionState> {
        if !ctx.disposable {
            debug!(jid = ?ctx.job.jid, class = ?ctx.job.class, "Class opted out of disposal");
            return Ok(InterceptionState::Allowed);
        }

        let target = self.client.target_disposal_method(ctx.job).await?;
        Ok(Interception::from_target(target).into())
    }
}

#[async_trait]
impl PreExecutionHook for InterceptionHook {
    async fn intercept(&self, ctx: &JobContext<'_>) -> Result<Interception> {
        let state = self.transition(ctx).await?;
        let outcome = state.outcome().unwrap_or(Interception::Allowed);

        if !outcome.is_allowed() {
            info!(
                jid = ?ctx.job.jid,
                bid = ?ctx.job.bid,
                class = ?ctx.job.class,
                queue = %ctx.queue,
                outcome = %outcome,
                "Job intercepted for disposal"
            );
        }

        Ok(outcome)
    }
}
