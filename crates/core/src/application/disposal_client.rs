// Disposal Client - marking API and job matching query

use crate::domain::{DisposalMethod, JobDescriptor, Marker, MarkerType};
use crate::error::Result;
use crate::port::MarkerStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Marks enqueued jobs for disposal and answers whether a job is targeted
///
/// A job is marked by adding a marker (its jid, bid or class) to the target
/// set of a disposal method. Stateless apart from the store handle, so it is
/// cheap to clone and share between tasks.
#[derive(Clone)]
pub struct DisposalClient {
    store: Arc<dyn MarkerStore>,
}

impl DisposalClient {
    pub fn new(store: Arc<dyn MarkerStore>) -> Self {
        Self { store }
    }

    /// Add a marker to the method's target set
    ///
    /// Returns `false` without touching the store when `value` is empty.
    pub async fn mark(
        &self,
        method: DisposalMethod,
        marker_type: MarkerType,
        value: &str,
    ) -> Result<bool> {
        if value.is_empty() {
            debug!(method = %method, marker_type = %marker_type, "Empty marker value, nothing to mark");
            return Ok(false);
        }

        let marker = Marker::new(marker_type, value).encode();
        self.store.add(method, &marker).await?;

        info!(method = %method, marker = %marker, "Marked for disposal");
        Ok(true)
    }

    /// Remove a marker from the method's target set
    ///
    /// Returns `false` without touching the store when `value` is empty.
    pub async fn unmark(
        &self,
        method: DisposalMethod,
        marker_type: MarkerType,
        value: &str,
    ) -> Result<bool> {
        if value.is_empty() {
            debug!(method = %method, marker_type = %marker_type, "Empty marker value, nothing to unmark");
            return Ok(false);
        }

        let marker = Marker::new(marker_type, value).encode();
        self.store.remove(method, &marker).await?;

        info!(method = %method, marker = %marker, "Unmarked");
        Ok(true)
    }

    /// Drop every marker of one disposal method
    pub async fn unmark_all(&self, method: DisposalMethod) -> Result<()> {
        self.store.clear(method).await?;
        info!(method = %method, "Cleared all markers");
        Ok(())
    }

    /// Raw encoded markers currently in the method's target set
    pub async fn markers(&self, method: DisposalMethod) -> Result<Vec<String>> {
        self.store.members(method).await
    }

    pub async fn is_kill_target(&self, job: &JobDescriptor) -> Result<bool> {
        self.is_target(job, DisposalMethod::Kill).await
    }

    pub async fn is_discard_target(&self, job: &JobDescriptor) -> Result<bool> {
        self.is_target(job, DisposalMethod::Discard).await
    }

    /// Which disposal method applies to the job, if any
    ///
    /// One batched store round trip covers both target sets. A job matching
    /// both sets resolves to `Kill`.
    pub async fn target_disposal_method(
        &self,
        job: &JobDescriptor,
    ) -> Result<Option<DisposalMethod>> {
        let candidates = job.candidate_markers();
        if candidates.is_empty() {
            return Ok(None);
        }

        let (kill_hit, discard_hit) = self
            .store
            .contains_any_batched(
                DisposalMethod::Kill,
                &candidates,
                DisposalMethod::Discard,
                &candidates,
            )
            .await?;

        let target = if kill_hit {
            Some(DisposalMethod::Kill)
        } else if discard_hit {
            Some(DisposalMethod::Discard)
        } else {
            None
        };

        debug!(jid = ?job.jid, target = ?target, "Resolved target disposal method");
        Ok(target)
    }

    async fn is_target(&self, job: &JobDescriptor, method: DisposalMethod) -> Result<bool> {
        let candidates = job.candidate_markers();
        if candidates.is_empty() {
            return Ok(false);
        }
        self.store.contains_any(method, &candidates).await
    }
}
