//! Collaborator seam between the orchestration core and a concrete
//! Nexus Dashboard Insights client.
//!
//! The core never builds URLs, handles sessions, or decodes JSON. It
//! only calls these two capabilities and interprets their typed results.

use async_trait::async_trait;

use crate::types::{AnalysisJobRecord, AnalysisJobRequest, JobId, TriggerResponse};

/// Error type returned by collaborators. Passed through unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[async_trait]
pub trait InsightsApi: Send + Sync {
    /// Ask the remote system to start an instant analysis job for the
    /// given scope.
    ///
    /// Application-level rejection is reported as
    /// [`TriggerResponse::Rejected`]; transport failures as `Err`.
    async fn trigger_job(&self, request: &AnalysisJobRequest) -> Result<TriggerResponse, BoxError>;

    /// List instant analysis job history for the given scope, optionally
    /// filtered to one job identifier. Ordering is unspecified.
    async fn list_jobs(
        &self,
        request: &AnalysisJobRequest,
        job_id: Option<&JobId>,
    ) -> Result<Vec<AnalysisJobRecord>, BoxError>;
}

#[async_trait]
impl<T: InsightsApi + ?Sized> InsightsApi for &T {
    async fn trigger_job(&self, request: &AnalysisJobRequest) -> Result<TriggerResponse, BoxError> {
        (**self).trigger_job(request).await
    }

    async fn list_jobs(
        &self,
        request: &AnalysisJobRequest,
        job_id: Option<&JobId>,
    ) -> Result<Vec<AnalysisJobRecord>, BoxError> {
        (**self).list_jobs(request, job_id).await
    }
}
