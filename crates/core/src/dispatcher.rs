//! Request dispatch: decide between query and trigger, honour check
//! mode, and hand accepted jobs to the correlator.

use crate::api::InsightsApi;
use crate::correlator;
use crate::error::AnalysisError;
use crate::types::{Invocation, OperationMode, OperationResult, TriggerResponse};

/// Runs invocations against one API collaborator.
pub struct Dispatcher<A> {
    api: A,
}

impl<A: InsightsApi> Dispatcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Execute one invocation to completion.
    ///
    /// Calls are strictly sequential: in trigger mode the creation call
    /// is awaited before the correlation listing is issued.
    pub async fn run(&self, invocation: &Invocation) -> Result<OperationResult, AnalysisError> {
        let request = &invocation.request;

        match invocation.mode {
            OperationMode::Query => {
                tracing::info!(
                    insights_group = request.insights_group(),
                    site_name = request.site_name(),
                    "Querying instant assurance analysis history",
                );
                let records = self.api.list_jobs(request, None).await?;
                Ok(OperationResult::Records(records))
            }
            OperationMode::Present if invocation.dry_run => {
                tracing::info!(
                    insights_group = request.insights_group(),
                    site_name = request.site_name(),
                    "Check mode, skipping instant assurance analysis trigger",
                );
                Ok(OperationResult::Records(Vec::new()))
            }
            OperationMode::Present => {
                tracing::info!(
                    insights_group = request.insights_group(),
                    site_name = request.site_name(),
                    "Triggering instant assurance analysis",
                );

                let job_id = match self.api.trigger_job(request).await? {
                    TriggerResponse::Accepted(job_id) => job_id,
                    TriggerResponse::Rejected => {
                        tracing::warn!("Instant assurance analysis trigger rejected");
                        return Err(AnalysisError::TriggerFailed);
                    }
                    TriggerResponse::Malformed { reason } => {
                        tracing::error!(reason = %reason, "Malformed trigger response");
                        return Err(AnalysisError::MalformedTriggerResponse(reason));
                    }
                };

                tracing::info!(job_id = %job_id, "Instant assurance analysis job accepted");

                let record = correlator::correlate(&self.api, request, &job_id).await?;

                tracing::info!(job_id = %job_id, "Instant assurance analysis job confirmed");
                Ok(OperationResult::Confirmed(record))
            }
        }
    }
}
