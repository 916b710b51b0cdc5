//! Job correlation: confirm a freshly triggered job is visible in the
//! history listing.
//!
//! A single listing call is made, filtered by the new identifier. The
//! result must contain exactly one record with that identifier. No
//! retries, no waiting.

use crate::api::InsightsApi;
use crate::error::AnalysisError;
use crate::types::{AnalysisJobRecord, AnalysisJobRequest, JobId};

/// Look up `job_id` in the listing for `request` and return its single
/// record.
pub async fn correlate<A: InsightsApi + ?Sized>(
    api: &A,
    request: &AnalysisJobRequest,
    job_id: &JobId,
) -> Result<AnalysisJobRecord, AnalysisError> {
    let records = api.list_jobs(request, Some(job_id)).await?;

    tracing::debug!(
        job_id = %job_id,
        returned = records.len(),
        "Fetched job history for correlation",
    );

    select_unique(records, job_id)
}

/// Pick the only record whose identifier equals `job_id`.
///
/// Records with a different identifier, or none at all, are ignored.
/// Zero or several matches is a [`AnalysisError::CorrelationFailed`].
pub fn select_unique(
    records: Vec<AnalysisJobRecord>,
    job_id: &JobId,
) -> Result<AnalysisJobRecord, AnalysisError> {
    let mut matching = records
        .into_iter()
        .filter(|record| record.job_id() == Some(job_id));

    match (matching.next(), matching.next()) {
        (Some(record), None) => Ok(record),
        (None, _) => Err(AnalysisError::CorrelationFailed {
            job_id: job_id.clone(),
            matches: 0,
        }),
        (Some(_), Some(_)) => Err(AnalysisError::CorrelationFailed {
            job_id: job_id.clone(),
            matches: 2 + matching.count(),
        }),
    }
}
