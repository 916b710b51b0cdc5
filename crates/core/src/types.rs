//! Data model shared by the dispatcher, the correlator, and API
//! collaborators.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::AnalysisError;

/// Opaque job identifier assigned by the remote system. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, AnalysisError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "job id must not be empty".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target scope of an analysis job: one site inside one insights group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisJobRequest {
    insights_group: String,
    site_name: String,
}

impl AnalysisJobRequest {
    /// Build a request scope. Both identifiers are required and must not
    /// be blank.
    pub fn new(
        insights_group: impl Into<String>,
        site_name: impl Into<String>,
    ) -> Result<Self, AnalysisError> {
        let insights_group = insights_group.into();
        let site_name = site_name.into();

        if insights_group.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "insights_group must not be empty".to_string(),
            ));
        }
        if site_name.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "site_name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            insights_group,
            site_name,
        })
    }

    pub fn insights_group(&self) -> &str {
        &self.insights_group
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }
}

/// One job-history entry as returned by the remote system.
///
/// The payload is kept verbatim; only the identifier is lifted out so
/// the correlator can match on it. Serializes as the original payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJobRecord {
    job_id: Option<JobId>,
    payload: serde_json::Value,
}

impl AnalysisJobRecord {
    pub fn new(job_id: Option<JobId>, payload: serde_json::Value) -> Self {
        Self { job_id, payload }
    }

    /// Identifier of the job, if the remote entry carried one.
    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}

impl Serialize for AnalysisJobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

/// Outcome of the creation call, decoded at the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResponse {
    /// The remote accepted the job and assigned this identifier.
    Accepted(JobId),
    /// The remote reported an application-level rejection.
    Rejected,
    /// The remote reported success but no usable identifier could be
    /// extracted.
    Malformed { reason: String },
}

impl TriggerResponse {
    pub fn accepted(job_id: JobId) -> Self {
        Self::Accepted(job_id)
    }

    pub fn rejected() -> Self {
        Self::Rejected
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    /// List the job history. Read-only.
    #[default]
    Query,
    /// Trigger a new job and confirm it materialized.
    Present,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Present => f.write_str("present"),
        }
    }
}

/// A fully specified request to the dispatcher.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub request: AnalysisJobRequest,
    pub mode: OperationMode,
    /// Check mode: never mutate remote state.
    pub dry_run: bool,
}

/// Final successful result of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationResult {
    /// Query results, or the empty set of a dry-run trigger.
    Records(Vec<AnalysisJobRecord>),
    /// The single record of a freshly triggered and confirmed job.
    Confirmed(AnalysisJobRecord),
}
