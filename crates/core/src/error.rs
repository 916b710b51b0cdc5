use crate::api::BoxError;
use crate::types::JobId;

/// Failures of a single analysis invocation.
///
/// Every variant is terminal: the invocation produces either a result or
/// exactly one of these, never both.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The creation call was rejected by the remote system.
    #[error("Instant Assurance Analysis trigger failed")]
    TriggerFailed,

    /// The creation call reported success without a usable job identifier.
    #[error("Instant Assurance Analysis trigger returned a malformed response: {0}")]
    MalformedTriggerResponse(String),

    /// The job was accepted but its status record could not be uniquely located.
    #[error("{}", correlation_message(job_id, *matches))]
    CorrelationFailed { job_id: JobId, matches: usize },

    /// Transport, auth, or status failure raised by the API collaborator.
    #[error(transparent)]
    Api(#[from] BoxError),
}

fn correlation_message(job_id: &JobId, matches: usize) -> String {
    if matches == 0 {
        format!("Instant Assurance Analysis trigger failed. Job {job_id} not found after creation")
    } else {
        format!(
            "Instant Assurance Analysis trigger failed. \
             Job {job_id} matched {matches} records after creation"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_message_names_job_when_missing() {
        let err = AnalysisError::CorrelationFailed {
            job_id: JobId::parse("j9").unwrap(),
            matches: 0,
        };
        assert_eq!(
            err.to_string(),
            "Instant Assurance Analysis trigger failed. Job j9 not found after creation"
        );
    }

    #[test]
    fn correlation_message_reports_duplicate_count() {
        let err = AnalysisError::CorrelationFailed {
            job_id: JobId::parse("j9").unwrap(),
            matches: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("j9"));
        assert!(msg.contains("matched 3 records"));
    }

    #[test]
    fn api_error_is_transparent() {
        let inner: BoxError = "connection refused".into();
        let err = AnalysisError::from(inner);
        assert_eq!(err.to_string(), "connection refused");
    }
}
