//! Nexus Dashboard Insights endpoints for instant assurance analysis.
//!
//! Knows the NDI paths, query parameters, and JSON field names, and
//! converts raw payloads into the typed values the orchestration core
//! works with.

use async_trait::async_trait;
use serde_json::Value;

use ndi_core::{
    AnalysisJobRecord, AnalysisJobRequest, BoxError, InsightsApi, JobId, TriggerResponse,
};

use crate::error::ClientError;
use crate::session::NdSession;

/// Path prefix of the NDI telemetry API.
pub const API_PREFIX: &str = "/sedgeapi/v1/cisco-nir/api/api/telemetry/v2";

/// Job type filter matching instant (online) analysis runs.
pub const ONLINE_ANALYSIS_JOB_TYPE: &str = "ONLINE-ANALYSIS*";

/// [`InsightsApi`] implementation backed by a live [`NdSession`].
pub struct InsightsClient {
    session: NdSession,
}

impl InsightsClient {
    pub fn new(session: NdSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl InsightsApi for InsightsClient {
    async fn trigger_job(&self, request: &AnalysisJobRequest) -> Result<TriggerResponse, BoxError> {
        let payload = self.session.post_json(&trigger_segments(request)).await?;
        Ok(parse_trigger_payload(&payload))
    }

    async fn list_jobs(
        &self,
        request: &AnalysisJobRequest,
        job_id: Option<&JobId>,
    ) -> Result<Vec<AnalysisJobRecord>, BoxError> {
        let payload = self
            .session
            .get_json(&jobs_summary_segments(), &jobs_query(request, job_id))
            .await?;
        Ok(parse_job_entries(payload)?)
    }
}

fn prefix_segments<'a>() -> Vec<&'a str> {
    API_PREFIX.split('/').filter(|s| !s.is_empty()).collect()
}

/// `{prefix}/config/insightsGroup/{ig}/fabric/{site}/runOnlineAnalysis`
pub fn trigger_segments(request: &AnalysisJobRequest) -> Vec<&str> {
    let mut segments = prefix_segments();
    segments.extend([
        "config",
        "insightsGroup",
        request.insights_group(),
        "fabric",
        request.site_name(),
        "runOnlineAnalysis",
    ]);
    segments
}

/// `{prefix}/jobs/summary.json`
pub fn jobs_summary_segments() -> Vec<&'static str> {
    let mut segments = prefix_segments();
    segments.extend(["jobs", "summary.json"]);
    segments
}

pub fn jobs_query<'a>(
    request: &'a AnalysisJobRequest,
    job_id: Option<&'a JobId>,
) -> Vec<(&'static str, &'a str)> {
    let mut query = vec![
        ("jobType", ONLINE_ANALYSIS_JOB_TYPE),
        ("insightsGroupName", request.insights_group()),
        ("fabricName", request.site_name()),
    ];
    if let Some(job_id) = job_id {
        query.push(("jobId", job_id.as_str()));
    }
    query
}

/// Decode the reply of the trigger endpoint.
///
/// Expected shape: `{"success": true, "value": {"data": {"configId": "..."}}}`.
/// Anything but `success == true` is a rejection.
pub fn parse_trigger_payload(payload: &Value) -> TriggerResponse {
    if payload.get("success").and_then(Value::as_bool) != Some(true) {
        return TriggerResponse::rejected();
    }

    match payload.pointer("/value/data/configId") {
        None | Some(Value::Null) => {
            TriggerResponse::malformed("success reported without value.data.configId")
        }
        Some(Value::String(raw)) => match JobId::parse(raw.as_str()) {
            Ok(job_id) => TriggerResponse::accepted(job_id),
            Err(_) => TriggerResponse::malformed("value.data.configId is empty"),
        },
        Some(other) => TriggerResponse::malformed(format!(
            "value.data.configId is not a string: {other}"
        )),
    }
}

/// Decode the reply of the jobs summary endpoint into records.
///
/// A missing `entries` key means no jobs. Entries without a string
/// `jobId` are kept, with no identifier.
pub fn parse_job_entries(payload: Value) -> Result<Vec<AnalysisJobRecord>, ClientError> {
    let entries = match payload {
        Value::Object(mut map) => match map.remove("entries") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(ClientError::Decode(format!(
                    "entries is not an array: {other}"
                )))
            }
        },
        other => {
            return Err(ClientError::Decode(format!(
                "jobs summary is not an object: {other}"
            )))
        }
    };

    Ok(entries
        .into_iter()
        .map(|entry| {
            let job_id = entry
                .get("jobId")
                .and_then(Value::as_str)
                .and_then(|raw| JobId::parse(raw).ok());
            AnalysisJobRecord::new(job_id, entry)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn request() -> AnalysisJobRequest {
        AnalysisJobRequest::new("exampleIG", "siteName").unwrap()
    }

    #[test]
    fn trigger_path_layout() {
        let req = request();
        assert_eq!(
            trigger_segments(&req).join("/"),
            "sedgeapi/v1/cisco-nir/api/api/telemetry/v2/config/insightsGroup/exampleIG/fabric/siteName/runOnlineAnalysis"
        );
    }

    #[test]
    fn jobs_summary_path_layout() {
        assert_eq!(
            jobs_summary_segments().join("/"),
            "sedgeapi/v1/cisco-nir/api/api/telemetry/v2/jobs/summary.json"
        );
    }

    #[test]
    fn jobs_query_without_filter() {
        let req = request();
        assert_eq!(
            jobs_query(&req, None),
            vec![
                ("jobType", "ONLINE-ANALYSIS*"),
                ("insightsGroupName", "exampleIG"),
                ("fabricName", "siteName"),
            ]
        );
    }

    #[test]
    fn jobs_query_with_filter() {
        let req = request();
        let id = JobId::parse("j9").unwrap();
        let query = jobs_query(&req, Some(&id));
        assert_eq!(query.last(), Some(&("jobId", "j9")));
    }

    #[test]
    fn trigger_success_with_config_id() {
        let payload = json!({"success": true, "value": {"data": {"configId": "j9"}}});
        assert_matches!(
            parse_trigger_payload(&payload),
            TriggerResponse::Accepted(id) if id.as_str() == "j9"
        );
    }

    #[test]
    fn trigger_success_false_is_rejected() {
        let payload = json!({"success": false, "messages": [{"message": "busy"}]});
        assert_eq!(parse_trigger_payload(&payload), TriggerResponse::Rejected);
    }

    #[test]
    fn trigger_without_success_key_is_rejected() {
        assert_eq!(parse_trigger_payload(&json!({})), TriggerResponse::Rejected);
        assert_eq!(
            parse_trigger_payload(&json!({"success": "true"})),
            TriggerResponse::Rejected
        );
    }

    #[test]
    fn trigger_success_without_config_id_is_malformed() {
        let payload = json!({"success": true, "value": {"data": {}}});
        assert_matches!(
            parse_trigger_payload(&payload),
            TriggerResponse::Malformed { reason } if reason.contains("configId")
        );
    }

    #[test]
    fn trigger_success_with_numeric_config_id_is_malformed() {
        let payload = json!({"success": true, "value": {"data": {"configId": 42}}});
        assert_matches!(parse_trigger_payload(&payload), TriggerResponse::Malformed { .. });
    }

    #[test]
    fn trigger_success_with_empty_config_id_is_malformed() {
        let payload = json!({"success": true, "value": {"data": {"configId": ""}}});
        assert_matches!(parse_trigger_payload(&payload), TriggerResponse::Malformed { .. });
    }

    #[test]
    fn entries_become_records() {
        let payload = json!({
            "entries": [
                {"jobId": "j1", "operSt": "COMPLETE"},
                {"jobId": "j2", "operSt": "RUNNING"},
            ],
            "totalResultsCount": 2,
        });

        let records = parse_job_entries(payload).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job_id().map(JobId::as_str), Some("j1"));
        assert_eq!(records[1].payload()["operSt"], "RUNNING");
    }

    #[test]
    fn entry_without_job_id_is_kept() {
        let records = parse_job_entries(json!({"entries": [{"operSt": "RUNNING"}]})).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].job_id().is_none());
    }

    #[test]
    fn missing_entries_means_empty() {
        assert!(parse_job_entries(json!({})).unwrap().is_empty());
        assert!(parse_job_entries(json!({"entries": null})).unwrap().is_empty());
    }

    #[test]
    fn non_array_entries_rejected() {
        assert_matches!(
            parse_job_entries(json!({"entries": {"jobId": "j1"}})),
            Err(ClientError::Decode(_))
        );
        assert_matches!(parse_job_entries(json!([])), Err(ClientError::Decode(_)));
    }
}
