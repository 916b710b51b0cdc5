//! An [`InsightsApi`] that logs in on first use.
//!
//! Check-mode invocations never reach the collaborator, so with this
//! wrapper they never open a session either.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use ndi_core::{
    AnalysisJobRecord, AnalysisJobRequest, BoxError, InsightsApi, JobId, TriggerResponse,
};

use crate::config::NdConfig;
use crate::error::ClientError;
use crate::insights::InsightsClient;
use crate::session::NdSession;

pub struct LazyInsightsClient {
    config: NdConfig,
    client: OnceCell<InsightsClient>,
}

impl LazyInsightsClient {
    pub fn new(config: NdConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// Whether a session has been established.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    async fn connected(&self) -> Result<&InsightsClient, ClientError> {
        self.client
            .get_or_try_init(|| async {
                let session = NdSession::login(&self.config).await?;
                Ok::<_, ClientError>(InsightsClient::new(session))
            })
            .await
    }
}

#[async_trait]
impl InsightsApi for LazyInsightsClient {
    async fn trigger_job(&self, request: &AnalysisJobRequest) -> Result<TriggerResponse, BoxError> {
        self.connected().await?.trigger_job(request).await
    }

    async fn list_jobs(
        &self,
        request: &AnalysisJobRequest,
        job_id: Option<&JobId>,
    ) -> Result<Vec<AnalysisJobRecord>, BoxError> {
        self.connected().await?.list_jobs(request, job_id).await
    }
}
