//! Trigger-and-correlate orchestration for Nexus Dashboard Insights
//! instant assurance analysis jobs.
//!
//! [`dispatcher::Dispatcher`] decides what to call; [`correlator`]
//! confirms a triggered job is visible exactly once in the history
//! listing. All remote access goes through the [`api::InsightsApi`]
//! collaborator trait.

pub mod api;
pub mod correlator;
pub mod dispatcher;
pub mod error;
pub mod types;

pub use api::{BoxError, InsightsApi};
pub use dispatcher::Dispatcher;
pub use error::AnalysisError;
pub use types::{
    AnalysisJobRecord, AnalysisJobRequest, Invocation, JobId, OperationMode, OperationResult,
    TriggerResponse,
};
