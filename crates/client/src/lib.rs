//! Nexus Dashboard REST client for instant assurance analysis.
//!
//! Provides environment-based connection settings, an authenticated
//! HTTP session, and the [`ndi_core::InsightsApi`] implementation that
//! speaks the NDI wire format.

pub mod config;
pub mod error;
pub mod insights;
pub mod lazy;
pub mod session;

pub use config::{ConfigError, NdConfig};
pub use error::ClientError;
pub use insights::InsightsClient;
pub use lazy::LazyInsightsClient;
pub use session::NdSession;
