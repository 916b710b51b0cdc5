//! Command-line arguments.
//!
//! Connection settings are not flags; they come from `ND_*` environment
//! variables (see [`ndi_client::NdConfig::from_env`]).

use clap::{Parser, ValueEnum};

use ndi_core::{AnalysisError, AnalysisJobRequest, Invocation, OperationMode};

/// Trigger or list Nexus Dashboard Insights instant assurance analysis jobs.
#[derive(Debug, Parser)]
#[command(name = "ndi-analysis", version)]
pub struct Cli {
    /// Name of the insights group
    #[arg(long, visible_aliases = ["fab-name", "ig-name"])]
    pub insights_group: String,

    /// Name of the assurance entity (site)
    #[arg(long, visible_alias = "site")]
    pub site_name: String,

    /// `present` triggers an instant analysis job; `query` lists job history
    #[arg(long, value_enum, default_value_t = State::Query)]
    pub state: State,

    /// Check mode: report what would change without triggering anything
    #[arg(long)]
    pub check: bool,

    /// Result formatting on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum State {
    Query,
    Present,
}

impl From<State> for OperationMode {
    fn from(state: State) -> Self {
        match state {
            State::Query => OperationMode::Query,
            State::Present => OperationMode::Present,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

impl Cli {
    /// Validate the scope and build the dispatcher input.
    pub fn invocation(&self) -> Result<Invocation, AnalysisError> {
        Ok(Invocation {
            request: AnalysisJobRequest::new(&self.insights_group, &self.site_name)?,
            mode: self.state.into(),
            dry_run: self.check,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_to_query() {
        let cli = Cli::try_parse_from([
            "ndi-analysis",
            "--insights-group",
            "exampleIG",
            "--site-name",
            "siteName",
        ])
        .unwrap();

        assert_eq!(cli.state, State::Query);
        assert!(!cli.check);
        assert_eq!(cli.output, OutputFormat::Pretty);

        let invocation = cli.invocation().unwrap();
        assert_eq!(invocation.mode, OperationMode::Query);
        assert_eq!(invocation.request.insights_group(), "exampleIG");
    }

    #[test]
    fn aliases_accepted() {
        let cli = Cli::try_parse_from([
            "ndi-analysis",
            "--ig-name",
            "exampleIG",
            "--site",
            "siteName",
            "--state",
            "present",
            "--check",
        ])
        .unwrap();

        let invocation = cli.invocation().unwrap();
        assert_eq!(invocation.mode, OperationMode::Present);
        assert!(invocation.dry_run);
        assert_eq!(invocation.request.site_name(), "siteName");

        let cli = Cli::try_parse_from(["ndi-analysis", "--fab-name", "ig", "--site", "s"]).unwrap();
        assert_eq!(cli.insights_group, "ig");
    }

    #[test]
    fn missing_site_rejected() {
        assert!(Cli::try_parse_from(["ndi-analysis", "--insights-group", "exampleIG"]).is_err());
    }

    #[test]
    fn unknown_state_rejected() {
        let result = Cli::try_parse_from([
            "ndi-analysis",
            "--insights-group",
            "exampleIG",
            "--site-name",
            "siteName",
            "--state",
            "absent",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_scope_fails_validation() {
        let cli = Cli::try_parse_from([
            "ndi-analysis",
            "--insights-group",
            "",
            "--site-name",
            "siteName",
        ])
        .unwrap();
        assert_matches!(cli.invocation(), Err(AnalysisError::Validation(_)));
    }
}
