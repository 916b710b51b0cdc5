//! `ndi-analysis` -- trigger or list NDI instant assurance analysis jobs.
//!
//! Writes one JSON document to stdout; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default       | Description                      |
//! |---------------------|----------|---------------|----------------------------------|
//! | `ND_HOST`           | yes      | --            | Nexus Dashboard host or IP       |
//! | `ND_PASSWORD`       | yes      | --            | Password for `ND_USERNAME`       |
//! | `ND_USERNAME`       | no       | `admin`       | Login user                       |
//! | `ND_LOGIN_DOMAIN`   | no       | `DefaultAuth` | Login domain                     |
//! | `ND_PORT`           | no       | scheme port   | HTTP(S) port                     |
//! | `ND_USE_SSL`        | no       | `true`        | Use HTTPS                        |
//! | `ND_VALIDATE_CERTS` | no       | `true`        | Verify the server certificate    |
//! | `ND_TIMEOUT_SECS`   | no       | `30`          | Per-request timeout              |
//!
//! # Exit codes
//!
//! `0` success, `1` the invocation failed, `2` bad arguments or configuration.
//! Every outcome except `--help`/`--version` prints a JSON document.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ndi_analysis=info,ndi_cli=info,ndi_core=info,ndi_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let out = ndi_cli::run_from_args(std::env::args_os(), |var| std::env::var(var).ok()).await;

    if !out.stdout.is_empty() {
        println!("{}", out.stdout);
    }
    ExitCode::from(out.exit_code)
}
