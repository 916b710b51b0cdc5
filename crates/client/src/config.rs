use std::fmt;
use std::time::Duration;

/// Connection settings for one Nexus Dashboard cluster.
///
/// Loaded from environment variables; see [`NdConfig::from_env`].
#[derive(Clone)]
pub struct NdConfig {
    /// Hostname or IP address of the cluster.
    pub host: String,
    /// Port override. Defaults to the scheme's port.
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
    /// Login domain (default: `DefaultAuth`).
    pub login_domain: String,
    /// Use HTTPS (default: `true`).
    pub use_ssl: bool,
    /// Verify the server certificate (default: `true`).
    pub validate_certs: bool,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

impl NdConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default       |
    /// |---------------------|---------------|
    /// | `ND_HOST`           | required      |
    /// | `ND_PORT`           | scheme port   |
    /// | `ND_USERNAME`       | `admin`       |
    /// | `ND_PASSWORD`       | required      |
    /// | `ND_LOGIN_DOMAIN`   | `DefaultAuth` |
    /// | `ND_USE_SSL`        | `true`        |
    /// | `ND_VALIDATE_CERTS` | `true`        |
    /// | `ND_TIMEOUT_SECS`   | `30`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let host = read("ND_HOST").ok_or(ConfigError::Missing("ND_HOST"))?;
        let password = read("ND_PASSWORD").ok_or(ConfigError::Missing("ND_PASSWORD"))?;

        let port = read("ND_PORT")
            .map(|v| parse_number::<u16>("ND_PORT", v))
            .transpose()?;

        let timeout_secs = read("ND_TIMEOUT_SECS")
            .map(|v| parse_number::<u64>("ND_TIMEOUT_SECS", v))
            .transpose()?
            .unwrap_or(30);

        let use_ssl = read("ND_USE_SSL")
            .map(|v| parse_flag("ND_USE_SSL", v))
            .transpose()?
            .unwrap_or(true);

        let validate_certs = read("ND_VALIDATE_CERTS")
            .map(|v| parse_flag("ND_VALIDATE_CERTS", v))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            username: read("ND_USERNAME").unwrap_or_else(|| "admin".into()),
            password,
            login_domain: read("ND_LOGIN_DOMAIN").unwrap_or_else(|| "DefaultAuth".into()),
            use_ssl,
            validate_certs,
            timeout_secs,
        })
    }

    /// Base URL of the cluster, e.g. `https://nd.example.com:8443`.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        match self.port {
            Some(port) => format!("{scheme}://{}:{port}", self.host),
            None => format!("{scheme}://{}", self.host),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for NdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("login_domain", &self.login_domain)
            .field("use_ssl", &self.use_ssl)
            .field("validate_certs", &self.validate_certs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}
