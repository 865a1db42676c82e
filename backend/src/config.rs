use anyhow::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
    pub require_org_membership: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into()),
            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "20".into())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a number")?,
            log_format,
            require_org_membership: lookup("REQUIRE_ORG_MEMBERSHIP")
                .unwrap_or_else(|| "false".into())
                .parse()
                .context("REQUIRE_ORG_MEMBERSHIP must be 'true' or 'false'")?,
        })
    }
}
