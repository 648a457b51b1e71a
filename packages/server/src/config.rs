//! Command line and environment configuration.

use std::time::Duration;

use clap::Parser;

use crate::infrastructure::executor::Judge0Config;

pub const DEFAULT_JUDGE0_URL: &str = "https://judge0-ce.p.rapidapi.com";
pub const DEFAULT_JUDGE0_HOST: &str = "judge0-ce.p.rapidapi.com";

#[derive(Parser, Debug, Clone)]
#[command(name = "codecast-server")]
#[command(about = "Collaborative code room server with remote execution", long_about = None)]
pub struct Config {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CODECAST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Base URL of the Judge0 API
    #[arg(long, env = "JUDGE0_API_URL", default_value = DEFAULT_JUDGE0_URL)]
    pub judge0_url: String,

    /// RapidAPI key sent as X-RapidAPI-Key
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true)]
    pub rapidapi_key: Option<String>,

    /// Value of the X-RapidAPI-Host header
    #[arg(long, env = "RAPIDAPI_HOST", default_value = DEFAULT_JUDGE0_HOST)]
    pub rapidapi_host: String,

    /// Origin allowed by CORS (any origin when omitted)
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Executions allowed per UTC day across the whole process
    #[arg(long, env = "DAILY_EXECUTION_LIMIT", default_value_t = 150)]
    pub daily_execution_limit: u32,

    /// Timeout for a single call to the execution backend
    #[arg(long, env = "EXECUTION_TIMEOUT_SECS", default_value_t = 30)]
    pub execution_timeout_secs: u64,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn judge0_config(&self) -> Judge0Config {
        Judge0Config {
            base_url: self.judge0_url.trim_end_matches('/').to_string(),
            api_key: self.rapidapi_key.clone().filter(|key| !key.is_empty()),
            api_host: self.rapidapi_host.clone(),
            timeout: Duration::from_secs(self.execution_timeout_secs),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.rapidapi_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}
