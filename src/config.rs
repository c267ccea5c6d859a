use anyhow::Context;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1500);

/// Settings read once at start-up and handed to whoever builds a backend.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub demo_mode: bool,
    pub request_timeout: Duration,
    pub demo_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            demo_mode: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base_url = lookup("DEMISTIFY_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);
        let demo_mode = lookup("DEMISTIFY_DEMO")
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        let request_timeout = duration_setting(
            &lookup,
            "DEMISTIFY_REQUEST_TIMEOUT_SECS",
            Duration::from_secs,
            defaults.request_timeout,
        );
        let demo_delay = duration_setting(
            &lookup,
            "DEMISTIFY_DEMO_DELAY_MS",
            Duration::from_millis,
            defaults.demo_delay,
        );

        Self {
            api_base_url,
            demo_mode,
            request_timeout,
            demo_delay,
        }
    }

    /// Reject settings the app cannot start with. The base URL only matters
    /// outside demo mode.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.demo_mode {
            return Ok(());
        }
        crate::api::chat_endpoint(&self.api_base_url)
            .context("DEMISTIFY_API_URL is not a usable base URL")?;
        anyhow::ensure!(
            !self.request_timeout.is_zero(),
            "DEMISTIFY_REQUEST_TIMEOUT_SECS must be greater than zero"
        );
        Ok(())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn duration_setting(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    unit: fn(u64) -> Duration,
    default: Duration,
) -> Duration {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) => unit(value),
        Err(err) => {
            tracing::warn!(key, value = %raw, error = %err, "invalid setting, using default");
            default
        }
    }
}
