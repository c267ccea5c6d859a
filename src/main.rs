use anyhow::Context;
use demistify::config::AppConfig;
use tracing_subscriber::EnvFilter;

/// Bundled config for mobile and web builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config (mobile builds)
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for line in BUNDLED_CONFIG.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim();
            // Only set if not already set (allow env override)
            if std::env::var(key).is_err() {
                // SAFETY: We're setting env vars at startup before any threads are spawned
                unsafe {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    init_tracing()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting demistify");

    AppConfig::from_env()
        .validate()
        .context("invalid configuration")?;

    dioxus::launch(demistify::ui::App);
    Ok(())
}
