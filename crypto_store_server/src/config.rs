use std::env;

use css_common::Secret;
use log::*;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/crypto_store.db";
const DEFAULT_WEBHOOK_SECRET: &str = "demo-secret";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The shared secret the mock payment webhook must present. Demo-grade authentication only.
    pub webhook_secret: Secret<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            webhook_secret: Secret::new(DEFAULT_WEBHOOK_SECRET.to_string()),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("HOST").ok().unwrap_or_else(|| DEFAULT_HOST.into());
        let port = env::var("PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for PORT. {e} Using the default, {DEFAULT_PORT}, instead.");
                    DEFAULT_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PORT);
        let database_url = env::var("DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}, instead.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let webhook_secret = env::var("WEBHOOK_MOCK_SECRET").map(Secret::new).unwrap_or_else(|_| {
            warn!(
                "🚨️ WEBHOOK_MOCK_SECRET is not set. Using the well-known demo default. Anyone who reads the \
                 source can confirm payments on this instance. Do not run like this outside a demo."
            );
            Secret::new(DEFAULT_WEBHOOK_SECRET.to_string())
        });
        Self { host, port, database_url, webhook_secret }
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// The subset of the server configuration that route handlers need. Kept as small as possible so secrets
/// are not passed around the system more than necessary.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub webhook_secret: Secret<String>,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { webhook_secret: config.webhook_secret.clone() }
    }
}
