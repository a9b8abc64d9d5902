//! Application settings.
//!
//! Loaded from an optional `shop.toml` in the working directory, overridden
//! by `SHOP_`-prefixed environment variables (e.g. `SHOP_SERVER__PORT`).

use std::collections::HashMap;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    /// Optional item → price table replacing the built-in catalog.
    pub catalog: Option<HashMap<String, i64>>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub token_secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 8080)?
            .set_default("server.database", "memory")?
            .set_default("server.token_secret", "insecure-dev-secret")?
            .add_source(File::with_name("shop").required(false))
            .add_source(Environment::with_prefix("SHOP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
