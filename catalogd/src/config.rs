//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, environment variables, and the command line.

use crate::Cli;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, allowed origin)
    #[serde(default)]
    pub server: catalog_axum::config::AxumConfig,

    /// Database configuration (file path, creation policy)
    #[serde(default)]
    pub database: catalog_sqlite::config::SqliteConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `--frontend-url` for `server.allowed_origin` (highest priority)
    /// 2. Environment variables
    /// 3. Config file given by the CLI
    /// 4. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep the catalog in a file
    /// export APP_DATABASE__DATABASE_PATH="/data/catalog.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::load_with(cli, environment())
    }

    fn load_with(cli: &Cli, environment: config::Environment) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(environment);

        config = config.set_override_option("server.allowed_origin", cli.frontend_url.clone())?;

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

/// Maps APP_SERVER__BIND_ADDRESS to server.bind_address.
fn environment() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
