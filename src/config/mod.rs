use serde::Deserialize;

// Top-level configuration, grouped by concern
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
}

// Application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Flat view of the environment, one field per variable.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    host: String,
    port: u16,
    environment: String,
    rust_log: String,
    log_format: LogFormat,
    database_url: String,
    db_pool_size: u32,
    db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::default())
    }

    fn load(env: config::Environment) -> Result<Self, config::ConfigError> {
        let settings: EnvSettings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("environment", "development")?
            .set_default("rust_log", "ride_hailing=debug,tower_http=debug")?
            .set_default("log_format", "pretty")?
            .set_default("db_pool_size", 10)?
            .set_default("db_acquire_timeout_secs", 5)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(Config {
            app: AppConfig {
                host: settings.host,
                port: settings.port,
                environment: settings.environment,
                rust_log: settings.rust_log,
                log_format: settings.log_format,
            },
            database: DatabaseConfig {
                url: settings.database_url,
                pool_size: settings.db_pool_size,
                acquire_timeout_secs: settings.db_acquire_timeout_secs,
            },
        })
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}
