use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
}

/// Where and how log lines are shipped. Read from `LOKI_ENABLED`, `LOKI_URL`,
/// `SERVICE_NAME`, `ENVIRONMENT`, `LOG_FORMAT` and `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Full,
        };
        Self {
            loki_enabled: lookup("LOKI_ENABLED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            loki_url: lookup("LOKI_URL"),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "fuel-center".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            format,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.loki_enabled && self.loki_url.is_none() {
            return Err("LOKI_ENABLED is true but LOKI_URL is not set".to_string());
        }
        Ok(())
    }
}

pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    #[cfg(feature = "loki")]
    {
        if config.loki_enabled {
            if let Some(loki_url) = config.loki_url.clone() {
                return init_with_loki(config, &loki_url);
            }
        }
    }

    init_console_only(&config);
    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        "⛽ Console logging initialized"
    );
    Ok(())
}

fn init_console_only(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&config.log_level));
    match config.format {
        LogFormat::Full => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }
}

#[cfg(feature = "loki")]
fn init_with_loki(config: LoggingConfig, loki_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let url = url::Url::parse(loki_url)?;

    let (loki_layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .label("environment", &config.environment)?
        .build_url(url)?;

    // Ships buffered log lines to Loki
    tokio::spawn(task);

    let registry = tracing_subscriber::registry().with(EnvFilter::new(&config.log_level));
    match config.format {
        LogFormat::Full => registry
            .with(tracing_subscriber::fmt::layer())
            .with(loki_layer)
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .with(loki_layer)
            .init(),
    }

    tracing::info!("✅ Loki logging initialized at {}", loki_url);
    Ok(())
}
