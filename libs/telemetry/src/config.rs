use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub environment: String,
    pub json_logs: bool,
    /// Filter directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl TelemetryConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            environment: "dev".into(),
            json_logs: true,
            default_filter: "info".into(),
        }
    }

    /// Reads `OTEL_SERVICE_NAME`, `DEPLOYMENT_ENV` and `LOG_FORMAT`; logs are
    /// JSON unless `LOG_FORMAT` is `text`, `pretty` or `plain`.
    pub fn from_env(default_service_name: &str) -> Self {
        let service_name =
            env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| default_service_name.to_string());
        let environment = env::var("DEPLOYMENT_ENV").unwrap_or_else(|_| "dev".into());
        let json_logs = env::var("LOG_FORMAT")
            .map(|v| json_format(&v))
            .unwrap_or(true);
        Self {
            service_name,
            environment,
            json_logs,
            default_filter: "info".into(),
        }
    }
}

fn json_format(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "text" | "pretty" | "plain")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_switch() {
        assert!(json_format("json"));
        assert!(json_format(""));
        assert!(!json_format("Pretty"));
        assert!(!json_format(" text "));
    }

    #[test]
    fn new_defaults() {
        let cfg = TelemetryConfig::new("wecom-egress");
        assert_eq!(cfg.service_name, "wecom-egress");
        assert!(cfg.json_logs);
        assert_eq!(cfg.default_filter, "info");
    }
}
