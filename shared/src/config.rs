use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub data_dir: String,
    pub self_identity: String,
    pub seed_demo_data: bool,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "localhost";
    const DEFAULT_HTTP_PORT: u16 = 8090;
    const DEFAULT_DATA_DIR: &str = "./data";
    const DEFAULT_SELF_IDENTITY: &str = "admin@example.com";

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port = match lookup("CONSOLE_HTTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(
                    "CONSOLE_HTTP_PORT={} is not a valid port, using {}",
                    raw,
                    Self::DEFAULT_HTTP_PORT
                );
                Self::DEFAULT_HTTP_PORT
            }),
            None => Self::DEFAULT_HTTP_PORT,
        };

        let self_identity = lookup("CONSOLE_SELF_IDENTITY").unwrap_or_else(|| {
            warn!(
                "CONSOLE_SELF_IDENTITY not set, every request acts as '{}'",
                Self::DEFAULT_SELF_IDENTITY
            );
            Self::DEFAULT_SELF_IDENTITY.to_string()
        });

        Self {
            host: lookup("CONSOLE_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port,
            data_dir: lookup("CONSOLE_DATA_DIR")
                .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string()),
            self_identity,
            seed_demo_data: lookup("CONSOLE_SEED_DEMO")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            allowed_origins: lookup("CONSOLE_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.http_port, 8090);
        assert_eq!(config.data_dir, "./data");
        assert_eq!(config.self_identity, "admin@example.com");
        assert!(!config.seed_demo_data);
        assert!(config.allows_any_origin());
        assert_eq!(config.bind_address(), "localhost:8090");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CONSOLE_HOST", "0.0.0.0"),
            ("CONSOLE_HTTP_PORT", "9000"),
            ("CONSOLE_SEED_DEMO", "true"),
            (
                "CONSOLE_ALLOWED_ORIGINS",
                "http://localhost:8080, http://127.0.0.1:8080",
            ),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert!(config.seed_demo_data);
        assert!(!config.allows_any_origin());
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:8080", "http://127.0.0.1:8080"]
        );
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_from(&[("CONSOLE_HTTP_PORT", "not-a-port")]);
        assert_eq!(config.http_port, 8090);
    }
}
