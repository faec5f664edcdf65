#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_server: String,
    pub api_base_url: String,
}

const DEFAULT_HTTP_SERVER: &str = "http://localhost:8090";

impl Config {
    pub fn from_env() -> Self {
        let http_server = std::env::var("CONSOLE_HTTP_SERVER")
            .unwrap_or_else(|_| DEFAULT_HTTP_SERVER.to_string());
        Self::new(http_server)
    }

    pub fn new(http_server: impl Into<String>) -> Self {
        let http_server = http_server.into().trim_end_matches('/').to_string();
        let api_base_url = format!("{}{}", http_server, "/api");
        Self {
            http_server,
            api_base_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_SERVER)
    }
}
