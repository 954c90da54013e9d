//! Process configuration, resolved once at startup from environment
//! variables with sensible local defaults. Handlers receive it through
//! `web::Data<AppConfig>` instead of reaching for the environment themselves.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub company_name: String,
    pub company_address: String,
    pub open_browser: bool,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = var_or("FORMA_PORT", "8080").parse().unwrap_or(8080);
        Self {
            host: var_or("FORMA_HOST", "127.0.0.1"),
            port,
            db_path: var_or("FORMA_DB", "forma.sqlite"),
            company_name: var_or("FORMA_COMPANY_NAME", "Acme Industries Pvt Ltd"),
            company_address: var_or("FORMA_COMPANY_ADDRESS", "Plot 14, MIDC, Pune, MH 411019"),
            open_browser: var_or("FORMA_OPEN_BROWSER", "true") == "true",
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
