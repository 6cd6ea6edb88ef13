//! Server configuration from environment.

use std::env;

const DEFAULT_ILP_ENDPOINT: &str =
    "https://ilp-rest-2025-bvh6e9hschfagrgy.ukwest-01.azurewebsites.net";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub ilp_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        let ilp_endpoint = env::var("ILP_ENDPOINT")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ILP_ENDPOINT.to_string());

        Self {
            server_port: env::var("DISPATCH_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(8080),
            ilp_endpoint: ilp_endpoint.trim_end_matches('/').to_string(),
        }
    }
}
