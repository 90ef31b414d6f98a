//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::warn;

use gatekeeper_core::config::app::ServerConfig;

/// Builds a CORS tower layer from configuration.
///
/// With no configured origins the layer is permissive and does not allow
/// credentials. Otherwise only the listed origins may send the session
/// cookie.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.cors_max_age_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_and_without_origins() {
        let _ = build_cors_layer(&ServerConfig::default());
        let _ = build_cors_layer(&ServerConfig {
            cors_allowed_origins: vec!["https://app.example.com".into(), "bad\norigin".into()],
            ..ServerConfig::default()
        });
    }
}
