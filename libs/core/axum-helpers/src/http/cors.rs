use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Comma-separated list of allowed browser origins
pub const CORS_ENV_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Parse a comma-separated origin list, ignoring blank entries.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid {} value '{}': {}", CORS_ENV_VAR, s, e),
                )
            })
        })
        .collect()
}

/// Build the CORS layer for the catalog API.
///
/// With `CORS_ALLOWED_ORIGIN` set, only the listed origins may call the API.
/// Without it every origin is allowed, which is what the browser client
/// needs when served from a dev server on another port.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    match std::env::var(CORS_ENV_VAR) {
        Ok(raw) => {
            let origins = parse_allowed_origins(&raw)?;
            if origins.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} cannot be empty", CORS_ENV_VAR),
                ));
            }
            info!("CORS configured with allowed origins: {}", raw);
            Ok(layer.allow_origin(AllowOrigin::list(origins)))
        }
        Err(_) => {
            warn!("{} not set, allowing any origin", CORS_ENV_VAR);
            Ok(layer.allow_origin(AllowOrigin::any()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_trims_and_skips_blanks() {
        let origins =
            parse_allowed_origins(" http://localhost:5173 , ,https://shop.example.com").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
        assert_eq!(origins[1], "https://shop.example.com");
    }

    #[test]
    fn test_parse_allowed_origins_rejects_invalid_header() {
        assert!(parse_allowed_origins("http://bad\norigin").is_err());
    }

    #[test]
    fn test_cors_layer_from_env_rejects_empty_list() {
        temp_env::with_var(CORS_ENV_VAR, Some(" , "), || {
            assert!(cors_layer_from_env().is_err());
        });
    }

    #[test]
    fn test_cors_layer_from_env_permissive_when_unset() {
        temp_env::with_var_unset(CORS_ENV_VAR, || {
            assert!(cors_layer_from_env().is_ok());
        });
    }
}
