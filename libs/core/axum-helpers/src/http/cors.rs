use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Build the CORS layer from a comma-separated origin list.
///
/// `None` (or a list with no usable entries) yields a permissive layer:
/// event collectors are typically called from arbitrary sites.
///
/// ```ignore
/// let layer = cors_layer(Some("http://localhost:5173,https://shop.example.com"))?;
/// ```
pub fn cors_layer(allowed_origins: Option<&str>) -> io::Result<CorsLayer> {
    let Some(origins_str) = allowed_origins else {
        info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    };

    let origins = parse_origins(origins_str)?;
    if origins.is_empty() {
        return Ok(create_permissive_cors_layer());
    }

    info!("CORS configured with allowed origins: {}", origins_str);
    Ok(create_cors_layer(origins))
}

fn parse_origins(origins_str: &str) -> io::Result<Vec<HeaderValue>> {
    origins_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value '{}': {}", s, e),
                )
            })
        })
        .collect()
}

/// CORS for the event API: GET/POST/OPTIONS with JSON bodies, 1 hour max age.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
