pub mod handlers;
pub mod models;
pub mod routes;

use actix_cors::Cors;
use actix_web::http::Uri;
use log::warn;

/// CORS policy for the configured origins: any method or header, with credentials.
///
/// Entries that are not absolute origins (including `*`, which cannot be
/// combined with credentials) are skipped with a warning.
pub fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .filter(|origin| {
            let valid = origin
                .parse::<Uri>()
                .map(|uri| uri.scheme().is_some() && uri.host().is_some())
                .unwrap_or(false);
            if !valid {
                warn!("Ignoring invalid CORS origin: {}", origin);
            }
            valid
        })
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
