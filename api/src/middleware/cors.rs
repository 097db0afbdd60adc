//! CORS middleware built from the shared configuration
//!
//! A `*` entry in any of the origin, method, or header lists switches that
//! dimension to allow-any; otherwise the listed values are applied as-is.

use actix_cors::Cors;

use sg_shared::config::server::CorsConfig;

/// Build the CORS middleware for the given configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().max_age(config.max_age as usize);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allowed_methods.iter().any(|method| method == "*") {
        cors = cors.allow_any_method();
    } else {
        cors = cors.allowed_methods(config.allowed_methods.iter().map(String::as_str));
    }

    if config.allowed_headers.iter().any(|header| header == "*") {
        cors = cors.allow_any_header();
    } else {
        cors = cors.allowed_headers(config.allowed_headers.iter().map(String::as_str));
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
