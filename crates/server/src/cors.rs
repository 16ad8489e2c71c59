use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;
use actix_web::HttpResponse;

pub const SUMMARIZE_METHODS: &str = "POST, OPTIONS";
pub const HISTORY_METHODS: &str = "GET, POST, OPTIONS";

/// `Access-Control-Allow-Origin: *` on every response
pub fn allow_any_origin() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}

/// Empty 200 answer to a browser pre-flight
pub fn preflight(methods: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, methods))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .finish()
}
