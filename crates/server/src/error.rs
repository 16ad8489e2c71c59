use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use lecturelens_common::AppError;
use std::fmt;
use tracing::{error, warn};

/// HTTP boundary wrapper around `AppError`
///
/// Every handler failure becomes a JSON body here and nowhere else.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = %self.0.kind, "{}", self.0.message);
        } else {
            warn!(kind = %self.0.kind, "{}", self.0.message);
        }

        HttpResponse::build(status)
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .json(self.0.to_body())
    }
}

/// Fallback for verbs a route does not serve
pub async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(AppError::method_not_allowed().into())
}
