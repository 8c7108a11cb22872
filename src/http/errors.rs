use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::order::OrderServiceError;

// ============================================================================
// HTTP Error Mapping
// ============================================================================
//
// NotFound          -> 404
// InvalidTransition -> 400
// InvalidInput      -> 400
// Storage           -> 500, body carries no backend detail
//
// ============================================================================

impl ResponseError for OrderServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            OrderServiceError::NotFound => StatusCode::NOT_FOUND,
            OrderServiceError::InvalidTransition(_) | OrderServiceError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            OrderServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            OrderServiceError::Storage(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}
