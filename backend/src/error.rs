use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use log::error;

use types::domain::ErrorBody;
use types::error::Error;

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub fn error_into_response(error: Error) -> ErrorResponse {
    let (status, body) = error.into_response_tuple();
    (status, Json(body))
}

/// Known service errors keep their status and text; anything else is a 500.
pub fn report_into_response(e: eyre::Report) -> ErrorResponse {
    error!("Error occurred: {:?}", e);
    match e.downcast::<Error>() {
        Ok(error) => error_into_response(error),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: "Internal server error".to_string(),
            }),
        ),
    }
}

/// Malformed bodies still answer with a `{detail}` JSON body.
pub fn rejection_into_response(rejection: JsonRejection) -> ErrorResponse {
    error!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ErrorBody {
            detail: rejection.body_text(),
        }),
    )
}
