use actix_web::HttpResponse;

use crate::dto::api::ErrorBody;
use crate::services::ServiceError;

pub mod api;
pub mod main;

/// Maps a service failure onto the HTTP error taxonomy.
///
/// Unauthorized stays a bare 401 (the signal the session-gated fetch contract
/// keys on); everything else carries a `{message}` body the operator UI can
/// display. Internal details are logged, never sent to the client.
pub fn error_response(context: &str, err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody {
            message: "not found".to_string(),
        }),
        ServiceError::Validation(message) => HttpResponse::BadRequest().json(ErrorBody {
            message: message.clone(),
        }),
        ServiceError::Internal(_) => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody {
                message: "internal server error".to_string(),
            })
        }
    }
}
