//! HTTP adapter mapping for domain errors.
//!
//! Handlers turn expected failures (missing documents, signed-out visitors,
//! rejected forms) into redirects or form re-displays themselves. Whatever
//! reaches this mapping becomes a short plain-text response; internal details
//! are logged against the active trace id and never sent to the client.

use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::error;

use crate::domain::{Error, ErrorCode, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::AccessDenied => StatusCode::FORBIDDEN,
        ErrorCode::InvalidCredentials => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            match TraceId::current() {
                Some(trace_id) => error!(%trace_id, error = %self, "request failed"),
                None => error!(error = %self, "request failed"),
            }
            INTERNAL_MESSAGE.to_owned()
        } else {
            self.message().to_owned()
        };
        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

impl From<BlockingError> for Error {
    fn from(err: BlockingError) -> Self {
        Error::internal(format!("blocking task failed: {err}"))
    }
}

/// Run blocking store or hashing work off the async executor.
///
/// The active trace id is carried onto the blocking thread so log lines from
/// adapters stay correlated with the request.
pub async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    let outcome = web::block(move || {
        let _span = trace_id.map(|id| tracing::info_span!("blocking", trace_id = %id).entered());
        work()
    })
    .await?;
    outcome
}
