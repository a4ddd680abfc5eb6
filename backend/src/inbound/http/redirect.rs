//! Redirect-with-message responses.
//!
//! Missing documents and signed-out visitors are not errors from the reader's
//! point of view: they are sent back to the index with a one-line message.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::domain::ErrorCode;

use super::ApiResult;
use super::session::SessionContext;

/// `302 Found` to the index with `message` queued for display.
pub fn redirect_home(session: &SessionContext, message: impl Into<String>) -> ApiResult<HttpResponse> {
    session.flash(message)?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// Convert access-denied and not-found outcomes into [`redirect_home`].
///
/// Other errors pass through to the [`actix_web::ResponseError`] mapping.
pub fn recover(session: &SessionContext, outcome: ApiResult<HttpResponse>) -> ApiResult<HttpResponse> {
    match outcome {
        Err(err) if matches!(err.code(), ErrorCode::AccessDenied | ErrorCode::NotFound) => {
            redirect_home(session, err.message())
        }
        other => other,
    }
}
