//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET  /users/signin
//! POST /users/signin   user=admin&pw=secret
//! POST /users/signout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{AuthGate, ErrorCode, LoginCredentials};
use crate::inbound::http::error::run_blocking;
use crate::inbound::http::pages;
use crate::inbound::http::redirect::redirect_home;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Form body for `POST /users/signin`.
#[derive(Deserialize)]
pub struct SignInForm {
    /// Submitted username.
    #[serde(default)]
    pub user: String,
    /// Submitted password.
    #[serde(default)]
    pub pw: String,
}

/// Show an empty sign-in form.
#[get("/users/signin")]
pub async fn sign_in_form(session: SessionContext) -> HttpResponse {
    pages::render(&session, StatusCode::OK, None, &pages::sign_in_form(""))
}

/// Check the submitted credentials and record the identity on success.
///
/// Failures re-display the form with the submitted username and leave the
/// session untouched.
#[post("/users/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignInForm>,
) -> ApiResult<HttpResponse> {
    let SignInForm { user, pw } = form.into_inner();
    let credentials = LoginCredentials::new(user.clone(), pw);
    let auth = state.auth.clone();
    match run_blocking(move || auth.authenticate(&credentials)).await {
        Ok(username) => {
            AuthGate::record_sign_in(&session, &username)?;
            redirect_home(&session, "Welcome!")
        }
        Err(err) if err.code() == ErrorCode::InvalidCredentials => {
            info!(user = %user, "sign-in rejected");
            Ok(pages::render(
                &session,
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(err.message().to_owned()),
                &pages::sign_in_form(&user),
            ))
        }
        Err(err) => Err(err),
    }
}

/// Forget the signed-in identity.
#[post("/users/signout")]
pub async fn sign_out(session: SessionContext) -> ApiResult<HttpResponse> {
    AuthGate::sign_out(&session);
    redirect_home(&session, "You have been signed out.")
}
