//! Document handlers.
//!
//! ```text
//! GET  /                 index
//! GET  /new              creation form          (signed in)
//! POST /new              doc_name=notes         (signed in)
//! GET  /{name}           raw text or rendered markdown
//! GET  /{name}/edit      edit form              (signed in)
//! POST /{name}/save      new_txt=...            (signed in)
//! POST /{name}/delete                           (signed in)
//! ```

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::SessionIdentity;
use crate::domain::{AuthGate, DocumentKind, Error, ErrorCode};
use crate::inbound::http::error::run_blocking;
use crate::inbound::http::pages;
use crate::inbound::http::redirect::{recover, redirect_home};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Form body for `POST /new`.
#[derive(Debug, Deserialize)]
pub struct NewDocumentForm {
    /// Requested name; a missing field counts as blank.
    #[serde(default)]
    pub doc_name: String,
}

/// Form body for `POST /{name}/save`.
#[derive(Debug, Deserialize)]
pub struct SaveDocumentForm {
    /// Replacement content.
    #[serde(default)]
    pub new_txt: String,
}

/// Unwrap a form extracted after the sign-in check.
///
/// Extraction failures (wrong content type, oversized body) surface as a 400.
fn form_body<T>(form: Result<web::Form<T>, actix_web::Error>) -> ApiResult<T> {
    form.map(web::Form::into_inner)
        .map_err(|err| Error::invalid_request(format!("unreadable form body: {err}")))
}

/// List every document, sorted for display.
#[get("/")]
pub async fn index(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let documents = state.documents.clone();
    let mut names = run_blocking(move || documents.list()).await?;
    names.sort();
    let body = pages::index(&names, AuthGate::is_signed_in(&session));
    Ok(pages::render(&session, StatusCode::OK, None, &body))
}

/// Show the creation form.
#[get("/new")]
pub async fn new_document(session: SessionContext) -> ApiResult<HttpResponse> {
    let outcome = AuthGate::require_signed_in(&session).map(|()| {
        pages::render(&session, StatusCode::OK, None, &pages::new_document_form())
    });
    recover(&session, outcome)
}

/// Create an empty document, or re-display the form with a 422.
#[post("/new")]
pub async fn create_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Result<web::Form<NewDocumentForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    if let Err(err) = AuthGate::require_signed_in(&session) {
        return recover(&session, Err(err));
    }
    let raw = form_body(form)?.doc_name;
    let documents = state.documents.clone();
    match run_blocking(move || documents.create(&raw)).await {
        Ok(name) => {
            info!(document = %name, user = ?session.signed_in_user(), "document created");
            redirect_home(&session, format!("{name} has been created."))
        }
        Err(err) if err.code() == ErrorCode::InvalidRequest => Ok(pages::render(
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            Some(err.message().to_owned()),
            &pages::new_document_form(),
        )),
        Err(err) => Err(err),
    }
}

/// Serve a document: `.md` as HTML, anything else as `text/plain`.
#[get("/{name}")]
pub async fn show_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let documents = state.documents.clone();
    let opened = run_blocking(move || documents.open(&raw)).await;
    let outcome = opened.map(|document| match document.kind() {
        DocumentKind::Markdown => {
            let html = state.markdown.render(&document.text());
            pages::render(&session, StatusCode::OK, None, &html)
        }
        DocumentKind::PlainText => HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .body(document.into_content()),
    });
    recover(&session, outcome)
}

/// Show the edit form pre-filled with the current content.
#[get("/{name}/edit")]
pub async fn edit_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Err(err) = AuthGate::require_signed_in(&session) {
        return recover(&session, Err(err));
    }
    let raw = path.into_inner();
    let documents = state.documents.clone();
    let outcome = run_blocking(move || documents.open(&raw))
        .await
        .map(|document| {
            let body = pages::edit_form(document.name(), &document.text());
            pages::render(&session, StatusCode::OK, None, &body)
        });
    recover(&session, outcome)
}

/// Replace a document's content.
#[post("/{name}/save")]
pub async fn save_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: Result<web::Form<SaveDocumentForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    if let Err(err) = AuthGate::require_signed_in(&session) {
        return recover(&session, Err(err));
    }
    let raw = path.into_inner();
    let content = form_body(form)?.new_txt;
    let documents = state.documents.clone();
    match run_blocking(move || documents.save(&raw, content.as_bytes())).await {
        Ok(name) => {
            info!(document = %name, user = ?session.signed_in_user(), "document updated");
            redirect_home(&session, format!("{name} has been updated."))
        }
        Err(err) => recover(&session, Err(err)),
    }
}

/// Delete a document.
#[post("/{name}/delete")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if let Err(err) = AuthGate::require_signed_in(&session) {
        return recover(&session, Err(err));
    }
    let raw = path.into_inner();
    let documents = state.documents.clone();
    match run_blocking(move || documents.delete(&raw)).await {
        Ok(name) => {
            info!(document = %name, user = ?session.signed_in_user(), "document deleted");
            redirect_home(&session, format!("{name} has been deleted."))
        }
        Err(err) => recover(&session, Err(err)),
    }
}
