//! Route table for the HTTP adapter.

use actix_web::web;

use super::{documents, health, users};

/// Upper bound for urlencoded form bodies; document saves post the full text.
pub const FORM_LIMIT: usize = 1024 * 1024;

/// Register every route.
///
/// Fixed paths come before `/{name}` so a document cannot shadow them.
/// Handlers expect [`super::state::HttpState`] and
/// [`health::HealthState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(FORM_LIMIT))
        .service(health::ready)
        .service(health::live)
        .service(users::sign_in_form)
        .service(users::sign_in)
        .service(users::sign_out)
        .service(documents::index)
        .service(documents::new_document)
        .service(documents::create_document)
        .service(documents::show_document)
        .service(documents::edit_document)
        .service(documents::save_document)
        .service(documents::delete_document);
}
