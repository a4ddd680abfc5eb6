//! HTML pages.
//!
//! Every page shares one layout: the pending flash message (shown once), the
//! page body, and a footer with the sign-in state. Values interpolated into
//! markup are escaped; document names in links are percent-encoded.

use std::fmt::Write as _;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;

use crate::domain::DocumentName;
use crate::domain::ports::SessionIdentity;

use super::session::SessionContext;

/// Escape text for element content and double-quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn document_href(name: &DocumentName, action: Option<&str>) -> String {
    let segment = urlencoding::encode(name.as_str());
    match action {
        Some(action) => format!("/{segment}/{action}"),
        None => format!("/{segment}"),
    }
}

fn layout(message: Option<&str>, user: Option<&str>, body: &str) -> String {
    let banner = message
        .map(|text| format!("<p class=\"message\">{}</p>\n", escape_html(text)))
        .unwrap_or_default();
    let footer = match user {
        Some(user) => format!(
            concat!(
                "<p class=\"user-status\">Signed in as {}.</p>\n",
                "<form method=\"post\" action=\"/users/signout\">",
                "<button type=\"submit\">Sign Out</button></form>\n"
            ),
            escape_html(user)
        ),
        None => "<p class=\"user-status\"><a href=\"/users/signin\">Sign In</a></p>\n".to_owned(),
    };
    format!(
        concat!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"utf-8\">\n<title>CMS</title>\n</head>\n<body>\n",
            "{banner}<main>\n{body}</main>\n<footer>\n{footer}</footer>\n",
            "</body>\n</html>\n"
        ),
        banner = banner,
        body = body,
        footer = footer,
    )
}

/// Render `body` inside the layout and consume the pending flash message.
///
/// `banner` replaces the pending message for this response; the pending one
/// is discarded either way.
pub fn render(
    session: &SessionContext,
    status: StatusCode,
    banner: Option<String>,
    body: &str,
) -> HttpResponse {
    let pending = session.take_flash();
    let message = banner.or(pending);
    let user = session.signed_in_user().filter(|user| !user.is_empty());
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(layout(message.as_deref(), user.as_deref(), body))
}

/// Document index with edit and delete controls for signed-in users.
#[must_use]
pub fn index(names: &[DocumentName], signed_in: bool) -> String {
    let mut body = String::from("<ul class=\"documents\">\n");
    for name in names {
        let label = escape_html(name.as_str());
        let _ = write!(
            body,
            "<li><a href=\"{}\">{label}</a>",
            document_href(name, None)
        );
        if signed_in {
            let _ = write!(
                body,
                concat!(
                    " <a href=\"{}\">Edit</a>",
                    " <form class=\"inline\" method=\"post\" action=\"{}\">",
                    "<button type=\"submit\">Delete</button></form>"
                ),
                document_href(name, Some("edit")),
                document_href(name, Some("delete")),
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n<p><a href=\"/new\">New Document</a></p>\n");
    body
}

/// Creation form posting `doc_name` to `/new`.
#[must_use]
pub fn new_document_form() -> String {
    concat!(
        "<form method=\"post\" action=\"/new\">\n",
        "<label for=\"doc_name\">Add a new document:</label>\n",
        "<input id=\"doc_name\" name=\"doc_name\" type=\"text\">\n",
        "<button type=\"submit\">Create</button>\n",
        "</form>\n"
    )
    .to_owned()
}

/// Edit form posting `new_txt` to `/<name>/save`.
#[must_use]
pub fn edit_form(name: &DocumentName, content: &str) -> String {
    format!(
        concat!(
            "<form method=\"post\" action=\"{action}\">\n",
            "<label for=\"new_txt\">Edit content of {label}:</label>\n",
            "<textarea id=\"new_txt\" name=\"new_txt\" rows=\"20\" cols=\"80\">{content}</textarea>\n",
            "<button type=\"submit\">Save Changes</button>\n",
            "</form>\n"
        ),
        action = document_href(name, Some("save")),
        label = escape_html(name.as_str()),
        content = escape_html(content),
    )
}

/// Sign-in form posting `user` and `pw`, pre-filled with `username`.
#[must_use]
pub fn sign_in_form(username: &str) -> String {
    format!(
        concat!(
            "<form method=\"post\" action=\"/users/signin\">\n",
            "<p><label for=\"user\">Username:</label>\n",
            "<input id=\"user\" name=\"user\" type=\"text\" value=\"{user}\"></p>\n",
            "<p><label for=\"pw\">Password:</label>\n",
            "<input id=\"pw\" name=\"pw\" type=\"password\"></p>\n",
            "<button type=\"submit\">Sign In</button>\n",
            "</form>\n"
        ),
        user = escape_html(username),
    )
}
