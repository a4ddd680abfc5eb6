//! Cookie-carrying client for in-process HTTP tests.
//!
//! Wraps an initialised Actix test service and replays the `session` cookie
//! the way a browser would, so flash messages and sign-in state survive
//! between requests.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use cms::Trace;
use cms::inbound::http::health::HealthState;
use cms::inbound::http::routes;
use cms::test_support::{TEST_PASSWORD, TEST_USER, TestSite, test_session_middleware};

/// Outcome of one request.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub trace_id: Option<String>,
    pub body: String,
}

pub struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

/// Fully wired application over `site`.
pub async fn open_browser(
    site: &TestSite,
) -> Browser<impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>>
{
    let state = site.http_state().expect("http state");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(test_session_middleware())
            .wrap(Trace)
            .configure(routes::configure),
    )
    .await;
    Browser { app, cookie: None }
}

impl<S, B> Browser<S>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    async fn send(&mut self, request: test::TestRequest) -> Reply {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }
        let header_text = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let status = res.status();
        let location = header_text(header::LOCATION.as_str());
        let content_type = header_text(header::CONTENT_TYPE.as_str());
        let trace_id = header_text("trace-id");
        let body = test::read_body(res).await;
        Reply {
            status,
            location,
            content_type,
            trace_id,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        self.send(test::TestRequest::get().uri(uri)).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Reply {
        self.send(test::TestRequest::post().uri(uri).set_form(form))
            .await
    }

    /// POST with no body and no content type.
    pub async fn post_empty(&mut self, uri: &str) -> Reply {
        self.send(test::TestRequest::post().uri(uri)).await
    }

    /// Sign in as the fixture user and discard the welcome message.
    pub async fn sign_in(&mut self) {
        let reply = self
            .post("/users/signin", &[("user", TEST_USER), ("pw", TEST_PASSWORD)])
            .await;
        assert_eq!(reply.status, StatusCode::FOUND, "sign-in should redirect");
        self.get("/").await;
    }

    /// Body of the index page, which also consumes the pending message.
    pub async fn index_body(&mut self) -> String {
        self.get("/").await.body
    }
}
