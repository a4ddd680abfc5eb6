//! End-to-end HTTP tests for document browsing, editing and sign-in.
//!
//! Each test gets a fresh temporary store root and credential table, and
//! drives the fully wired application in-process.

#[path = "support/browser.rs"]
mod browser;

use actix_web::http::StatusCode;
use browser::open_browser;
use cms::test_support::TestSite;
use rstest::{fixture, rstest};

#[fixture]
fn site() -> TestSite {
    TestSite::new().expect("test site")
}

fn assert_redirect_home(reply: &browser::Reply) {
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/"));
}

#[rstest]
#[actix_web::test]
async fn index_lists_every_document(site: TestSite) {
    site.write_document("about.md", b"").expect("write");
    site.write_document("changes.txt", b"").expect("write");
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(
        reply
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/html"))
    );
    assert!(reply.body.contains("about.md"));
    assert!(reply.body.contains("changes.txt"));
    assert!(reply.trace_id.is_some());
}

#[rstest]
#[actix_web::test]
async fn text_documents_are_served_verbatim(site: TestSite) {
    site.write_document("history.txt", b"1993 - Yukihiro Matsumoto dreams up Ruby.")
        .expect("write");
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/history.txt").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("text/plain"));
    assert_eq!(reply.body, "1993 - Yukihiro Matsumoto dreams up Ruby.");
}

#[rstest]
#[actix_web::test]
async fn markdown_documents_are_rendered(site: TestSite) {
    site.write_document("about.md", b"# Ruby is...\n\nA **dynamic** language.")
        .expect("write");
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/about.md").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(
        reply
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/html"))
    );
    assert!(reply.body.contains("<h1>Ruby is...</h1>"));
    assert!(reply.body.contains("<strong>dynamic</strong>"));
}

#[rstest]
#[actix_web::test]
async fn missing_document_redirects_with_message_shown_once(site: TestSite) {
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/notafile.ext").await;
    assert_redirect_home(&reply);

    assert!(browser.index_body().await.contains("notafile.ext does not exist."));
    assert!(!browser.index_body().await.contains("notafile.ext does not exist."));
}

#[rstest]
#[actix_web::test]
async fn index_lists_names_in_sorted_order(site: TestSite) {
    for name in ["zebra.txt", "apple.md", "mango.txt"] {
        site.write_document(name, b"").expect("write");
    }
    let mut browser = open_browser(&site).await;

    let body = browser.index_body().await;

    let position = |name: &str| body.find(name).expect("listed");
    assert!(position("apple.md") < position("mango.txt"));
    assert!(position("mango.txt") < position("zebra.txt"));
}

#[rstest]
#[actix_web::test]
async fn very_long_missing_name_still_redirects(site: TestSite) {
    let mut browser = open_browser(&site).await;
    let name = "x".repeat(5000);

    let reply = browser.get(&format!("/{name}")).await;
    assert_redirect_home(&reply);

    let index = browser.index_body().await;
    assert!(index.contains(&format!("{}... does not exist.", &name[..255])));
    assert!(!index.contains(&name[..256]));
}

#[rstest]
#[actix_web::test]
async fn unsafe_names_do_not_exist(site: TestSite) {
    site.write_document(".hidden", b"secret").expect("write");
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/.hidden").await;

    assert_redirect_home(&reply);
    assert!(browser.index_body().await.contains(".hidden does not exist."));
}

#[rstest]
#[actix_web::test]
async fn edit_form_shows_current_content(site: TestSite) {
    site.write_document("changes.txt", b"old <content>").expect("write");
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.get("/changes.txt/edit").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<textarea"));
    assert!(reply.body.contains("old &lt;content&gt;</textarea>"));
    assert!(reply.body.contains(r#"<button type="submit""#));
}

#[rstest]
#[actix_web::test]
async fn editing_a_missing_document_redirects(site: TestSite) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.get("/ghost.txt/edit").await;

    assert_redirect_home(&reply);
    assert!(browser.index_body().await.contains("ghost.txt does not exist."));
}

#[rstest]
#[actix_web::test]
async fn saving_replaces_content(site: TestSite) {
    site.write_document("changes.txt", b"old").expect("write");
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser
        .post("/changes.txt/save", &[("new_txt", "new content")])
        .await;

    assert_redirect_home(&reply);
    assert!(browser.index_body().await.contains("changes.txt has been updated."));
    assert_eq!(browser.get("/changes.txt").await.body, "new content");
}

#[rstest]
#[actix_web::test]
async fn new_document_form_is_shown(site: TestSite) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.get("/new").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Add a new document:"));
    assert!(reply.body.contains("<input"));
    assert!(reply.body.contains(r#"<button type="submit""#));
}

#[rstest]
#[actix_web::test]
async fn creating_a_document_defaults_to_txt(site: TestSite) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post("/new", &[("doc_name", "  test  ")]).await;

    assert_redirect_home(&reply);
    let index = browser.index_body().await;
    assert!(index.contains("test.txt has been created."));
    assert!(index.contains(r#"href="/test.txt""#));
    assert_eq!(site.read_document("test.txt").expect("created"), b"");
}

#[rstest]
#[actix_web::test]
async fn creating_an_existing_document_truncates_it(site: TestSite) {
    site.write_document("notes.md", b"# keep?").expect("write");
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    browser.post("/new", &[("doc_name", "notes.md")]).await;

    assert_eq!(site.read_document("notes.md").expect("exists"), b"");
}

#[rstest]
#[actix_web::test]
#[case("", "Document must have a name.")]
#[case("   ", "Document must have a name.")]
#[case("../escape", "Document name is invalid.")]
async fn invalid_names_redisplay_the_form(
    site: TestSite,
    #[case] doc_name: &str,
    #[case] message: &str,
) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post("/new", &[("doc_name", doc_name)]).await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains(message));
    assert!(reply.body.contains("Add a new document:"));
}

#[rstest]
#[actix_web::test]
async fn deleting_removes_the_document(site: TestSite) {
    site.write_document("test.txt", b"").expect("write");
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post("/test.txt/delete", &[]).await;

    assert_redirect_home(&reply);
    let index = browser.index_body().await;
    assert!(index.contains("test.txt has been deleted."));
    assert!(!index.contains(r#"href="/test.txt""#));
    assert!(!site.has_document("test.txt"));
}

#[rstest]
#[actix_web::test]
async fn deleting_a_missing_document_reports_it(site: TestSite) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post("/ghost.txt/delete", &[]).await;

    assert_redirect_home(&reply);
    assert!(browser.index_body().await.contains("ghost.txt does not exist."));
}

#[rstest]
#[actix_web::test]
#[case::new_form("GET", "/new", &[])]
#[case::create("POST", "/new", &[("doc_name", "sneaky")])]
#[case::edit("GET", "/changes.txt/edit", &[])]
#[case::save("POST", "/changes.txt/save", &[("new_txt", "vandalised")])]
#[case::delete("POST", "/changes.txt/delete", &[])]
async fn mutating_routes_require_sign_in(
    site: TestSite,
    #[case] method: &str,
    #[case] uri: &str,
    #[case] form: &[(&str, &str)],
) {
    site.write_document("changes.txt", b"original").expect("write");
    let mut browser = open_browser(&site).await;

    let reply = if method == "GET" {
        browser.get(uri).await
    } else {
        browser.post(uri, form).await
    };

    assert_redirect_home(&reply);
    assert!(
        browser
            .index_body()
            .await
            .contains("You must be signed in to do that.")
    );
    assert_eq!(site.read_document("changes.txt").expect("kept"), b"original");
    assert!(!site.has_document("sneaky.txt"));
}

#[rstest]
#[actix_web::test]
#[case::create("/new")]
#[case::save("/changes.txt/save")]
async fn bodyless_posts_redirect_when_signed_out(site: TestSite, #[case] uri: &str) {
    site.write_document("changes.txt", b"original").expect("write");
    let mut browser = open_browser(&site).await;

    let reply = browser.post_empty(uri).await;

    assert_redirect_home(&reply);
    assert!(
        browser
            .index_body()
            .await
            .contains("You must be signed in to do that.")
    );
    assert_eq!(site.read_document("changes.txt").expect("kept"), b"original");
}

#[rstest]
#[actix_web::test]
#[case::create("/new")]
#[case::save("/changes.txt/save")]
async fn bodyless_posts_are_bad_requests_when_signed_in(site: TestSite, #[case] uri: &str) {
    site.write_document("changes.txt", b"original").expect("write");
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post_empty(uri).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(site.read_document("changes.txt").expect("kept"), b"original");
}

#[rstest]
#[actix_web::test]
async fn sign_in_form_is_shown(site: TestSite) {
    let mut browser = open_browser(&site).await;

    let reply = browser.get("/users/signin").await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Username:"));
    assert!(reply.body.contains(r#"<button type="submit""#));
}

#[rstest]
#[actix_web::test]
async fn signing_in_welcomes_the_user(site: TestSite) {
    let mut browser = open_browser(&site).await;

    let reply = browser
        .post("/users/signin", &[("user", "admin"), ("pw", "secret")])
        .await;

    assert_redirect_home(&reply);
    let index = browser.index_body().await;
    assert!(index.contains("Welcome!"));
    assert!(index.contains("Signed in as admin."));
}

#[rstest]
#[actix_web::test]
#[case::wrong_password("admin", "wrongpw")]
#[case::unknown_user("rudeboy", "secret")]
async fn bad_credentials_redisplay_the_form(
    site: TestSite,
    #[case] user: &str,
    #[case] pw: &str,
) {
    let mut browser = open_browser(&site).await;

    let reply = browser
        .post("/users/signin", &[("user", user), ("pw", pw)])
        .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Invalid username or password."));
    assert!(reply.body.contains(&format!(r#"value="{user}""#)));
    assert!(!browser.index_body().await.contains("Signed in as"));
}

#[rstest]
#[actix_web::test]
async fn signing_out_forgets_the_user(site: TestSite) {
    let mut browser = open_browser(&site).await;
    browser.sign_in().await;

    let reply = browser.post("/users/signout", &[]).await;

    assert_redirect_home(&reply);
    let index = browser.index_body().await;
    assert!(index.contains("You have been signed out."));
    assert!(!index.contains("Signed in as"));
    assert!(index.contains(r#"href="/users/signin""#));
}

#[rstest]
#[actix_web::test]
async fn health_probes_are_not_documents(site: TestSite) {
    let mut browser = open_browser(&site).await;

    let live = browser.get("/health/live").await;

    assert_eq!(live.status, StatusCode::OK);
    assert!(live.location.is_none());
}
