//! Contact form submissions over HTTP.
//!
//! These tests cover:
//! - Request formatting (method, headers, urlencoded fields)
//! - Relative form actions
//! - Status messages for accepted, rejected and failed submissions
//! - Form locking and restoring around a submission

use std::time::Duration;

use portfolio_ui::components::{field_errors, StatusTone, SubmissionOutcome};
use portfolio_ui::config::Config;
use portfolio_ui::dom::{Document, ElementId, Selector};
use portfolio_ui::fixture::PageFixture;
use portfolio_ui::page::Page;
use portfolio_ui::transport::{FormSubmission, FormTransport, HttpTransport, TransportError};

fn contact_page(action: &str, method: &str) -> Document {
    PageFixture::parse(&format!(
        r#"
        [[element]]
        tag = "form"
        id = "contact-form"
        attributes = {{ action = "{action}", method = "{method}" }}

        [[element]]
        tag = "input"
        parent = "contact-form"
        attributes = {{ name = "name", type = "text" }}
        value = "Ada Lovelace"

        [[element]]
        tag = "input"
        parent = "contact-form"
        attributes = {{ name = "email", type = "email" }}
        value = "ada@example.com"

        [[element]]
        tag = "textarea"
        parent = "contact-form"
        attributes = {{ name = "message" }}
        value = "Hi!"

        [[element]]
        tag = "input"
        parent = "contact-form"
        attributes = {{ type = "text" }}
        value = "unnamed"

        [[element]]
        tag = "button"
        id = "send"
        parent = "contact-form"
        attributes = {{ type = "submit" }}
        text = "Send Message"

        [[element]]
        tag = "p"
        id = "form-status"
        "#
    ))
    .unwrap()
    .into_document()
    .unwrap()
}

fn find(doc: &Document, selector: &str) -> ElementId {
    doc.select(&Selector::parse(selector).unwrap()).unwrap()
}

fn init(doc: Document, transport: HttpTransport) -> Page<HttpTransport> {
    Page::init(doc, &Config::default(), transport).unwrap()
}

// === Error Body Parsing Tests ===

#[test]
fn test_field_errors_collects_messages_in_order() {
    let body = r#"{"errors":[{"message":"Email required","field":"email"},{"message":"Name too short"}]}"#;
    assert_eq!(field_errors(body), vec!["Email required", "Name too short"]);
}

#[test]
fn test_field_errors_ignores_unusable_bodies() {
    assert!(field_errors("").is_empty());
    assert!(field_errors("<html>Bad Gateway</html>").is_empty());
    assert!(field_errors(r#"{"error":"nope"}"#).is_empty());
    assert!(field_errors(r#"{"errors":"nope"}"#).is_empty());
    assert!(field_errors(r#"{"errors":[]}"#).is_empty());
}

// === Transport Tests ===

#[test]
fn test_resolve_relative_action_against_base_url() {
    let transport = HttpTransport::new()
        .unwrap()
        .with_base_url("https://portfolio.example.com/about/")
        .unwrap();
    assert_eq!(
        transport.resolve("/f/contact").unwrap().as_str(),
        "https://portfolio.example.com/f/contact"
    );
    assert_eq!(
        transport.resolve("https://formspree.io/f/x").unwrap().as_str(),
        "https://formspree.io/f/x"
    );
}

#[test]
fn test_resolve_relative_action_without_base_url_fails() {
    let transport = HttpTransport::new().unwrap();
    assert!(matches!(
        transport.resolve("/f/contact"),
        Err(TransportError::InvalidUrl(action)) if action == "/f/contact"
    ));
}

#[test]
fn test_invalid_base_url() {
    let result = HttpTransport::new().unwrap().with_base_url("not a url");
    assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_invalid_method_is_transport_error() {
    let transport = HttpTransport::new().unwrap();
    let submission = FormSubmission {
        action: "http://127.0.0.1:9/f".to_string(),
        method: "PO ST".to_string(),
        fields: Vec::new(),
    };
    assert!(matches!(
        transport.send(&submission).await,
        Err(TransportError::InvalidMethod(_))
    ));
}

// === Mock HTTP Server Tests ===

mod mock_http_tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_sends_urlencoded_fields_with_json_accept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/f/contact"))
            .and(header("Accept", "application/json"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("name=Ada+Lovelace"))
            .and(body_string_contains("email=ada%40example.com"))
            .and(body_string_contains("message=Hi%21"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new()
            .unwrap()
            .with_base_url(&mock_server.uri())
            .unwrap();
        let mut page = init(contact_page("/f/contact", "post"), transport);
        let form = find(page.document(), "#contact-form");

        let resolution = page.submit(form).await.unwrap();
        assert_eq!(resolution.outcome, SubmissionOutcome::Sent);
        assert_eq!(resolution.tone, StatusTone::Success);
    }

    #[tokio::test]
    async fn test_unnamed_fields_are_not_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, "POST"), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");
        page.submit(form).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(!body.contains("unnamed"));
        assert_eq!(body.matches('=').count(), 3);
    }

    #[tokio::test]
    async fn test_blank_method_sends_fields_as_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/f/contact"))
            .and(query_param("email", "ada@example.com"))
            .and(query_param("name", "Ada Lovelace"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, ""), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");

        let resolution = page.submit(form).await.unwrap();
        assert_eq!(resolution.outcome, SubmissionOutcome::Sent);
    }

    #[tokio::test]
    async fn test_success_resets_form_and_restores_button() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, "POST"), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");
        let send = find(page.document(), "#send");
        let status = find(page.document(), "#form-status");

        page.submit(form).await.unwrap();

        let doc = page.document();
        assert_eq!(
            doc.text(status),
            "Thanks for your message! I'll get back to you soon."
        );
        assert_eq!(doc.style(status, "color"), Some("#10b981"));
        assert_eq!(doc.text(send), "Send Message");
        assert!(!doc.element(send).disabled);
        let email = find(doc, "input[name=email]");
        assert_eq!(doc.element(email).value, "");
        let message = find(doc, "textarea");
        assert_eq!(doc.element(message).value, "");

        page.advance(Duration::from_millis(6000));
        assert_eq!(page.document().text(status), "");
    }

    #[tokio::test]
    async fn test_rejection_shows_exact_field_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"errors": [{"message": "Email required"}]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, "POST"), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");
        let status = find(page.document(), "#form-status");

        let resolution = page.submit(form).await.unwrap();
        assert_eq!(resolution.message, "Email required");
        assert_eq!(page.document().text(status), "Email required");
        assert_eq!(page.document().style(status, "color"), Some("#ef4444"));

        // Values survive a rejection.
        let email = find(page.document(), "input[name=email]");
        assert_eq!(page.document().element(email).value, "ada@example.com");
    }

    #[tokio::test]
    async fn test_rejection_joins_multiple_field_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [
                    {"message": "Email required"},
                    {"message": "Message too short"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, "POST"), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");

        let resolution = page.submit(form).await.unwrap();
        assert_eq!(resolution.message, "Email required, Message too short");
    }

    #[tokio::test]
    async fn test_server_error_without_json_uses_generic_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let action = format!("{}/f/contact", mock_server.uri());
        let mut page = init(contact_page(&action, "POST"), HttpTransport::new().unwrap());
        let form = find(page.document(), "#contact-form");

        let resolution = page.submit(form).await.unwrap();
        assert_eq!(
            resolution.outcome,
            SubmissionOutcome::Rejected {
                status: 500,
                errors: Vec::new(),
            }
        );
        assert_eq!(
            resolution.message,
            "Oops! There was a problem submitting your form."
        );
    }
}

#[tokio::test]
async fn test_unreachable_server_shows_network_message() {
    let mut page = init(
        contact_page("http://127.0.0.1:9/f/contact", "POST"),
        HttpTransport::with_timeout(Duration::from_secs(5)).unwrap(),
    );
    let form = find(page.document(), "#contact-form");
    let send = find(page.document(), "#send");

    let resolution = page.submit(form).await.unwrap();
    assert_eq!(resolution.outcome, SubmissionOutcome::Unreachable);
    assert_eq!(
        resolution.message,
        "Oops! Could not reach the server. Please check your connection and try again."
    );
    assert!(!page.document().element(send).disabled);
    assert_eq!(page.document().text(send), "Send Message");
}
