//! Route handlers for the admin web interface.

pub mod contacts;
pub mod customers;
pub mod dashboard;
pub mod email_content;
pub mod health;
pub mod intake;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/", get(dashboard::dashboard_page))
        .route("/contacts", get(contacts::contacts_page))
        // Health check
        .route("/health", get(health::health))
        // Public intake
        .route("/api/contact", post(intake::submit_api))
        // API endpoints
        .route("/api/stats", get(dashboard::stats_api))
        .route("/api/contacts", get(contacts::list_api))
        .route(
            "/api/contacts/:id",
            get(contacts::get_api).delete(contacts::delete_api),
        )
        .route("/api/contacts/:id/status", put(contacts::update_status_api))
        .route(
            "/api/contacts/:id/responsible",
            put(contacts::update_responsible_api),
        )
        .route("/api/customers", get(customers::list_api))
        .route(
            "/api/email-content",
            get(email_content::get_api)
                .put(email_content::update_api)
                .delete(email_content::reset_api),
        )
        .route("/api/email-content/preview", post(email_content::preview_api))
        .route("/api/email-content/test", post(email_content::test_api))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use database::Database;
    use http_body_util::BodyExt;
    use mailer::{MockTransport, NotificationDispatcher};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    const ADMIN: &str = "admin@roving.travel";

    async fn test_app() -> (Router, Arc<MockTransport>) {
        let db = Database::in_memory().await.expect("in-memory database");
        let mock = Arc::new(MockTransport::reachable());
        let dispatcher = NotificationDispatcher::new(mock.clone(), ADMIN);
        let app = router().with_state(AppState::new(db, dispatcher));
        (app, mock)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn inquiry() -> Value {
        json!({
            "fullName": "John Smith",
            "email": "john@example.com",
            "quantity": 4,
            "date": "2025-01-10"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_intake_then_booking_creates_customer() {
        let (app, mock) = test_app().await;

        let (status, body) = call(&app, "POST", "/api/contact", Some(inquiry())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["contact"]["status"], "new");
        assert_eq!(body["notifications"]["confirmation"]["success"], true);
        assert_eq!(body["notifications"]["adminNotification"]["success"], true);
        assert_eq!(mock.sent().len(), 2);

        let id = body["contact"]["id"].as_i64().unwrap();
        let uri = format!("/api/contacts/{id}/status");

        let (status, body) = call(&app, "PUT", &uri, Some(json!({ "status": "booked" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "converted");
        assert_eq!(body["notice"]["level"], "success");
        assert_eq!(body["customer"]["source"], "contact_form");

        let (status, body) = call(&app, "GET", "/api/customers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["fullName"], "John Smith");

        let (_, stats) = call(&app, "GET", "/api/stats", None).await;
        assert_eq!(stats["contact_count"], 1);
        assert_eq!(stats["customer_count"], 1);
    }

    #[tokio::test]
    async fn test_invalid_intake_is_rejected() {
        let (app, mock) = test_app().await;

        let mut form = inquiry();
        form["email"] = json!("not-an-email");
        let (status, body) = call(&app, "POST", "/api/contact", Some(form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["level"], "error");
        assert!(mock.sent().is_empty());

        let (_, contacts) = call(&app, "GET", "/api/contacts", None).await;
        assert!(contacts.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_bodies_return_error_notice() {
        let (app, mock) = test_app().await;

        let mut form = inquiry();
        form.as_object_mut().unwrap().remove("fullName");
        let (status, body) = call(&app, "POST", "/api/contact", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["level"], "error");
        assert!(body["message"].as_str().unwrap().contains("fullName"));

        let (_, created) = call(&app, "POST", "/api/contact", Some(inquiry())).await;
        let id = created["contact"]["id"].as_i64().unwrap();
        let uri = format!("/api/contacts/{id}/status");
        let (status, body) = call(&app, "PUT", &uri, Some(json!({ "state": "booked" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["level"], "error");

        let request = json!({ "kind": "newsletter", "to": "me@example.com" });
        let (status, body) = call(&app, "POST", "/api/email-content/test", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["level"], "error");

        // Only the one valid inquiry sent mail.
        assert_eq!(mock.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_status_returns_error_notice() {
        let (app, _) = test_app().await;
        let (_, body) = call(&app, "POST", "/api/contact", Some(inquiry())).await;
        let id = body["contact"]["id"].as_i64().unwrap();

        let uri = format!("/api/contacts/{id}/status");
        let (status, body) = call(&app, "PUT", &uri, Some(json!({ "status": "invalid-value" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["level"], "error");

        let (_, contact) = call(&app, "GET", &format!("/api/contacts/{id}"), None).await;
        assert_eq!(contact["status"], "new");
    }

    #[tokio::test]
    async fn test_missing_contact_is_not_found() {
        let (app, _) = test_app().await;

        let (status, _) = call(&app, "GET", "/api/contacts/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "DELETE", "/api/contacts/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assign_responsible_and_filter() {
        let (app, _) = test_app().await;
        let (_, body) = call(&app, "POST", "/api/contact", Some(inquiry())).await;
        let id = body["contact"]["id"].as_i64().unwrap();

        let uri = format!("/api/contacts/{id}/responsible");
        let (status, body) = call(&app, "PUT", &uri, Some(json!({ "responsible": "Maria" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contact"]["responsible"], "Maria");

        let (_, new) = call(&app, "GET", "/api/contacts?status=new", None).await;
        assert_eq!(new.as_array().unwrap().len(), 1);
        let (_, booked) = call(&app, "GET", "/api/contacts?status=booked", None).await;
        assert!(booked.as_array().unwrap().is_empty());

        let (status, _) = call(&app, "GET", "/api/contacts?status=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_email_content_override_preview_and_reset() {
        let (app, _) = test_app().await;

        let update = json!({
            "kind": "confirmation",
            "content": { "subject": "See you soon, {fullName}" }
        });
        let (status, body) = call(&app, "PUT", "/api/email-content", Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "success");

        let (_, content) = call(&app, "GET", "/api/email-content", None).await;
        assert_eq!(content["confirmation"]["subject"], "See you soon, {fullName}");
        assert!(content["overrides"]["adminNotification"].is_null());

        let preview = json!({ "kind": "confirmation" });
        let (_, rendered) = call(&app, "POST", "/api/email-content/preview", Some(preview)).await;
        assert_eq!(rendered["subject"], "See you soon, John Smith");

        let (status, _) = call(&app, "DELETE", "/api/email-content?kind=confirmation", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, content) = call(&app, "GET", "/api/email-content", None).await;
        assert_eq!(
            content["confirmation"]["subject"],
            "Thank you for your inquiry, {fullName}!"
        );
    }

    #[tokio::test]
    async fn test_send_test_email() {
        let (app, mock) = test_app().await;

        let request = json!({ "kind": "adminNotification", "to": "me@example.com" });
        let (status, body) = call(&app, "POST", "/api/email-content/test", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["success"], true);
        assert_eq!(body["notice"]["level"], "success");

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.to, "me@example.com");
        assert!(sent[0].1.subject.starts_with("[Test] "));
    }

    #[tokio::test]
    async fn test_pages_render() {
        let (app, _) = test_app().await;
        call(&app, "POST", "/api/contact", Some(inquiry())).await;

        for uri in ["/", "/contacts"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
            assert!(content_type.starts_with("text/html"), "{uri}: {content_type}");

            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let page = String::from_utf8_lossy(&bytes);
            assert!(page.contains("Roving Travel"), "{uri}");
            if uri == "/contacts" {
                assert!(page.contains("John Smith"));
            }
        }
    }
}
