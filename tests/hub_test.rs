//! Hub, catalog and certificate handler tests

mod helpers;

use assert_matches::assert_matches;
use code_legends::handlers::catalog::{handle_category_listing, handle_course_page, handle_search, handle_select_active_course};
use code_legends::handlers::certificates::{handle_certificate_verification, CertificateView};
use code_legends::handlers::hub::{handle_create_request, handle_request_list, handle_request_response, handle_tag_list};
use code_legends::models::{RequestStatus, RequestType};
use helpers::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_request_can_move_back_to_pending() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/requests/req_1"))
        .and(body_json(json!({ "status": "PENDING", "respondedBy": TEST_USER_ID })))
        .respond_with(ResponseTemplate::new(200).set_body_json(request_json("req_1", "PENDING")))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let result = handle_request_response(
        &ctx.app,
        &test_session(),
        "req_1",
        RequestStatus::Pending,
        Some("   "),
    )
    .await;

    assert!(result.success);
    assert_eq!(result.message, "Request marked as PENDING");
}

#[tokio::test]
async fn test_request_response_sends_reply() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/requests/req_2"))
        .and(body_json(json!({
            "status": "APPROVED",
            "response": "Access granted",
            "respondedBy": TEST_USER_ID
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(request_json("req_2", "APPROVED")))
        .expect(1)
        .mount(&ctx.api.server)
        .await;

    let result = handle_request_response(
        &ctx.app,
        &test_session(),
        "req_2",
        RequestStatus::Approved,
        Some(" Access granted "),
    )
    .await;

    assert!(result.success);
}

#[tokio::test]
async fn test_request_response_failure_is_reported() {
    let ctx = TestContext::new().await;
    ctx.api
        .mock_authenticated("PUT", "/requests/req_3", MockResponseConfig::error(404, "Request not found"))
        .await;

    let result = handle_request_response(&ctx.app, &test_session(), "req_3", RequestStatus::Rejected, None).await;

    assert!(!result.success);
    assert!(result.message.contains("not found"));
}

#[tokio::test]
async fn test_create_request_requires_message() {
    let ctx = TestContext::new().await;

    let result = handle_create_request(&ctx.app, &test_session(), RequestType::CourseAccess, "  \n ").await;

    assert!(!result.success);
    assert_eq!(ctx.api.requests_to("/requests").await, 0);
}

#[tokio::test]
async fn test_create_request_rejects_unknown_type() {
    let ctx = TestContext::new().await;

    let result = handle_create_request(&ctx.app, &test_session(), RequestType::Other, "Hello").await;

    assert!(!result.success);
    assert_eq!(ctx.api.requests_to("/requests").await, 0);
}

#[tokio::test]
async fn test_request_list_degrades_on_failure() {
    let ctx = TestContext::new().await;
    ctx.api
        .mock_authenticated("GET", "/requests", MockResponseConfig::error(500, "boom"))
        .await;

    assert!(handle_request_list(&ctx.app, &test_session(), None).await.is_empty());
}

#[tokio::test]
async fn test_tag_list() {
    let ctx = TestContext::new().await;
    ctx.api.mock_public("GET", "/tags", MockResponseConfig::ok(tags_json())).await;

    let tags = handle_tag_list(&ctx.app).await;
    assert_eq!(tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(), vec!["systems", "web"]);
}

#[tokio::test]
async fn test_catalog_degrades_and_missing_course_is_none() {
    let ctx = TestContext::new().await;
    ctx.api
        .mock_public("GET", "/courses", MockResponseConfig::error(500, "boom"))
        .await;
    ctx.api
        .mock_public("GET", "/courses/unknown", MockResponseConfig::status(404))
        .await;

    assert!(handle_category_listing(&ctx.app, Some("systems")).await.is_empty());
    assert!(handle_course_page(&ctx.app, "unknown").await.is_none());
    assert!(handle_search(&ctx.app, "").await.is_empty());
}

#[tokio::test]
async fn test_select_active_course_updates_store() {
    let ctx = TestContext::new().await;
    Mock::given(method("PUT"))
        .and(path("/users/me/active-course"))
        .and(body_json(json!({ "courseId": "course_1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(active_course_json()))
        .mount(&ctx.api.server)
        .await;

    let result = handle_select_active_course(&ctx.app, &test_session(), "course_1").await;

    assert!(result.success);
    assert_eq!(
        ctx.app.active_course.active_course().map(|c| c.slug),
        Some(COURSE_SLUG.to_string())
    );
}

#[tokio::test]
async fn test_certificate_verification_views() {
    let ctx = TestContext::new().await;
    ctx.api
        .mock_public("GET", "/certificates/verify/cert_ok", MockResponseConfig::ok(certificate_json("cert_ok", true)))
        .await;
    ctx.api
        .mock_public("GET", "/certificates/verify/cert_old", MockResponseConfig::ok(certificate_json("cert_old", false)))
        .await;
    ctx.api
        .mock_public("GET", "/certificates/verify/cert_down", MockResponseConfig::error(503, "down"))
        .await;

    let verified = handle_certificate_verification(&ctx.app, "cert_ok").await;
    assert_matches!(&verified, CertificateView::Verified(cert) if cert.student_name == "Ada Lovelace");
    assert_eq!(
        verified.headline(),
        "Ada Lovelace completed Rust Fundamentals on 2025-02-01 12:00:00 UTC"
    );

    assert_matches!(handle_certificate_verification(&ctx.app, "cert_old").await, CertificateView::Revoked(_));
    assert_eq!(handle_certificate_verification(&ctx.app, "cert_missing").await, CertificateView::NotFound);
    assert_eq!(handle_certificate_verification(&ctx.app, "cert_down").await, CertificateView::Unavailable);
    assert_eq!(handle_certificate_verification(&ctx.app, "  ").await, CertificateView::NotFound);
}
