//! Hub (admin) handlers
//!
//! Moderation requests and tags. Responding to a request may set any status,
//! including moving a request back to `Pending`.

use tracing::info;
use crate::models::{CreateRequestPayload, Request, RequestStatus, RequestType, Session, Tag, UpdateRequestPayload};
use crate::state::AppContext;
use crate::utils::errors::ActionResult;
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::log_api_failure;

pub async fn handle_request_list(ctx: &AppContext, session: &Session, status: Option<RequestStatus>) -> Vec<Request> {
    ctx.services
        .request_service
        .list(session, status)
        .await
        .unwrap_or_else(|e| {
            log_api_failure("request_list", &e);
            Vec::new()
        })
}

pub async fn handle_request_detail(ctx: &AppContext, session: &Session, request_id: &str) -> Option<Request> {
    match ctx.services.request_service.get(session, request_id).await {
        Ok(request) => request,
        Err(e) => {
            log_api_failure("request_detail", &e);
            None
        }
    }
}

/// Learner-side: raise a new request
pub async fn handle_create_request(
    ctx: &AppContext,
    session: &Session,
    request_type: RequestType,
    message: &str,
) -> ActionResult {
    if !request_type.is_submittable() {
        return ActionResult::failed("Choose a request type");
    }

    let message = normalize_whitespace(message);
    if message.is_empty() {
        return ActionResult::failed("Message is required");
    }

    let payload = CreateRequestPayload { request_type, message };
    let result = ctx.services.request_service.create(session, &payload).await;
    if let Err(e) = &result {
        log_api_failure("create_request", e);
    }
    ActionResult::from_api(&result, "Request sent")
}

/// Admin-side: set a request's status, optionally with a reply.
/// A blank reply is sent as no reply.
pub async fn handle_request_response(
    ctx: &AppContext,
    session: &Session,
    request_id: &str,
    status: RequestStatus,
    response: Option<&str>,
) -> ActionResult {
    let response = response
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let payload = UpdateRequestPayload {
        status,
        response,
        responded_by: Some(session.user_id.clone()),
    };

    let result = ctx.services.request_service.update(session, request_id, &payload).await;
    match &result {
        Ok(request) => info!(
            request_id = %request.id,
            status = %request.status,
            admin_id = %session.user_id,
            "Request answered"
        ),
        Err(e) => log_api_failure("respond_to_request", e),
    }
    ActionResult::from_api(&result, &format!("Request marked as {}", status))
}

pub async fn handle_tag_list(ctx: &AppContext) -> Vec<Tag> {
    ctx.services.tag_service.list().await.unwrap_or_else(|e| {
        log_api_failure("tag_list", &e);
        Vec::new()
    })
}
