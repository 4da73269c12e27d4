//! Top-level layout bootstrap
//!
//! Every authenticated page resolves the session and the learner's course
//! context before rendering its chrome. Enrolled courses and the active
//! course are independent reads and are fetched concurrently; a failure in
//! either degrades to an empty value instead of failing the render.

use serde::Serialize;
use tracing::debug;
use crate::middleware::auth::{require_valid_session, SignOutEvent};
use crate::models::{ActiveCourse, EnrolledCourse, Session, SessionUser};
use crate::state::{AppContext, SessionSnapshot};
use crate::utils::logging::log_api_failure;

/// Data every top-level layout renders with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub user: Option<SessionUser>,
    pub enrolled_courses: Vec<EnrolledCourse>,
    pub active_course: Option<ActiveCourse>,
    pub show_top_banner: bool,
}

impl LayoutData {
    /// Layout for a visitor without a usable session
    pub fn anonymous(show_top_banner: bool) -> Self {
        Self {
            user: None,
            enrolled_courses: Vec::new(),
            active_course: None,
            show_top_banner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutResponse {
    Render(LayoutData),
    /// The session was invalid and has been signed out
    Redirect(SignOutEvent),
}

/// Fetch enrolled courses and the active course together.
///
/// Invalid sessions short-circuit to the anonymous layout without issuing
/// any request.
pub async fn load_layout_data(ctx: &AppContext, session: &Session) -> LayoutData {
    let show_top_banner = ctx.settings.features.show_top_banner;
    if require_valid_session(session).is_err() {
        return LayoutData::anonymous(show_top_banner);
    }

    let courses = &ctx.services.course_service;
    let (enrolled, active) = tokio::join!(
        courses.enrolled_courses(session),
        courses.active_course(session)
    );

    let enrolled_courses = enrolled.unwrap_or_else(|e| {
        log_api_failure("layout_enrolled_courses", &e);
        Vec::new()
    });
    let active_course = active.unwrap_or_else(|e| {
        log_api_failure("layout_active_course", &e);
        None
    });

    LayoutData {
        user: Some(session.user()),
        enrolled_courses,
        active_course,
        show_top_banner,
    }
}

/// Seed the client stores with server-rendered layout data
pub fn hydrate_stores(ctx: &AppContext, data: &LayoutData) {
    ctx.enrolled_courses.initialize(data.enrolled_courses.clone());
    ctx.active_course.initialize(data.active_course.clone());
}

/// Resolve the session, refresh its token if due, load layout data and
/// hydrate the stores
pub async fn handle_layout(ctx: &AppContext) -> LayoutResponse {
    let show_top_banner = ctx.settings.features.show_top_banner;
    let Some(current) = ctx.session.session() else {
        debug!("Rendering layout without a session");
        ctx.reset_course_stores();
        return LayoutResponse::Render(LayoutData::anonymous(show_top_banner));
    };

    let session = ctx.services.auth_service.ensure_fresh(&current).await;
    ctx.session.set(SessionSnapshot::Authenticated(session.clone()));

    if !session.is_valid() {
        let event = match ctx.session_guard().check().await {
            Some(event) => event,
            // a running guard task already signed the session out
            None => SignOutEvent {
                user_id: session.user_id.clone(),
                redirect_to: ctx.settings.auth.login_path.clone(),
            },
        };
        return LayoutResponse::Redirect(event);
    }

    let data = load_layout_data(ctx, &session).await;
    hydrate_stores(ctx, &data);
    LayoutResponse::Render(data)
}
