//! Code Legends client
//!
//! Main application entry point. Boots the client core, runs the session
//! guard and renders the layout once for the session given in the
//! environment (`CODE_LEGENDS_USER_ID`, `CODE_LEGENDS_ACCESS_TOKEN`,
//! `CODE_LEGENDS_REFRESH_TOKEN`, optionally `CODE_LEGENDS_EXPIRES_IN`).

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use code_legends::{
    config::Settings,
    handlers::layout::{handle_layout, LayoutResponse},
    models::{expiry_after, Session},
    state::AppContext,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", code_legends::info());

    let ctx = AppContext::new(settings).await?;

    let (events_tx, mut events_rx) = mpsc::channel(8);
    let guard_task = ctx.session_guard().spawn(events_tx);

    match session_from_env() {
        Some(session) => {
            ctx.sign_in(session);
        }
        None => {
            info!("No session in environment, rendering anonymous layout");
            ctx.session.clear();
        }
    }

    match handle_layout(&ctx).await {
        LayoutResponse::Render(data) => info!(
            user = ?data.user.as_ref().map(|u| u.id.as_str()),
            enrolled_courses = data.enrolled_courses.len(),
            active_course = ?data.active_course.as_ref().map(|c| c.slug.as_str()),
            show_top_banner = data.show_top_banner,
            "Layout rendered"
        ),
        LayoutResponse::Redirect(event) => warn!(
            user_id = %event.user_id,
            redirect_to = %event.redirect_to,
            "Session invalid, redirecting"
        ),
    }

    while let Ok(event) = events_rx.try_recv() {
        info!(user_id = %event.user_id, redirect_to = %event.redirect_to, "Sign-out event");
    }

    guard_task.abort();
    info!("Code Legends client has been shut down.");

    Ok(())
}

fn session_from_env() -> Option<Session> {
    let user_id = std::env::var("CODE_LEGENDS_USER_ID").ok()?;
    let access_token = std::env::var("CODE_LEGENDS_ACCESS_TOKEN").ok()?;
    let refresh_token = std::env::var("CODE_LEGENDS_REFRESH_TOKEN").unwrap_or_default();
    let expires_in = std::env::var("CODE_LEGENDS_EXPIRES_IN")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(900);

    Some(Session {
        user_id,
        name: None,
        email: None,
        access_token,
        refresh_token,
        access_token_expires: expiry_after(Utc::now(), expires_in),
        error: None,
    })
}
