//! State management module
//!
//! This module holds the session state, the client stores and the
//! application context that owns them

pub mod context;
pub mod courses;
pub mod session;
pub mod store;
pub mod ui;

// Re-export commonly used state components
pub use context::AppContext;
pub use courses::{ActiveCourseStore, EnrolledCoursesStore};
pub use session::{SessionSnapshot, SessionState, SessionStatus};
pub use store::{Store, StoreState};
pub use ui::ToggleStore;
