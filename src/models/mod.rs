//! Data models module
//!
//! This module contains the DTOs exchanged with the Code Legends REST API

pub mod certificate;
pub mod course;
pub mod request;
pub mod roadmap;
pub mod session;
pub mod tag;

// Re-export commonly used models
pub use certificate::CertificateVerification;
pub use course::{ActiveCourse, Category, Course, CourseLevel, CourseProgress, CourseSummary, EnrolledCourse, SelectActiveCourseRequest};
pub use request::{CreateRequestPayload, Request, RequestStatus, RequestType, UpdateRequestPayload};
pub use roadmap::{Group, Lesson, Module, Roadmap};
pub use session::{expiry_after, RefreshTokenRequest, Session, SessionError, SessionUser, TokenPair};
pub use tag::Tag;
