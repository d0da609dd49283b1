pub mod client;

pub use client::{CourseId, SessionClient, SessionError, SessionInfo};
