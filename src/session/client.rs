use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Key of a course's store document, e.g. `FN-TIT24`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseId {
    faculty: String,
    course: String,
}

impl CourseId {
    pub fn new(faculty: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            faculty: faculty.into(),
            course: course.into(),
        }
    }

    /// Parses the `FACULTY-COURSE` form used on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        let (faculty, course) = s.split_once('-')?;
        if faculty.is_empty() || course.is_empty() {
            return None;
        }
        Some(Self::new(faculty, course))
    }

    pub fn faculty(&self) -> &str {
        &self.faculty
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.faculty, self.course)
    }
}

/// Payload of the dashboard server's `/api/session` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

impl SessionInfo {
    /// The course document key, present only for an authenticated session
    /// that carries both faculty and course.
    pub fn course_id(&self) -> Option<CourseId> {
        if !self.authenticated {
            return None;
        }
        match (&self.faculty, &self.course) {
            (Some(faculty), Some(course)) => Some(CourseId::new(faculty, course)),
            _ => None,
        }
    }
}

pub struct SessionClient {
    base_url: String,
    client: reqwest::Client,
}

impl SessionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch(&self) -> Result<SessionInfo, SessionError> {
        let url = format!("{}/api/session", self.base_url.trim_end_matches('/'));
        let info = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info)
    }

    /// Resolves the current course, or None when the session is missing,
    /// unauthenticated or incomplete. Callers render the no-data placeholder
    /// in that case instead of failing.
    pub async fn course_id(&self) -> Option<CourseId> {
        match self.fetch().await {
            Ok(info) => info.course_id(),
            Err(e) => {
                tracing::debug!("session fetch failed: {e}");
                None
            }
        }
    }
}
