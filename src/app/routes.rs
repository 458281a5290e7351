//! Static routes
//!
//! The exam view is mounted at `/` and `/exam`.

use crate::{ExamError, Result};

/// Known mount points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Exam,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Root, Route::Exam];

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Exam => "/exam",
        }
    }

    /// Resolve a path; a trailing slash is ignored
    pub fn resolve(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };

        Self::ALL
            .iter()
            .copied()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| ExamError::RouteNotFound(path.to_string()))
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::Root
    }
}
