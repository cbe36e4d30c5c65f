//! HTTP response bodies.

use serde::Serialize;

use crate::{Excuse, Meta, Page};

/// A list of excuses, with pagination metadata when the list is a page.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub excuses: Vec<Excuse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl From<Page> for ListResponse {
    fn from(page: Page) -> Self {
        Self {
            excuses: page.excuses,
            meta: Some(page.meta),
        }
    }
}

impl From<Vec<Excuse>> for ListResponse {
    fn from(excuses: Vec<Excuse>) -> Self {
        Self {
            excuses,
            meta: None,
        }
    }
}

/// A bare `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new("ok")
    }
}

/// Body returned after a successful add.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

impl CreatedResponse {
    pub fn new(id: String) -> Self {
        Self {
            message: "ok".to_string(),
            id,
        }
    }
}

/// Body returned when required fields are missing.
///
/// `message` is a human-readable bullet list; `errors` carries the same
/// violations in machine-readable form.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub message: String,
    pub errors: Vec<String>,
}

impl ValidationResponse {
    pub fn new(errors: Vec<String>) -> Self {
        let bullets: Vec<String> = errors.iter().map(|e| format!("\t→ {}", e)).collect();
        Self {
            message: format!("invalid arguments:\n{}", bullets.join("\n")),
            errors,
        }
    }
}

/// Body of the health probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub environment: String,
    pub status: &'static str,
}

impl HealthResponse {
    pub fn healthy(environment: &str) -> Self {
        Self {
            service: "api",
            environment: environment.to_string(),
            status: "healthy",
        }
    }
}
