//! Core data types: excuses, the users embedded in them, and pagination
//! metadata.

use serde::{Deserialize, Serialize};

/// A user reference embedded in an excuse. Not stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// An excuse record.
///
/// `id` is assigned by [`ExcuseStore::add`](crate::ExcuseStore::add); any
/// value present on input is overwritten. Records are never updated in
/// place.
///
/// The serialized form is the stored form as well as the API form:
///
/// ```text
/// {"id":"…","title":"…","author":{"id":"…","username":"…"},
///  "reporter":{"id":"…","username":"…"},"content":"…"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excuse {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub author: User,
    pub reporter: User,
    pub content: String,
}

impl Excuse {
    /// Creates an excuse without an id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: User,
        reporter: User,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            author,
            reporter,
            content: content.into(),
        }
    }
}

/// A page of excuses with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub excuses: Vec<Excuse>,
    pub meta: Meta,
}

/// Pagination metadata. See [`Meta::compute`](crate::meta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub current_page: u64,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
    pub total_pages: u64,
    pub total_count: u64,
}
