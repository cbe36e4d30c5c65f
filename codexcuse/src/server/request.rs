//! HTTP request types for the excuse server.

use serde::Deserialize;

use crate::{Error, Excuse, User};

/// Message returned when `page` is not a positive integer.
pub(super) const INVALID_PAGE_MESSAGE: &str = "Page must be an integer greater than 0.";

/// Query parameters of the list route.
///
/// Kept as raw strings so that a malformed `page` is reported with the
/// service's own message instead of a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub random: Option<String>,
    pub user: Option<String>,
}

/// What a list request asks for. `random` wins over `user`, which wins over
/// paging.
#[derive(Debug, PartialEq, Eq)]
pub enum ListQuery {
    Random,
    ByUser(String),
    Page(u64),
}

impl ListParams {
    pub fn query(self) -> Result<ListQuery, Error> {
        if self.random.as_deref().is_some_and(|r| !r.is_empty()) {
            return Ok(ListQuery::Random);
        }
        if let Some(user) = self.user.filter(|u| !u.is_empty()) {
            return Ok(ListQuery::ByUser(user));
        }
        let page = match self.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| Error::InvalidInput(INVALID_PAGE_MESSAGE.to_string()))?,
        };
        Ok(ListQuery::Page(page))
    }
}

/// Body of an add request. Every field may be absent so that all missing
/// fields can be reported at once.
#[derive(Debug, Default, Deserialize)]
pub struct AddExcuseRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<UserRequest>,
    pub reporter: Option<UserRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    pub id: Option<String>,
    pub username: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl AddExcuseRequest {
    /// Parses and validates a JSON body.
    ///
    /// A body that does not decode is validated as an empty request, so it
    /// fails with every field reported missing.
    pub fn from_body(body: &[u8]) -> Result<Excuse, Error> {
        let request = serde_json::from_slice::<AddExcuseRequest>(body).unwrap_or_else(|e| {
            tracing::debug!("undecodable add request body: {}", e);
            AddExcuseRequest::default()
        });
        request.validate()
    }

    /// Checks required fields, collecting every violation.
    ///
    /// The author needs a username; the reporter needs both id and username.
    pub fn validate(self) -> Result<Excuse, Error> {
        let mut errors = Vec::new();
        if !self.author.as_ref().is_some_and(|a| present(&a.username)) {
            errors.push("missing author field".to_string());
        }
        if !self
            .reporter
            .as_ref()
            .is_some_and(|r| present(&r.username) && present(&r.id))
        {
            errors.push("missing reporter field".to_string());
        }
        if !present(&self.content) {
            errors.push("missing content field".to_string());
        }
        if !present(&self.title) {
            errors.push("missing title field".to_string());
        }
        if !errors.is_empty() {
            return Err(Error::ValidationFailed(errors));
        }

        Ok(Excuse::new(
            self.title.unwrap_or_default(),
            self.content.unwrap_or_default(),
            self.author.map(UserRequest::into_user).unwrap_or_default(),
            self.reporter.map(UserRequest::into_user).unwrap_or_default(),
        ))
    }
}

impl UserRequest {
    fn into_user(self) -> User {
        User::new(
            self.id.unwrap_or_default(),
            self.username.unwrap_or_default(),
        )
    }
}
