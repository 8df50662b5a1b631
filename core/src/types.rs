//! Identity and client-metadata DTOs for the food-product API.
//!
//! # Design
//! These types model the two external inputs the dispatcher consumes:
//! the authenticated principal (`UserSession`) and the optional application
//! metadata advertised alongside every parameterized request. Both are plain
//! data; the dispatcher never stores them between calls.

use std::collections::HashMap;

use uuid::Uuid;

/// An authenticated principal for the remote API.
///
/// Supplies the `From` header value and, for POST and multipart requests,
/// the `user_id` / `password` body fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    pub password: String,
}

impl UserSession {
    pub fn new(user_id: &str, password: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            password: password.to_string(),
        }
    }

    /// Authentication body fields merged into outgoing form requests.
    pub fn form_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            ("user_id".to_string(), self.user_id.clone()),
            ("password".to_string(), self.password.clone()),
        ])
    }
}

/// Optional metadata identifying the calling application.
///
/// Each present field is surfaced by the parameter enricher as an
/// `app_name` / `app_version` / `app_uuid` form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub instance_uuid: Option<Uuid>,
}
