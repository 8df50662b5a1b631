//! Client configuration: user-agent identity, environment default, and
//! application metadata.

use crate::types::AppMetadata;

/// Deployment of the remote API a request is aimed at.
///
/// `Test` targets the staging deployment, which sits behind a fixed Basic
/// auth credential; `Production` does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Production,
    Test,
}

/// Construction-time configuration for [`crate::ApiClient`].
///
/// A per-call environment argument, when given, takes precedence over
/// `environment`; the other fields apply to every request the client sends.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Value of the outgoing `User-Agent` header. A fixed default is used
    /// when unset.
    pub user_agent: Option<String>,

    /// Environment used when a dispatch call does not name one explicitly.
    pub environment: Environment,

    /// Application metadata surfaced as `app_*` form fields.
    pub app_metadata: Option<AppMetadata>,
}
