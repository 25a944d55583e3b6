//! Validated input of one publish operation.

use super::error::RequestError;
use super::wire::Request;

/// Everything the publisher needs from the orchestrator's request.
///
/// Immutable for the duration of one publish; the publisher only reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub host: String,
    pub username: String,
    pub password: String,
    pub retry_attempts: u32,
    pub skip_tls_verification: bool,
    pub fail_fast: bool,
    /// Path of the working copy, relative to the invocation's base directory.
    pub repository_path: String,
    pub desired_state: String,
    pub description: String,
}

impl TryFrom<Request> for PublishRequest {
    type Error = RequestError;

    fn try_from(req: Request) -> std::result::Result<Self, Self::Error> {
        if req.source.host.trim().is_empty() {
            return Err(RequestError::MissingField("source.host"));
        }
        if req.params.state.trim().is_empty() {
            return Err(RequestError::MissingField("params.state"));
        }
        if req.params.commit.is_some() {
            tracing::debug!("params.commit is ignored; commit is resolved from the repository");
        }

        Ok(PublishRequest {
            host: req.source.host,
            username: req.source.username,
            password: req.source.password,
            retry_attempts: req.source.retry_attempts,
            skip_tls_verification: req.source.skip_ssl_verification,
            fail_fast: req.source.fail_fast,
            repository_path: req.params.repository,
            desired_state: req.params.state,
            description: req.params.description,
        })
    }
}

impl std::fmt::Debug for PublishRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishRequest")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("retry_attempts", &self.retry_attempts)
            .field("skip_tls_verification", &self.skip_tls_verification)
            .field("fail_fast", &self.fail_fast)
            .field("repository_path", &self.repository_path)
            .field("desired_state", &self.desired_state)
            .field("description", &self.description)
            .finish()
    }
}
