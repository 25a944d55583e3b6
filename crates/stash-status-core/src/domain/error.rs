//! Error taxonomy for stash-status.
//!
//! Three disjoint failure paths exist for one publish:
//!
//! - [`PublishError::Repository`]: the local commit could not be resolved.
//!   Never retried.
//! - [`PublishError::ExhaustedRetries`]: every attempt at the host failed.
//! - [`PublishError::Output`]: the response could not be written. Reported as
//!   an ordinary error; it is not fatal in the process-exit sense.

use std::path::PathBuf;

/// Errors raised while resolving the current commit of a working copy.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("repository directory not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git rev-parse HEAD failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("git returned an invalid commit id: {0:?}")]
    InvalidCommit(String),

    #[error("repository path leaves the base directory: {0:?}")]
    OutsideBase(String),
}

/// Errors returned by a [`StatusClient`](crate::client::StatusClient).
///
/// Variants carry rendered messages so an error can be kept as the "last
/// error" of a retry loop and cloned into test scripts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("request to host failed: {0}")]
    Transport(String),

    #[error("host responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unsupported build state: {0}")]
    InvalidState(String),
}

impl ClientError {
    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Authentication and validation rejections are permanent; connection
    /// failures, throttling and server errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            ClientError::InvalidState(_) => false,
        }
    }
}

/// Errors produced while decoding the orchestrator's request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request is missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors from [`StatusPublisher::publish`](crate::publisher::StatusPublisher::publish).
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to resolve commit: {0}")]
    Repository(#[from] GitError),

    #[error("failed to set the build status after {attempts} attempts: {last_error}")]
    ExhaustedRetries { attempts: u32, last_error: ClientError },

    #[error("failed to write response: {0}")]
    Output(#[source] std::io::Error),
}

impl PublishError {
    /// Fatal errors terminate the run; the caller decides how to exit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PublishError::Repository(_) | PublishError::ExhaustedRetries { .. }
        )
    }
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_retries_reports_attempts_and_cause() {
        let err = PublishError::ExhaustedRetries {
            attempts: 3,
            last_error: ClientError::Status {
                status: 401,
                body: "Authentication failed".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("after 3 attempts"));
        assert!(msg.contains("HTTP 401"));
        assert!(msg.contains("Authentication failed"));
    }

    #[test]
    fn test_fatal_classification() {
        let local = PublishError::Repository(GitError::CommandFailed {
            stderr: "fatal: not a git repository".to_string(),
        });
        assert!(local.is_fatal());

        let exhausted = PublishError::ExhaustedRetries {
            attempts: 1,
            last_error: ClientError::Transport("connection refused".to_string()),
        };
        assert!(exhausted.is_fatal());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let output = PublishError::Output(io);
        assert!(!output.is_fatal());
    }

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Transport("timed out".to_string()).is_transient());
        assert!(ClientError::Status {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(ClientError::Status {
            status: 429,
            body: String::new()
        }
        .is_transient());
        assert!(!ClientError::Status {
            status: 401,
            body: String::new()
        }
        .is_transient());
        assert!(!ClientError::InvalidState("passed".to_string()).is_transient());
    }

    #[test]
    fn test_outside_base_is_fatal() {
        let err = PublishError::from(GitError::OutsideBase("../elsewhere".to_string()));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("../elsewhere"));
    }
}
