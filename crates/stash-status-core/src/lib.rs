//! stash-status core library
//!
//! Reports a build's state to a Stash (Bitbucket Server) host for the commit
//! the build ran against:
//!
//! 1. resolve the working copy's HEAD commit ([`git::resolve_head`])
//! 2. assemble a [`BuildStatus`] from the request and the [`BuildEnv`]
//! 3. push it through a [`StatusClient`] with bounded, fixed-delay retries
//! 4. write the [`Response`] document for the orchestrator
//!
//! The HTTP implementation of [`StatusClient`] lives in the `stash-client`
//! crate.

pub mod build_env;
pub mod client;
pub mod domain;
pub mod fakes;
pub mod git;
pub mod publisher;
pub mod telemetry;

pub use build_env::{BuildEnv, DEFAULT_TEAM};
pub use client::StatusClient;
pub use domain::{
    BuildStatus, ClientError, CommitId, GitError, MetadataItem, PublishError, PublishRequest,
    PublishResult, Request, RequestError, Response, Result, METADATA_FIELDS,
};
pub use git::resolve_head;
pub use publisher::{emit, set_with_retry, RetryPolicy, StatusPublisher, DEFAULT_RETRY_DELAY};
pub use telemetry::init_tracing;
