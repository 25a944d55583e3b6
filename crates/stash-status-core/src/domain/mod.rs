//! Domain types for publishing a build status.
//!
//! - [`wire`]: the JSON shapes exchanged with the pipeline orchestrator
//! - [`PublishRequest`]: the validated, immutable input of one publish
//! - [`CommitId`]: a resolved 40-character commit hash
//! - [`BuildStatus`]: the payload sent to the host
//! - [`PublishResult`]: the outcome reported back to the orchestrator

pub mod commit;
pub mod error;
pub mod request;
pub mod result;
pub mod status;
pub mod wire;

pub use commit::CommitId;
pub use error::{ClientError, GitError, PublishError, RequestError, Result};
pub use request::PublishRequest;
pub use result::{PublishResult, METADATA_FIELDS};
pub use status::BuildStatus;
pub use wire::{MetadataItem, Params, Request, Response, Source, Version};
