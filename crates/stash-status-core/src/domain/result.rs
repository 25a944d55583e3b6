//! Outcome of a successful publish.

use super::commit::CommitId;
use super::status::BuildStatus;
use super::wire::{MetadataItem, Response, Version};

/// Metadata entry names, in the order downstream consumers expect them.
pub const METADATA_FIELDS: [&str; 7] = [
    "commit",
    "date_added",
    "description",
    "key",
    "name",
    "state",
    "url",
];

/// The resolved commit together with the status the host accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub commit: CommitId,
    pub status: BuildStatus,
}

impl PublishResult {
    pub fn new(commit: CommitId, status: BuildStatus) -> Self {
        Self { commit, status }
    }

    /// Ordered `(name, value)` pairs; always exactly seven entries.
    pub fn metadata(&self) -> Vec<MetadataItem> {
        let s = &self.status;
        let values = [
            self.commit.to_string(),
            s.date_added.to_string(),
            s.description.clone(),
            s.key.clone(),
            s.name.clone(),
            s.state.clone(),
            s.url.clone(),
        ];
        METADATA_FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| MetadataItem::new(*name, value))
            .collect()
    }

    pub fn to_response(&self) -> Response {
        Response {
            version: Version {
                reference: self.commit.to_string(),
            },
            metadata: self.metadata(),
        }
    }
}
