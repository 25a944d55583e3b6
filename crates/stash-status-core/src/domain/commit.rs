//! Resolved commit identifier.

use serde::{Deserialize, Serialize};

use super::error::GitError;

/// Length of a full SHA-1 commit hash in hex.
pub const COMMIT_ID_LEN: usize = 40;

/// A full 40-character hexadecimal commit hash.
///
/// The inner field is private so a `CommitId` is always well formed; build one
/// through `TryFrom<String>` or by resolving a working copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Return the full hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 12 hex chars) for log fields.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl TryFrom<String> for CommitId {
    type Error = GitError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        if s.len() != COMMIT_ID_LEN || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitError::InvalidCommit(s));
        }
        Ok(CommitId(s))
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_full_hash() {
        let id = CommitId::try_from("abc123".repeat(6) + "abcd").unwrap();
        assert_eq!(id.as_str().len(), COMMIT_ID_LEN);
        assert_eq!(id.short(), "abc123abc123");
    }

    #[test]
    fn test_rejects_short_or_non_hex() {
        assert!(CommitId::try_from("abc123".to_string()).is_err());
        assert!(CommitId::try_from("z".repeat(40)).is_err());
        assert!(CommitId::try_from(format!("{}\n", "a".repeat(40))).is_err());
    }
}
