//! JSON shapes exchanged with the pipeline orchestrator.
//!
//! The request arrives on stdin and the response leaves on stdout. Field
//! names follow the resource's public configuration keys and must not change.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::error::RequestError;

/// Resource-level configuration (`source:` in the pipeline).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Source {
    pub host: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Additional attempts after the first one fails.
    #[serde(default)]
    pub retry_attempts: u32,
    #[serde(default)]
    pub skip_ssl_verification: bool,
    /// Stop retrying as soon as the host rejects the call permanently.
    #[serde(default)]
    pub fail_fast: bool,
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("retry_attempts", &self.retry_attempts)
            .field("skip_ssl_verification", &self.skip_ssl_verification)
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    #[serde(rename = "ref", default)]
    pub reference: String,
}

/// Step-level parameters (`params:` on the `put` step).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Params {
    /// Working copy under the base directory; empty means the base itself.
    #[serde(default)]
    pub repository: String,
    /// Accepted for configuration compatibility; the commit is always
    /// resolved from the working copy.
    #[serde(default)]
    pub commit: Option<String>,
    pub state: String,
    #[serde(default)]
    pub description: String,
}

/// The full request document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
    pub params: Params,
}

impl Request {
    /// Decode a request document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, RequestError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub name: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The response document written on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub version: Version,
    pub metadata: Vec<MetadataItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_request() {
        let raw = r#"{
            "source": {
                "host": "https://stash.example.com",
                "username": "ci",
                "password": "hunter2",
                "retry_attempts": 2,
                "skip_ssl_verification": true
            },
            "version": {"ref": "deadbeef"},
            "params": {
                "repository": "repo",
                "commit": "ignored",
                "state": "successful",
                "description": "build passed"
            }
        }"#;

        let req = Request::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(req.source.host, "https://stash.example.com");
        assert_eq!(req.source.retry_attempts, 2);
        assert!(req.source.skip_ssl_verification);
        assert!(!req.source.fail_fast);
        assert_eq!(req.version.unwrap().reference, "deadbeef");
        assert_eq!(req.params.repository, "repo");
        assert_eq!(req.params.state, "successful");
    }

    #[test]
    fn test_decode_applies_defaults() {
        let raw = r#"{
            "source": {"host": "https://stash.example.com"},
            "params": {"repository": "repo", "state": "failed"}
        }"#;

        let req = Request::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(req.source.retry_attempts, 0);
        assert!(!req.source.skip_ssl_verification);
        assert!(req.version.is_none());
        assert_eq!(req.params.description, "");
        assert!(req.params.commit.is_none());
    }

    #[test]
    fn test_missing_repository_defaults_to_base() {
        let raw = r#"{"source": {"host": "h"}, "params": {"state": "failed"}}"#;
        let req = Request::from_reader(raw.as_bytes()).unwrap();
        assert_eq!(req.params.repository, "");
    }

    #[test]
    fn test_negative_retry_attempts_rejected() {
        let raw = r#"{
            "source": {"host": "h", "retry_attempts": -1},
            "params": {"repository": "repo", "state": "failed"}
        }"#;
        assert!(matches!(
            Request::from_reader(raw.as_bytes()),
            Err(RequestError::Decode(_))
        ));
    }

    #[test]
    fn test_source_debug_redacts_password() {
        let source = Source {
            host: "h".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let rendered = format!("{source:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_response_uses_ref_key() {
        let resp = Response {
            version: Version {
                reference: "abc".to_string(),
            },
            metadata: vec![MetadataItem::new("commit", "abc")],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["version"]["ref"], "abc");
        assert_eq!(json["metadata"][0]["name"], "commit");
    }
}
