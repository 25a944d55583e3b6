//! The build status payload.

use serde::{Deserialize, Serialize};

/// A labelled state attached to a commit on the host.
///
/// `date_added` is epoch milliseconds; it stays `0` unless the host reports
/// the time it recorded the status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    pub state: String,
    pub key: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_added: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_host_field_names() {
        let status = BuildStatus {
            state: "successful".to_string(),
            key: "unit".to_string(),
            name: "unit-42".to_string(),
            url: "https://ci.example.com".to_string(),
            description: "ok".to_string(),
            date_added: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["dateAdded"], 1_700_000_000_000_i64);
        assert_eq!(json["key"], "unit");
    }

    #[test]
    fn test_date_added_defaults_to_zero() {
        let status: BuildStatus = serde_json::from_str(
            r#"{"state":"FAILED","key":"k","name":"n","url":"u"}"#,
        )
        .unwrap();
        assert_eq!(status.date_added, 0);
        assert_eq!(status.description, "");
    }
}
