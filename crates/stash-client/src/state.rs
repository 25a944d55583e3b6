//! Build states understood by the host.

use std::str::FromStr;

use stash_status_core::ClientError;

/// The host's build-state vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Successful,
    Failed,
    InProgress,
}

impl HostState {
    /// Wire form expected by the build-status endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostState::Successful => "SUCCESSFUL",
            HostState::Failed => "FAILED",
            HostState::InProgress => "INPROGRESS",
        }
    }
}

impl FromStr for HostState {
    type Err = ClientError;

    /// Case-insensitive; `in-progress`, `in_progress` and `inprogress` are
    /// all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "successful" => Ok(HostState::Successful),
            "failed" => Ok(HostState::Failed),
            "inprogress" => Ok(HostState::InProgress),
            _ => Err(ClientError::InvalidState(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_pipeline_spellings() {
        assert_eq!("successful".parse::<HostState>().unwrap(), HostState::Successful);
        assert_eq!("FAILED".parse::<HostState>().unwrap(), HostState::Failed);
        assert_eq!("in-progress".parse::<HostState>().unwrap(), HostState::InProgress);
        assert_eq!("in_progress".parse::<HostState>().unwrap(), HostState::InProgress);
        assert_eq!("INPROGRESS".parse::<HostState>().unwrap(), HostState::InProgress);
    }

    #[test]
    fn test_rejects_unknown_state() {
        let err = "passed".parse::<HostState>().unwrap_err();
        assert_eq!(err, ClientError::InvalidState("passed".to_string()));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(HostState::InProgress.as_str(), "INPROGRESS");
    }
}
