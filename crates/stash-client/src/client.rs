//! Stash build-status REST client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stash_status_core::{BuildStatus, ClientError, CommitId, StatusClient};
use tracing::{debug, warn};

use crate::config::StashConfig;
use crate::state::HostState;

/// Upper bound for establishing a connection to the host.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `POST /rest/build-status/1.0/commits/{commit}`.
#[derive(Debug, Serialize)]
struct StatusPayload<'a> {
    state: &'static str,
    key: &'a str,
    name: &'a str,
    url: &'a str,
    description: &'a str,
}

/// Fields the host may echo back after recording a status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordedStatus {
    #[serde(default)]
    date_added: Option<i64>,
}

/// Client for the build-status API of one Stash host.
pub struct StashClient {
    config: StashConfig,
    http_client: reqwest::Client,
}

impl StashClient {
    /// Build a client for the configured host.
    pub fn new(config: StashConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(CONNECT_TIMEOUT)
            .danger_accept_invalid_certs(config.skip_tls_verification)
            .build()
            .map_err(transport_error)?;

        Ok(StashClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &StashConfig {
        &self.config
    }
}

#[async_trait]
impl StatusClient for StashClient {
    async fn set_build_status(
        &self,
        commit: &CommitId,
        status: &BuildStatus,
    ) -> Result<Option<BuildStatus>, ClientError> {
        let state: HostState = status.state.parse()?;
        let payload = StatusPayload {
            state: state.as_str(),
            key: &status.key,
            name: &status.name,
            url: &status.url,
            description: &status.description,
        };
        let url = self.config.build_status_url(commit.as_str());
        debug!(%url, state = state.as_str(), "Posting build status");

        let mut request = self.http_client.post(&url).json(&payload);
        if !self.config.username.is_empty() {
            request = request.basic_auth(&self.config.username, Some(&self.config.password));
        }

        let response = request.send().await.map_err(transport_error)?;
        let code = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !code.is_success() {
            return Err(ClientError::Status {
                status: code.as_u16(),
                body: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        // A 2xx means the status is recorded, whatever the body looks like.
        if body.iter().all(u8::is_ascii_whitespace) {
            debug!(status = code.as_u16(), "Host acknowledged build status");
            return Ok(None);
        }

        match serde_json::from_slice::<RecordedStatus>(&body) {
            Ok(RecordedStatus {
                date_added: Some(date_added),
            }) => Ok(Some(BuildStatus {
                date_added,
                ..status.clone()
            })),
            Ok(RecordedStatus { date_added: None }) => {
                debug!(status = code.as_u16(), "Host response carries no dateAdded");
                Ok(None)
            }
            Err(err) => {
                warn!(
                    status = code.as_u16(),
                    error = %err,
                    "Ignoring unreadable body of accepted build status"
                );
                Ok(None)
            }
        }
    }
}

/// Render a reqwest error with its full cause chain.
fn transport_error(err: reqwest::Error) -> ClientError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    ClientError::Transport(message)
}
