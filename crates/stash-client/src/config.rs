//! Connection settings for a Stash host.

use stash_status_core::PublishRequest;

/// Where and how to reach the host.
#[derive(Clone)]
pub struct StashConfig {
    /// Base URL, e.g. `https://stash.example.com`. A trailing `/` is ignored.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Accept any certificate the host presents.
    pub skip_tls_verification: bool,
    pub user_agent: String,
}

impl StashConfig {
    pub fn new(host: &str, username: &str, password: &str) -> Self {
        StashConfig {
            host: host.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            skip_tls_verification: false,
            user_agent: format!("stash-status/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_skip_tls_verification(mut self, skip: bool) -> Self {
        self.skip_tls_verification = skip;
        self
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// Endpoint that accepts build statuses for `commit`.
    pub fn build_status_url(&self, commit: &str) -> String {
        format!("{}/rest/build-status/1.0/commits/{}", self.base_url(), commit)
    }
}

impl From<&PublishRequest> for StashConfig {
    fn from(req: &PublishRequest) -> Self {
        StashConfig::new(&req.host, &req.username, &req.password)
            .with_skip_tls_verification(req.skip_tls_verification)
    }
}

impl std::fmt::Debug for StashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StashConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("skip_tls_verification", &self.skip_tls_verification)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_status_url_trims_trailing_slash() {
        let config = StashConfig::new("https://stash.example.com/", "ci", "secret");
        assert_eq!(
            config.build_status_url("abc"),
            "https://stash.example.com/rest/build-status/1.0/commits/abc"
        );
    }

    #[test]
    fn test_config_from_request() {
        let req = PublishRequest {
            host: "https://stash.example.com".to_string(),
            username: "ci".to_string(),
            password: "secret".to_string(),
            retry_attempts: 0,
            skip_tls_verification: true,
            fail_fast: false,
            repository_path: "repo".to_string(),
            desired_state: "failed".to_string(),
            description: String::new(),
        };
        let config = StashConfig::from(&req);
        assert_eq!(config.host, "https://stash.example.com");
        assert_eq!(config.username, "ci");
        assert!(config.skip_tls_verification);
        assert!(!format!("{config:?}").contains("secret"));
    }
}
