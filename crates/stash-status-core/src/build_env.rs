//! Build identity supplied by the CI orchestrator.
//!
//! The orchestrator exposes the running build through environment variables.
//! They are collected once into [`BuildEnv`] at process start and passed to
//! the publisher, so status construction never reads the process environment.

/// Team used when the orchestrator does not name one.
///
/// Older orchestrators never export the team name; the build URL falls back
/// to the default team in that case.
pub const DEFAULT_TEAM: &str = "main";

pub const ENV_JOB_NAME: &str = "BUILD_JOB_NAME";
pub const ENV_BUILD_ID: &str = "BUILD_ID";
pub const ENV_EXTERNAL_URL: &str = "ATC_EXTERNAL_URL";
pub const ENV_TEAM_NAME: &str = "BUILD_TEAM_NAME";
pub const ENV_PIPELINE_NAME: &str = "BUILD_PIPELINE_NAME";
pub const ENV_BUILD_NAME: &str = "BUILD_NAME";

/// Identity of the build being reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    pub job_name: String,
    pub build_id: String,
    pub external_url: String,
    pub team_name: String,
    pub pipeline_name: String,
    pub build_name: String,
}

impl BuildEnv {
    /// Snapshot the orchestrator variables; unset values become empty strings.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();
        BuildEnv {
            job_name: var(ENV_JOB_NAME),
            build_id: var(ENV_BUILD_ID),
            external_url: var(ENV_EXTERNAL_URL),
            team_name: var(ENV_TEAM_NAME),
            pipeline_name: var(ENV_PIPELINE_NAME),
            build_name: var(ENV_BUILD_NAME),
        }
    }

    /// Status key: the job name.
    pub fn status_key(&self) -> String {
        self.job_name.clone()
    }

    /// Status name: job name and build id.
    pub fn status_name(&self) -> String {
        format!("{}-{}", self.job_name, self.build_id)
    }

    pub fn team(&self) -> &str {
        if self.team_name.is_empty() {
            DEFAULT_TEAM
        } else {
            &self.team_name
        }
    }

    /// Deep link back to the build in the orchestrator's web UI.
    pub fn build_url(&self) -> String {
        format!(
            "{}/teams/{}/pipelines/{}/jobs/{}/builds/{}",
            self.external_url,
            self.team(),
            self.pipeline_name,
            self.job_name,
            self.build_name
        )
    }
}
