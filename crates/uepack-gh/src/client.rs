use tracing::debug;

use uepack_core::constants::{GITHUB_API_URL, GITHUB_UPLOADS_URL};
use uepack_core::ReleaseSettings;

use crate::{ApiError, NewRelease, Release, ReleaseApi, RepoRef};

const API_VERSION: &str = "2022-11-28";

/// Blocking GitHub REST client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    token: String,
    api_base: String,
    uploads_base: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: GITHUB_API_URL.to_string(),
            uploads_base: GITHUB_UPLOADS_URL.to_string(),
        }
    }

    /// Client for the hosts and token in `settings`.
    pub fn from_settings(settings: &ReleaseSettings) -> Self {
        Self::new(settings.token.clone()).with_base_urls(&settings.api_url, &settings.uploads_url)
    }

    /// Points the client at another host, e.g. GitHub Enterprise.
    pub fn with_base_urls(mut self, api_base: &str, uploads_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self.uploads_base = uploads_base.trim_end_matches('/').to_string();
        self
    }

    fn releases_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/releases", self.api_base, repo.owner, repo.repo)
    }

    fn assets_url(&self, repo: &RepoRef, release_id: u64) -> String {
        format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.uploads_base, repo.owner, repo.repo, release_id
        )
    }

    fn post(&self, url: &str) -> ureq::Request {
        ureq::post(url)
            .set("Accept", "application/vnd.github+json")
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("X-GitHub-Api-Version", API_VERSION)
    }
}

impl ReleaseApi for GithubClient {
    fn create_release(&self, repo: &RepoRef, release: &NewRelease) -> Result<Release, ApiError> {
        let url = self.releases_url(repo);
        debug!("POST {}", url);
        let response = self.post(&url).send_json(release)?;
        response
            .into_json::<Release>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn upload_asset(
        &self,
        repo: &RepoRef,
        release_id: u64,
        name: &str,
        content: &[u8],
    ) -> Result<(), ApiError> {
        let url = self.assets_url(repo, release_id);
        debug!("POST {}?name={}", url, name);
        self.post(&url)
            .set("Content-Type", "application/octet-stream")
            .query("name", name)
            .send_bytes(content)?;
        Ok(())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => ApiError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
        }
    }
}
