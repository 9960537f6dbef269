//! GitHub "repository contents" listing.
//!
//! GET {api_base}/repos/{owner}/{name}/contents/{path}?ref={reference}
//!
//! The sub-path is sent as a single escaped segment (`src/lib` becomes
//! `src%2Flib`) and omitted for the root. A credential, when present, is sent
//! as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{ConfigError, FetchError, FetchErrorKind, Location, Result};
use crate::fetch::EntryFetcher;
use crate::models::{CrawlOptions, Credential, DirectoryEntry, RepositoryCoordinate};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const GITHUB_JSON: &str = "application/vnd.github+json";

#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: Client,
    api_base: Url,
}

impl GitHubFetcher {
    pub fn new(api_base: &str) -> std::result::Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(client, api_base)
    }

    /// Use a preconfigured client (proxy, custom timeouts, ...). The client
    /// must set a user agent; GitHub rejects requests without one.
    pub fn with_client(client: Client, api_base: &str) -> std::result::Result<Self, ConfigError> {
        let api_base = Url::parse(api_base).map_err(|e| ConfigError::InvalidApiBase {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;
        if api_base.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase {
                url: api_base.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(Self { client, api_base })
    }

    pub fn from_options(options: &CrawlOptions) -> std::result::Result<Self, ConfigError> {
        Self::new(&options.api_base)
    }

    pub fn contents_url(&self, coordinate: &RepositoryCoordinate, path: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        // Base-ness is checked in with_client, so path_segments_mut cannot fail here.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", coordinate.owner.as_str(), coordinate.name.as_str(), "contents"]);
            if let Some(p) = path.filter(|p| !p.is_empty()) {
                segments.push(p);
            }
        }
        url.query_pairs_mut().append_pair("ref", &coordinate.reference);
        url
    }
}

#[async_trait]
impl EntryFetcher for GitHubFetcher {
    async fn list(
        &self,
        coordinate: &RepositoryCoordinate,
        path: Option<&str>,
        credential: Option<&Credential>,
    ) -> Result<Vec<DirectoryEntry>> {
        let location = || Location::new(coordinate, path);
        let url = self.contents_url(coordinate, path);
        debug!(%url, "Requesting contents");

        let mut request = self.client.get(url).header(ACCEPT, GITHUB_JSON);
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.expose());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::new(location(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                location(),
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(location(), e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::new(location(), e))
    }
}
