use crate::error::{Error, Result};
use crate::reference::RepositoryRef;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, LINK, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{debug, trace, warn};
use url::Url;

/// Page size requested from the tags endpoint
const TAGS_PAGE_SIZE: &str = "1000";

/// Source of the raw tag list for a repository
#[async_trait]
pub trait TagLister: Send + Sync {
    /// List every tag published under `repository`, unfiltered
    async fn list_tags(&self, repository: &RepositoryRef) -> Result<Vec<String>>;
}

/// Client for listing tags from OCI-compatible container registries
pub struct RegistryClient {
    client: reqwest::Client,
    /// Raw token (e.g., robot or personal token) for authentication
    auth_token: Option<String>,
    /// Cached bearer token obtained from the registry auth endpoint
    bearer_token: RwLock<Option<String>>,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lvh/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            auth_token: None,
            bearer_token: RwLock::new(None),
        })
    }

    /// Set authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn cached_bearer(&self) -> Option<String> {
        self.bearer_token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn store_bearer(&self, token: String) {
        *self.bearer_token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    /// GET with whatever credentials we currently hold
    async fn get(&self, url: &Url) -> Result<Response> {
        let request = self.client.get(url.clone());
        let request = match (self.cached_bearer(), &self.auth_token) {
            (Some(bearer), _) => request.bearer_auth(bearer),
            (None, Some(token)) => request.bearer_auth(token),
            (None, None) => request,
        };
        Ok(request.send().await?)
    }

    /// GET, answering a single bearer challenge if the registry issues one
    async fn get_authorized(&self, url: &Url, repository: &RepositoryRef) -> Result<Response> {
        let response = self.get(url).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(challenge) = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|h| h.to_str().ok())
            .and_then(BearerChallenge::parse)
        else {
            // Nothing we can answer; let the caller report the 401
            return Ok(response);
        };

        let bearer = self.fetch_bearer(&challenge, repository).await?;
        self.store_bearer(bearer);
        self.get(url).await
    }

    /// Exchange credentials (or nothing, for public repositories) for a bearer token
    async fn fetch_bearer(
        &self,
        challenge: &BearerChallenge,
        repository: &RepositoryRef,
    ) -> Result<String> {
        let mut token_url = Url::parse(&challenge.realm)?;
        {
            let scope = challenge
                .scope
                .clone()
                .unwrap_or_else(|| format!("repository:{}:pull", repository.repository));
            let mut query = token_url.query_pairs_mut();
            query.append_pair("scope", &scope);
            if let Some(service) = &challenge.service {
                query.append_pair("service", service);
            }
        }

        debug!("Requesting registry token from: {}", token_url);

        let request = self.client.get(token_url.clone());
        let request = match &self.auth_token {
            Some(token) => {
                debug!("Using authenticated request for registry token");
                request.basic_auth("token", Some(token))
            }
            None => {
                debug!("Using anonymous request for registry token");
                request
            }
        };
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let hint = if self.auth_token.is_some() {
                "check that the token can pull from this repository"
            } else {
                "this repository may be private; set a registry token"
            };
            return Err(Error::Authentication {
                repository: repository.to_string(),
                message: format!("token request returned {} ({}): {}", status, hint, body),
            });
        }

        let body = response.text().await?;
        let token_response: TokenResponse =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                url: token_url.to_string(),
                source,
            })?;

        token_response
            .token
            .or(token_response.access_token)
            .ok_or_else(|| Error::Authentication {
                repository: repository.to_string(),
                message: "no token field in registry auth response".to_string(),
            })
    }
}

#[async_trait]
impl TagLister for RegistryClient {
    /// List all tags for a repository (handles pagination)
    async fn list_tags(&self, repository: &RepositoryRef) -> Result<Vec<String>> {
        let mut all_tags = Vec::new();
        let mut url = Url::parse(&format!(
            "{}/v2/{}/tags/list",
            repository.base_url(),
            repository.repository
        ))?;
        url.query_pairs_mut().append_pair("n", TAGS_PAGE_SIZE);
        let mut visited = HashSet::from([url.clone()]);

        loop {
            debug!("Listing tags from: {}", url);

            let response = self.get_authorized(&url, repository).await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::RegistryStatus {
                    status,
                    url: url.to_string(),
                    body: if body.is_empty() {
                        "(no response body)".to_string()
                    } else {
                        body
                    },
                });
            }

            // Check for Link header for pagination
            let next_url = response
                .headers()
                .get(LINK)
                .and_then(|h: &HeaderValue| h.to_str().ok())
                .and_then(|link| parse_link_header(link, &url));

            let body = response.text().await?;
            let tags_response: TagsResponse =
                serde_json::from_str(&body).map_err(|source| Error::Decode {
                    url: url.to_string(),
                    source,
                })?;

            all_tags.extend(tags_response.tags.unwrap_or_default());

            // Continue to next page if available
            match next_url {
                Some(next) if visited.insert(next.clone()) => url = next,
                Some(next) => {
                    warn!("Registry linked back to an already listed page: {}", next);
                    break;
                }
                None => break,
            }
        }

        trace!("Found {} tags total", all_tags.len());
        Ok(all_tags)
    }
}

/// Parse Link header for pagination
/// Format: </v2/repo/tags/list?n=1000&last=tag>; rel="next"
fn parse_link_header(link: &str, current: &Url) -> Option<Url> {
    link.split(',')
        .map(str::trim)
        .filter(|part| part.contains("rel=\"next\""))
        .find_map(|part| {
            let start = part.find('<')?;
            let end = part.find('>')?;
            // Relative links resolve against the current page
            current.join(part.get(start + 1..end)?).ok()
        })
}

/// Parsed `WWW-Authenticate: Bearer ...` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
struct BearerChallenge {
    realm: String,
    service: Option<String>,
    scope: Option<String>,
}

impl BearerChallenge {
    fn parse(header: &str) -> Option<Self> {
        // Auth schemes are case-insensitive
        let (scheme, rest) = header.trim_start().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let mut realm = None;
        let mut service = None;
        let mut scope = None;

        let mut remaining = rest;
        while !remaining.is_empty() {
            remaining = remaining.trim_start_matches([' ', ',']);
            if remaining.is_empty() {
                break;
            }

            let eq_pos = remaining.find('=')?;
            let key = &remaining[..eq_pos];
            remaining = &remaining[eq_pos + 1..];

            let value = if let Some(quoted) = remaining.strip_prefix('"') {
                let close = quoted.find('"')?;
                let v = quoted[..close].to_string();
                remaining = &quoted[close + 1..];
                v
            } else {
                let end = remaining.find([',', ' ']).unwrap_or(remaining.len());
                let v = remaining[..end].to_string();
                remaining = &remaining[end..];
                v
            };

            match key {
                "realm" => realm = Some(value),
                "service" => service = Some(value),
                "scope" => scope = Some(value),
                _ => {}
            }
        }

        realm.map(|realm| Self {
            realm,
            service,
            scope,
        })
    }
}

// Internal types for registry API responses

#[derive(Debug, Deserialize)]
struct TagsResponse {
    /// Some registries send `null` for a repository without tags
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}
