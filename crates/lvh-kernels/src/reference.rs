use std::fmt;

use crate::error::{Error, Result};

/// Registry host assumed for references without an explicit one
pub const DEFAULT_REGISTRY: &str = "docker.io";

/// Host actually serving the Docker Hub registry API
const DOCKER_HUB_API_HOST: &str = "registry-1.docker.io";

/// Repository reference split into registry host and repository path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Registry hostname, optionally with port (e.g., "quay.io", "localhost:5000")
    pub registry: String,
    /// Repository path (e.g., "lvh-images/kernel-images")
    pub repository: String,
}

impl RepositoryRef {
    /// Parse a repository string like "quay.io/lvh-images/kernel-images"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_repository(s, "empty repository"));
        }
        if s.contains('@') {
            return Err(Error::invalid_repository(
                s,
                "digest references are not repositories",
            ));
        }

        // Split registry and repository
        let (registry, repository) = match s.split_once('/') {
            Some((first, rest)) if looks_like_host(first) => (first.to_string(), rest.to_string()),
            _ => (DEFAULT_REGISTRY.to_string(), s.to_string()),
        };

        if repository.is_empty() || repository.split('/').any(str::is_empty) {
            return Err(Error::invalid_repository(s, "empty path component"));
        }
        // Any remaining ':' would be a tag, not part of a repository name
        if repository.contains(':') {
            return Err(Error::invalid_repository(
                s,
                "tagged references are not repositories",
            ));
        }

        let repository = if registry == DEFAULT_REGISTRY && !repository.contains('/') {
            format!("library/{}", repository)
        } else {
            repository
        };

        Ok(Self {
            registry,
            repository,
        })
    }

    /// Host serving the registry HTTP API
    pub fn api_host(&self) -> &str {
        if self.registry == DEFAULT_REGISTRY || self.registry == "index.docker.io" {
            DOCKER_HUB_API_HOST
        } else {
            &self.registry
        }
    }

    /// URL scheme for the registry; loopback registries are plain HTTP
    pub fn scheme(&self) -> &'static str {
        let host = self
            .registry
            .rsplit_once(':')
            .map_or(self.registry.as_str(), |(host, _)| host);
        if host == "localhost" || host == "127.0.0.1" {
            "http"
        } else {
            "https"
        }
    }

    /// Base URL of the registry API, e.g. "https://quay.io"
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.api_host())
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.registry, self.repository)
    }
}

/// First path segment is a host if it has a dot or port, or is localhost
fn looks_like_host(segment: &str) -> bool {
    segment.contains('.') || segment.contains(':') || segment == "localhost"
}
