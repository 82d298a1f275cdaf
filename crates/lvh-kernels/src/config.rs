//! Catalog configuration passed down from the command line

use crate::error::Result;
use crate::reference::RepositoryRef;
use crate::registry::RegistryClient;

/// Repository holding the published kernel images
pub const DEFAULT_KERNEL_REPOSITORY: &str = "quay.io/lvh-images/kernel-images";

/// Where to list kernel tags from, and with which credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Repository identifier, e.g. "quay.io/lvh-images/kernel-images-ci"
    pub repository: String,
    /// Optional registry token
    pub token: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_KERNEL_REPOSITORY.to_string(),
            token: None,
        }
    }
}

impl CatalogConfig {
    pub fn new(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Parsed repository reference
    pub fn repository_ref(&self) -> Result<RepositoryRef> {
        RepositoryRef::parse(&self.repository)
    }

    /// Registry client carrying the configured token
    pub fn registry_client(&self) -> Result<RegistryClient> {
        let client = RegistryClient::new()?;
        Ok(match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }
}
