//! Catalog queries: fetch once, then project one of the two views

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::reference::RepositoryRef;
use crate::registry::TagLister;

/// Which view of the catalog the caller wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Every logical version, ascending
    Versions,
    /// Every tag of one logical version, lexically sorted
    Tags(String),
}

impl CatalogQuery {
    /// Versions when no version argument was given, tags otherwise
    pub fn from_version(version: Option<String>) -> Self {
        match version {
            Some(version) => Self::Tags(version),
            None => Self::Versions,
        }
    }
}

/// List the repository's tags once and build a catalog from them.
///
/// Lister errors are returned unchanged.
pub async fn fetch_catalog(lister: &dyn TagLister, repository: &RepositoryRef) -> Result<Catalog> {
    let raw_tags = lister.list_tags(repository).await?;
    debug!("Fetched {} raw tags from {}", raw_tags.len(), repository);
    Ok(Catalog::build(raw_tags))
}

/// Project the requested view from a built catalog
pub fn run_query(catalog: &Catalog, query: &CatalogQuery) -> Result<Vec<String>> {
    match query {
        CatalogQuery::Versions => Ok(catalog.versions()),
        CatalogQuery::Tags(version) => catalog.tags(version),
    }
}
