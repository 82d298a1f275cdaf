//! Kernel catalog: tags grouped by logical version
//!
//! A [`Catalog`] is built once from the raw tag list of a repository and is
//! read-only afterwards. It projects two views: the ascending list of logical
//! versions, and the lexically sorted tags of one version.

use std::collections::BTreeMap;

use tracing::debug;

use crate::classify::classify;
use crate::error::{Error, Result};
use crate::ordering::{compare_tags, compare_versions};

/// Tags grouped by logical version label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    buckets: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Build a catalog from raw registry tags.
    ///
    /// Tags that do not classify are dropped. Within a bucket, tags keep
    /// their arrival order and duplicates are kept.
    pub fn build<I, S>(raw_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut seen = 0usize;

        for raw in raw_tags {
            seen += 1;
            if let Some(kernel) = classify(raw.as_ref()) {
                buckets.entry(kernel.label).or_default().push(kernel.tag);
            }
        }

        let catalog = Self { buckets };
        debug!(
            "Built catalog: {} versions from {} tags",
            catalog.len(),
            seen
        );
        catalog
    }

    /// Number of distinct logical versions
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Whether a logical version is present
    pub fn contains(&self, version: &str) -> bool {
        self.buckets.contains_key(version)
    }

    /// Raw bucket for a version, in arrival order
    pub fn get(&self, version: &str) -> Option<&[String]> {
        self.buckets.get(version).map(Vec::as_slice)
    }

    /// All logical versions, ascending by semantic-version order
    pub fn versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = self.buckets.keys().cloned().collect();
        versions.sort_by(|a, b| compare_versions(a, b));
        versions
    }

    /// All tags for one logical version, ascending by lexical order.
    ///
    /// Fails with [`Error::VersionNotFound`] listing every known version when
    /// `version` is not in the catalog.
    pub fn tags(&self, version: &str) -> Result<Vec<String>> {
        let Some(bucket) = self.buckets.get(version) else {
            return Err(Error::VersionNotFound {
                version: version.to_string(),
                available: self.versions(),
            });
        };

        let mut tags = bucket.clone();
        tags.sort_by(|a, b| compare_tags(a, b));
        Ok(tags)
    }

    /// Last tag of the lexical listing for a version
    pub fn latest(&self, version: &str) -> Result<String> {
        let tags = self.tags(version)?;
        // Buckets are only created on insert, so never empty
        Ok(tags.last().cloned().unwrap_or_default())
    }
}
