//! Common test infrastructure for lvh-kernels tests
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod mock_registry;

pub use mock_registry::*;

use async_trait::async_trait;
use lvh_kernels::{Error, RepositoryRef, Result, TagLister};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Repository path used against the mock registry
pub const TEST_REPOSITORY: &str = "lvh-images/kernel-images";

/// Tag list resembling a real kernel-images repository
pub const SAMPLE_TAGS: &[&str] = &[
    "6.6-20240101.101010",
    "6.6-20240215.080000",
    "6.6-main",
    "6.6-latest-20240101.101010",
    "6.12-20241201.000000",
    "6.12-main",
    "5.10-20230101.000000",
    "bpf-next-20240301.120000",
    "bpf-next-main",
    "bpf-next-latest-main",
    "latest",
    "sha256-0123abcd.sig",
];

/// In-memory lister returning a fixed tag list and counting calls
pub struct StaticLister {
    tags: Vec<String>,
    calls: AtomicUsize,
}

impl StaticLister {
    pub fn new(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagLister for StaticLister {
    async fn list_tags(&self, _repository: &RepositoryRef) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.clone())
    }
}

/// Lister that always fails the way an unreachable registry would
pub struct FailingLister;

#[async_trait]
impl TagLister for FailingLister {
    async fn list_tags(&self, repository: &RepositoryRef) -> Result<Vec<String>> {
        Err(Error::RegistryStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            url: format!("https://{}/v2/{}/tags/list", repository.registry, repository.repository),
            body: "repository not found".to_string(),
        })
    }
}

/// Repository reference pointing at a mock server
pub fn repository_for(server_uri: &str) -> RepositoryRef {
    let host = server_uri
        .strip_prefix("http://")
        .unwrap_or(server_uri)
        .trim_end_matches('/');
    RepositoryRef::parse(&format!("{}/{}", host, TEST_REPOSITORY))
        .expect("mock repository reference is valid")
}
