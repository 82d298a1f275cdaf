//! Kernel image catalog for lvh
//!
//! This crate provides functionality for:
//! - Listing raw tags from OCI-compatible registries (quay.io, Docker Hub, etc.)
//! - Classifying kernel image tags and grouping them by logical version
//! - Projecting the catalog as an ascending version list, or as the
//!   lexically sorted builds of a single version
//!
//! # Example
//!
//! ```no_run
//! use lvh_kernels::{fetch_catalog, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lvh_kernels::Error> {
//!     let config = CatalogConfig::default();
//!     let client = config.registry_client()?;
//!
//!     let catalog = fetch_catalog(&client, &config.repository_ref()?).await?;
//!     for tag in catalog.tags("bpf-next")? {
//!         println!("{}", tag);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod ordering;
pub mod query;
pub mod reference;
pub mod registry;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use classify::{classify, KernelTag};
pub use config::{CatalogConfig, DEFAULT_KERNEL_REPOSITORY};
pub use error::{Error, Result};
pub use ordering::{compare_tags, compare_versions};
pub use query::{fetch_catalog, run_query, CatalogQuery};
pub use reference::RepositoryRef;
pub use registry::{RegistryClient, TagLister};

/// Version of the lvh-kernels crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
