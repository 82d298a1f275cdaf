//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use lvh_kernels::DEFAULT_KERNEL_REPOSITORY;

/// lvh - little-vm-helper
#[derive(Parser, Debug)]
#[command(name = "lvh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Kernel image management
    #[command(subcommand)]
    Kernels(KernelsCommands),
}

#[derive(Subcommand, Debug)]
pub enum KernelsCommands {
    /// List available tags for kernel images from cilium/little-vm-helper-images
    #[command(long_about = CATALOG_LONG_ABOUT)]
    Catalog(CatalogArgs),
}

const CATALOG_LONG_ABOUT: &str = "\
List the available tags for kernel images built from cilium/little-vm-helper-images

Examples:
  # List all available versions
  lvh kernels catalog

  # List the tags available for version 6.6
  lvh kernels catalog 6.6

  # Retrieve the latest tags available for version bpf-next
  lvh kernels catalog bpf-next | tail -n 2

  # Retrieve the latest CI-generated images for version bpf-next
  lvh kernels catalog bpf-next --repo quay.io/lvh-images/kernel-images-ci";

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Kernel version to list tags for (e.g., 6.6, bpf-next)
    #[arg(id = "kernel_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// OCI repository to list kernel images from
    #[arg(long, env = "LVH_KERNEL_REPO", default_value = DEFAULT_KERNEL_REPOSITORY)]
    pub repo: String,

    /// Registry token for private repositories
    #[arg(long, env = "LVH_REGISTRY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
