//! Command implementations

pub mod kernels;
