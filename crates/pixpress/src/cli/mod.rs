//! Command implementations.

pub mod compress;
pub mod config;
