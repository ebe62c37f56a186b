//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Index: Known-repositories persistence and remote fetch
//! - Pysrc: Python source scraping
//! - Workspace: Repository tree scanning

pub mod config;
pub mod index;
pub mod pysrc;
pub mod workspace;
