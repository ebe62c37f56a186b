//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Repository facts (Descriptor, ModuleLayout, Finding)
//! - Traits: Abstractions for infrastructure (Check, KnownRepositories)

pub mod entities;
pub mod traits;
