//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Lint run and scaffolding orchestration
//! - Render: Report output for humans and tooling
//! - Errors: Domain-specific errors

pub mod errors;
pub mod render;
pub mod services;
