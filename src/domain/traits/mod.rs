//! Domain traits - Abstractions for infrastructure implementations

pub mod check;
pub mod index;

pub use check::{Check, CheckContext};
pub use index::{KnownRepo, KnownRepositories};
