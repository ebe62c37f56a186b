//! Known-repositories index: local SQLite store and remote fetch

pub mod db;
pub mod remote;

pub use db::IndexDb;
pub use remote::RemoteIndex;
