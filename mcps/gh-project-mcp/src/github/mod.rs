//! GitHub GraphQL access
//!
//! The client, its error taxonomy, the executor seam the handlers use, and
//! the Projects v2 documents they send.

pub mod client;
pub mod error;
pub mod executor;
pub mod queries;

pub use client::GitHubClient;
pub use error::{GitHubError, GitHubResult};
pub use executor::{execute_typed, GraphQlExecutor};
