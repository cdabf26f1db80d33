//! Queries against a live Bazel workspace.
//!
//! All workspace inspection goes through the [`BazelWorkspace`] port so the
//! resolver and catalog builder can be tested against deterministic
//! in-memory implementations instead of a real build tool.
//!
//! The [`adapters`] module provides the subprocess-backed default and an
//! in-memory implementation for embedding and tests.

pub mod adapters;
pub mod ports;

pub use adapters::{ShellWorkspace, StaticWorkspace};
pub use ports::{BazelWorkspace, EXTERNAL_PREFIX, QUERY_NOT_FOUND, QueryError};
