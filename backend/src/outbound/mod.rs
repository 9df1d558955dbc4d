//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **identity_directory**: the provider's live account list, read over
//!   HTTP or from an exported file.
//! - **memory**: a process-local store used when no database is configured
//!   and by the HTTP tests.

pub mod identity_directory;
pub mod memory;
pub mod persistence;
