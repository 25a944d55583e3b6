//! Stash (Bitbucket Server) client for stash-status
//!
//! Implements [`stash_status_core::StatusClient`] against the host's
//! build-status REST API:
//!
//! `POST {host}/rest/build-status/1.0/commits/{commit}`
//!
//! Authentication is HTTP basic auth. Certificate verification can be turned
//! off for hosts with self-signed certificates.

mod client;
mod config;
mod state;

pub use client::StashClient;
pub use config::StashConfig;
pub use state::HostState;
