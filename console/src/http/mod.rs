// File: console/src/http/mod.rs
//! HTTP communication with the hypervisor daemon
//!
//! The console never executes actions itself. It asks the daemon to perform
//! them and tracks the operation the daemon hands back.
//!
//! # Communication Pattern
//!
//! ```text
//! Console → PUT/POST action → Daemon
//!    ↓                          ↓
//! EventQueue ← operation id ← 202 async response
//!    ↓
//! Poller → GET /1.0/operations/{id}/wait → terminal event → dispatcher
//! ```
//!
//! Synchronous endpoints (e.g. deleting a warning) answer with a `sync`
//! response and no operation id.

pub mod lxd_client;
pub mod responses;

pub use lxd_client::LxdClient;
