//! HTTP request handlers for the console API.
//!
//! This module is organized by domain:
//! - `actions` - Single and bulk actions on instances, members and warnings
//! - `common` - Shared response types, request bodies and error mapping
//! - `operations` - In-flight operations, loading state and the notification

pub mod actions;
pub mod common;
pub mod operations;

pub use actions::*;
pub use operations::*;
