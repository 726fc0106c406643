//! Shortlnk - a minimal URL shortener service
//!
//! This library provides the core functionality for the Shortlnk service:
//! deterministic SHA-256-derived short hashes, a storage backend, HTTP
//! handlers for creation and resolution, and fire-and-forget view counting.
//!
//! # Architecture
//! - `api`: HTTP services (creation, resolution, landing page)
//! - `storage`: link store trait and SeaORM backend
//! - `views`: buffered view counting and flush
//! - `config`: environment configuration
//! - `runtime`: application lifecycle and server mode
//! - `system`: logging initialization

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
pub mod views;
