//! Study-plan tracker and self-hosted sync server for PgMP exam preparation.
//!
//! The crate ships a deterministic 68-day study calendar, a local-first
//! progress store for one device, and a minimal pairing/sync server that lets
//! several devices share a single progress map through a human-shareable
//! sync code.

pub mod api;
pub mod calendar;
pub mod config;
pub mod models;
pub mod persist;
pub mod plan;
pub mod registry;
pub mod store;
pub mod sync;
