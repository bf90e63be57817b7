//! # airhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that the storage adapter must implement
//!   (driven/outbound port): [`ports::ReadingRepository`]
//! - Define the **driving/inbound port** as a use-case struct:
//!   [`services::reading_service::ReadingService`] — record, query, latest,
//!   recent, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `airhub-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
