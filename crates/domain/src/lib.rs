//! # airhub-domain
//!
//! Pure domain model for the airhub sensor reading service.
//!
//! ## Responsibilities
//! - Foundational types: reading identifiers, error conventions, timestamps
//! - Define **Readings** (immutable timestamped air samples)
//! - Define **Devices** (fixed-identity data sources within a configured count)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
pub mod reading;
pub mod time;
