//! Shared utilities for the Sarawak Med contract suite.
//!
//! This crate provides:
//! - [`identity`]: the zero-account sentinel and address checks.
//! - [`ttl`]: storage time-to-live bumping used after every persistent write.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod identity;
pub mod ttl;

pub use identity::*;
pub use ttl::*;
