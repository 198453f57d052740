//! Packaging orchestration and coordination.
//!
//! This module provides the main [`Packager`] orchestrator that resolves a
//! project, delegates generate/build/archive to the platform strategy and
//! returns a [`PackageOutcome`].
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for archives
//! - [`orchestrator`] - Main [`Packager`] struct and packaging sequence

mod checksum;
mod orchestrator;

pub use checksum::calculate_sha256;
pub use orchestrator::{PackageOutcome, Packager};
