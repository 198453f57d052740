//! Configuration structures for packaging operations.
//!
//! This module provides the packaging [`Settings`], the builder used to
//! construct them and the directory layout of a NAP tree.

mod arch;
mod builder;
mod core;
mod layout;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use layout::PackagingLayout;
