//! Project packaging: resolve, build with the native toolchain, archive.
//!
//! ```no_run
//! use nap_packager::bundler::{Packager, Platform, SettingsBuilder};
//!
//! # async fn example() -> nap_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .nap_root("/opt/nap")
//!     .platform(Platform::Windows)
//!     .build()?;
//! let outcome = Packager::new(settings).package("LightSequencer").await?;
//! # Ok(())
//! # }
//! ```

mod artifact;
mod builder;
pub mod error;
mod platform;
mod process;
mod settings;
pub mod utils;

pub use artifact::{
    BundledArtifact, PackageArtifact, TIMESTAMP_FORMAT, build_archive_name, timestamp_now,
};
pub use builder::{PackageOutcome, Packager, calculate_sha256};
pub use error::{Error, Result};
pub use platform::{
    ArchiveFormat, LinuxStrategy, MacOsStrategy, PackageContext, Platform, PlatformStrategy,
    WindowsStrategy, strategy_for,
};
pub use process::{CommandRunner, SystemRunner, ToolCommand};
pub use settings::{Arch, PackagingLayout, Settings, SettingsBuilder};
