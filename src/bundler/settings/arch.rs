//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture reported by the host.
///
/// Parsed from the machine hardware name (`uname -m`). Only
/// [`Arch::X86_64`] hosts can build NAP.
///
/// # Examples
///
/// ```
/// use nap_packager::bundler::Arch;
///
/// assert_eq!(Arch::from_machine("x86_64"), Arch::X86_64);
/// assert_eq!(Arch::from_machine("aarch64"), Arch::AArch64);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
    /// 32-bit ARM
    Arm,
    /// RISC-V (64-bit)
    Riscv64,
    /// Anything else, verbatim
    Other(String),
}

impl Arch {
    /// Parses a machine hardware name as printed by `uname -m`.
    ///
    /// Matching is exact: `X86_64` or `amd64` are not treated as x86_64.
    pub fn from_machine(machine: &str) -> Self {
        match machine.trim() {
            "x86_64" => Self::X86_64,
            "i386" | "i486" | "i586" | "i686" => Self::X86,
            "aarch64" | "arm64" => Self::AArch64,
            m if m.starts_with("arm") => Self::Arm,
            "riscv64" => Self::Riscv64,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86_64 => f.write_str("x86_64"),
            Self::X86 => f.write_str("x86"),
            Self::AArch64 => f.write_str("aarch64"),
            Self::Arm => f.write_str("arm"),
            Self::Riscv64 => f.write_str("riscv64"),
            Self::Other(name) => f.write_str(name),
        }
    }
}
