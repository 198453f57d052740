//! Build environment verification for Linux hosts.
//!
//! [`EnvironmentChecker`] queries the host for architecture, distribution,
//! distribution version, required apt packages and the default C++ compiler.
//! Architecture and distribution mismatches are fatal. Missing packages can be
//! installed through `apt-get` after the user approves, after which the checks
//! run again.
//!
//! # Example
//!
//! ```no_run
//! use nap_packager::bundler::SystemRunner;
//! use nap_packager::cli::OutputManager;
//! use nap_packager::environment::{EnvironmentChecker, Requirements};
//!
//! # async fn example() -> Result<(), nap_packager::environment::EnvironmentError> {
//! let output = OutputManager::new(false, false);
//! let checker = EnvironmentChecker::new(&SystemRunner, &output, Requirements::default());
//! checker.run(&mut |_question: &str| true).await?;
//! # Ok(())
//! # }
//! ```

mod probe;

pub use probe::{alternative_selects, dpkg_reports_installed, lsb_field};

use crate::{
    bundler::{Arch, CommandRunner, Error as BundlerError, ToolCommand},
    cli::OutputManager,
};
use std::{cell::RefCell, io};

/// Answers a yes/no question. Used to approve package installation.
pub type Confirm<'a> = dyn FnMut(&str) -> bool + 'a;

/// Host requirements for building NAP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirements {
    /// Architecture reported by `uname -m`.
    pub architecture: Arch,
    /// Lowercase `lsb_release` distributor id.
    pub distribution: String,
    /// `lsb_release` release.
    pub distribution_version: String,
    /// apt packages that must be installed.
    pub packages: Vec<String>,
    /// Binary the `c++` alternative must point to.
    pub compiler: String,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            architecture: Arch::X86_64,
            distribution: "ubuntu".into(),
            distribution_version: "18.04".into(),
            packages: vec![
                "build-essential".into(),
                "patchelf".into(),
                "libglu1-mesa-dev".into(),
            ],
            compiler: "g++".into(),
        }
    }
}

/// Outcome of a single check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckResult {
    pub test_name: String,
    pub passed: bool,
}

/// What to do after a round of checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every required check passed.
    Ready,
    /// Packages were installed; run the checks again.
    Retry,
    /// Issues remain that the user has to resolve.
    Stop,
}

/// Errors that end the environment check.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The host can never build NAP; checking stops immediately.
    #[error("{message}")]
    FatalMismatch {
        /// Failed check
        check: &'static str,
        /// Explanation shown to the user
        message: String,
    },

    /// A host query could not be run.
    #[error(transparent)]
    Command(#[from] BundlerError),

    /// Writing to the console failed.
    #[error("console output failed: {0}")]
    Output(#[from] io::Error),
}

type Result<T> = std::result::Result<T, EnvironmentError>;

/// Runs the build environment checks.
///
/// Each missing package is offered for installation once. A package still
/// missing after its installation ran stops the checks instead of asking
/// again.
pub struct EnvironmentChecker<'a> {
    runner: &'a dyn CommandRunner,
    output: &'a OutputManager,
    requirements: Requirements,
    assume_yes: bool,
    attempted: RefCell<Vec<String>>,
}

impl<'a> EnvironmentChecker<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        output: &'a OutputManager,
        requirements: Requirements,
    ) -> Self {
        Self {
            runner,
            output,
            requirements,
            assume_yes: false,
            attempted: RefCell::new(Vec::new()),
        }
    }

    /// Passes `-y` to `apt-get` so installation runs unattended.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Passes if the host reports the required 64-bit x86 architecture.
    pub async fn check_architecture(&self) -> Result<CheckResult> {
        let machine = Arch::from_machine(&self.query(ToolCommand::new("uname").arg("-m")).await?);
        log::debug!("Host architecture: {}", machine);
        let passed = machine == self.requirements.architecture;
        self.report("x86-64 architecture", passed)
    }

    /// Passes if the distributor id matches, ignoring case.
    pub async fn check_distribution(&self) -> Result<CheckResult> {
        let output = self.query(ToolCommand::new("lsb_release").arg("-i")).await?;
        let passed = lsb_field(&output)
            .is_some_and(|id| id.eq_ignore_ascii_case(&self.requirements.distribution));
        self.report("Ubuntu distribution", passed)
    }

    /// Passes if the distribution release matches exactly.
    pub async fn check_distribution_version(&self) -> Result<CheckResult> {
        let output = self.query(ToolCommand::new("lsb_release").arg("-r")).await?;
        let passed = lsb_field(&output) == Some(self.requirements.distribution_version.as_str());
        self.report(&format!("Ubuntu {}", self.requirements.distribution_version), passed)
    }

    /// Passes if dpkg lists `name` as installed.
    pub async fn check_package_installed(&self, name: &str) -> Result<CheckResult> {
        let output = self.query(ToolCommand::new("dpkg").args(["-l", name])).await?;
        let passed = dpkg_reports_installed(&output, name);
        self.report(&format!("for {name} package"), passed)
    }

    /// Passes if the `c++` alternative resolves to `toolchain_name`.
    pub async fn check_compiler_is_default(&self, toolchain_name: &str) -> Result<CheckResult> {
        let output = self
            .query(ToolCommand::new("update-alternatives").args(["--query", "c++"]))
            .await?;
        let passed = alternative_selects(&output, toolchain_name);
        self.report("C++ is GCC", passed)
    }

    /// Runs every check once and offers to install missing packages.
    ///
    /// # Errors
    ///
    /// [`EnvironmentError::FatalMismatch`] if the architecture or distribution
    /// is unsupported. Later checks are not run in that case.
    pub async fn run_all_checks(&self, confirm: &mut Confirm<'_>) -> Result<CheckOutcome> {
        if !self.check_architecture().await?.passed {
            return Err(EnvironmentError::FatalMismatch {
                check: "architecture",
                message: "NAP only supports x86-64 systems. Not continuing checks.".into(),
            });
        }

        if !self.check_distribution().await?.passed {
            return Err(EnvironmentError::FatalMismatch {
                check: "distribution",
                message: format!(
                    "This version of NAP supports Ubuntu Linux ({}).  Other distributions may work but are unsupported.\n\
                     Hint for the adventurous: On Ubuntu we depend on {}\n\n\
                     Not continuing checks.",
                    self.requirements.distribution_version,
                    join_and(&self.requirements.packages)
                ),
            });
        }

        let version = self.check_distribution_version().await?;

        let mut missing = Vec::new();
        for package in &self.requirements.packages {
            if !self.check_package_installed(package).await?.passed {
                missing.push(package.clone());
            }
        }

        let compiler = self
            .check_compiler_is_default(&self.requirements.compiler)
            .await?;

        self.output.println("")?;

        if version.passed && compiler.passed && missing.is_empty() {
            self.output
                .success("Your build environment appears to be ready for NAP!")?;
            return Ok(CheckOutcome::Ready);
        }

        self.output.println("Some issues were encountered:")?;

        if !version.passed {
            self.output.warn(&format!(
                "This version of NAP is supported on Ubuntu {}.  Other Linux configurations may work but are unsupported.",
                self.requirements.distribution_version
            ))?;
        }

        if !compiler.passed {
            self.output.warn(
                "Your C++ compiler is not currently set to GCC. This release of NAP only currently supports GCC.",
            )?;
            return Ok(CheckOutcome::Stop);
        }

        if missing.is_empty() {
            return Ok(CheckOutcome::Stop);
        }

        self.offer_install(&missing, confirm).await
    }

    /// Repeats [`run_all_checks`](Self::run_all_checks) until it stops
    /// asking for a retry.
    pub async fn run(&self, confirm: &mut Confirm<'_>) -> Result<CheckOutcome> {
        loop {
            match self.run_all_checks(confirm).await? {
                CheckOutcome::Retry => self.output.println("\nRe-running checks...\n")?,
                outcome => return Ok(outcome),
            }
        }
    }

    async fn offer_install(&self, missing: &[String], confirm: &mut Confirm<'_>) -> Result<CheckOutcome> {
        let package_list = missing.join(" ");
        let retried: Vec<&String> = {
            let attempted = self.attempted.borrow();
            missing.iter().filter(|p| attempted.contains(p)).collect()
        };
        if !retried.is_empty() {
            let names: Vec<String> = retried.into_iter().cloned().collect();
            self.output.warn(&format!(
                "Installation did not provide {}. Install the requirements manually and re-run the build environment check.",
                join_and(&names)
            ))?;
            return Ok(CheckOutcome::Stop);
        }

        self.output.println(&format!(
            "\nThe following package/s are required and are not installed: {package_list}"
        ))?;

        if !confirm("Kick off installation via apt?") {
            self.output.println(
                "Re-run the build environment check once you have installed the requirements.",
            )?;
            return Ok(CheckOutcome::Stop);
        }

        self.attempted.borrow_mut().extend(missing.iter().cloned());

        let mut install = ToolCommand::new("sudo").args(["apt-get", "install"]);
        if self.assume_yes {
            install = install.arg("-y");
        }
        let install = install.args(missing.iter().map(String::as_str));

        if let Err(e) = self.runner.run(&install).await {
            self.output
                .warn(&format!("Package installation did not complete: {e}"))?;
            return Ok(CheckOutcome::Stop);
        }
        Ok(CheckOutcome::Retry)
    }

    /// Runs a host query. A tool that is not installed answers with empty
    /// output, which every check treats as a failure or an absent setting.
    async fn query(&self, cmd: ToolCommand) -> Result<String> {
        match self.runner.capture(&cmd).await {
            Ok(output) => Ok(output),
            Err(BundlerError::ToolNotFound { tool }) => {
                log::debug!("{} is not installed; treating `{}` output as empty", tool, cmd);
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn report(&self, test_name: &str, passed: bool) -> Result<CheckResult> {
        self.output.println(&format!(
            "Checking {}: {}",
            test_name,
            if passed { "PASS" } else { "FAIL" }
        ))?;
        Ok(CheckResult {
            test_name: test_name.to_string(),
            passed,
        })
    }
}

/// `a, b and c`
fn join_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
